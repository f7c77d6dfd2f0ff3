//! Item positioning
//!
//! The final stage of layout: given a paragraph and its chosen
//! breakpoints, assign every renderable item a line number, an x offset
//! within that line, and a rendered width. Glue gaps absorb each line's
//! adjustment ratio so that box edges land exactly where a justified
//! renderer should paint them.
//!
//! # Example
//!
//! ```
//! use parbreak::{break_lines, forced_break, position_items};
//! use parbreak::{BreakOptions, Item, PositionOptions};
//!
//! let items = vec![
//!     Item::new_box(30.0),
//!     Item::new_glue(10.0, 20.0, 5.0),
//!     Item::new_box(40.0),
//!     Item::new_glue(0.0, 1000.0, 0.0),
//!     forced_break(),
//! ];
//! let breakpoints = break_lines(&items, 100.0, BreakOptions::default()).unwrap();
//! let placed = position_items(&items, 100.0, &breakpoints, PositionOptions::default());
//! assert_eq!(placed.len(), 2);
//! assert_eq!(placed[0].x_offset, 0.0);
//! ```

use crate::breaker::LineWidths;
use crate::item::{Item, MIN_ADJUSTMENT_RATIO};
use crate::ratio::adjustment_ratios;

/// A renderable placement for one input item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedItem {
    /// Index of the item in the input sequence.
    pub item: usize,

    /// Line number, counting from 0.
    pub line: usize,

    /// Horizontal offset from the start of the line.
    pub x_offset: f64,

    /// Rendered width: the box width, the adjusted glue gap, or the
    /// closing penalty's typeset width.
    pub width: f64,
}

/// Options for controlling positioning output
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionOptions {
    /// Emit a record for each interior glue with its adjusted gap width.
    /// Off by default; renderers that only paint boxes and hyphens can
    /// ignore the gaps, which are always reflected in following offsets.
    pub include_glue: bool,
}

impl PositionOptions {
    /// Set whether interior glue records are emitted
    #[must_use]
    pub fn with_include_glue(mut self, include: bool) -> Self {
        self.include_glue = include;
        self
    }
}

/// Compute placements for every renderable item on every line
///
/// Ratios come from [`adjustment_ratios`] and are clamped to
/// [`MIN_ADJUSTMENT_RATIO`], so no line shrinks past its total shrink
/// allowance. Lines with no elastic glue keep every gap at its preferred
/// width.
pub fn position_items<W: Into<LineWidths>>(
    items: &[Item],
    line_widths: W,
    breakpoints: &[usize],
    options: PositionOptions,
) -> Vec<PositionedItem> {
    let widths = line_widths.into();
    let ratios = adjustment_ratios(items, widths, breakpoints);

    let mut placed = Vec::new();
    for (line, ratio) in ratios.iter().enumerate() {
        let ratio = ratio.max(MIN_ADJUSTMENT_RATIO);
        let start = if line == 0 {
            breakpoints[0]
        } else {
            breakpoints[line] + 1
        };
        let end = breakpoints[line + 1];

        let mut x_offset = 0.0;
        for index in start..=end {
            match items[index] {
                Item::Box { width } => {
                    placed.push(PositionedItem {
                        item: index,
                        line,
                        x_offset,
                        width,
                    });
                    x_offset += width;
                }
                Item::Glue {
                    width,
                    stretch,
                    shrink,
                } => {
                    if index != start && index != end {
                        let gap = if ratio.is_finite() {
                            width + ratio * if ratio < 0.0 { shrink } else { stretch }
                        } else {
                            width
                        };
                        if options.include_glue {
                            placed.push(PositionedItem {
                                item: index,
                                line,
                                x_offset,
                                width: gap,
                            });
                        }
                        x_offset += gap;
                    }
                }
                Item::Penalty { width, .. } => {
                    if index == end && width > 0.0 {
                        placed.push(PositionedItem {
                            item: index,
                            line,
                            x_offset,
                            width,
                        });
                    }
                }
            }
        }
    }

    placed
}

//! Per-line adjustment ratios
//!
//! Given a paragraph and a chosen breakpoint sequence, recompute how much
//! each line's glue must stretch (positive ratio) or shrink (negative
//! ratio) to fill its target width exactly. The positioner consumes these
//! to turn items into x offsets; tests use them to check layout quality.

use crate::breaker::LineWidths;
use crate::item::Item;

/// Adjustment ratio for each line implied by `breakpoints`
///
/// Line `b` spans from `breakpoints[b]` (exclusive, except for the first
/// line) to `breakpoints[b+1]` (inclusive). Glue at either end of the
/// line is discarded and does not count; a penalty's width counts only
/// when it closes the line (the typeset hyphen).
///
/// A line with no elastic glue yields ±infinity depending on whether it
/// is underfull or overfull, and exactly 0.0 on a perfect fit.
pub fn adjustment_ratios<W: Into<LineWidths>>(
    items: &[Item],
    line_widths: W,
    breakpoints: &[usize],
) -> Vec<f64> {
    let widths = line_widths.into();
    let line_count = breakpoints.len().saturating_sub(1);
    let mut ratios = Vec::with_capacity(line_count);

    for line in 0..line_count {
        let start = if line == 0 {
            breakpoints[0]
        } else {
            breakpoints[line] + 1
        };
        let end = breakpoints[line + 1];

        let mut actual = 0.0;
        let mut stretch = 0.0;
        let mut shrink = 0.0;
        for index in start..=end {
            match items[index] {
                Item::Box { width } => actual += width,
                Item::Glue {
                    width,
                    stretch: item_stretch,
                    shrink: item_shrink,
                } => {
                    if index != start && index != end {
                        actual += width;
                        stretch += item_stretch;
                        shrink += item_shrink;
                    }
                }
                Item::Penalty { width, .. } => {
                    if index == end {
                        actual += width;
                    }
                }
            }
        }

        let ideal = widths.line(line);
        ratios.push(if actual < ideal {
            if stretch > 0.0 {
                (ideal - actual) / stretch
            } else {
                f64::INFINITY
            }
        } else if actual > ideal {
            if shrink > 0.0 {
                (ideal - actual) / shrink
            } else {
                f64::NEG_INFINITY
            }
        } else {
            0.0
        });
    }

    ratios
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::forced_break;

    #[test]
    fn test_no_lines() {
        assert!(adjustment_ratios(&[], 100.0, &[]).is_empty());
        let items = vec![Item::new_box(10.0)];
        assert!(adjustment_ratios(&items, 100.0, &[0]).is_empty());
    }

    #[test]
    fn test_exact_fit_is_zero() {
        let items = vec![
            Item::new_box(30.0),
            Item::new_glue(10.0, 20.0, 5.0),
            Item::new_box(60.0),
            forced_break(),
        ];
        let ratios = adjustment_ratios(&items, 100.0, &[0, 3]);
        assert_eq!(ratios, vec![0.0]);
    }

    #[test]
    fn test_stretch_and_shrink_sign() {
        let items = vec![
            Item::new_box(30.0),
            Item::new_glue(10.0, 20.0, 5.0),
            Item::new_box(40.0),
            forced_break(),
        ];
        // Underfull by 20 against 20 stretch.
        assert_eq!(adjustment_ratios(&items, 100.0, &[0, 3]), vec![1.0]);
        // Overfull by 5 against 5 shrink.
        assert_eq!(adjustment_ratios(&items, 75.0, &[0, 3]), vec![-1.0]);
    }

    #[test]
    fn test_closing_penalty_width_counts() {
        let items = vec![
            Item::new_box(30.0),
            Item::new_glue(10.0, 20.0, 5.0),
            Item::new_box(40.0),
            Item::new_penalty(5.0, 50.0, true),
            Item::new_box(25.0),
            forced_break(),
        ];
        let ratios = adjustment_ratios(&items, 90.0, &[0, 3, 5]);
        // Line 0 carries the hyphen width: 30 + 10 + 40 + 5 = 85.
        assert_eq!(ratios[0], (90.0 - 85.0) / 20.0);
    }

    #[test]
    fn test_endpoint_glue_discarded_and_inelastic_line() {
        let items = vec![
            Item::new_box(30.0),
            Item::new_glue(10.0, 20.0, 5.0),
            Item::new_box(30.0),
            Item::new_glue(10.0, 20.0, 5.0),
            Item::new_box(30.0),
            forced_break(),
        ];
        let ratios = adjustment_ratios(&items, 80.0, &[0, 3, 5]);
        // Line 0: glue at index 3 ends the line and is discarded.
        assert_eq!(ratios[0], (80.0 - 70.0) / 20.0);
        // Line 1 is a lone box with no glue at all: underfull, inelastic.
        assert_eq!(ratios[1], f64::INFINITY);
    }

    #[test]
    fn test_overfull_inelastic_line() {
        let items = vec![Item::new_box(120.0), forced_break()];
        let ratios = adjustment_ratios(&items, 100.0, &[0, 1]);
        assert_eq!(ratios, vec![f64::NEG_INFINITY]);
    }

    #[test]
    fn test_per_line_widths() {
        let items = vec![
            Item::new_box(30.0),
            Item::new_glue(10.0, 20.0, 5.0),
            Item::new_box(30.0),
            Item::new_glue(10.0, 20.0, 5.0),
            Item::new_box(30.0),
            Item::new_glue(10.0, 20.0, 5.0),
            Item::new_box(30.0),
            forced_break(),
        ];
        let ratios = adjustment_ratios(&items, vec![80.0, 75.0], &[0, 3, 7]);
        assert_eq!(ratios[0], (80.0 - 70.0) / 20.0);
        // Line 1: 30 + 10 + 30 = 70 against the 75-unit second entry.
        assert_eq!(ratios[1], (75.0 - 70.0) / 20.0);
    }
}

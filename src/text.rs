//! Text-to-items conversion
//!
//! Callers own tokenization and measurement; this module provides the
//! one convenience the paragraph model needs everywhere: splitting a
//! plain string into boxes, glue and penalties against a caller-supplied
//! measuring function, with optional hyphenation via a caller-supplied
//! word-to-fragments function (hyphenation dictionaries stay outside
//! this crate).
//!
//! [`layout_text`] packages the standard two-stage strategy on top:
//! break without hyphenation under a strict ratio budget first, and only
//! pay for hyphenation when that fails.

use crate::breaker::{break_lines, BreakOptions, LineWidths};
use crate::error::{Error, Result};
use crate::item::{forced_break, Item, MAX_COST};
use crate::position::{position_items, PositionOptions, PositionedItem};

/// Split a string into typesetting items
///
/// Each whitespace run becomes a glue sized from `measure(" ")` (stretch
/// 1.5x, shrink up to 2 units below preferred); each token becomes a
/// box, or, when `hyphenate` is given, one box per fragment with a
/// flagged hyphen penalty (width `measure("-")`, cost 10) between
/// fragments. The sequence is finished with a zero-width glue of maximal
/// stretch and a forced break so the last line sets ragged-right.
///
/// # Example
///
/// ```
/// use parbreak::layout_items_from_string;
///
/// let measure = |s: &str| 5.0 * s.chars().count() as f64;
/// let items = layout_items_from_string("the quick fox", measure, None);
/// // box glue box glue box, then the finishing glue and forced break.
/// assert_eq!(items.len(), 7);
/// ```
pub fn layout_items_from_string(
    text: &str,
    measure: impl Fn(&str) -> f64,
    hyphenate: Option<&dyn Fn(&str) -> Vec<String>>,
) -> Vec<Item> {
    let space_width = measure(" ");
    let space_glue = Item::new_glue(
        space_width,
        1.5 * space_width,
        (space_width - 2.0).max(0.0),
    );
    let hyphen_width = measure("-");

    let mut items = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let in_whitespace = rest.chars().next().is_some_and(char::is_whitespace);
        let run_end = rest
            .find(|c: char| c.is_whitespace() != in_whitespace)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(run_end);

        if in_whitespace {
            items.push(space_glue);
        } else if let Some(hyphenate) = hyphenate {
            let fragments = hyphenate(run);
            if fragments.is_empty() {
                items.push(Item::new_box(measure(run)));
            } else {
                for (i, fragment) in fragments.iter().enumerate() {
                    if i > 0 {
                        items.push(Item::new_penalty(hyphen_width, 10.0, true));
                    }
                    items.push(Item::new_box(measure(fragment)));
                }
            }
        } else {
            items.push(Item::new_box(measure(run)));
        }

        rest = tail;
    }

    items.push(Item::new_glue(0.0, MAX_COST, 0.0));
    items.push(forced_break());
    items
}

/// A finished paragraph layout
#[derive(Debug, Clone)]
pub struct TextLayout {
    /// The items the breakpoints index into (hyphenated when the second
    /// stage ran).
    pub items: Vec<Item>,
    /// Chosen breakpoint indices.
    pub breakpoints: Vec<usize>,
    /// Placements for every renderable item.
    pub positions: Vec<PositionedItem>,
}

/// Lay out a string in two stages
///
/// The first stage breaks without hyphenation under a hard adjustment
/// ratio of 1. If no such layout exists, the paragraph is rebuilt with
/// `hyphenate` applied and broken again with the budget removed, so the
/// retry always terminates. Hyphenation is therefore only paid for when
/// the cheap layout fails.
///
/// # Errors
///
/// [`Error::InvalidItem`] if `measure` produces negative widths.
pub fn layout_text<W: Into<LineWidths>>(
    text: &str,
    line_widths: W,
    measure: impl Fn(&str) -> f64,
    hyphenate: Option<&dyn Fn(&str) -> Vec<String>>,
) -> Result<TextLayout> {
    let widths = line_widths.into();

    let plain = layout_items_from_string(text, &measure, None);
    let strict = BreakOptions::default().with_max_adjustment_ratio(Some(1.0));
    match break_lines(&plain, widths.clone(), strict) {
        Ok(breakpoints) => {
            let positions =
                position_items(&plain, widths, &breakpoints, PositionOptions::default());
            Ok(TextLayout {
                items: plain,
                breakpoints,
                positions,
            })
        }
        Err(Error::MaxAdjustmentExceeded) => {
            let hyphenated = layout_items_from_string(text, &measure, hyphenate);
            let breakpoints = break_lines(&hyphenated, widths.clone(), BreakOptions::default())?;
            let positions =
                position_items(&hyphenated, widths, &breakpoints, PositionOptions::default());
            Ok(TextLayout {
                items: hyphenated,
                breakpoints,
                positions,
            })
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MIN_COST;

    fn measure(s: &str) -> f64 {
        5.0 * s.chars().count() as f64
    }

    fn split_on_hyphens(word: &str) -> Vec<String> {
        word.split('-').map(str::to_string).collect()
    }

    #[test]
    fn test_simple_tokenization() {
        let items = layout_items_from_string("aa bb", measure, None);
        assert_eq!(
            items,
            vec![
                Item::new_box(10.0),
                Item::new_glue(5.0, 7.5, 3.0),
                Item::new_box(10.0),
                Item::new_glue(0.0, MAX_COST, 0.0),
                Item::new_penalty(0.0, MIN_COST, false),
            ]
        );
    }

    #[test]
    fn test_whitespace_run_is_one_glue() {
        let items = layout_items_from_string("aa \t  bb", measure, None);
        let glue_count = items.iter().filter(|i| i.is_glue()).count();
        // One inter-word glue plus the finishing glue.
        assert_eq!(glue_count, 2);
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        let items = layout_items_from_string(" aa ", measure, None);
        assert!(items[0].is_glue());
        assert!(items[1].is_box());
        assert!(items[2].is_glue());
        // Finishing tail still appended after the trailing run.
        assert!(items[items.len() - 1].is_forced_break());
    }

    #[test]
    fn test_hyphenation_interleaves_flagged_penalties() {
        let hyphenate: &dyn Fn(&str) -> Vec<String> = &split_on_hyphens;
        let items = layout_items_from_string("long-word", measure, Some(hyphenate));
        assert_eq!(
            items,
            vec![
                Item::new_box(20.0),
                Item::new_penalty(5.0, 10.0, true),
                Item::new_box(20.0),
                Item::new_glue(0.0, MAX_COST, 0.0),
                Item::new_penalty(0.0, MIN_COST, false),
            ]
        );
    }

    #[test]
    fn test_empty_string_is_just_the_tail() {
        let items = layout_items_from_string("", measure, None);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_glue());
        assert!(items[1].is_forced_break());
    }

    #[test]
    fn test_layout_text_single_stage() {
        let layout = layout_text("aa bb cc", 40.0, measure, None).unwrap();
        // 10 + 5 + 10 + 5 + 10 = 40: a perfect single line.
        assert_eq!(layout.breakpoints, vec![0, 6]);
        assert_eq!(layout.items.len(), 7);
        assert!(!layout.positions.is_empty());
    }

    #[test]
    fn test_layout_text_falls_back_to_hyphenation() {
        let hyphenate: &dyn Fn(&str) -> Vec<String> = &|word: &str| {
            word.as_bytes()
                .chunks(4)
                .map(|c| String::from_utf8_lossy(c).into_owned())
                .collect()
        };
        // "aa bb" stretches only 7.5 past 25 units, so a 33-unit column
        // is unreachable at ratio 1 without breaking the long word.
        let layout = layout_text("aa bb cc xxxxxxxxxxxx", 33.0, measure, Some(hyphenate)).unwrap();

        // Stage two rebuilt the items with hyphen penalties in place.
        assert!(layout.items.iter().any(|i| i.is_flagged_penalty()));
        assert!(layout.breakpoints.len() > 2);
        let positions_again = position_items(
            &layout.items,
            33.0,
            &layout.breakpoints,
            PositionOptions::default(),
        );
        assert_eq!(positions_again, layout.positions);
    }
}

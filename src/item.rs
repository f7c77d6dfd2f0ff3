//! Typesetting item model
//!
//! A paragraph is a flat sequence of three kinds of items, following the
//! classic box-and-glue model:
//!
//! - **Box**: an opaque typeset unit of fixed width (typically a word or
//!   word fragment). Lines never break at a box.
//! - **Glue**: elastic inter-word space with a preferred width plus
//!   stretch and shrink allowances. A glue is a legal breakpoint when it
//!   immediately follows a box.
//! - **Penalty**: an explicit break candidate with an aesthetic cost.
//!   Costs at or beyond the sentinels force or forbid the break; the
//!   `flagged` bit marks hyphen-like penalties so consecutive flagged
//!   breaks can be discouraged.
//!
//! A well-formed paragraph ends with a zero-width, maximally stretchable
//! glue followed by a forced break, so the last line is ragged-right and
//! the optimizer always has a final breakpoint to land on. The helpers in
//! [`crate::text`] append this tail automatically.
//!
//! # Example
//!
//! ```
//! use parbreak::{forced_break, Item};
//!
//! let items = vec![
//!     Item::new_box(40.0),
//!     Item::new_glue(10.0, 15.0, 8.0),
//!     Item::new_box(55.0),
//!     forced_break(),
//! ];
//! assert!(items[0].is_box());
//! assert!(items[3].is_forced_break());
//! ```

/// Penalty cost at or below which a break is mandatory.
pub const MIN_COST: f64 = -1000.0;

/// Penalty cost at or above which a break is forbidden.
pub const MAX_COST: f64 = 1000.0;

/// Lower bound on the per-line adjustment ratio: no line may shrink by
/// more than its total shrink allowance.
pub const MIN_ADJUSTMENT_RATIO: f64 = -1.0;

/// A single item in a paragraph
///
/// All widths are in the caller's measurement unit (pixels, ems,
/// machine units); the optimizer only compares them against the line
/// widths it is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item {
    /// Unbreakable typeset material of fixed width.
    Box { width: f64 },

    /// Elastic space. `stretch` and `shrink` are the maximum amounts the
    /// glue may grow or contract at adjustment ratio ±1.
    Glue { width: f64, stretch: f64, shrink: f64 },

    /// An explicit break candidate. `width` is typeset only if the break
    /// is taken (e.g. a hyphen); `cost` is clamped in meaning by
    /// [`MIN_COST`] and [`MAX_COST`]; `flagged` participates in the
    /// double-hyphen penalty.
    Penalty { width: f64, cost: f64, flagged: bool },
}

impl Item {
    /// Create a box of the given width
    #[must_use]
    pub fn new_box(width: f64) -> Self {
        Item::Box { width }
    }

    /// Create a glue with preferred width and stretch/shrink allowances
    #[must_use]
    pub fn new_glue(width: f64, stretch: f64, shrink: f64) -> Self {
        Item::Glue {
            width,
            stretch,
            shrink,
        }
    }

    /// Create a penalty break candidate
    #[must_use]
    pub fn new_penalty(width: f64, cost: f64, flagged: bool) -> Self {
        Item::Penalty {
            width,
            cost,
            flagged,
        }
    }

    /// Check if this item is a box
    #[inline]
    pub fn is_box(&self) -> bool {
        matches!(self, Item::Box { .. })
    }

    /// Check if this item is a glue
    #[inline]
    pub fn is_glue(&self) -> bool {
        matches!(self, Item::Glue { .. })
    }

    /// Check if this item is a penalty
    #[inline]
    pub fn is_penalty(&self) -> bool {
        matches!(self, Item::Penalty { .. })
    }

    /// Check if this item is a penalty that forces a break (`cost <= MIN_COST`)
    #[inline]
    pub fn is_forced_break(&self) -> bool {
        match self {
            Item::Penalty { cost, .. } => *cost <= MIN_COST,
            _ => false,
        }
    }

    /// Check if this item is a flagged penalty
    #[inline]
    pub fn is_flagged_penalty(&self) -> bool {
        matches!(self, Item::Penalty { flagged: true, .. })
    }

    /// The typeset width field of the item
    ///
    /// For a penalty this is the width consumed only when the break is
    /// taken at it.
    #[inline]
    pub fn width(&self) -> f64 {
        match self {
            Item::Box { width } => *width,
            Item::Glue { width, .. } => *width,
            Item::Penalty { width, .. } => *width,
        }
    }

    /// The penalty cost, or 0 for boxes and glue
    #[inline]
    pub fn cost(&self) -> f64 {
        match self {
            Item::Penalty { cost, .. } => *cost,
            _ => 0.0,
        }
    }
}

/// A penalty that unconditionally ends the current line
///
/// Paragraphs end with one of these after the finishing glue; explicit
/// hard breaks inside a paragraph use the same item.
#[must_use]
pub fn forced_break() -> Item {
    Item::Penalty {
        width: 0.0,
        cost: MIN_COST,
        flagged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Item::new_box(12.0), Item::Box { width: 12.0 });
        assert_eq!(
            Item::new_glue(5.0, 7.5, 3.0),
            Item::Glue {
                width: 5.0,
                stretch: 7.5,
                shrink: 3.0
            }
        );
        assert_eq!(
            Item::new_penalty(5.0, 10.0, true),
            Item::Penalty {
                width: 5.0,
                cost: 10.0,
                flagged: true
            }
        );
    }

    #[test]
    fn test_predicates() {
        let b = Item::new_box(1.0);
        let g = Item::new_glue(1.0, 1.0, 1.0);
        let p = Item::new_penalty(0.0, 50.0, false);

        assert!(b.is_box() && !b.is_glue() && !b.is_penalty());
        assert!(g.is_glue() && !g.is_box() && !g.is_penalty());
        assert!(p.is_penalty() && !p.is_box() && !p.is_glue());
    }

    #[test]
    fn test_forced_break_sentinel() {
        let fb = forced_break();
        assert!(fb.is_forced_break());
        assert!(!fb.is_flagged_penalty());
        assert_eq!(fb.width(), 0.0);
        assert_eq!(fb.cost(), MIN_COST);
    }

    #[test]
    fn test_cost_below_min_forces() {
        let p = Item::new_penalty(0.0, MIN_COST - 500.0, false);
        assert!(p.is_forced_break());
        let q = Item::new_penalty(0.0, MIN_COST + 1.0, false);
        assert!(!q.is_forced_break());
    }

    #[test]
    fn test_flagged_penalty() {
        assert!(Item::new_penalty(5.0, 10.0, true).is_flagged_penalty());
        assert!(!Item::new_penalty(5.0, 10.0, false).is_flagged_penalty());
        assert!(!Item::new_box(5.0).is_flagged_penalty());
    }

    #[test]
    fn test_width_and_cost_accessors() {
        assert_eq!(Item::new_box(3.0).width(), 3.0);
        assert_eq!(Item::new_glue(4.0, 1.0, 1.0).width(), 4.0);
        assert_eq!(Item::new_penalty(5.0, 10.0, false).width(), 5.0);

        assert_eq!(Item::new_box(3.0).cost(), 0.0);
        assert_eq!(Item::new_penalty(5.0, 10.0, false).cost(), 10.0);
    }
}

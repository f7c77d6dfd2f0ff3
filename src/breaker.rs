//! Optimal line breaking
//!
//! This module implements total-fit paragraph breaking: instead of filling
//! each line greedily, it searches all feasible breakpoint sequences at once
//! and returns the one with the lowest total demerits for the paragraph.
//!
//! # Algorithm
//!
//! The search is a dynamic program over an *active set* of candidate break
//! states. Sweeping the item sequence once, left to right:
//!
//! 1. Running totals of width, stretch and shrink are maintained over every
//!    item scanned so far.
//! 2. At each legal breakpoint (a glue following a box, or a penalty with
//!    cost below [`MAX_COST`]) the adjustment ratio from every active node
//!    to the candidate break is computed from the running totals.
//! 3. Nodes whose line can no longer fit (ratio below
//!    [`MIN_ADJUSTMENT_RATIO`]) are retired, as is every node when the break
//!    is forced.
//! 4. Feasible transitions are scored with the classic demerits formula
//!    (badness cubed into a square, penalty cost, double-hyphen and
//!    adjacent-fitness surcharges) and the best candidate per
//!    (line, fitness class) joins the active set.
//!
//! Two escape valves keep the search total. If the active set empties
//! because every transition wanted more stretch than the current threshold
//! allows, the whole pass is retried with the threshold relaxed to the
//! smallest ratio that would have changed the outcome, bounded by the
//! caller's hard budget ([`Error::MaxAdjustmentExceeded`] when that budget
//! is exhausted). If no amount of stretch would have helped (an oversize
//! box, inelastic glue), a breakpoint is forced on the spot with a flat
//! demerit surcharge, guaranteeing progress.
//!
//! Nodes are arena-allocated in a dense `Vec`, linked by predecessor
//! indices, and the winning chain is read off backward once at the end.
//!
//! # Example
//!
//! ```
//! use parbreak::{break_lines, forced_break, BreakOptions, Item};
//!
//! let items = vec![
//!     Item::new_box(40.0),
//!     Item::new_glue(10.0, 15.0, 5.0),
//!     Item::new_box(45.0),
//!     Item::new_glue(0.0, 1000.0, 0.0),
//!     forced_break(),
//! ];
//! let breakpoints = break_lines(&items, 100.0, BreakOptions::default()).unwrap();
//! assert_eq!(breakpoints, vec![0, 4]);
//! ```

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::item::{Item, MAX_COST, MIN_ADJUSTMENT_RATIO, MIN_COST};

/// Per-line width oracle
///
/// Columns are usually constant, but ragged shapes (drop caps, pull
/// quotes, circular insets) want a width per line. A [`PerLine`] sequence
/// is queried by line index; indices past its end reuse the final entry.
///
/// [`PerLine`]: LineWidths::PerLine
#[derive(Debug, Clone, PartialEq)]
pub enum LineWidths {
    /// Every line has the same width.
    Uniform(f64),
    /// Line `i` has width `widths[i]`; the last entry repeats.
    PerLine(Vec<f64>),
}

impl LineWidths {
    /// Width of the line with the given index
    #[inline]
    pub fn line(&self, index: usize) -> f64 {
        match self {
            LineWidths::Uniform(width) => *width,
            LineWidths::PerLine(widths) => match widths.last() {
                Some(last) => *widths.get(index).unwrap_or(last),
                None => 0.0,
            },
        }
    }
}

impl From<f64> for LineWidths {
    fn from(width: f64) -> Self {
        LineWidths::Uniform(width)
    }
}

impl From<Vec<f64>> for LineWidths {
    fn from(widths: Vec<f64>) -> Self {
        LineWidths::PerLine(widths)
    }
}

impl From<&[f64]> for LineWidths {
    fn from(widths: &[f64]) -> Self {
        LineWidths::PerLine(widths.to_vec())
    }
}

/// Options for controlling the breakpoint search
///
/// # Example
///
/// ```
/// use parbreak::BreakOptions;
///
/// let options = BreakOptions::default()
///     .with_max_adjustment_ratio(Some(2.0))
///     .with_double_hyphen_penalty(3000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakOptions {
    /// Hard upper bound on the per-line adjustment ratio. The threshold
    /// relaxation retry never exceeds it; `None` means unbounded.
    pub max_adjustment_ratio: Option<f64>,

    /// Threshold the first pass runs with. Raised automatically (up to
    /// `max_adjustment_ratio`) when no layout fits.
    pub initial_max_adjustment_ratio: f64,

    /// Demerit surcharge when two consecutive lines both end at flagged
    /// penalties (back-to-back hyphens).
    pub double_hyphen_penalty: f64,

    /// Demerit surcharge when consecutive lines land in fitness classes
    /// more than one step apart (a visibly loose line against a visibly
    /// tight one).
    pub adjacent_loose_tight_penalty: f64,
}

impl Default for BreakOptions {
    fn default() -> Self {
        Self {
            max_adjustment_ratio: None,
            initial_max_adjustment_ratio: 1.0,
            double_hyphen_penalty: 0.0,
            adjacent_loose_tight_penalty: 0.0,
        }
    }
}

impl BreakOptions {
    /// Set the hard adjustment-ratio budget
    #[must_use]
    pub fn with_max_adjustment_ratio(mut self, ratio: Option<f64>) -> Self {
        self.max_adjustment_ratio = ratio;
        self
    }

    /// Set the starting threshold for the first pass
    #[must_use]
    pub fn with_initial_max_adjustment_ratio(mut self, ratio: f64) -> Self {
        self.initial_max_adjustment_ratio = ratio;
        self
    }

    /// Set the double-hyphen demerit surcharge
    #[must_use]
    pub fn with_double_hyphen_penalty(mut self, penalty: f64) -> Self {
        self.double_hyphen_penalty = penalty;
        self
    }

    /// Set the adjacent-fitness demerit surcharge
    #[must_use]
    pub fn with_adjacent_loose_tight_penalty(mut self, penalty: f64) -> Self {
        self.adjacent_loose_tight_penalty = penalty;
        self
    }
}

// ============================================================================
// Search state
// ============================================================================

/// Fitness classes discretize the adjustment ratio so the optimizer can
/// charge for abrupt tightness changes between consecutive lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Fitness {
    VeryTight,
    Tight,
    Loose,
    VeryLoose,
}

impl Fitness {
    #[inline]
    fn from_ratio(ratio: f64) -> Self {
        if ratio < -0.5 {
            Fitness::VeryTight
        } else if ratio < 0.5 {
            Fitness::Tight
        } else if ratio < 1.0 {
            Fitness::Loose
        } else {
            Fitness::VeryLoose
        }
    }

    #[inline]
    fn distance(self, other: Fitness) -> u8 {
        (self as i8 - other as i8).unsigned_abs()
    }
}

/// Running totals over the scanned prefix of the item sequence.
#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    width: f64,
    stretch: f64,
    shrink: f64,
}

/// A candidate break state in the arena.
///
/// `total_*` are cumulative sums up to the first box (or forbidden
/// penalty) after this break, so that leading discardables on the next
/// line never count against it. `prev` forms the back-pointer DAG the
/// final chain is read from.
#[derive(Debug, Clone, Copy)]
struct Node {
    index: usize,
    line: usize,
    fitness: Fitness,
    total_width: f64,
    total_stretch: f64,
    total_shrink: f64,
    total_demerits: f64,
    prev: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    total_demerits: f64,
    prev: usize,
}

enum PassOutcome {
    Complete(Vec<usize>),
    /// The pass starved under the current threshold; the payload is the
    /// smallest ratio that was rejected for wanting too much stretch.
    ThresholdTooTight(f64),
}

// ============================================================================
// Entry point
// ============================================================================

/// Find the optimal breakpoint sequence for a paragraph
///
/// Returns indices into `items` (always starting with 0) at which lines
/// end. The empty sequence yields an empty result; a sequence with no
/// legal breakpoint yields `[0]`.
///
/// # Arguments
///
/// * `items` - The paragraph as boxes, glue and penalties
/// * `line_widths` - A single width or a per-line sequence
/// * `options` - Search budgets and penalty surcharges
///
/// # Errors
///
/// * [`Error::InvalidItem`] - an item has negative width, or glue has
///   negative stretch or shrink
/// * [`Error::MaxAdjustmentExceeded`] - no layout satisfies the caller's
///   hard `max_adjustment_ratio`
pub fn break_lines<W: Into<LineWidths>>(
    items: &[Item],
    line_widths: W,
    options: BreakOptions,
) -> Result<Vec<usize>> {
    validate_items(items)?;
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let widths = line_widths.into();
    let hard_cap = options.max_adjustment_ratio;
    let mut threshold = match hard_cap {
        Some(cap) => options.initial_max_adjustment_ratio.min(cap),
        None => options.initial_max_adjustment_ratio,
    };

    loop {
        match run_pass(items, &widths, threshold, &options) {
            PassOutcome::Complete(breakpoints) => return Ok(breakpoints),
            PassOutcome::ThresholdTooTight(min_feasible) => {
                if let Some(cap) = hard_cap {
                    if threshold >= cap {
                        return Err(Error::MaxAdjustmentExceeded);
                    }
                    threshold = min_feasible.min(cap);
                } else {
                    threshold = min_feasible;
                }
            }
        }
    }
}

fn validate_items(items: &[Item]) -> Result<()> {
    for (index, item) in items.iter().enumerate() {
        let reason = match *item {
            Item::Box { width } if width < 0.0 => "box width is negative",
            Item::Glue { width, .. } if width < 0.0 => "glue width is negative",
            Item::Glue { stretch, .. } if stretch < 0.0 => "glue stretch is negative",
            Item::Glue { shrink, .. } if shrink < 0.0 => "glue shrink is negative",
            Item::Penalty { width, .. } if width < 0.0 => "penalty width is negative",
            _ => continue,
        };
        return Err(Error::InvalidItem {
            index,
            reason: reason.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// One DP sweep at a fixed threshold
// ============================================================================

fn run_pass(
    items: &[Item],
    widths: &LineWidths,
    threshold: f64,
    options: &BreakOptions,
) -> PassOutcome {
    let mut nodes: Vec<Node> = Vec::with_capacity(64);
    nodes.push(Node {
        index: 0,
        line: 0,
        fitness: Fitness::Tight,
        total_width: 0.0,
        total_stretch: 0.0,
        total_shrink: 0.0,
        total_demerits: 0.0,
        prev: None,
    });
    let mut active: Vec<usize> = vec![0];
    let mut sums = Sums::default();

    // Fallback state: the most recently retired node, and the smallest
    // ratio rejected for exceeding the threshold anywhere in this pass.
    let mut last_deactivated = 0usize;
    let mut min_ratio_above = f64::INFINITY;

    for (b, item) in items.iter().enumerate() {
        let legal_break = match *item {
            Item::Box { width } => {
                sums.width += width;
                false
            }
            Item::Glue { .. } => b > 0 && items[b - 1].is_box(),
            Item::Penalty { cost, .. } => cost < MAX_COST,
        };

        if legal_break {
            let forced = item.is_forced_break();
            let mut candidates: FxHashMap<(usize, Fitness), Candidate> = FxHashMap::default();
            let mut survivors = Vec::with_capacity(active.len());

            for &a in &active {
                let node = nodes[a];
                let ratio = adjustment_ratio(&node, &sums, item, widths.line(node.line));

                if (MIN_ADJUSTMENT_RATIO..=threshold).contains(&ratio) {
                    let fitness = Fitness::from_ratio(ratio);
                    let badness = 100.0 * ratio.abs().powi(3);
                    let penalty = item.cost();

                    let mut demerits = if penalty >= 0.0 {
                        (1.0 + badness + penalty).powi(2)
                    } else if penalty > MIN_COST {
                        (1.0 + badness).powi(2) - penalty * penalty
                    } else {
                        (1.0 + badness).powi(2)
                    };
                    if item.is_flagged_penalty() && items[node.index].is_flagged_penalty() {
                        demerits += options.double_hyphen_penalty;
                    }
                    if node.index > 0 && fitness.distance(node.fitness) > 1 {
                        demerits += options.adjacent_loose_tight_penalty;
                    }

                    let candidate = Candidate {
                        total_demerits: node.total_demerits + demerits,
                        prev: a,
                    };
                    candidates
                        .entry((node.line + 1, fitness))
                        .and_modify(|best| {
                            if candidate.total_demerits < best.total_demerits {
                                *best = candidate;
                            }
                        })
                        .or_insert(candidate);
                } else if ratio > threshold {
                    min_ratio_above = min_ratio_above.min(ratio);
                }

                if ratio < MIN_ADJUSTMENT_RATIO || forced {
                    last_deactivated = a;
                } else {
                    survivors.push(a);
                }
            }

            active = survivors;

            if !candidates.is_empty() {
                let after = sums_after_break(items, b, &sums);
                for ((line, fitness), candidate) in candidates {
                    let id = nodes.len();
                    nodes.push(Node {
                        index: b,
                        line,
                        fitness,
                        total_width: after.width,
                        total_stretch: after.stretch,
                        total_shrink: after.shrink,
                        total_demerits: candidate.total_demerits,
                        prev: Some(candidate.prev),
                    });
                    active.push(id);
                }
            }

            if active.is_empty() {
                if min_ratio_above.is_finite() {
                    return PassOutcome::ThresholdTooTight(min_ratio_above);
                }
                // No stretch budget would have saved this line (oversize
                // box or inelastic glue). Force a break to keep moving.
                let after = sums_after_break(items, b, &sums);
                let last = nodes[last_deactivated];
                let id = nodes.len();
                nodes.push(Node {
                    index: b,
                    line: last.line + 1,
                    fitness: Fitness::Tight,
                    total_width: after.width,
                    total_stretch: after.stretch,
                    total_shrink: after.shrink,
                    total_demerits: last.total_demerits + 1000.0,
                    prev: Some(last_deactivated),
                });
                active.push(id);
            }
        }

        if let Item::Glue {
            width,
            stretch,
            shrink,
        } = *item
        {
            sums.width += width;
            sums.stretch += stretch;
            sums.shrink += shrink;
        }
    }

    let best = active
        .iter()
        .copied()
        .min_by(|&x, &y| nodes[x].total_demerits.total_cmp(&nodes[y].total_demerits));
    let Some(best) = best else {
        return PassOutcome::Complete(Vec::new());
    };

    let mut breakpoints = Vec::with_capacity(nodes[best].line + 1);
    let mut current = Some(best);
    while let Some(id) = current {
        breakpoints.push(nodes[id].index);
        current = nodes[id].prev;
    }
    breakpoints.reverse();
    PassOutcome::Complete(breakpoints)
}

/// Ratio by which each glue in the line from `node` to the current item
/// must stretch (positive) or shrink (negative) to hit `ideal` exactly.
///
/// Inelastic deficits resolve to ±infinity rather than NaN.
fn adjustment_ratio(node: &Node, sums: &Sums, item: &Item, ideal: f64) -> f64 {
    let mut actual = sums.width - node.total_width;
    if let Item::Penalty { width, .. } = item {
        // The break mark (e.g. a hyphen) occupies the line that ends at it.
        actual += width;
    }

    if actual < ideal {
        let stretch = sums.stretch - node.total_stretch;
        if stretch > 0.0 {
            (ideal - actual) / stretch
        } else {
            f64::INFINITY
        }
    } else if actual > ideal {
        let shrink = sums.shrink - node.total_shrink;
        if shrink > 0.0 {
            (ideal - actual) / shrink
        } else {
            f64::NEG_INFINITY
        }
    } else {
        0.0
    }
}

/// Cumulative sums carried by a node breaking at `b`: the running totals
/// plus any glue between the break and the next box (or forbidden
/// penalty). That glue is discarded and belongs to neither line. A
/// penalty's width is charged to the line that ends at it, never here.
fn sums_after_break(items: &[Item], b: usize, sums: &Sums) -> Sums {
    let mut after = *sums;
    for item in &items[b..] {
        match *item {
            Item::Box { .. } => break,
            Item::Penalty { cost, .. } if cost >= MAX_COST => break,
            Item::Penalty { .. } => {}
            Item::Glue {
                width,
                stretch,
                shrink,
            } => {
                after.width += width;
                after.stretch += stretch;
                after.shrink += shrink;
            }
        }
    }
    after
}

// ============================================================================
// Unit Tests
// ============================================================================

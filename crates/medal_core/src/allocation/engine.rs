//! Single-pass medal allocation within one event.
//!
//! Entries are ranked by descending score (stable, so equal scores keep
//! input order) and folded through [`AllocationState`]. Each tier can be
//! granted once per event; in team events a collective that already holds
//! any medal is skipped for the rest of the pass. There is no backtracking:
//! an entry that misses Gold falls through to Silver/Bronze immediately.

use rustc_hash::FxHashSet;

use crate::config::AwardThresholds;
use crate::models::{AwardAssignment, Category, ForecastResult, GroupKind};

/// Fold state of one event's allocation pass.
#[derive(Debug, Default)]
struct AllocationState<'a> {
    gold: bool,
    silver: bool,
    bronze: bool,
    /// Team events only.
    awarded: FxHashSet<&'a str>,
}

impl<'a> AllocationState<'a> {
    fn award(
        &mut self,
        kind: GroupKind,
        score: f64,
        collective: &'a str,
        thresholds: &AwardThresholds,
    ) -> Category {
        if score < thresholds.bronze {
            return if score < thresholds.no_medal {
                Category::NotParticipated
            } else {
                Category::NoMedal
            };
        }
        if kind.is_team() && self.awarded.contains(collective) {
            return Category::NoMedal;
        }

        let tier = if score >= thresholds.gold && !self.gold {
            self.gold = true;
            Category::Gold
        } else if score >= thresholds.silver && !self.silver {
            self.silver = true;
            Category::Silver
        } else if !self.bronze {
            self.bronze = true;
            Category::Bronze
        } else {
            return Category::NoMedal;
        };

        if kind.is_team() {
            self.awarded.insert(collective);
        }
        tier
    }
}

/// Allocate medals among all forecasts of one event.
///
/// Assignments come back in rank order, one per input entry.
pub fn allocate(
    kind: GroupKind,
    entries: &[ForecastResult],
    thresholds: &AwardThresholds,
) -> Vec<AwardAssignment> {
    let group_size = entries.len();
    let mut order: Vec<&ForecastResult> = entries.iter().collect();
    order.sort_by(|a, b| b.score.total_cmp(&a.score));

    let (_, assignments) = order.into_iter().enumerate().fold(
        (AllocationState::default(), Vec::with_capacity(group_size)),
        |(mut state, mut out), (i, entry)| {
            let category = state.award(kind, entry.score, &entry.collective, thresholds);
            out.push(AwardAssignment {
                key: entry.key.clone(),
                collective: entry.collective.clone(),
                target_period: entry.target_period,
                category,
                score: entry.score,
                rank: i + 1,
                group_size,
                kind,
                history: entry.history,
                participation_count: entry.participation_count,
            });
            (state, out)
        },
    );
    assignments
}

//! Deterministic ranking of scored candidates.
//!
//! Order: score descending, then start ascending. The start key is explicit,
//! so equal scores always resolve to the earliest slot regardless of input
//! order or sort stability.

use std::cmp::Ordering;

use crate::model::CandidateSlot;

fn best_first(a: &CandidateSlot, b: &CandidateSlot) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| a.end.cmp(&b.end))
}

/// The best candidate, or `None` when there are no candidates.
pub fn select<I>(candidates: I) -> Option<CandidateSlot>
where
    I: IntoIterator<Item = CandidateSlot>,
{
    candidates.into_iter().min_by(best_first)
}

/// All candidates, best first.
pub fn rank(mut candidates: Vec<CandidateSlot>) -> Vec<CandidateSlot> {
    candidates.sort_by(best_first);
    candidates
}

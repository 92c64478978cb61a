//! Merge of the per-worker best lists into one global ranking

use crate::search::candidate::Candidate;

/// Merge `lists` into one ascending list of at most `keep` candidates.
///
/// Each round scans every entry not yet taken, takes the one with the lowest
/// error and moves it to the output. Entries are taken out of their slot, so
/// none can be emitted twice. Ties go to the earlier worker, then the earlier
/// position in that worker's list.
pub fn merge_top_k(lists: Vec<Vec<Candidate>>, keep: usize) -> Vec<Candidate> {
    let mut slots: Vec<Vec<Option<Candidate>>> = lists
        .into_iter()
        .map(|list| list.into_iter().map(Some).collect())
        .collect();

    let mut merged = Vec::with_capacity(keep);
    for _ in 0..keep {
        let mut best: Option<(usize, usize, f64)> = None;
        for (w, list) in slots.iter().enumerate() {
            for (i, slot) in list.iter().enumerate() {
                let Some(candidate) = slot else { continue };
                if best.map_or(true, |(_, _, record)| candidate.error < record) {
                    best = Some((w, i, candidate.error));
                }
            }
        }

        match best.and_then(|(w, i, _)| slots[w][i].take()) {
            Some(candidate) => merged.push(candidate),
            None => break,
        }
    }
    merged
}

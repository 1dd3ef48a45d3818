use tracing::debug;
use crate::subsequence_finder::{distinct_items, find_first};
use crate::vocabulary::{is_sounded, EventCode};

/// Minimum number of distinct sounded pitches a bar needs to count as a motif.
pub const MIN_MOTIF_NOTES: usize = 3;

/// A bar-length window of the composition, holds and rests included verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Motif {
    events: Vec<EventCode>,
    num_distinct: usize,
}

impl Motif {
    pub fn events(&self) -> &[EventCode] {&self.events}

    pub fn len(&self) -> usize {self.events.len()}

    pub fn is_empty(&self) -> bool {self.events.is_empty()}

    /// Distinct sounded pitches in the motif.
    pub fn num_distinct(&self) -> usize {self.num_distinct}
}

pub fn count_distinct_notes(window: &[EventCode]) -> usize {
    distinct_items(window, |code| is_sounded(*code)).len()
}

/// Looks at the final `bar_length` events. Returns the window as a `Motif`
/// when it holds at least `MIN_MOTIF_NOTES` distinct pitches. The distinct
/// count is returned either way; it is 0 when the composition is shorter
/// than a bar.
pub fn detect_last_motif(composition: &[EventCode], bar_length: usize) -> (Option<Motif>, usize) {
    if composition.len() < bar_length {
        return (None, 0);
    }
    let last_bar = &composition[composition.len() - bar_length..];
    let num_distinct = count_distinct_notes(last_bar);
    if num_distinct >= MIN_MOTIF_NOTES {
        (Some(Motif {events: last_bar.to_vec(), num_distinct}), num_distinct)
    } else {
        (None, num_distinct)
    }
}

/// Returns the last motif if it also occurs somewhere before the current bar.
pub fn detect_repeated_motif(composition: &[EventCode], bar_length: usize) -> Option<Motif> {
    if composition.len() < bar_length {
        return None;
    }
    let (motif, _) = detect_last_motif(composition, bar_length);
    let motif = motif?;
    let prior = &composition[..composition.len() - bar_length];
    find_first(prior, motif.events()).map(|start| {
        debug!(start, motif = ?motif.events(), "repeated motif");
        motif
    })
}

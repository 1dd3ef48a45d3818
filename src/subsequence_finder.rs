use std::fmt::Debug;
use trait_set::trait_set;
use vecmap::VecSet;

trait_set! {
    pub trait SeqItem = Eq + PartialEq + Debug + Copy + Clone;
}

/// Start of the leftmost occurrence of `pattern` inside `items`.
pub fn find_first<T: SeqItem>(items: &[T], pattern: &[T]) -> Option<usize> {
    if pattern.len() > items.len() {
        return None;
    }
    (0..=items.len() - pattern.len()).find(|i| items[*i..*i + pattern.len()] == *pattern)
}

pub fn contains_subsequence<T: SeqItem>(items: &[T], pattern: &[T]) -> bool {
    find_first(items, pattern).is_some()
}

/// The distinct items for which `keep` holds, in order of first appearance.
pub fn distinct_items<T: SeqItem, F: Fn(&T) -> bool>(items: &[T], keep: F) -> VecSet<T> {
    items.iter().filter(|item| keep(*item)).copied().collect()
}

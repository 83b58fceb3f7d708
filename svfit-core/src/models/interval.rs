use std::cmp::Ordering;

use num_traits::{PrimInt, Unsigned};

///
/// Zero-based half-open `[start, end)` span with a payload, usually the index of the
/// feature it stands for. This is what the interval indexes store.
///
/// Intervals sort by start and then by end; the payload does not take part.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Interval<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    pub start: I,
    pub end: I,
    pub val: T,
}

impl<I: PrimInt + Unsigned + Send + Sync, T: Eq + Clone + Send + Sync> Interval<I, T> {
    pub fn new(start: I, end: I, val: T) -> Self {
        Interval { start, end, val }
    }

    pub fn len(&self) -> I {
        if self.end > self.start {
            self.end - self.start
        } else {
            I::zero()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len().is_zero()
    }

    /// Shares at least one position with `[start, end)`.
    pub fn overlaps(&self, start: I, end: I) -> bool {
        self.start < end && start < self.end
    }
}

impl<I: PrimInt + Unsigned + Send + Sync, T: Eq + Clone + Send + Sync> Ord for Interval<I, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }
}

impl<I: PrimInt + Unsigned + Send + Sync, T: Eq + Clone + Send + Sync> PartialOrd
    for Interval<I, T>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

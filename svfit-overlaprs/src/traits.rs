use num_traits::{PrimInt, Unsigned};

pub use svfit_core::models::Interval;

pub trait Overlapper<I, T>: Send + Sync
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn build(intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized;

    fn find(&self, start: I, end: I) -> Vec<Interval<I, T>> {
        self.find_iter(start, end).cloned().collect()
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a>;

    /// The interval ending closest to, but not after, `position`.
    fn nearest_before(&self, position: I) -> Option<&Interval<I, T>>;

    /// The interval starting closest to, but not before, `position`.
    fn nearest_after(&self, position: I) -> Option<&Interval<I, T>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

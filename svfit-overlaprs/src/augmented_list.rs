use num_traits::{PrimInt, Unsigned};

use crate::traits::{Interval, Overlapper};

/// A start-sorted interval list augmented with the running maximum of interval ends.
///
/// This is the single-component form of the Augmented Interval List
/// (<https://academic.oup.com/bioinformatics/article/35/23/4907/5509521>). Feature
/// annotations have modest coverage, so one component keeps queries short while
/// staying simple. A second, end-sorted view answers nearest-neighbour queries.
///
/// # Examples
///
/// ```
/// use svfit_overlaprs::{AugmentedList, Overlapper, Interval};
///
/// let genes = vec![
///     Interval { start: 1000u32, end: 2000, val: "GENE1" },
///     Interval { start: 1500, end: 2500, val: "GENE2" },
///     Interval { start: 5000, end: 6000, val: "GENE3" },
/// ];
///
/// let list = AugmentedList::build(genes);
/// assert_eq!(list.find(1800, 2200).len(), 2);
/// assert_eq!(list.nearest_after(3000).map(|iv| iv.val), Some("GENE3"));
/// ```
#[derive(Debug, Clone)]
pub struct AugmentedList<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    intervals: Vec<Interval<I, T>>,
    max_ends: Vec<I>,
    by_end: Vec<usize>,
}

impl<I, T> Overlapper<I, T> for AugmentedList<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn build(mut intervals: Vec<Interval<I, T>>) -> Self {
        intervals.sort();

        let mut max_ends = Vec::with_capacity(intervals.len());
        let mut running = I::zero();
        for iv in &intervals {
            running = running.max(iv.end);
            max_ends.push(running);
        }

        let mut by_end: Vec<usize> = (0..intervals.len()).collect();
        by_end.sort_by_key(|&i| intervals[i].end);

        AugmentedList {
            intervals,
            max_ends,
            by_end,
        }
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        // every candidate starts before the query end
        let upper = self.intervals.partition_point(|iv| iv.start < end);
        Box::new(
            (0..upper)
                .rev()
                .take_while(move |&i| self.max_ends[i] > start)
                .map(move |i| &self.intervals[i])
                .filter(move |iv| iv.end > start),
        )
    }

    fn nearest_before(&self, position: I) -> Option<&Interval<I, T>> {
        let k = self
            .by_end
            .partition_point(|&i| self.intervals[i].end <= position);
        if k == 0 {
            None
        } else {
            Some(&self.intervals[self.by_end[k - 1]])
        }
    }

    fn nearest_after(&self, position: I) -> Option<&Interval<I, T>> {
        let k = self.intervals.partition_point(|iv| iv.start < position);
        self.intervals.get(k)
    }

    fn len(&self) -> usize {
        self.intervals.len()
    }
}

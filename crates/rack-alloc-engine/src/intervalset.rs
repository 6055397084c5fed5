// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! IntervalSet: sorted, disjoint, coalesced half-open intervals.
//!
//! Invariants (always held):
//!    - intervals are sorted by `start()`
//!    - no two intervals overlap or touch; touching runs are merged
//!    - no interval is empty
//!
//! Complexity:
//!    - overlaps, contains_point: `O(log n)`
//!    - gaps_within: `O(log n + k)`

use rack_alloc_core::primitives::Interval;
use std::ops::Sub;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> IntervalSet<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Builds a set from arbitrary intervals, sorting and merging them.
    pub fn from_vec(mut source: Vec<Interval<T>>) -> Self
    where
        T: Ord + Copy,
    {
        source.retain(|iv| !iv.is_empty());
        source.sort_unstable_by_key(|iv| iv.start());

        let mut merged: Vec<Interval<T>> = Vec::with_capacity(source.len());
        for iv in source {
            match merged.last_mut() {
                Some(last) if iv.start() <= last.end() => {
                    if iv.end() > last.end() {
                        *last = Interval::new(last.start(), iv.end());
                    }
                }
                _ => merged.push(iv),
            }
        }
        debug_assert!(Self::invariants_hold(&merged));
        Self { intervals: merged }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.intervals
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<T>> {
        self.intervals.iter()
    }

    /// Index of the first interval whose end lies strictly after `point`.
    /// Every interval before it ends at or before `point`.
    #[inline]
    fn first_ending_after(&self, point: T) -> usize
    where
        T: Ord + Copy,
    {
        self.intervals.partition_point(|iv| iv.end() <= point)
    }

    /// Returns `true` if any run shares a point with `query`.
    #[inline]
    pub fn overlaps(&self, query: Interval<T>) -> bool
    where
        T: Ord + Copy,
    {
        if query.is_empty() {
            return false;
        }
        let idx = self.first_ending_after(query.start());
        idx < self.intervals.len() && self.intervals[idx].start() < query.end()
    }

    #[inline]
    pub fn contains_point(&self, point: T) -> bool
    where
        T: Ord + Copy,
    {
        let idx = self.first_ending_after(point);
        idx < self.intervals.len() && self.intervals[idx].start() <= point
    }

    /// The maximal runs inside `bounds` that no interval of the set covers,
    /// in ascending order.
    pub fn gaps_within(&self, bounds: Interval<T>) -> Self
    where
        T: Ord + Copy,
    {
        let mut gaps = Vec::new();
        if bounds.is_empty() {
            return Self { intervals: gaps };
        }
        let mut cursor = bounds.start();
        let mut idx = self.first_ending_after(cursor);
        while idx < self.intervals.len() && self.intervals[idx].start() < bounds.end() {
            let run = self.intervals[idx];
            if run.start() > cursor {
                gaps.push(Interval::new(cursor, run.start()));
            }
            cursor = cursor.max(run.end());
            idx += 1;
        }
        if cursor < bounds.end() {
            gaps.push(Interval::new(cursor, bounds.end()));
        }
        debug_assert!(Self::invariants_hold(&gaps));
        Self { intervals: gaps }
    }

    /// Sum of the lengths of all runs.
    pub fn total_measure<D>(&self) -> D
    where
        T: Copy + Sub<Output = D>,
        D: std::iter::Sum<D>,
    {
        self.intervals.iter().map(|iv| iv.measure::<D>()).sum()
    }

    #[cfg(debug_assertions)]
    fn invariants_hold(intervals: &[Interval<T>]) -> bool
    where
        T: Ord + Copy,
    {
        intervals.iter().all(|iv| !iv.is_empty())
            && intervals.windows(2).all(|w| w[0].end() < w[1].start())
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn invariants_hold(_intervals: &[Interval<T>]) -> bool {
        true
    }
}

impl<T: Ord + Copy> FromIterator<Interval<T>> for IntervalSet<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a IntervalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = std::slice::Iter<'a, Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type SetI = IntervalSet<i32>;

    fn iv(a: i32, b: i32) -> Interval<i32> {
        Interval::new(a, b)
    }

    #[test]
    fn from_vec_sorts_and_coalesces() {
        let s = SetI::from_vec(vec![iv(5, 7), iv(1, 3), iv(3, 4), iv(6, 9), iv(12, 12)]);
        assert_eq!(s.as_slice(), &[iv(1, 4), iv(5, 9)]);
    }

    #[test]
    fn from_iterator_matches_from_vec() {
        let s: SetI = [iv(8, 9), iv(2, 4), iv(4, 6)].into_iter().collect();
        assert_eq!(s.as_slice(), &[iv(2, 6), iv(8, 9)]);
    }

    #[test]
    fn overlaps_is_half_open() {
        let s = SetI::from_vec(vec![iv(1, 3), iv(6, 8)]);
        assert!(s.overlaps(iv(2, 5)));
        assert!(s.overlaps(iv(0, 10)));
        assert!(!s.overlaps(iv(3, 6)));
        assert!(!s.overlaps(iv(8, 9)));
        assert!(!s.overlaps(iv(2, 2)));
    }

    #[test]
    fn contains_point_query() {
        let s = SetI::from_vec(vec![iv(1, 3), iv(6, 8)]);
        assert!(s.contains_point(1));
        assert!(s.contains_point(7));
        assert!(!s.contains_point(3));
        assert!(!s.contains_point(5));
        assert!(!s.contains_point(8));
    }

    #[test]
    fn gaps_within_covers_edges() {
        let s = SetI::from_vec(vec![iv(1, 3), iv(5, 7)]);
        let gaps = s.gaps_within(iv(1, 11));
        assert_eq!(gaps.as_slice(), &[iv(3, 5), iv(7, 11)]);
    }

    #[test]
    fn gaps_within_empty_set_is_whole_bounds() {
        let s = SetI::new();
        assert_eq!(s.gaps_within(iv(1, 5)).as_slice(), &[iv(1, 5)]);
    }

    #[test]
    fn gaps_within_ignores_runs_outside_bounds() {
        let s = SetI::from_vec(vec![iv(-4, 2), iv(4, 5), iv(9, 20)]);
        let gaps = s.gaps_within(iv(1, 10));
        assert_eq!(gaps.as_slice(), &[iv(2, 4), iv(5, 9)]);
    }

    #[test]
    fn gaps_within_fully_covered_is_empty() {
        let s = SetI::from_vec(vec![iv(0, 20)]);
        assert!(s.gaps_within(iv(1, 10)).is_empty());
    }

    #[test]
    fn total_measure_sums_runs() {
        let s = SetI::from_vec(vec![iv(1, 3), iv(6, 10)]);
        assert_eq!(s.total_measure::<i32>(), 6);
        assert_eq!(SetI::new().total_measure::<i32>(), 0);
    }
}

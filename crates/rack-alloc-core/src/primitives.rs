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

//! # Core Primitives
//!
//! Generic interval arithmetic used to describe the unit ranges devices occupy.

use std::fmt;
use std::ops::Sub;

/// A half-open interval `[start, end)`.
///
/// The start bound is inclusive and the end bound is exclusive, so the interval
/// holds every `x` with `start <= x < end`. A device that starts at unit `p` and
/// spans `n` units is the interval `[p, p + n)`, which is the closed range
/// `[p, p + n - 1]`.
///
/// # Examples
///
/// ```
/// use rack_alloc_core::primitives::Interval;
///
/// let span = Interval::new(3, 6);
/// assert!(span.contains(3));
/// assert!(span.contains(5));
/// assert!(!span.contains(6));
/// assert_eq!(span.measure::<i32>(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates the interval spanning `a` and `b`.
    ///
    /// The bounds are ordered on construction, so `Interval::new(5, 3)`
    /// is the same interval as `Interval::new(3, 5)`.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` cannot be compared.
    ///
    /// # Examples
    ///
    /// ```
    /// use rack_alloc_core::primitives::Interval;
    ///
    /// let swapped = Interval::new(9, 4);
    /// assert_eq!(swapped.start(), 4);
    /// assert_eq!(swapped.end(), 9);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        let swap = a
            .partial_cmp(&b)
            .expect("Interval::new: bounds are not comparable")
            .is_gt();
        if swap {
            Self {
                start_inclusive: b,
                end_exclusive: a,
            }
        } else {
            Self {
                start_inclusive: a,
                end_exclusive: b,
            }
        }
    }

    /// The inclusive lower bound.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// The exclusive upper bound.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Returns `true` when the interval holds no value.
    ///
    /// ```
    /// use rack_alloc_core::primitives::Interval;
    ///
    /// assert!(Interval::new(4, 4).is_empty());
    /// assert!(!Interval::new(4, 5).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns `true` if `x` lies inside `[start, end)`.
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        self.start_inclusive <= x && x < self.end_exclusive
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    ///
    /// ```
    /// use rack_alloc_core::primitives::Interval;
    ///
    /// let rack = Interval::new(1, 11);
    /// assert!(rack.contains_interval(&Interval::new(1, 11)));
    /// assert!(rack.contains_interval(&Interval::new(4, 7)));
    /// assert!(!rack.contains_interval(&Interval::new(9, 12)));
    /// ```
    #[inline]
    pub fn contains_interval(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.start_inclusive <= other.start_inclusive && other.end_exclusive <= self.end_exclusive
    }

    /// Returns `true` if the two intervals share at least one value.
    ///
    /// For closed integer ranges `[a1, a2]` and `[b1, b2]` this is the familiar
    /// `a1 <= b2 && b1 <= a2`; in half-open form it reads `a1 < b_end && b1 < a_end`.
    /// Touching intervals do not intersect.
    ///
    /// ```
    /// use rack_alloc_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 3);
    /// assert!(a.intersects(&Interval::new(2, 4)));
    /// assert!(!a.intersects(&Interval::new(3, 5)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool
    where
        T: PartialOrd,
    {
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }

    /// Returns the overlapping part of two intervals, or `None` if they are disjoint.
    ///
    /// ```
    /// use rack_alloc_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert_eq!(a.intersection(&Interval::new(3, 8)), Some(Interval::new(3, 5)));
    /// assert_eq!(a.intersection(&Interval::new(5, 8)), None);
    /// ```
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self>
    where
        T: PartialOrd + Copy,
    {
        let start = if self.start_inclusive > other.start_inclusive {
            self.start_inclusive
        } else {
            other.start_inclusive
        };
        let end = if self.end_exclusive < other.end_exclusive {
            self.end_exclusive
        } else {
            other.end_exclusive
        };
        (start < end).then_some(Self {
            start_inclusive: start,
            end_exclusive: end,
        })
    }

    /// The distance between the bounds, expressed in the difference type `D`.
    #[inline]
    pub fn measure<D>(&self) -> D
    where
        T: Copy + Sub<Output = D>,
    {
        self.end_exclusive - self.start_inclusive
    }

    /// Converts the interval into a standard range.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<T>
    where
        T: Copy,
    {
        self.start_inclusive..self.end_exclusive
    }
}

impl<T: Default> Default for Interval<T> {
    fn default() -> Self {
        Self {
            start_inclusive: T::default(),
            end_exclusive: T::default(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T: Copy + PartialOrd> From<std::ops::Range<T>> for Interval<T> {
    #[inline]
    fn from(range: std::ops::Range<T>) -> Self {
        Interval::new(range.start, range.end)
    }
}

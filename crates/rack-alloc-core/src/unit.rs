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

use crate::primitives::Interval;
use num_traits::{CheckedAdd, CheckedSub, SaturatingSub, Zero};
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
};

/// An addressable slot inside a rack.
///
/// Units are numbered from [`RackUnit::FIRST`] upwards. The engine treats the
/// numbering as a linear address space and never assumes which end of the
/// enclosure unit 1 is drawn at.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct RackUnit(usize);

/// The half-open unit range `[position, position + size)` a device occupies.
pub type UnitSpan = Interval<RackUnit>;

impl std::fmt::Display for RackUnit {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "U{}", self.0)
    }
}

impl From<usize> for RackUnit {
    #[inline]
    fn from(v: usize) -> Self {
        RackUnit(v)
    }
}

impl RackUnit {
    /// The lowest addressable unit of every rack.
    pub const FIRST: RackUnit = RackUnit(1);

    #[inline]
    pub const fn new(v: usize) -> Self {
        RackUnit(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    #[inline]
    pub fn checked_add(self, len: UnitCount) -> Option<Self> {
        self.0.checked_add(len.0).map(RackUnit)
    }

    #[inline]
    pub fn checked_sub(self, len: UnitCount) -> Option<Self> {
        self.0.checked_sub(len.0).map(RackUnit)
    }

    #[inline]
    pub fn saturating_sub(self, len: UnitCount) -> Self {
        RackUnit(self.0.saturating_sub(len.0))
    }

    #[inline]
    pub fn saturating_add(self, len: UnitCount) -> Self {
        RackUnit(self.0.saturating_add(len.0))
    }

    /// The span of `len` units starting at `self`, cut off at the end of the
    /// address space instead of overflowing.
    #[inline]
    pub fn saturating_span_of(self, len: UnitCount) -> UnitSpan {
        UnitSpan::new(self, self.saturating_add(len))
    }

    /// The span of `len` units starting at `self`, or `None` on overflow.
    #[inline]
    pub fn span_of(self, len: UnitCount) -> Option<UnitSpan> {
        self.checked_add(len).map(|end| UnitSpan::new(self, end))
    }

    /// Absolute distance between two units.
    #[inline]
    pub fn distance(self, other: RackUnit) -> UnitCount {
        UnitCount(self.0.abs_diff(other.0))
    }
}

impl Add<UnitCount> for RackUnit {
    type Output = RackUnit;

    #[inline]
    fn add(self, rhs: UnitCount) -> Self::Output {
        RackUnit(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in RackUnit + UnitCount"),
        )
    }
}

impl Sub<UnitCount> for RackUnit {
    type Output = RackUnit;

    #[inline]
    fn sub(self, rhs: UnitCount) -> Self::Output {
        RackUnit(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in RackUnit - UnitCount"),
        )
    }
}

impl Sub<RackUnit> for RackUnit {
    type Output = UnitCount;

    #[inline]
    fn sub(self, rhs: RackUnit) -> Self::Output {
        UnitCount(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in RackUnit - RackUnit"),
        )
    }
}

impl AddAssign<UnitCount> for RackUnit {
    #[inline]
    fn add_assign(&mut self, rhs: UnitCount) {
        *self = *self + rhs;
    }
}

/// A number of contiguous rack units.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct UnitCount(usize);

impl std::fmt::Display for UnitCount {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}U", self.0)
    }
}

impl From<usize> for UnitCount {
    #[inline]
    fn from(v: usize) -> Self {
        UnitCount(v)
    }
}

impl UnitCount {
    #[inline]
    pub const fn new(v: usize) -> Self {
        UnitCount(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        UnitCount(0)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(UnitCount)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(UnitCount)
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        UnitCount(self.0.saturating_sub(rhs.0))
    }

    /// `self` as a percentage of `whole`. Returns `0.0` for an empty whole.
    #[inline]
    pub fn percent_of(self, whole: UnitCount) -> f64 {
        if whole.is_zero() {
            return 0.0;
        }
        self.0 as f64 * 100.0 / whole.0 as f64
    }
}

impl Zero for UnitCount {
    #[inline]
    fn zero() -> Self {
        UnitCount(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for UnitCount {
    type Output = UnitCount;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        UnitCount(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in UnitCount + UnitCount"),
        )
    }
}

impl CheckedAdd for UnitCount {
    #[inline]
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(UnitCount)
    }
}

impl Sub for UnitCount {
    type Output = UnitCount;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        UnitCount(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in UnitCount - UnitCount"),
        )
    }
}

impl CheckedSub for UnitCount {
    #[inline]
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(UnitCount)
    }
}

impl SaturatingSub for UnitCount {
    #[inline]
    fn saturating_sub(&self, rhs: &Self) -> Self {
        UnitCount(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for UnitCount {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for UnitCount {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<usize> for UnitCount {
    type Output = UnitCount;

    #[inline]
    fn mul(self, rhs: usize) -> Self::Output {
        UnitCount(
            self.0
                .checked_mul(rhs)
                .expect("overflow in UnitCount * scalar"),
        )
    }
}

impl Div<usize> for UnitCount {
    type Output = UnitCount;

    /// Floor division.
    #[inline]
    fn div(self, rhs: usize) -> Self::Output {
        UnitCount(
            self.0
                .checked_div(rhs)
                .expect("division by zero in UnitCount / scalar"),
        )
    }
}

impl Sum for UnitCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(UnitCount::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a UnitCount> for UnitCount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(UnitCount::zero(), |acc, x| acc + *x)
    }
}

impl Interval<RackUnit> {
    /// Number of units covered by the span.
    #[inline]
    pub fn extent(&self) -> UnitCount {
        self.end() - self.start()
    }

    /// The last unit inside the span, i.e. the closed upper bound.
    ///
    /// Returns `None` for an empty span.
    #[inline]
    pub fn last_unit(&self) -> Option<RackUnit> {
        if self.is_empty() {
            return None;
        }
        Some(self.end() - UnitCount::new(1))
    }
}

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

use crate::err::EmptyRackError;
use rack_alloc_core::unit::{RackUnit, UnitCount, UnitSpan};
use std::fmt::Display;

/// Capacity descriptor of a rack enclosure.
///
/// A rack of size `n` addresses units `1..=n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rack {
    size: UnitCount,
}

impl Rack {
    #[inline]
    pub fn new(size: UnitCount) -> Result<Self, EmptyRackError> {
        if size.is_zero() {
            return Err(EmptyRackError::new(size));
        }
        Ok(Self { size })
    }

    #[inline]
    pub fn size(&self) -> UnitCount {
        self.size
    }

    #[inline]
    pub fn first_unit(&self) -> RackUnit {
        RackUnit::FIRST
    }

    #[inline]
    pub fn last_unit(&self) -> RackUnit {
        RackUnit::new(self.size.value())
    }

    /// Every addressable unit as the half-open span `[1, size + 1)`.
    #[inline]
    pub fn universe(&self) -> UnitSpan {
        UnitSpan::new(RackUnit::FIRST, RackUnit::FIRST + self.size)
    }

    /// Returns `true` if `span` lies entirely inside the rack.
    #[inline]
    pub fn contains_span(&self, span: UnitSpan) -> bool {
        self.universe().contains_interval(&span)
    }

    /// `floor(size / 2)`, the reference unit for center-biased placement.
    #[inline]
    pub fn center_unit(&self) -> RackUnit {
        RackUnit::new(self.size.value() / 2)
    }
}

impl Display for Rack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rack({})", self.size)
    }
}

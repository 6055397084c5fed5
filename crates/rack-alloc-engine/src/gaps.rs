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

//! Free-space discovery.
//!
//! Gaps are the complement of the occupancy within `U1..=size`, listed in
//! ascending order as closed ranges. Adjacent free units always form one gap.

use crate::occupancy::Occupancy;
use rack_alloc_core::unit::{RackUnit, UnitCount, UnitSpan};
use rack_alloc_model::{device::Device, id::DeviceId, rack::Rack};
use std::fmt::Display;
use tracing::instrument;

/// A maximal run of unoccupied units, reported as a closed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreeSpace {
    span: UnitSpan,
}

impl FreeSpace {
    /// Builds a free space from its closed bounds `start_unit..=end_unit`.
    ///
    /// # Panics
    ///
    /// Panics if `end_unit < start_unit`.
    #[inline]
    pub fn new(start_unit: RackUnit, end_unit: RackUnit) -> Self {
        assert!(start_unit <= end_unit, "free space must hold at least one unit");
        Self {
            span: UnitSpan::new(start_unit, end_unit + UnitCount::new(1)),
        }
    }

    #[inline]
    pub(crate) fn from_span(span: UnitSpan) -> Self {
        debug_assert!(!span.is_empty());
        Self { span }
    }

    #[inline]
    pub fn start_unit(&self) -> RackUnit {
        self.span.start()
    }

    /// The last free unit of the run (inclusive).
    #[inline]
    pub fn end_unit(&self) -> RackUnit {
        self.span.end() - UnitCount::new(1)
    }

    #[inline]
    pub fn size(&self) -> UnitCount {
        self.span.extent()
    }

    #[inline]
    pub fn span(&self) -> UnitSpan {
        self.span
    }

    #[inline]
    pub fn fits(&self, size: UnitCount) -> bool {
        self.size() >= size
    }
}

impl Display for FreeSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..={} ({})",
            self.start_unit(),
            self.end_unit(),
            self.size()
        )
    }
}

/// The maximal free runs of `rack`, ordered by ascending start unit.
///
/// Devices are read through [`Occupancy`], so the device identified by
/// `exclude` is treated as absent. For a valid layout the free sizes and the
/// device sizes add up to the rack size exactly.
#[instrument(
    level = "trace",
    skip(existing, rack),
    fields(rack = %rack, devices = existing.len())
)]
pub fn find_available_spaces(
    existing: &[Device],
    rack: &Rack,
    exclude: Option<DeviceId>,
) -> Vec<FreeSpace> {
    Occupancy::new(rack, existing, exclude).free_spaces()
}

/// The largest free run, preferring the lowest one on ties.
pub fn largest_free_space(spaces: &[FreeSpace]) -> Option<FreeSpace> {
    spaces
        .iter()
        .copied()
        .reduce(|best, s| if s.size() > best.size() { s } else { best })
}

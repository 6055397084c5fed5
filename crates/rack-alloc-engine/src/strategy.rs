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

//! Automatic placement.
//!
//! Every strategy reads the same ordered gap list from
//! [`find_available_spaces`] and only differs in which qualifying gap it
//! picks and where inside that gap the device goes. Selection is first-fit:
//! the first gap in scan order wins, not the tightest one.

use crate::gaps::{FreeSpace, find_available_spaces, largest_free_space};
use rack_alloc_core::unit::{RackUnit, UnitCount};
use rack_alloc_model::{device::Device, rack::Rack};
use std::{fmt::Display, str::FromStr};
use tracing::{debug, instrument, trace, warn};

/// How an automatic placement picks its gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum PlacementStrategy {
    /// Start of the first gap large enough.
    #[default]
    NearestFit,
    /// Start of the first gap large enough, counting from unit 1.
    TopFirst,
    /// End of the last gap large enough, so the device ends on the gap's last unit.
    BottomFirst,
    /// Start of the qualifying gap whose start is closest to the rack center.
    CenterBiased,
    /// Same choice as [`PlacementStrategy::NearestFit`], named for intent.
    Compact,
}

impl PlacementStrategy {
    pub const ALL: [PlacementStrategy; 5] = [
        PlacementStrategy::NearestFit,
        PlacementStrategy::TopFirst,
        PlacementStrategy::BottomFirst,
        PlacementStrategy::CenterBiased,
        PlacementStrategy::Compact,
    ];

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            PlacementStrategy::NearestFit => "nearest-fit",
            PlacementStrategy::TopFirst => "top-first",
            PlacementStrategy::BottomFirst => "bottom-first",
            PlacementStrategy::CenterBiased => "center-biased",
            PlacementStrategy::Compact => "compact",
        }
    }
}

impl Display for PlacementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownStrategyError {
    name: String,
}

impl UnknownStrategyError {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for UnknownStrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown placement strategy `{}`", self.name)
    }
}

impl std::error::Error for UnknownStrategyError {}

impl FromStr for PlacementStrategy {
    type Err = UnknownStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PlacementStrategy::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStrategyError::new(wanted))
    }
}

/// No gap of the rack can hold a device of the requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsufficientSpaceError {
    requested: UnitCount,
    rack_size: UnitCount,
    largest_free: UnitCount,
}

impl InsufficientSpaceError {
    #[inline]
    pub fn new(requested: UnitCount, rack_size: UnitCount, largest_free: UnitCount) -> Self {
        Self {
            requested,
            rack_size,
            largest_free,
        }
    }

    #[inline]
    pub fn requested(&self) -> UnitCount {
        self.requested
    }

    #[inline]
    pub fn rack_size(&self) -> UnitCount {
        self.rack_size
    }

    /// Size of the largest free block at the time of the request.
    #[inline]
    pub fn largest_free(&self) -> UnitCount {
        self.largest_free
    }
}

impl Display for InsufficientSpaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "not enough space: no free block of {} in a {} rack (largest free block is {})",
            self.requested, self.rack_size, self.largest_free
        )
    }
}

impl std::error::Error for InsufficientSpaceError {}

/// Picks a start unit for a device of `size` among precomputed `spaces`.
///
/// `spaces` must be ordered by ascending start, as the gap finder returns them.
pub fn select_position(
    spaces: &[FreeSpace],
    size: UnitCount,
    rack: &Rack,
    strategy: PlacementStrategy,
) -> Option<RackUnit> {
    let mut fitting = spaces.iter().filter(|s| s.fits(size));
    match strategy {
        PlacementStrategy::NearestFit
        | PlacementStrategy::TopFirst
        | PlacementStrategy::Compact => fitting.next().map(FreeSpace::start_unit),
        PlacementStrategy::BottomFirst => fitting.next_back().map(|s| s.span().end() - size),
        PlacementStrategy::CenterBiased => {
            let center = rack.center_unit();
            let mut best: Option<(UnitCount, RackUnit)> = None;
            for s in fitting {
                let d = s.start_unit().distance(center);
                trace!(start = %s.start_unit(), distance = %d, "center candidate");
                // Strict comparison keeps the first gap on ties.
                if best.is_none_or(|(bd, _)| d < bd) {
                    best = Some((d, s.start_unit()));
                }
            }
            best.map(|(_, start)| start)
        }
    }
}

/// Suggests where a device of `size` could go, or `None` if nothing fits.
///
/// The returned position always passes validation against `existing`.
///
/// # Panics
///
/// Panics if `size` is zero.
#[instrument(
    level = "debug",
    skip(existing, rack),
    fields(rack = %rack, devices = existing.len())
)]
pub fn suggest_placement(
    size: UnitCount,
    existing: &[Device],
    rack: &Rack,
    strategy: PlacementStrategy,
) -> Option<RackUnit> {
    assert!(!size.is_zero(), "device size must be at least one unit");
    let spaces = find_available_spaces(existing, rack, None);
    let chosen = select_position(&spaces, size, rack, strategy);
    match chosen {
        Some(p) => debug!(position = %p, "placement suggested"),
        None => debug!(gaps = spaces.len(), "no gap fits"),
    }
    chosen
}

/// Like [`suggest_placement`], but reports an infeasible request as an error
/// so it cannot be dropped silently.
pub fn place_device(
    size: UnitCount,
    existing: &[Device],
    rack: &Rack,
    strategy: PlacementStrategy,
) -> Result<RackUnit, InsufficientSpaceError> {
    assert!(!size.is_zero(), "device size must be at least one unit");
    let spaces = find_available_spaces(existing, rack, None);
    select_position(&spaces, size, rack, strategy).ok_or_else(|| {
        let largest = largest_free_space(&spaces)
            .map(|s| s.size())
            .unwrap_or_else(UnitCount::zero);
        warn!(requested = %size, largest = %largest, %strategy, "placement infeasible");
        InsufficientSpaceError::new(size, rack.size(), largest)
    })
}

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

//! Utilization statistics for a rack.
//!
//! `used` is the sum of device sizes, so an oversubscribed list reports more
//! than 100 percent. Free-block figures come from the occupancy inside the rack.

use crate::{config::UtilizationThresholds, occupancy::Occupancy};
use rack_alloc_core::unit::UnitCount;
use rack_alloc_model::{device::Device, rack::Rack};
use std::fmt::Display;
use tracing::instrument;

/// Coarse classification of how full a rack is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Efficiency {
    Low,
    Optimal,
    High,
    Critical,
}

impl Efficiency {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Efficiency::Low => "low",
            Efficiency::Optimal => "optimal",
            Efficiency::High => "high",
            Efficiency::Critical => "critical",
        }
    }
}

impl Display for Efficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary statistics of a rack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utilization {
    used: UnitCount,
    available: UnitCount,
    percentage: f64,
    efficiency: Efficiency,
    free_blocks: usize,
    largest_free_block: UnitCount,
}

impl Utilization {
    /// Sum of all device sizes.
    #[inline]
    pub fn used(&self) -> UnitCount {
        self.used
    }

    /// `rack size - used`, floored at zero for oversubscribed lists.
    #[inline]
    pub fn available(&self) -> UnitCount {
        self.available
    }

    #[inline]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[inline]
    pub fn efficiency(&self) -> Efficiency {
        self.efficiency
    }

    /// Number of maximal free runs.
    #[inline]
    pub fn free_blocks(&self) -> usize {
        self.free_blocks
    }

    #[inline]
    pub fn largest_free_block(&self) -> UnitCount {
        self.largest_free_block
    }

    /// Returns `true` if the free units are split over more than one run.
    #[inline]
    pub fn is_fragmented(&self) -> bool {
        self.free_blocks > 1
    }
}

impl Display for Utilization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} used, {} available ({:.1}%, {})",
            self.used, self.available, self.percentage, self.efficiency
        )
    }
}

/// [`calculate_utilization_with`] using the default bands.
#[inline]
pub fn calculate_utilization(devices: &[Device], rack: &Rack) -> Utilization {
    calculate_utilization_with(devices, rack, &UtilizationThresholds::default())
}

#[instrument(
    level = "trace",
    skip(devices, rack, thresholds),
    fields(rack = %rack, devices = devices.len())
)]
pub fn calculate_utilization_with(
    devices: &[Device],
    rack: &Rack,
    thresholds: &UtilizationThresholds,
) -> Utilization {
    let used: UnitCount = devices.iter().map(Device::size).sum();
    let percentage = used.percent_of(rack.size());
    let spaces = Occupancy::new(rack, devices, None).free_spaces();
    Utilization {
        used,
        available: rack.size().saturating_sub(used),
        percentage,
        efficiency: thresholds.classify(percentage),
        free_blocks: spaces.len(),
        largest_free_block: spaces
            .iter()
            .map(|s| s.size())
            .max()
            .unwrap_or_else(UnitCount::zero),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rack_alloc_core::unit::RackUnit;
    use rack_alloc_model::id::DeviceId;

    fn len(x: usize) -> UnitCount {
        UnitCount::new(x)
    }
    fn rack(n: usize) -> Rack {
        Rack::new(len(n)).unwrap()
    }
    fn dev(id: u64, p: usize, n: usize) -> Device {
        Device::new(DeviceId::new(id), RackUnit::new(p), len(n)).unwrap()
    }

    #[test]
    fn test_half_full_rack_is_optimal() {
        let devices = [dev(1, 1, 1), dev(2, 2, 1), dev(3, 3, 1)];
        let u = calculate_utilization(&devices, &rack(6));
        assert_eq!(u.used(), len(3));
        assert_eq!(u.available(), len(3));
        assert_eq!(u.percentage(), 50.0);
        assert_eq!(u.efficiency(), Efficiency::Optimal);
        assert_eq!(u.efficiency().to_string(), "optimal");
        assert_eq!(u.free_blocks(), 1);
        assert_eq!(u.largest_free_block(), len(3));
    }

    #[test]
    fn test_empty_rack() {
        let u = calculate_utilization(&[], &rack(42));
        assert_eq!(u.used(), UnitCount::zero());
        assert_eq!(u.percentage(), 0.0);
        assert_eq!(u.efficiency(), Efficiency::Low);
        assert_eq!(u.largest_free_block(), len(42));
    }

    #[test]
    fn test_full_rack_is_critical() {
        let devices = [dev(1, 1, 10)];
        let u = calculate_utilization(&devices, &rack(10));
        assert_eq!(u.efficiency(), Efficiency::Critical);
        assert_eq!(u.free_blocks(), 0);
        assert_eq!(u.largest_free_block(), UnitCount::zero());
    }

    #[test]
    fn test_band_edges() {
        // 20U rack: 6U is 30%, 16U is 80%, 19U is 95%.
        let cases = [
            (5, Efficiency::Low),
            (6, Efficiency::Optimal),
            (16, Efficiency::High),
            (19, Efficiency::High),
            (20, Efficiency::Critical),
        ];
        for (n, expected) in cases {
            let u = calculate_utilization(&[dev(1, 1, n)], &rack(20));
            assert_eq!(u.efficiency(), expected, "{n}U of 20U");
        }
    }

    #[test]
    fn test_fragmentation() {
        let devices = [dev(1, 3, 1), dev(2, 6, 2)];
        let u = calculate_utilization(&devices, &rack(12));
        assert_eq!(u.free_blocks(), 3);
        assert_eq!(u.largest_free_block(), len(5));
        assert!(u.is_fragmented());
    }

    #[test]
    fn test_oversubscribed_list_has_no_negative_availability() {
        let devices = [dev(1, 1, 4), dev(2, 1, 4)];
        let u = calculate_utilization(&devices, &rack(6));
        assert_eq!(u.available(), UnitCount::zero());
        assert!(u.percentage() > 100.0);
    }

    #[test]
    fn test_display() {
        let u = calculate_utilization(&[dev(1, 1, 3)], &rack(6));
        assert_eq!(u.to_string(), "3U used, 3U available (50.0%, optimal)");
    }
}

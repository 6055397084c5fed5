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

use std::cmp::Ordering;
use std::fmt::Display;

use rack_alloc_core::unit::UnitCount;
use rand::Rng;

use super::err::{DeviceTooLargeError, RackGenConfigBuildError};
use crate::rack::Rack;

/// Configuration for synthetic rack layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct RackGenConfig {
    pub(crate) rack: Rack,
    pub(crate) max_devices: usize,
    pub(crate) min_device_size: UnitCount,
    pub(crate) max_device_size: UnitCount,
    pub(crate) fill_ratio: f64,
    pub(crate) seed: u64,
}

impl Default for RackGenConfig {
    /// A 42U rack filled to roughly 60% with 1U-4U devices.
    fn default() -> Self {
        Self {
            rack: Rack::new(UnitCount::new(42)).expect("42U is a valid rack"),
            max_devices: 16,
            min_device_size: UnitCount::new(1),
            max_device_size: UnitCount::new(4),
            fill_ratio: 0.6,
            seed: 42,
        }
    }
}

impl RackGenConfig {
    /// Validates and assembles a configuration. Device size bounds given in
    /// the wrong order are swapped.
    pub fn new(
        rack_size: UnitCount,
        max_devices: usize,
        unord_min_size: UnitCount,
        unord_max_size: UnitCount,
        fill_ratio: f64,
        seed: u64,
    ) -> Result<Self, RackGenConfigBuildError> {
        let rack = Rack::new(rack_size)?;
        let (min_device_size, max_device_size) = match unord_min_size.cmp(&unord_max_size) {
            Ordering::Greater => (unord_max_size, unord_min_size),
            _ => (unord_min_size, unord_max_size),
        };
        if min_device_size.is_zero() {
            return Err(RackGenConfigBuildError::ZeroDeviceSize);
        }
        if max_device_size > rack_size {
            return Err(DeviceTooLargeError::new(rack_size, max_device_size).into());
        }
        if !(fill_ratio > 0.0 && fill_ratio <= 1.0) {
            return Err(RackGenConfigBuildError::FillRatioOutOfRange(fill_ratio));
        }

        Ok(Self {
            rack,
            max_devices,
            min_device_size,
            max_device_size,
            fill_ratio,
            seed,
        })
    }

    #[inline]
    pub fn rack(&self) -> Rack {
        self.rack
    }
    #[inline]
    pub fn max_devices(&self) -> usize {
        self.max_devices
    }
    #[inline]
    pub fn min_device_size(&self) -> UnitCount {
        self.min_device_size
    }
    #[inline]
    pub fn max_device_size(&self) -> UnitCount {
        self.max_device_size
    }
    #[inline]
    pub fn fill_ratio(&self) -> f64 {
        self.fill_ratio
    }
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Upper bound on the units the generator will hand out to devices.
    #[inline]
    pub fn target_units(&self) -> UnitCount {
        let size = self.rack.size().value();
        UnitCount::new(((size as f64) * self.fill_ratio).floor() as usize)
    }
}

impl Display for RackGenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RackGenConfig {{ rack: {}, max_devices: {}, device_size: {}..={}, \
             fill_ratio: {:.2}, seed: {} }}",
            self.rack,
            self.max_devices,
            self.min_device_size,
            self.max_device_size,
            self.fill_ratio,
            self.seed
        )
    }
}

/// Builder for `RackGenConfig`.
pub struct RackGenConfigBuilder {
    // Required
    rack_size: Option<UnitCount>,

    // Optional with defaults
    max_devices: usize,
    min_device_size: UnitCount,
    max_device_size: UnitCount,
    fill_ratio: f64,
    seed: u64,
}

impl Default for RackGenConfigBuilder {
    fn default() -> Self {
        Self {
            rack_size: None,
            max_devices: 16,
            min_device_size: UnitCount::new(1),
            max_device_size: UnitCount::new(4),
            fill_ratio: 0.6,
            seed: rand::rng().random(),
        }
    }
}

impl RackGenConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn rack_size(mut self, v: UnitCount) -> Self {
        self.rack_size = Some(v);
        self
    }
    #[inline]
    pub fn max_devices(mut self, v: usize) -> Self {
        self.max_devices = v;
        self
    }
    #[inline]
    pub fn device_size_range(mut self, min: UnitCount, max: UnitCount) -> Self {
        self.min_device_size = min;
        self.max_device_size = max;
        self
    }
    #[inline]
    pub fn fill_ratio(mut self, v: f64) -> Self {
        self.fill_ratio = v;
        self
    }
    pub fn random_seed(mut self) -> Self {
        self.seed = rand::rng().random();
        self
    }
    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<RackGenConfig, RackGenConfigBuildError> {
        let rack_size = self
            .rack_size
            .ok_or(RackGenConfigBuildError::MissingRackSize)?;
        RackGenConfig::new(
            rack_size,
            self.max_devices,
            self.min_device_size,
            self.max_device_size,
            self.fill_ratio,
            self.seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_rack_size() {
        let err = RackGenConfigBuilder::new().build().unwrap_err();
        assert_eq!(err, RackGenConfigBuildError::MissingRackSize);
    }

    #[test]
    fn test_builder_rejects_empty_rack() {
        let err = RackGenConfigBuilder::new()
            .rack_size(UnitCount::zero())
            .build()
            .unwrap_err();
        assert!(matches!(err, RackGenConfigBuildError::EmptyRack(_)));
    }

    #[test]
    fn test_builder_rejects_zero_device_size() {
        let err = RackGenConfigBuilder::new()
            .rack_size(UnitCount::new(10))
            .device_size_range(UnitCount::zero(), UnitCount::new(2))
            .build()
            .unwrap_err();
        assert_eq!(err, RackGenConfigBuildError::ZeroDeviceSize);
    }

    #[test]
    fn test_builder_rejects_device_larger_than_rack() {
        let err = RackGenConfigBuilder::new()
            .rack_size(UnitCount::new(4))
            .device_size_range(UnitCount::new(1), UnitCount::new(5))
            .build()
            .unwrap_err();
        match err {
            RackGenConfigBuildError::DeviceTooLarge(e) => {
                assert_eq!(e.rack_size(), UnitCount::new(4));
                assert_eq!(e.max_device_size(), UnitCount::new(5));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builder_rejects_bad_fill_ratio() {
        for ratio in [0.0, -0.5, 1.5, f64::NAN] {
            let err = RackGenConfigBuilder::new()
                .rack_size(UnitCount::new(10))
                .fill_ratio(ratio)
                .build()
                .unwrap_err();
            assert!(matches!(err, RackGenConfigBuildError::FillRatioOutOfRange(_)));
        }
    }

    #[test]
    fn test_builder_swaps_size_bounds() {
        let cfg = RackGenConfigBuilder::new()
            .rack_size(UnitCount::new(10))
            .device_size_range(UnitCount::new(3), UnitCount::new(1))
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(cfg.min_device_size(), UnitCount::new(1));
        assert_eq!(cfg.max_device_size(), UnitCount::new(3));
        assert_eq!(cfg.seed(), 7);
    }

    #[test]
    fn test_target_units_floors() {
        let cfg = RackGenConfigBuilder::new()
            .rack_size(UnitCount::new(10))
            .fill_ratio(0.55)
            .build()
            .unwrap();
        assert_eq!(cfg.target_units(), UnitCount::new(5));
    }
}

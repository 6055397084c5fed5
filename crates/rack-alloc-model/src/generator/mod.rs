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

mod config;
mod err;

pub use config::{RackGenConfig, RackGenConfigBuilder};
pub use err::{DeviceTooLargeError, RackGenConfigBuildError};

use crate::{device::Device, id::DeviceId, layout::RackLayout};
use rack_alloc_core::unit::{RackUnit, UnitCount};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

/// Produces random, valid rack layouts.
///
/// Every generated layout keeps all devices inside the rack with no two devices
/// sharing a unit. Free units are scattered between devices so the gap
/// structure varies from layout to layout. Devices are returned in shuffled
/// order so callers cannot lean on the input being sorted.
pub struct RackGenerator {
    config: RackGenConfig,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl From<RackGenConfig> for RackGenerator {
    fn from(config: RackGenConfig) -> Self {
        Self::new(config)
    }
}

impl RackGenerator {
    pub fn new(config: RackGenConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed()),
            config,
            next_id: 1,
        }
    }

    #[inline]
    pub fn config(&self) -> &RackGenConfig {
        &self.config
    }

    #[inline]
    fn fresh_id(&mut self) -> DeviceId {
        let id = self.next_id;
        self.next_id += 1;
        DeviceId::new(id)
    }

    /// Draws a device size from the configured range.
    pub fn sample_device_size(&mut self) -> UnitCount {
        let min = self.config.min_device_size().value();
        let max = self.config.max_device_size().value();
        if min == max {
            return UnitCount::new(min);
        }
        UnitCount::new(self.rng.random_range(min..=max))
    }

    fn sample_sizes(&mut self) -> Vec<UnitCount> {
        let budget = self.config.target_units();
        let mut used = UnitCount::zero();
        let mut sizes = Vec::with_capacity(self.config.max_devices());
        while sizes.len() < self.config.max_devices() {
            let size = self.sample_device_size();
            if used + size > budget {
                break;
            }
            used += size;
            sizes.push(size);
        }
        sizes
    }

    /// Spreads `free` units over `slots` slack positions at random.
    fn sample_slack(&mut self, free: UnitCount, slots: usize) -> Vec<UnitCount> {
        let mut slack = vec![0usize; slots];
        for _ in 0..free.value() {
            let slot = self.rng.random_range(0..slots);
            slack[slot] += 1;
        }
        slack.into_iter().map(UnitCount::new).collect()
    }

    pub fn generate(&mut self) -> RackLayout {
        let rack = self.config.rack();
        let sizes = self.sample_sizes();
        let used: UnitCount = sizes.iter().sum();
        let slack = self.sample_slack(rack.size() - used, sizes.len() + 1);

        let mut devices = Vec::with_capacity(sizes.len());
        let mut cursor = RackUnit::FIRST;
        for (size, gap) in sizes.into_iter().zip(slack) {
            cursor += gap;
            let id = self.fresh_id();
            let device = Device::new(id, cursor, size)
                .expect("sampled sizes are non-zero")
                .with_name(format!("dev-{}", id.value()));
            devices.push(device);
            cursor += size;
        }
        devices.shuffle(&mut self.rng);

        RackLayout::new(rack, devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(rack: usize, seed: u64) -> RackGenerator {
        RackGenConfigBuilder::new()
            .rack_size(UnitCount::new(rack))
            .max_devices(24)
            .device_size_range(UnitCount::new(1), UnitCount::new(6))
            .fill_ratio(0.8)
            .seed(seed)
            .build()
            .expect("valid config")
            .into()
    }

    #[test]
    fn test_layouts_are_in_bounds_and_disjoint() {
        for seed in 0..200 {
            let layout = generator(48, seed).generate();
            let rack = layout.rack();
            let mut spans: Vec<_> = layout.devices().iter().map(Device::span).collect();
            for span in &spans {
                assert!(rack.contains_span(*span), "seed {seed}: {span} out of rack");
            }
            spans.sort_by_key(|s| s.start());
            for pair in spans.windows(2) {
                assert!(
                    !pair[0].intersects(&pair[1]),
                    "seed {seed}: {} overlaps {}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn test_layout_respects_fill_budget() {
        for seed in 0..50 {
            let mut g = generator(40, seed);
            let budget = g.config().target_units();
            let layout = g.generate();
            assert!(layout.device_units() <= budget);
            assert!(layout.device_count() <= 24);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generator(42, 99).generate();
        let b = generator(42, 99).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_are_unique_across_layouts() {
        let mut g = generator(42, 5);
        let first = g.generate();
        let second = g.generate();
        let mut ids: Vec<_> = first
            .devices()
            .iter()
            .chain(second.devices())
            .map(Device::id)
            .collect();
        let n = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }

    #[test]
    fn test_sampled_sizes_in_range() {
        let mut g = generator(42, 3);
        for _ in 0..500 {
            let s = g.sample_device_size();
            assert!(s >= UnitCount::new(1) && s <= UnitCount::new(6));
        }
    }
}

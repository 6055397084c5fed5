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

//! Batch reorganization of a whole rack.
//!
//! Both operations return relocated copies and leave the input untouched;
//! sizes and identities never change. Devices are returned in their new
//! position order.

use rack_alloc_core::unit::{RackUnit, UnitCount};
use rack_alloc_model::{device::Device, rack::Rack};
use std::fmt::Display;
use tracing::{debug, instrument};

/// Which order devices are stacked in when compacting.
///
/// The block always starts at unit 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompactDirection {
    /// Ascending current position: the lowest device stays lowest.
    #[default]
    Top,
    /// Descending current position: the highest device lands on unit 1.
    Bottom,
}

impl Display for CompactDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompactDirection::Top => write!(f, "top"),
            CompactDirection::Bottom => write!(f, "bottom"),
        }
    }
}

/// The devices do not fit into the rack at all, so there is nothing to spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributeError {
    DevicesExceedRack {
        required: UnitCount,
        capacity: UnitCount,
    },
}

impl Display for DistributeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributeError::DevicesExceedRack { required, capacity } => write!(
                f,
                "Devices need {} but the rack only has {}",
                required, capacity
            ),
        }
    }
}

impl std::error::Error for DistributeError {}

fn sorted_by_position(devices: &[Device]) -> Vec<&Device> {
    let mut order: Vec<&Device> = devices.iter().collect();
    order.sort_by_key(|d| d.position());
    order
}

/// Packs every device into one contiguous block starting at unit 1.
///
/// Ties in current position keep their input order.
#[instrument(level = "debug", skip(devices), fields(devices = devices.len()))]
pub fn compact_devices(devices: &[Device], direction: CompactDirection) -> Vec<Device> {
    let mut order = sorted_by_position(devices);
    if direction == CompactDirection::Bottom {
        // Not `reverse()`: equal positions must keep input order.
        order.sort_by(|a, b| b.position().cmp(&a.position()));
    }

    let mut next = RackUnit::FIRST;
    let compacted: Vec<Device> = order
        .into_iter()
        .map(|d| {
            let moved = d.relocated(next);
            next += d.size();
            moved
        })
        .collect();

    debug!(block_end = %next, "compacted");
    compacted
}

/// Spreads devices so the free units are shared out evenly between them.
///
/// With `n` devices and `free` spare units, every one of the `n + 1` slots
/// (before, between and after the devices) gets `floor(free / (n + 1))`
/// units; the remainder ends up after the last device. Devices keep their
/// current relative order.
#[instrument(level = "debug", skip(devices, rack), fields(rack = %rack, devices = devices.len()))]
pub fn distribute_devices_evenly(
    devices: &[Device],
    rack: &Rack,
) -> Result<Vec<Device>, DistributeError> {
    let required: UnitCount = devices.iter().map(Device::size).sum();
    let available = rack
        .size()
        .checked_sub(required)
        .ok_or(DistributeError::DevicesExceedRack {
            required,
            capacity: rack.size(),
        })?;

    let gap = available / (devices.len() + 1);
    let mut next = RackUnit::FIRST + gap;
    let spread: Vec<Device> = sorted_by_position(devices)
        .into_iter()
        .map(|d| {
            let moved = d.relocated(next);
            next = next + d.size() + gap;
            moved
        })
        .collect();

    debug!(gap = %gap, "distributed");
    Ok(spread)
}

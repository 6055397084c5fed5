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

use crate::{device::Device, rack::Rack};
use rack_alloc_core::unit::UnitCount;

/// A rack together with the devices currently assigned to it.
///
/// The layout is a plain snapshot: nothing here checks that the devices fit or
/// do not overlap. That is the engine's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackLayout {
    rack: Rack,
    devices: Vec<Device>,
}

impl RackLayout {
    #[inline]
    pub fn new(rack: Rack, devices: Vec<Device>) -> Self {
        Self { rack, devices }
    }

    #[inline]
    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    #[inline]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    #[inline]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Sum of all device sizes.
    #[inline]
    pub fn device_units(&self) -> UnitCount {
        self.devices.iter().map(Device::size).sum()
    }

    #[inline]
    pub fn into_parts(self) -> (Rack, Vec<Device>) {
        (self.rack, self.devices)
    }
}

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
use rack_alloc_core::unit::UnitCount;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceTooLargeError {
    rack_size: UnitCount,
    max_device_size: UnitCount,
}

impl DeviceTooLargeError {
    pub fn new(rack_size: UnitCount, max_device_size: UnitCount) -> Self {
        Self {
            rack_size,
            max_device_size,
        }
    }
    pub fn rack_size(&self) -> UnitCount {
        self.rack_size
    }
    pub fn max_device_size(&self) -> UnitCount {
        self.max_device_size
    }
}

impl Display for DeviceTooLargeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DeviceTooLargeError: max device size {} does not fit rack size {}",
            self.max_device_size, self.rack_size
        )
    }
}

impl std::error::Error for DeviceTooLargeError {}

#[derive(Debug, Clone, PartialEq)]
pub enum RackGenConfigBuildError {
    MissingRackSize,
    EmptyRack(EmptyRackError),
    ZeroDeviceSize,
    DeviceTooLarge(DeviceTooLargeError),
    FillRatioOutOfRange(f64),
}

impl Display for RackGenConfigBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RackGenConfigBuildError::*;
        match self {
            MissingRackSize => write!(f, "Missing rack_size"),
            EmptyRack(e) => write!(f, "{}", e),
            ZeroDeviceSize => write!(f, "Device sizes must be at least one unit"),
            DeviceTooLarge(e) => write!(f, "{}", e),
            FillRatioOutOfRange(r) => write!(f, "Fill ratio {} is outside (0, 1]", r),
        }
    }
}

impl From<EmptyRackError> for RackGenConfigBuildError {
    fn from(err: EmptyRackError) -> Self {
        Self::EmptyRack(err)
    }
}

impl From<DeviceTooLargeError> for RackGenConfigBuildError {
    fn from(err: DeviceTooLargeError) -> Self {
        Self::DeviceTooLarge(err)
    }
}

impl std::error::Error for RackGenConfigBuildError {}

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

use crate::id::DeviceId;
use rack_alloc_core::unit::UnitCount;
use std::fmt::Display;

/// A device was declared with a size of zero units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSizedDeviceError {
    id: DeviceId,
}

impl ZeroSizedDeviceError {
    #[inline]
    pub fn new(id: DeviceId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }
}

impl Display for ZeroSizedDeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Device {} must span at least one rack unit", self.id)
    }
}

impl std::error::Error for ZeroSizedDeviceError {}

/// A rack was declared with zero addressable units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyRackError {
    size: UnitCount,
}

impl EmptyRackError {
    #[inline]
    pub fn new(size: UnitCount) -> Self {
        Self { size }
    }

    #[inline]
    pub fn size(&self) -> UnitCount {
        self.size
    }
}

impl Display for EmptyRackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rack size {} is invalid: a rack needs at least one unit",
            self.size
        )
    }
}

impl std::error::Error for EmptyRackError {}

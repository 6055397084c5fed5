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

//! # Rack Allocation Model (`rack-alloc-model`)
//!
//! Plain records describing what the allocation engine works on.
//!
//! - **`Rack`**: the capacity of an enclosure, addressing units `1..=size`.
//! - **`Device`**: an occupant identified by a **`DeviceId`**, starting at a
//!   position and spanning a number of contiguous units.
//! - **`RackLayout`**: a rack bundled with its devices.
//!
//! Degenerate records (zero-sized devices, empty racks) are rejected when they
//! are constructed, so the engine never sees them.
//!
//! The [`generator`] module produces seeded synthetic layouts that are valid by
//! construction. They drive property tests, benchmarks and the report binary.

pub mod device;
pub mod err;
pub mod generator;
pub mod id;
pub mod layout;
pub mod rack;

pub mod prelude {
    pub use crate::device::Device;
    pub use crate::err::{EmptyRackError, ZeroSizedDeviceError};
    pub use crate::generator::{
        DeviceTooLargeError, RackGenConfig, RackGenConfigBuildError, RackGenConfigBuilder,
        RackGenerator,
    };
    pub use crate::id::DeviceId;
    pub use crate::layout::RackLayout;
    pub use crate::rack::Rack;
}

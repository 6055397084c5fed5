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

//! # Rack Allocation Core (`rack-alloc-core`)
//!
//! Typed numeric building blocks shared by the model and the engine.
//!
//! - [`primitives::Interval`] is a half-open `[start, end)` interval.
//! - [`unit::RackUnit`] is an addressable slot position inside a rack.
//! - [`unit::UnitCount`] is a number of contiguous rack units.
//! - [`unit::UnitSpan`] is the half-open interval a device occupies.
//!
//! Keeping positions and lengths as distinct types means a position can never be
//! added to a position, and a length can never be used where a unit is expected.

pub mod primitives;
pub mod unit;

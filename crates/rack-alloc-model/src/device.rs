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

use crate::{err::ZeroSizedDeviceError, id::DeviceId};
use rack_alloc_core::unit::{RackUnit, UnitCount, UnitSpan};
use std::{borrow::Cow, fmt::Display};

/// A piece of equipment mounted in a rack.
///
/// The engine only looks at the identifier, the start position and the size.
/// The optional name is carried along so rejection messages can name the
/// devices involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    id: DeviceId,
    name: Option<String>,
    position: RackUnit,
    size: UnitCount,
}

impl Device {
    /// Creates an unnamed device occupying `[position, position + size)`.
    ///
    /// The position is not checked against any rack here: a device record may
    /// describe a placement the engine is about to reject.
    #[inline]
    pub fn new(
        id: DeviceId,
        position: RackUnit,
        size: UnitCount,
    ) -> Result<Self, ZeroSizedDeviceError> {
        if size.is_zero() {
            return Err(ZeroSizedDeviceError::new(id));
        }
        Ok(Self {
            id,
            name: None,
            position,
            size,
        })
    }

    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn position(&self) -> RackUnit {
        self.position
    }

    #[inline]
    pub fn size(&self) -> UnitCount {
        self.size
    }

    /// The half-open span `[position, position + size)`.
    ///
    /// A span that would run past the end of the address space is cut off
    /// there. Such a device lies outside every rack, so the cut never changes
    /// what it collides with.
    #[inline]
    pub fn span(&self) -> UnitSpan {
        self.position.saturating_span_of(self.size)
    }

    /// The highest unit the device occupies, saturating like [`Device::span`].
    #[inline]
    pub fn last_unit(&self) -> RackUnit {
        self.position.saturating_add(self.size - UnitCount::new(1))
    }

    /// The name if one was given, otherwise the identifier.
    pub fn label(&self) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(self.id.to_string()),
        }
    }

    #[inline]
    pub fn set_position(&mut self, position: RackUnit) {
        self.position = position;
    }

    /// A copy of this device moved to `position`.
    #[inline]
    pub fn relocated(&self, position: RackUnit) -> Self {
        let mut moved = self.clone();
        moved.position = position;
        moved
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Device({}, {}..={}, {})",
            self.label(),
            self.position,
            self.last_unit(),
            self.size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(id: u64, position: usize, size: usize) -> Device {
        Device::new(DeviceId::new(id), RackUnit::new(position), UnitCount::new(size))
            .expect("non-zero size")
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let err = Device::new(DeviceId::new(1), RackUnit::new(1), UnitCount::zero()).unwrap_err();
        assert_eq!(err.id(), DeviceId::new(1));
    }

    #[test]
    fn test_span_covers_closed_range() {
        let d = dev(1, 3, 2);
        assert_eq!(d.span(), UnitSpan::new(RackUnit::new(3), RackUnit::new(5)));
        assert_eq!(d.last_unit(), RackUnit::new(4));
    }

    #[test]
    fn test_span_at_end_of_address_space_does_not_overflow() {
        let d = dev(9, usize::MAX - 1, 4);
        assert_eq!(d.span().end(), RackUnit::new(usize::MAX));
        assert_eq!(d.last_unit(), RackUnit::new(usize::MAX));
        assert!(dev(9, usize::MAX, 2).span().is_empty());
    }

    #[test]
    fn test_single_unit_device() {
        let d = dev(1, 7, 1);
        assert_eq!(d.position(), d.last_unit());
        assert_eq!(d.span().extent(), UnitCount::new(1));
    }

    #[test]
    fn test_label_prefers_name() {
        let anonymous = dev(4, 1, 1);
        assert_eq!(anonymous.label(), "DeviceId(4)");

        let named = dev(4, 1, 1).with_name("core-switch");
        assert_eq!(named.label(), "core-switch");
        assert_eq!(named.name(), Some("core-switch"));
    }

    #[test]
    fn test_relocated_keeps_identity_and_size() {
        let d = dev(2, 1, 3).with_name("pdu");
        let moved = d.relocated(RackUnit::new(8));
        assert_eq!(moved.id(), d.id());
        assert_eq!(moved.size(), d.size());
        assert_eq!(moved.name(), Some("pdu"));
        assert_eq!(moved.position(), RackUnit::new(8));
        assert_eq!(d.position(), RackUnit::new(1));
    }

    #[test]
    fn test_display() {
        let d = dev(2, 4, 2).with_name("ups");
        assert_eq!(d.to_string(), "Device(ups, U4..=U5, 2U)");
    }
}

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

//! Pointer-to-unit snapping for drag and drop.
//!
//! The snapper only proposes a unit. Whether the drop may happen is decided by
//! [`validate_placement`], which [`evaluate_drop`] runs on every proposal.

use crate::validate::{PlacementError, validate_placement};
use rack_alloc_core::unit::{RackUnit, UnitCount, UnitSpan};
use rack_alloc_model::{device::Device, id::DeviceId, rack::Rack};
use tracing::{instrument, trace};

/// Maps a pixel offset from the rack origin to a start unit for a device of
/// `device_size`.
///
/// The offset becomes `floor(offset / unit_pixel_height) + 1` and is then
/// clamped into `1..=rack_size - device_size + 1`, so the proposal never runs
/// past the rack. Negative and NaN offsets snap to unit 1. A device larger
/// than the rack snaps to unit 1 and is left for validation to reject.
///
/// # Panics
///
/// Panics if `unit_pixel_height` is not a finite positive number or if
/// `device_size` is zero.
pub fn snap_to_unit(
    pointer_offset: f64,
    unit_pixel_height: f64,
    device_size: UnitCount,
    rack: &Rack,
) -> RackUnit {
    assert!(
        unit_pixel_height.is_finite() && unit_pixel_height > 0.0,
        "unit pixel height must be finite and positive, got {unit_pixel_height}"
    );
    assert!(!device_size.is_zero(), "device size must be at least one unit");

    let index = (pointer_offset / unit_pixel_height).floor();
    // `as` saturates: NaN and negatives become 0, huge values usize::MAX.
    let raw = RackUnit::new((index as usize).saturating_add(1));

    let highest = rack
        .size()
        .checked_sub(device_size)
        .map(|room| RackUnit::FIRST + room)
        .unwrap_or(RackUnit::FIRST);

    raw.clamp(RackUnit::FIRST, highest)
}

/// Live verdict for a device hovering over a candidate unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZone {
    device: DeviceId,
    position: RackUnit,
    size: UnitCount,
    rejection: Option<PlacementError>,
}

impl DropZone {
    #[inline]
    pub fn device(&self) -> DeviceId {
        self.device
    }

    #[inline]
    pub fn position(&self) -> RackUnit {
        self.position
    }

    #[inline]
    pub fn size(&self) -> UnitCount {
        self.size
    }

    /// Units the device would cover if dropped here.
    #[inline]
    pub fn span(&self) -> UnitSpan {
        UnitSpan::new(self.position, self.position + self.size)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.rejection.is_none()
    }

    #[inline]
    pub fn rejection(&self) -> Option<&PlacementError> {
        self.rejection.as_ref()
    }

    /// Rejection reason to display, `None` when the drop is legal.
    pub fn reason(&self) -> Option<String> {
        self.rejection.as_ref().map(PlacementError::reason)
    }

    /// Commits the drop, yielding the position to persist.
    pub fn accept(self) -> Result<RackUnit, PlacementError> {
        match self.rejection {
            None => Ok(self.position),
            Some(err) => Err(err),
        }
    }
}

/// Snaps `device` under the pointer and validates the drop against `devices`.
///
/// `devices` may contain the dragged device; its current placement is
/// ignored.
#[instrument(
    level = "trace",
    skip(device, rack, devices),
    fields(device = %device.id(), devices = devices.len())
)]
pub fn evaluate_drop(
    pointer_offset: f64,
    unit_pixel_height: f64,
    device: &Device,
    rack: &Rack,
    devices: &[Device],
) -> DropZone {
    let position = snap_to_unit(pointer_offset, unit_pixel_height, device.size(), rack);
    let rejection =
        validate_placement(position, device.size(), rack, devices, Some(device.id())).err();
    trace!(%position, valid = rejection.is_none(), "drop evaluated");
    DropZone {
        device: device.id(),
        position,
        size: device.size(),
        rejection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: usize) -> RackUnit {
        RackUnit::new(x)
    }
    fn len(x: usize) -> UnitCount {
        UnitCount::new(x)
    }
    fn rack(n: usize) -> Rack {
        Rack::new(len(n)).unwrap()
    }
    fn dev(id: u64, p: usize, n: usize) -> Device {
        Device::new(DeviceId::new(id), pos(p), len(n)).unwrap()
    }

    #[test]
    fn test_snap_floors_offset() {
        let r = rack(42);
        assert_eq!(snap_to_unit(0.0, 20.0, len(1), &r), pos(1));
        assert_eq!(snap_to_unit(19.9, 20.0, len(1), &r), pos(1));
        assert_eq!(snap_to_unit(20.0, 20.0, len(1), &r), pos(2));
        assert_eq!(snap_to_unit(145.0, 20.0, len(2), &r), pos(8));
    }

    #[test]
    fn test_snap_clamps_low() {
        let r = rack(10);
        assert_eq!(snap_to_unit(-35.0, 20.0, len(2), &r), pos(1));
        assert_eq!(snap_to_unit(f64::NAN, 20.0, len(2), &r), pos(1));
    }

    #[test]
    fn test_snap_clamps_high_to_fit_device() {
        let r = rack(10);
        assert_eq!(snap_to_unit(10_000.0, 20.0, len(3), &r), pos(8));
        assert_eq!(snap_to_unit(f64::INFINITY, 20.0, len(1), &r), pos(10));
    }

    #[test]
    fn test_snap_oversized_device_goes_to_first_unit() {
        assert_eq!(snap_to_unit(60.0, 20.0, len(5), &rack(4)), pos(1));
    }

    #[test]
    #[should_panic(expected = "unit pixel height must be finite and positive")]
    fn test_snap_rejects_zero_height() {
        let _ = snap_to_unit(10.0, 0.0, len(1), &rack(4));
    }

    #[test]
    fn test_drop_onto_free_units_is_valid() {
        let devices = [dev(1, 1, 2), dev(2, 6, 1)];
        let zone = evaluate_drop(40.0, 20.0, &devices[0], &rack(10), &devices);
        assert_eq!(zone.position(), pos(3));
        assert!(zone.is_valid());
        assert_eq!(zone.reason(), None);
        assert_eq!(zone.accept(), Ok(pos(3)));
    }

    #[test]
    fn test_drop_over_own_placement_is_valid() {
        let devices = [dev(1, 3, 2)];
        let zone = evaluate_drop(50.0, 20.0, &devices[0], &rack(10), &devices);
        assert_eq!(zone.position(), pos(3));
        assert!(zone.is_valid());
    }

    #[test]
    fn test_drop_onto_other_device_is_rejected() {
        let devices = [dev(1, 1, 2), dev(2, 6, 2).with_name("switch")];
        let zone = evaluate_drop(90.0, 20.0, &devices[0], &rack(10), &devices);
        assert_eq!(zone.position(), pos(5));
        assert_eq!(zone.span(), UnitSpan::new(pos(5), pos(7)));
        assert!(!zone.is_valid());
        assert_eq!(zone.reason().as_deref(), Some("collides with switch"));
        assert!(matches!(zone.accept(), Err(PlacementError::Collision(_))));
    }

    #[test]
    fn test_drop_of_oversized_device_is_rejected() {
        let big = dev(1, 1, 6);
        let zone = evaluate_drop(0.0, 20.0, &big, &rack(4), &[]);
        assert!(matches!(
            zone.rejection(),
            Some(PlacementError::ExceedsRackCapacity(_))
        ));
    }
}

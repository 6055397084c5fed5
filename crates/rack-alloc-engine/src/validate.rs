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

//! Placement validation.
//!
//! [`validate_placement`] is the single gate every write path goes through
//! before committing a position. It checks, in order and stopping at the
//! first failure, the lower rack bound, the upper rack bound and collisions
//! with the other devices.

use crate::occupancy::detect_collision;
use rack_alloc_core::unit::{RackUnit, UnitCount, UnitSpan};
use rack_alloc_model::{device::Device, id::DeviceId, rack::Rack};
use std::fmt::Display;
use tracing::{instrument, trace};

/// The requested start lies below unit 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BelowRackMinimumError {
    position: RackUnit,
}

impl BelowRackMinimumError {
    #[inline]
    pub fn new(position: RackUnit) -> Self {
        Self { position }
    }

    #[inline]
    pub fn position(&self) -> RackUnit {
        self.position
    }
}

impl Display for BelowRackMinimumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "position below rack minimum: {} is below {}",
            self.position,
            RackUnit::FIRST
        )
    }
}

impl std::error::Error for BelowRackMinimumError {}

/// The requested span runs past the last unit of the rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExceedsRackCapacityError {
    position: RackUnit,
    size: UnitCount,
    rack_size: UnitCount,
}

impl ExceedsRackCapacityError {
    #[inline]
    pub fn new(position: RackUnit, size: UnitCount, rack_size: UnitCount) -> Self {
        Self {
            position,
            size,
            rack_size,
        }
    }

    #[inline]
    pub fn position(&self) -> RackUnit {
        self.position
    }

    #[inline]
    pub fn size(&self) -> UnitCount {
        self.size
    }

    #[inline]
    pub fn rack_size(&self) -> UnitCount {
        self.rack_size
    }
}

impl Display for ExceedsRackCapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "exceeds rack capacity: {} device at {} does not fit a {} rack",
            self.size, self.position, self.rack_size
        )
    }
}

impl std::error::Error for ExceedsRackCapacityError {}

/// One device a candidate placement ran into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Conflict {
    id: DeviceId,
    label: String,
    span: UnitSpan,
}

impl Conflict {
    fn of(device: &Device) -> Self {
        Self {
            id: device.id(),
            label: device.label().into_owned(),
            span: device.span(),
        }
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Device name, or its identifier when it has none.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn span(&self) -> UnitSpan {
        self.span
    }
}

/// The requested span overlaps one or more devices. All of them are listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollisionError {
    candidate: UnitSpan,
    conflicts: Vec<Conflict>,
}

impl CollisionError {
    pub fn new<'a, I>(candidate: UnitSpan, devices: I) -> Self
    where
        I: IntoIterator<Item = &'a Device>,
    {
        Self {
            candidate,
            conflicts: devices.into_iter().map(Conflict::of).collect(),
        }
    }

    #[inline]
    pub fn candidate(&self) -> UnitSpan {
        self.candidate
    }

    #[inline]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn ids(&self) -> Vec<DeviceId> {
        self.conflicts.iter().map(Conflict::id).collect()
    }
}

impl Display for CollisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "collides with ")?;
        for (i, c) in self.conflicts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c.label)?;
        }
        Ok(())
    }
}

impl std::error::Error for CollisionError {}

/// Why a placement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlacementError {
    BelowRackMinimum(BelowRackMinimumError),
    ExceedsRackCapacity(ExceedsRackCapacityError),
    Collision(CollisionError),
}

impl PlacementError {
    /// Returns `true` for the two rack-bound failures.
    #[inline]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            PlacementError::BelowRackMinimum(_) | PlacementError::ExceedsRackCapacity(_)
        )
    }

    /// Human readable rejection reason, fit to show verbatim to an operator.
    #[inline]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::BelowRackMinimum(e) => write!(f, "{}", e),
            PlacementError::ExceedsRackCapacity(e) => write!(f, "{}", e),
            PlacementError::Collision(e) => write!(f, "{}", e),
        }
    }
}

impl From<BelowRackMinimumError> for PlacementError {
    fn from(err: BelowRackMinimumError) -> Self {
        PlacementError::BelowRackMinimum(err)
    }
}

impl From<ExceedsRackCapacityError> for PlacementError {
    fn from(err: ExceedsRackCapacityError) -> Self {
        PlacementError::ExceedsRackCapacity(err)
    }
}

impl From<CollisionError> for PlacementError {
    fn from(err: CollisionError) -> Self {
        PlacementError::Collision(err)
    }
}

impl std::error::Error for PlacementError {}

/// Decides whether a device of `size` may start at `position`.
///
/// The device identified by `exclude` is ignored, which is how a device being
/// moved is checked against everything but itself. On success the accepted
/// span is returned.
///
/// # Panics
///
/// Panics if `size` is zero.
#[instrument(
    level = "trace",
    skip(rack, existing),
    fields(rack = %rack, devices = existing.len())
)]
pub fn validate_placement(
    position: RackUnit,
    size: UnitCount,
    rack: &Rack,
    existing: &[Device],
    exclude: Option<DeviceId>,
) -> Result<UnitSpan, PlacementError> {
    assert!(!size.is_zero(), "device size must be at least one unit");

    if position < rack.first_unit() {
        return Err(BelowRackMinimumError::new(position).into());
    }

    let span = match position.span_of(size) {
        Some(span) if rack.contains_span(span) => span,
        _ => return Err(ExceedsRackCapacityError::new(position, size, rack.size()).into()),
    };

    let report = detect_collision(span, existing, exclude);
    if report.has_collision() {
        trace!(hits = report.colliding_devices().len(), "placement collides");
        return Err(CollisionError::new(span, report.into_devices()).into());
    }

    Ok(span)
}

/// Validates moving `device` to `position` among `existing`.
///
/// `existing` may contain `device` itself; it never collides with its own
/// previous placement.
#[inline]
pub fn validate_move(
    device: &Device,
    position: RackUnit,
    rack: &Rack,
    existing: &[Device],
) -> Result<UnitSpan, PlacementError> {
    validate_placement(position, device.size(), rack, existing, Some(device.id()))
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
    fn test_placement_in_empty_rack_is_valid() {
        let span = validate_placement(pos(1), len(2), &rack(4), &[], None).unwrap();
        assert_eq!(span, UnitSpan::new(pos(1), pos(3)));
    }

    #[test]
    fn test_overlapping_placement_names_the_device() {
        let devices = [dev(1, 1, 2).with_name("A")];
        let err = validate_placement(pos(2), len(2), &rack(4), &devices, None).unwrap_err();
        match &err {
            PlacementError::Collision(c) => assert_eq!(c.ids(), vec![DeviceId::new(1)]),
            other => panic!("expected a collision, got {other:?}"),
        }
        assert_eq!(err.reason(), "collides with A");
    }

    #[test]
    fn test_oversized_device_exceeds_capacity() {
        let err = validate_placement(pos(1), len(3), &rack(2), &[], None).unwrap_err();
        assert!(matches!(err, PlacementError::ExceedsRackCapacity(_)));
        assert!(err.reason().starts_with("exceeds rack capacity"));
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_position_zero_is_below_minimum() {
        let err = validate_placement(pos(0), len(1), &rack(4), &[], None).unwrap_err();
        assert_eq!(
            err,
            PlacementError::BelowRackMinimum(BelowRackMinimumError::new(pos(0)))
        );
        assert!(err.reason().starts_with("position below rack minimum"));
    }

    #[test]
    fn test_bounds_are_checked_before_collisions() {
        // Both out of bounds and overlapping: the bound failure wins.
        let devices = [dev(1, 3, 2)];
        let err = validate_placement(pos(3), len(3), &rack(4), &devices, None).unwrap_err();
        assert!(matches!(err, PlacementError::ExceedsRackCapacity(_)));
    }

    #[test]
    fn test_last_unit_is_usable() {
        assert!(validate_placement(pos(4), len(1), &rack(4), &[], None).is_ok());
        assert!(validate_placement(pos(5), len(1), &rack(4), &[], None).is_err());
    }

    #[test]
    fn test_huge_position_does_not_overflow() {
        let err = validate_placement(pos(usize::MAX), len(2), &rack(4), &[], None).unwrap_err();
        assert!(matches!(err, PlacementError::ExceedsRackCapacity(_)));
    }

    #[test]
    fn test_collision_lists_every_device() {
        let devices = [
            dev(1, 1, 2).with_name("web-1"),
            dev(2, 3, 1),
            dev(3, 6, 2).with_name("db-1"),
        ];
        let err = validate_placement(pos(2), len(5), &rack(10), &devices, None).unwrap_err();
        assert_eq!(err.reason(), "collides with web-1, DeviceId(2), db-1");
    }

    #[test]
    fn test_move_ignores_own_placement() {
        let devices = [dev(1, 1, 2), dev(2, 5, 2)];
        assert!(validate_move(&devices[0], pos(2), &rack(10), &devices).is_ok());
        assert!(validate_move(&devices[0], pos(4), &rack(10), &devices).is_err());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let devices = [dev(1, 2, 3), dev(2, 7, 1)];
        for p in 0..12 {
            for n in 1..5 {
                let first = validate_placement(pos(p), len(n), &rack(10), &devices, None);
                let second = validate_placement(pos(p), len(n), &rack(10), &devices, None);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    #[should_panic(expected = "device size must be at least one unit")]
    fn test_zero_size_is_a_contract_violation() {
        let _ = validate_placement(pos(1), len(0), &rack(4), &[], None);
    }
}

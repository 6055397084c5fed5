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

//! Occupancy model and collision detection.
//!
//! An [`Occupancy`] is derived from the caller's device list on every call and
//! never cached: the list may change between calls. Every other engine
//! operation reads rack state through it.

use crate::{gaps::FreeSpace, intervalset::IntervalSet};
use rack_alloc_core::unit::{RackUnit, UnitCount, UnitSpan};
use rack_alloc_model::{device::Device, id::DeviceId, rack::Rack};
use tracing::{instrument, trace};

/// Snapshot of which units of a rack are taken.
///
/// Devices are kept in ascending position order. The coalesced set of
/// occupied units is clipped to the rack, so a device hanging over the end of
/// the rack only contributes the units that exist.
#[derive(Debug, Clone)]
pub struct Occupancy<'a> {
    rack: Rack,
    devices: Vec<&'a Device>,
    occupied: IntervalSet<RackUnit>,
}

impl<'a> Occupancy<'a> {
    /// Derives the occupancy of `rack` from `devices`, ignoring the device
    /// identified by `exclude` if any.
    pub fn new(rack: &Rack, devices: &'a [Device], exclude: Option<DeviceId>) -> Self {
        let universe = rack.universe();
        let mut kept: Vec<&'a Device> = devices
            .iter()
            .filter(|d| Some(d.id()) != exclude)
            .collect();
        kept.sort_by_key(|d| d.position());

        let occupied = kept
            .iter()
            .filter_map(|d| d.span().intersection(&universe))
            .collect();

        Self {
            rack: *rack,
            devices: kept,
            occupied,
        }
    }

    #[inline]
    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    /// The devices taken into account, in ascending position order.
    #[inline]
    pub fn devices(&self) -> &[&'a Device] {
        &self.devices
    }

    #[inline]
    pub fn occupied(&self) -> &IntervalSet<RackUnit> {
        &self.occupied
    }

    /// Number of distinct rack units covered by at least one device.
    #[inline]
    pub fn occupied_units(&self) -> UnitCount {
        self.occupied.total_measure()
    }

    #[inline]
    pub fn free_units(&self) -> UnitCount {
        self.rack.size().saturating_sub(self.occupied_units())
    }

    #[inline]
    pub fn is_unit_occupied(&self, unit: RackUnit) -> bool {
        self.occupied.contains_point(unit)
    }

    /// Returns `true` if no device touches any unit of `span`.
    #[inline]
    pub fn is_span_free(&self, span: UnitSpan) -> bool {
        !self.occupied.overlaps(span)
    }

    /// Every device sharing at least one unit with `span`.
    pub fn colliding(&self, span: UnitSpan) -> impl Iterator<Item = &'a Device> + '_ {
        self.devices
            .iter()
            .copied()
            .filter(move |d| d.span().intersects(&span))
    }

    /// The maximal free runs of the rack, in ascending order.
    pub fn free_spaces(&self) -> Vec<FreeSpace> {
        self.occupied
            .gaps_within(self.rack.universe())
            .iter()
            .map(|gap| FreeSpace::from_span(*gap))
            .collect()
    }
}

/// Outcome of checking a candidate span against the devices of a rack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionReport<'a> {
    candidate: UnitSpan,
    colliding: Vec<&'a Device>,
}

impl<'a> CollisionReport<'a> {
    #[inline]
    pub fn candidate(&self) -> UnitSpan {
        self.candidate
    }

    #[inline]
    pub fn has_collision(&self) -> bool {
        !self.colliding.is_empty()
    }

    /// Every device overlapping the candidate, in input order.
    #[inline]
    pub fn colliding_devices(&self) -> &[&'a Device] {
        &self.colliding
    }

    pub fn colliding_ids(&self) -> Vec<DeviceId> {
        self.colliding.iter().map(|d| d.id()).collect()
    }

    #[inline]
    pub fn into_devices(self) -> Vec<&'a Device> {
        self.colliding
    }
}

/// Checks `candidate` against every device in `existing` except the one
/// identified by `exclude`, reporting all overlaps rather than the first.
///
/// Two closed ranges `[a1, a2]` and `[b1, b2]` overlap iff `a1 <= b2 && b1 <= a2`.
#[instrument(level = "trace", skip(existing), fields(devices = existing.len()))]
pub fn detect_collision<'a>(
    candidate: UnitSpan,
    existing: &'a [Device],
    exclude: Option<DeviceId>,
) -> CollisionReport<'a> {
    let colliding: Vec<&'a Device> = existing
        .iter()
        .filter(|d| Some(d.id()) != exclude)
        .filter(|d| d.span().intersects(&candidate))
        .collect();
    trace!(hits = colliding.len(), "collision scan done");
    CollisionReport {
        candidate,
        colliding,
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
    fn span(p: usize, n: usize) -> UnitSpan {
        pos(p).span_of(len(n)).unwrap()
    }
    fn rack(n: usize) -> Rack {
        Rack::new(len(n)).unwrap()
    }
    fn dev(id: u64, p: usize, n: usize) -> Device {
        Device::new(DeviceId::new(id), pos(p), len(n)).unwrap()
    }

    #[test]
    fn test_empty_rack_has_no_collisions() {
        let report = detect_collision(span(1, 2), &[], None);
        assert!(!report.has_collision());
        assert!(report.colliding_devices().is_empty());
    }

    #[test]
    fn test_shared_boundary_unit_collides() {
        // A occupies [1,2]; B at [2,3] shares unit 2.
        let devices = [dev(1, 1, 2)];
        let report = detect_collision(span(2, 2), &devices, None);
        assert!(report.has_collision());
        assert_eq!(report.colliding_ids(), vec![DeviceId::new(1)]);
    }

    #[test]
    fn test_adjacent_spans_do_not_collide() {
        let devices = [dev(1, 1, 2)];
        assert!(!detect_collision(span(3, 2), &devices, None).has_collision());
    }

    #[test]
    fn test_reports_every_colliding_device() {
        let devices = [dev(1, 1, 2), dev(2, 4, 1), dev(3, 6, 3), dev(4, 12, 1)];
        let report = detect_collision(span(2, 6), &devices, None);
        assert_eq!(
            report.colliding_ids(),
            vec![DeviceId::new(1), DeviceId::new(2), DeviceId::new(3)]
        );
    }

    #[test]
    fn test_excluded_device_is_ignored() {
        let devices = [dev(1, 1, 2), dev(2, 5, 2)];
        let report = detect_collision(span(1, 3), &devices, Some(DeviceId::new(1)));
        assert!(!report.has_collision());

        let report = detect_collision(span(1, 5), &devices, Some(DeviceId::new(1)));
        assert_eq!(report.colliding_ids(), vec![DeviceId::new(2)]);
    }

    #[test]
    fn test_occupancy_sorts_and_counts_units() {
        let devices = [dev(2, 7, 2), dev(1, 1, 3)];
        let occ = Occupancy::new(&rack(10), &devices, None);
        let order: Vec<_> = occ.devices().iter().map(|d| d.id().value()).collect();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(occ.occupied_units(), len(5));
        assert_eq!(occ.free_units(), len(5));
    }

    #[test]
    fn test_occupancy_unit_queries() {
        let devices = [dev(1, 3, 2)];
        let occ = Occupancy::new(&rack(10), &devices, None);
        assert!(!occ.is_unit_occupied(pos(2)));
        assert!(occ.is_unit_occupied(pos(3)));
        assert!(occ.is_unit_occupied(pos(4)));
        assert!(!occ.is_unit_occupied(pos(5)));
        assert!(occ.is_span_free(span(5, 6)));
        assert!(!occ.is_span_free(span(1, 3)));
    }

    #[test]
    fn test_occupancy_clips_to_rack() {
        let devices = [dev(1, 9, 4)];
        let occ = Occupancy::new(&rack(10), &devices, None);
        assert_eq!(occ.occupied_units(), len(2));
    }

    #[test]
    fn test_occupancy_excludes_device() {
        let devices = [dev(1, 1, 4), dev(2, 6, 2)];
        let occ = Occupancy::new(&rack(10), &devices, Some(DeviceId::new(1)));
        assert_eq!(occ.devices().len(), 1);
        assert!(occ.is_span_free(span(1, 4)));
    }

    #[test]
    fn test_occupancy_colliding_matches_detector() {
        let devices = [dev(1, 1, 2), dev(2, 4, 3), dev(3, 9, 2)];
        let occ = Occupancy::new(&rack(12), &devices, None);
        let candidate = span(2, 4);
        let via_occupancy: Vec<_> = occ.colliding(candidate).map(Device::id).collect();
        assert_eq!(
            via_occupancy,
            detect_collision(candidate, &devices, None).colliding_ids()
        );
    }
}

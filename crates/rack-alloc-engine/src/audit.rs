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

//! Whole-rack consistency check.
//!
//! The engine keeps a rack consistent only as long as every write goes
//! through validation. Device lists that were edited elsewhere can be checked
//! here: every identifier unique, every device inside the rack and no two
//! devices sharing a unit.

use rack_alloc_core::unit::UnitSpan;
use rack_alloc_model::{device::Device, id::DeviceId, rack::Rack};
use std::{collections::HashSet, fmt::Display};
use tracing::{instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutViolation {
    /// The identifier was already used by an earlier device in the list.
    DuplicateId { id: DeviceId },
    /// The device starts below unit 1 or ends past the last unit.
    OutOfBounds {
        id: DeviceId,
        span: Option<UnitSpan>,
    },
    /// Two devices share the units in `shared`. `first` starts no later than `second`.
    Overlap {
        first: DeviceId,
        second: DeviceId,
        shared: UnitSpan,
    },
}

impl Display for LayoutViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutViolation::DuplicateId { id } => write!(f, "{} is used more than once", id),
            LayoutViolation::OutOfBounds {
                id,
                span: Some(span),
            } => {
                write!(f, "{} at {} lies outside the rack", id, span)
            }
            LayoutViolation::OutOfBounds { id, span: None } => {
                write!(f, "{} extends past the addressable range", id)
            }
            LayoutViolation::Overlap {
                first,
                second,
                shared,
            } => write!(f, "{} and {} overlap on {}", first, second, shared),
        }
    }
}

/// Lists every violation in `devices`.
///
/// Duplicates and bound violations come first in input order, followed by
/// overlapping pairs ordered by the start of the later device.
#[instrument(
    level = "debug",
    skip(rack, devices),
    fields(rack = %rack, devices = devices.len())
)]
pub fn audit_layout(rack: &Rack, devices: &[Device]) -> Vec<LayoutViolation> {
    let mut violations = Vec::new();

    let mut seen = HashSet::with_capacity(devices.len());
    for d in devices {
        if !seen.insert(d.id()) {
            violations.push(LayoutViolation::DuplicateId { id: d.id() });
        }
    }

    let mut spans: Vec<(UnitSpan, DeviceId)> = Vec::with_capacity(devices.len());
    for d in devices {
        let span = d.position().span_of(d.size());
        match span {
            Some(s) if d.position() >= rack.first_unit() && rack.contains_span(s) => {
                spans.push((s, d.id()))
            }
            Some(s) => {
                violations.push(LayoutViolation::OutOfBounds {
                    id: d.id(),
                    span: Some(s),
                });
                spans.push((s, d.id()));
            }
            None => violations.push(LayoutViolation::OutOfBounds {
                id: d.id(),
                span: None,
            }),
        }
    }

    // Sweep in start order, keeping devices whose span is still open.
    spans.sort_by_key(|(s, _)| s.start());
    let mut open: Vec<(UnitSpan, DeviceId)> = Vec::new();
    for (span, id) in spans {
        open.retain(|(o, _)| o.end() > span.start());
        for (o, other) in &open {
            if let Some(shared) = o.intersection(&span) {
                violations.push(LayoutViolation::Overlap {
                    first: *other,
                    second: id,
                    shared,
                });
            }
        }
        open.push((span, id));
    }

    if !violations.is_empty() {
        warn!(count = violations.len(), "layout is inconsistent");
    }
    violations
}

#[inline]
pub fn is_consistent(rack: &Rack, devices: &[Device]) -> bool {
    audit_layout(rack, devices).is_empty()
}

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

//! Bulk import of device rows.
//!
//! Every row goes through [`validate_placement`] against the existing devices
//! plus the rows accepted before it, so an import can never produce an
//! overlapping rack.

use crate::{
    config::ImportConfig,
    strategy::{InsufficientSpaceError, place_device},
    validate::{PlacementError, validate_placement},
};
use rack_alloc_core::unit::{RackUnit, UnitCount};
use rack_alloc_model::{device::Device, id::DeviceId, rack::Rack};
use std::{collections::HashSet, fmt::Display};
use tracing::{debug, instrument, warn};

/// One device record as it arrives from an external source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    row: usize,
    id: DeviceId,
    name: Option<String>,
    size: UnitCount,
    position: Option<RackUnit>,
}

impl ImportRow {
    /// A row without a position; it will be auto-placed.
    #[inline]
    pub fn new(row: usize, id: DeviceId, size: UnitCount) -> Self {
        Self {
            row,
            id,
            name: None,
            size,
            position: None,
        }
    }

    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn at(mut self, position: RackUnit) -> Self {
        self.position = Some(position);
        self
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[inline]
    pub fn size(&self) -> UnitCount {
        self.size
    }

    #[inline]
    pub fn position(&self) -> Option<RackUnit> {
        self.position
    }
}

/// Why a single row was not imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRowError {
    ZeroSize,
    DuplicateId(DeviceId),
    Placement(PlacementError),
    InsufficientSpace(InsufficientSpaceError),
}

impl Display for ImportRowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportRowError::ZeroSize => write!(f, "device size must be at least one unit"),
            ImportRowError::DuplicateId(id) => write!(f, "{} already exists in the rack", id),
            ImportRowError::Placement(e) => write!(f, "{}", e),
            ImportRowError::InsufficientSpace(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ImportRowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportRowError::Placement(e) => Some(e),
            ImportRowError::InsufficientSpace(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlacementError> for ImportRowError {
    fn from(err: PlacementError) -> Self {
        ImportRowError::Placement(err)
    }
}

impl From<InsufficientSpaceError> for ImportRowError {
    fn from(err: InsufficientSpaceError) -> Self {
        ImportRowError::InsufficientSpace(err)
    }
}

/// A strict import stopped at a bad row. Nothing from the import is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAbortedError {
    row: usize,
    cause: ImportRowError,
}

impl ImportAbortedError {
    #[inline]
    pub fn new(row: usize, cause: ImportRowError) -> Self {
        Self { row, cause }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn cause(&self) -> &ImportRowError {
        &self.cause
    }
}

impl Display for ImportAbortedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Import aborted at row {}: {}", self.row, self.cause)
    }
}

impl std::error::Error for ImportAbortedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Outcome of a partial import.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    accepted: Vec<Device>,
    failures: Vec<(usize, ImportRowError)>,
}

impl ImportReport {
    /// Devices created by the import with their final positions.
    #[inline]
    pub fn accepted(&self) -> &[Device] {
        &self.accepted
    }

    /// Rejected rows as `(row number, error)` pairs, in input order.
    ///
    /// Row numbers come from the caller and are not required to be unique;
    /// every rejected row gets its own entry.
    #[inline]
    pub fn failures(&self) -> &[(usize, ImportRowError)] {
        &self.failures
    }

    /// The error of the first rejected row numbered `row`.
    pub fn failure(&self, row: usize) -> Option<&ImportRowError> {
        self.failures
            .iter()
            .find(|(r, _)| *r == row)
            .map(|(_, err)| err)
    }

    #[inline]
    pub fn imported(&self) -> usize {
        self.accepted.len()
    }

    #[inline]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    #[inline]
    pub fn into_devices(self) -> Vec<Device> {
        self.accepted
    }
}

fn import_row(
    row: &ImportRow,
    rack: &Rack,
    working: &[Device],
    ids: &HashSet<DeviceId>,
    config: &ImportConfig,
) -> Result<Device, ImportRowError> {
    let mut device = Device::new(row.id, row.position.unwrap_or(RackUnit::FIRST), row.size)
        .map_err(|_| ImportRowError::ZeroSize)?;
    if let Some(name) = &row.name {
        device = device.with_name(name.as_str());
    }
    if ids.contains(&row.id) {
        return Err(ImportRowError::DuplicateId(row.id));
    }

    let position = match row.position {
        Some(p) => p,
        None => place_device(row.size, working, rack, config.auto_place)?,
    };
    validate_placement(position, row.size, rack, working, None)?;
    device.set_position(position);
    Ok(device)
}

/// Imports `rows` into `rack` next to `existing`.
///
/// Rows are processed in order. A non-strict import skips bad rows and lists
/// them in the report; a strict import fails on the first one.
#[instrument(
    level = "debug",
    skip(rows, rack, existing, config),
    fields(rack = %rack, existing = existing.len(), strict = config.strict)
)]
pub fn import_devices<I>(
    rows: I,
    rack: &Rack,
    existing: &[Device],
    config: &ImportConfig,
) -> Result<ImportReport, ImportAbortedError>
where
    I: IntoIterator<Item = ImportRow>,
{
    let mut working = existing.to_vec();
    let mut ids: HashSet<DeviceId> = existing.iter().map(Device::id).collect();
    let mut report = ImportReport::default();

    for row in rows {
        match import_row(&row, rack, &working, &ids, config) {
            Ok(device) => {
                ids.insert(device.id());
                working.push(device.clone());
                report.accepted.push(device);
            }
            Err(err) => {
                warn!(row = row.row, id = %row.id, reason = %err, "import row rejected");
                if config.strict {
                    return Err(ImportAbortedError::new(row.row, err));
                }
                report.failures.push((row.row, err));
            }
        }
    }

    debug!(
        imported = report.imported(),
        failed = report.failed(),
        "import finished"
    );
    Ok(report)
}

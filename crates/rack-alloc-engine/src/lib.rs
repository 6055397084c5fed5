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

//! # Rack Allocation Engine (`rack-alloc-engine`)
//!
//! A one-dimensional interval allocator over the units `1..=size` of a rack.
//! Every device holds a contiguous run of units and no two devices may share
//! one.
//!
//! The engine is stateless: each operation takes the full device list and
//! returns new values, leaving persistence to the caller.
//!
//! - [`occupancy`]: the occupied unit set and collision detection.
//! - [`gaps`]: maximal free runs.
//! - [`validate`]: the placement gate every write path must pass.
//! - [`strategy`]: automatic placement (nearest-fit, top-first, bottom-first,
//!   center-biased, compact).
//! - [`reorg`]: compaction and even distribution.
//! - [`snap`]: pointer snapping and drop-zone evaluation.
//! - [`utilization`]: used/available units and an efficiency band.
//! - [`import`]: row-by-row bulk import.
//! - [`audit`]: whole-layout consistency check.

pub mod audit;
pub mod config;
pub mod gaps;
pub mod import;
pub mod intervalset;
pub mod occupancy;
pub mod reorg;
pub mod snap;
pub mod strategy;
pub mod utilization;
pub mod validate;

pub mod prelude {
    pub use crate::audit::{LayoutViolation, audit_layout, is_consistent};
    pub use crate::config::{EngineConfig, ImportConfig, UtilizationThresholds};
    pub use crate::gaps::{FreeSpace, find_available_spaces, largest_free_space};
    pub use crate::import::{
        ImportAbortedError, ImportReport, ImportRow, ImportRowError, import_devices,
    };
    pub use crate::occupancy::{CollisionReport, Occupancy, detect_collision};
    pub use crate::reorg::{
        CompactDirection, DistributeError, compact_devices, distribute_devices_evenly,
    };
    pub use crate::snap::{DropZone, evaluate_drop, snap_to_unit};
    pub use crate::strategy::{
        InsufficientSpaceError, PlacementStrategy, UnknownStrategyError, place_device,
        select_position, suggest_placement,
    };
    pub use crate::utilization::{
        Efficiency, Utilization, calculate_utilization, calculate_utilization_with,
    };
    pub use crate::validate::{
        BelowRackMinimumError, CollisionError, Conflict, ExceedsRackCapacityError,
        PlacementError, validate_move, validate_placement,
    };
}

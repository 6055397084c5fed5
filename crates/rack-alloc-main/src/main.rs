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

use rack_alloc_core::unit::{RackUnit, UnitCount};
use rack_alloc_engine::prelude::*;
use rack_alloc_model::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::{fs::File, io::BufWriter, time::Instant};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct UtilizationInfo {
    used: usize,
    available: usize,
    percentage: f64,
    efficiency: String,
    free_blocks: usize,
    largest_free_block: usize,
}

impl From<&Utilization> for UtilizationInfo {
    fn from(u: &Utilization) -> Self {
        Self {
            used: u.used().value(),
            available: u.available().value(),
            percentage: u.percentage(),
            efficiency: u.efficiency().to_string(),
            free_blocks: u.free_blocks(),
            largest_free_block: u.largest_free_block().value(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Suggestion {
    strategy: String,
    size: usize,
    position: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct ImportInfo {
    strategy: String,
    imported: usize,
    failed: usize,
    positions: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
struct DragSweep {
    device: String,
    drops: usize,
    valid_drops: usize,
}

#[derive(Debug, Clone, Serialize)]
struct RackRun {
    idx: usize,
    seed: u64,
    rack_size: usize,
    device_count: usize,
    fill_ratio: f64,
    initial: UtilizationInfo,
    suggestions: Vec<Suggestion>,
    auto_placed: Option<usize>,
    import: ImportInfo,
    compact_top: UtilizationInfo,
    compact_bottom: UtilizationInfo,
    distributed: Option<UtilizationInfo>,
    distribute_error: Option<String>,
    drag: Option<DragSweep>,
    violations: usize,
    elapsed_us: u128,
}

#[derive(Debug, Clone, Serialize)]
struct RackReport {
    description: String,
    racks: Vec<RackRun>,
}

fn interpolate_u(val0: usize, val1: usize, step: usize, steps: usize) -> usize {
    if steps <= 1 {
        return val1;
    }
    let num = (val1 as isize - val0 as isize) * step as isize;
    (val0 as isize + num / (steps as isize - 1)).max(0) as usize
}

fn interpolate_f(val0: f64, val1: f64, step: usize, steps: usize) -> f64 {
    if steps <= 1 {
        return val1;
    }
    val0 + (val1 - val0) * step as f64 / (steps - 1) as f64
}

/// Drags the first device across the whole rack, one drop per unit.
fn drag_sweep(layout: &RackLayout, unit_px: f64) -> Option<DragSweep> {
    let device = layout.devices().first()?;
    let rack = layout.rack();
    let drops = rack.size().value();
    let valid_drops = (0..drops)
        .map(|i| evaluate_drop(i as f64 * unit_px, unit_px, device, rack, layout.devices()))
        .filter(DropZone::is_valid)
        .count();
    Some(DragSweep {
        device: device.label().into_owned(),
        drops,
        valid_drops,
    })
}

/// Imports a few unpositioned rows next to the generated devices.
fn import_batch(layout: &RackLayout, config: &ImportConfig) -> ImportInfo {
    let first_id = layout
        .devices()
        .iter()
        .map(|d| d.id().value())
        .max()
        .unwrap_or(0)
        + 1;
    let rows = (0..3u64).map(|i| {
        ImportRow::new(
            i as usize + 1,
            DeviceId::new(first_id + i),
            UnitCount::new(1 + i as usize),
        )
        .with_name(format!("import-{}", i + 1))
    });
    let strategy = config.auto_place.to_string();
    match import_devices(rows, layout.rack(), layout.devices(), config) {
        Ok(report) => ImportInfo {
            strategy,
            imported: report.imported(),
            failed: report.failed(),
            positions: report
                .accepted()
                .iter()
                .map(|d| d.position().value())
                .collect(),
        },
        Err(e) => {
            warn!(error = %e, "import aborted");
            ImportInfo {
                strategy,
                imported: 0,
                failed: 1,
                positions: Vec::new(),
            }
        }
    }
}

fn run_rack(idx: usize, steps: usize, config: &EngineConfig) -> RackRun {
    let rack_size = interpolate_u(12, 48, idx, steps);
    let fill_ratio = interpolate_f(0.3, 0.95, idx, steps);
    let seed: u64 = 42 + idx as u64;

    let cfg = RackGenConfigBuilder::new()
        .rack_size(UnitCount::new(rack_size))
        .max_devices(rack_size / 2)
        .device_size_range(UnitCount::new(1), UnitCount::new(4))
        .fill_ratio(fill_ratio)
        .seed(seed)
        .build()
        .expect("valid rack config");
    let mut generator: RackGenerator = cfg.into();
    let layout = generator.generate();
    let rack = layout.rack();
    let devices = layout.devices();

    let t0 = Instant::now();
    let utilization = |ds: &[Device]| calculate_utilization_with(ds, rack, &config.thresholds);
    let initial = utilization(devices);

    let suggestions = PlacementStrategy::ALL
        .into_iter()
        .flat_map(|strategy| {
            (1..=4).map(move |size| Suggestion {
                strategy: strategy.to_string(),
                size,
                position: suggest_placement(UnitCount::new(size), devices, rack, strategy)
                    .map(RackUnit::value),
            })
        })
        .collect();

    let auto_placed = place_device(UnitCount::new(2), devices, rack, config.default_strategy)
        .ok()
        .map(RackUnit::value);
    let import = import_batch(&layout, &config.import);

    let top = compact_devices(devices, CompactDirection::Top);
    let bottom = compact_devices(devices, CompactDirection::Bottom);
    let (distributed, distribute_error) = match distribute_devices_evenly(devices, rack) {
        Ok(spread) => (Some(utilization(&spread)), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let drag = drag_sweep(&layout, 20.0);
    let violations = audit_layout(rack, devices).len()
        + audit_layout(rack, &top).len()
        + audit_layout(rack, &bottom).len();
    let elapsed = t0.elapsed();

    info!(
        idx,
        rack = %rack,
        devices = devices.len(),
        utilization = %initial,
        violations,
        "rack processed"
    );

    RackRun {
        idx,
        seed,
        rack_size,
        device_count: layout.device_count(),
        fill_ratio,
        initial: (&initial).into(),
        suggestions,
        auto_placed,
        import,
        compact_top: (&utilization(&top)).into(),
        compact_bottom: (&utilization(&bottom)).into(),
        distributed: distributed.as_ref().map(UtilizationInfo::from),
        distribute_error,
        drag,
        violations,
        elapsed_us: elapsed.as_micros(),
    }
}

fn main() {
    enable_tracing();

    let config = EngineConfig {
        import: ImportConfig {
            auto_place: PlacementStrategy::BottomFirst,
            ..ImportConfig::default()
        },
        ..EngineConfig::default()
    };

    // Ramp from a small, sparse rack to a full-height, nearly full one.
    let n_racks = 10usize;

    let mut racks: Vec<RackRun> = (0..n_racks)
        .into_par_iter()
        .map(|i| run_rack(i, n_racks, &config))
        .collect();
    racks.sort_by_key(|r| r.idx);

    let total_violations: usize = racks.iter().map(|r| r.violations).sum();
    let report = RackReport {
        description: format!(
            "Rack allocation report: {n_racks} synthetic racks from 12U to 48U; \
             suggestions per strategy, auto-placement ({}), import, compaction, \
             distribution, drag sweep and audit.",
            config.default_strategy
        ),
        racks,
    };

    let file = File::create("rack_report.json").expect("create rack_report.json");
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report).expect("write json report");

    println!();
    println!("=================================================================");
    println!("========================= Report Done ===========================");
    println!("=================================================================");
    println!();
    println!("Layout violations: {total_violations}");
    println!("Wrote: rack_report.json");
}

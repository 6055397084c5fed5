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

use crate::{strategy::PlacementStrategy, utilization::Efficiency};

/// Percentage bands used to classify rack utilization.
///
/// Each band includes its lower bound: `p < optimal_from` is low,
/// `optimal_from <= p < high_from` optimal, `high_from <= p <= critical_above`
/// high and anything above `critical_above` critical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilizationThresholds {
    pub optimal_from: f64,
    pub high_from: f64,
    pub critical_above: f64,
}

impl Default for UtilizationThresholds {
    fn default() -> Self {
        Self {
            optimal_from: 30.0,
            high_from: 80.0,
            critical_above: 95.0,
        }
    }
}

impl UtilizationThresholds {
    pub fn classify(&self, percentage: f64) -> Efficiency {
        if percentage < self.optimal_from {
            Efficiency::Low
        } else if percentage < self.high_from {
            Efficiency::Optimal
        } else if percentage <= self.critical_above {
            Efficiency::High
        } else {
            Efficiency::Critical
        }
    }
}

/// Behaviour of [`crate::import::import_devices`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    /// Abort the whole import on the first bad row instead of skipping it.
    pub strict: bool,
    /// Strategy for rows that come without a position.
    pub auto_place: PlacementStrategy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            strict: false,
            auto_place: PlacementStrategy::NearestFit,
        }
    }
}

/// Settings a caller threads through one session of engine calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineConfig {
    pub thresholds: UtilizationThresholds,
    pub import: ImportConfig,
    /// Strategy for placements that do not name one explicitly.
    pub default_strategy: PlacementStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let t = UtilizationThresholds::default();
        assert_eq!(t.classify(0.0), Efficiency::Low);
        assert_eq!(t.classify(29.9), Efficiency::Low);
        assert_eq!(t.classify(30.0), Efficiency::Optimal);
        assert_eq!(t.classify(50.0), Efficiency::Optimal);
        assert_eq!(t.classify(80.0), Efficiency::High);
        assert_eq!(t.classify(95.0), Efficiency::High);
        assert_eq!(t.classify(95.1), Efficiency::Critical);
        assert_eq!(t.classify(100.0), Efficiency::Critical);
    }

    #[test]
    fn test_custom_bands() {
        let t = UtilizationThresholds {
            optimal_from: 10.0,
            high_from: 50.0,
            critical_above: 70.0,
        };
        assert_eq!(t.classify(10.0), Efficiency::Optimal);
        assert_eq!(t.classify(70.0), Efficiency::High);
        assert_eq!(t.classify(71.0), Efficiency::Critical);
    }

    #[test]
    fn test_engine_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.default_strategy, PlacementStrategy::NearestFit);
        assert!(!c.import.strict);
        assert_eq!(c.import.auto_place, PlacementStrategy::NearestFit);
        assert_eq!(c.thresholds, UtilizationThresholds::default());
    }
}

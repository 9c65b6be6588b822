// src/config/model.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default point-of-presence labels runners are spread across.
pub const DEFAULT_POPS: [&str; 6] = ["SJC", "AMS", "SIN", "SYD", "GRU", "NRT"];

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [timing]
/// generation_period_ms = 15000
/// engine_period_ms = 100
/// pulse_ms = 5000
///
/// [lifecycle]
/// executing_at_ms = 1000
/// writing_at_ms = 2000
/// complete_at_ms = 3000
///
/// [generator]
/// batch_min = 2
/// batch_max = 4
/// success_probability = 0.85
/// pops = ["SJC", "AMS"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub timing: TimingSection,

    #[serde(default)]
    pub lifecycle: LifecycleSection,

    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub layout: LayoutSection,
}

/// Validated configuration.
///
/// Only obtainable through `ConfigFile::try_from(RawConfigFile)` (see
/// `validate.rs`) or `ConfigFile::default()`, so the rest of the crate can
/// rely on thresholds being ordered, probabilities being in range, etc.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigFile {
    timing: TimingSection,
    lifecycle: LifecycleSection,
    generator: GeneratorSection,
    layout: LayoutSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            timing: raw.timing,
            lifecycle: raw.lifecycle,
            generator: raw.generator,
            layout: raw.layout,
        }
    }

    pub fn timing(&self) -> &TimingSection {
        &self.timing
    }

    pub fn lifecycle(&self) -> &LifecycleSection {
        &self.lifecycle
    }

    pub fn generator(&self) -> &GeneratorSection {
        &self.generator
    }

    pub fn layout(&self) -> &LayoutSection {
        &self.layout
    }

    /// Replace the RNG seed (e.g. from `--seed`). Any `u64` is valid.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.generator.seed = seed;
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile::new_unchecked(RawConfigFile::default())
    }
}

/// `[timing]` section: periods of the two simulation callbacks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingSection {
    /// Period of the tick generator.
    pub generation_period_ms: u64,

    /// Period of the lifecycle engine. Much finer than generation.
    pub engine_period_ms: u64,

    /// How long the scheduler node stays marked `ticking` after each tick.
    pub pulse_ms: u64,
}

impl TimingSection {
    pub fn generation_period(&self) -> Duration {
        Duration::from_millis(self.generation_period_ms)
    }

    pub fn engine_period(&self) -> Duration {
        Duration::from_millis(self.engine_period_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            generation_period_ms: 15_000,
            engine_period_ms: 100,
            pulse_ms: 5_000,
        }
    }
}

/// `[lifecycle]` section: job age at which each phase begins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleSection {
    pub executing_at_ms: u64,
    pub writing_at_ms: u64,
    pub complete_at_ms: u64,
}

impl Default for LifecycleSection {
    fn default() -> Self {
        Self {
            executing_at_ms: 1_000,
            writing_at_ms: 2_000,
            complete_at_ms: 3_000,
        }
    }
}

/// `[generator]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    /// Smallest batch produced per tick (inclusive).
    pub batch_min: usize,

    /// Largest batch produced per tick (inclusive).
    pub batch_max: usize,

    /// Probability that a generated check succeeds.
    pub success_probability: f64,

    /// Synthetic monitor labels are drawn from `monitor-0 .. monitor-<n-1>`.
    pub monitor_pool: u32,

    /// Point-of-presence labels; each job picks one uniformly.
    pub pops: Vec<String>,

    /// Fixed RNG seed. If `None`, the OS entropy source is used.
    pub seed: Option<u64>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            batch_min: 2,
            batch_max: 4,
            success_probability: 0.85,
            monitor_pool: 10,
            pops: DEFAULT_POPS.iter().map(|p| p.to_string()).collect(),
            seed: None,
        }
    }
}

/// `[layout]` section: grid used to place runner nodes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    pub columns: usize,
    pub column_width: f64,
    pub row_height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            columns: 5,
            column_width: 350.0,
            row_height: 80.0,
            origin_x: 20.0,
            origin_y: 200.0,
        }
    }
}

#![allow(dead_code)]

use checkflow::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from the built-in defaults; `build()` runs full validation.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn generation_period_ms(mut self, ms: u64) -> Self {
        self.config.timing.generation_period_ms = ms;
        self
    }

    pub fn engine_period_ms(mut self, ms: u64) -> Self {
        self.config.timing.engine_period_ms = ms;
        self
    }

    pub fn pulse_ms(mut self, ms: u64) -> Self {
        self.config.timing.pulse_ms = ms;
        self
    }

    pub fn thresholds_ms(mut self, executing: u64, writing: u64, complete: u64) -> Self {
        self.config.lifecycle.executing_at_ms = executing;
        self.config.lifecycle.writing_at_ms = writing;
        self.config.lifecycle.complete_at_ms = complete;
        self
    }

    pub fn batch(mut self, min: usize, max: usize) -> Self {
        self.config.generator.batch_min = min;
        self.config.generator.batch_max = max;
        self
    }

    pub fn success_probability(mut self, p: f64) -> Self {
        self.config.generator.success_probability = p;
        self
    }

    pub fn pops(mut self, pops: &[&str]) -> Self {
        self.config.generator.pops = pops.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.generator.seed = Some(seed);
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.config.layout.columns = columns;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

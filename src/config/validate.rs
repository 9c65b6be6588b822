// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CheckflowError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = CheckflowError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_timing(cfg)?;
    validate_lifecycle(cfg)?;
    validate_generator(cfg)?;
    validate_layout(cfg)?;
    Ok(())
}

fn config_error(msg: impl Into<String>) -> CheckflowError {
    CheckflowError::ConfigError(msg.into())
}

fn validate_timing(cfg: &RawConfigFile) -> Result<()> {
    let timing = &cfg.timing;

    if timing.generation_period_ms == 0 {
        return Err(config_error(
            "[timing].generation_period_ms must be >= 1 (got 0)",
        ));
    }
    if timing.engine_period_ms == 0 {
        return Err(config_error("[timing].engine_period_ms must be >= 1 (got 0)"));
    }
    Ok(())
}

fn validate_lifecycle(cfg: &RawConfigFile) -> Result<()> {
    let lc = &cfg.lifecycle;

    if lc.executing_at_ms == 0 {
        return Err(config_error(
            "[lifecycle].executing_at_ms must be >= 1 so jobs start in `dispatch`",
        ));
    }
    if !(lc.executing_at_ms < lc.writing_at_ms && lc.writing_at_ms < lc.complete_at_ms) {
        return Err(config_error(format!(
            "[lifecycle] thresholds must be strictly increasing \
             (got executing_at_ms = {}, writing_at_ms = {}, complete_at_ms = {})",
            lc.executing_at_ms, lc.writing_at_ms, lc.complete_at_ms
        )));
    }
    Ok(())
}

fn validate_generator(cfg: &RawConfigFile) -> Result<()> {
    let generator = &cfg.generator;

    if generator.batch_min == 0 {
        return Err(config_error("[generator].batch_min must be >= 1 (got 0)"));
    }
    if generator.batch_min > generator.batch_max {
        return Err(config_error(format!(
            "[generator].batch_min ({}) must not exceed batch_max ({})",
            generator.batch_min, generator.batch_max
        )));
    }

    // NaN fails this check too.
    if !(0.0..=1.0).contains(&generator.success_probability) {
        return Err(config_error(format!(
            "[generator].success_probability must be within [0, 1] (got {})",
            generator.success_probability
        )));
    }

    if generator.monitor_pool == 0 {
        return Err(config_error("[generator].monitor_pool must be >= 1 (got 0)"));
    }

    if generator.pops.is_empty() {
        return Err(config_error("[generator].pops must list at least one label"));
    }
    let mut seen = HashSet::new();
    for pop in generator.pops.iter() {
        if pop.trim().is_empty() {
            return Err(config_error("[generator].pops must not contain blank labels"));
        }
        if !seen.insert(pop.as_str()) {
            return Err(config_error(format!(
                "[generator].pops contains duplicate label '{pop}'"
            )));
        }
    }
    Ok(())
}

fn validate_layout(cfg: &RawConfigFile) -> Result<()> {
    let layout = &cfg.layout;

    if layout.columns == 0 {
        return Err(config_error("[layout].columns must be >= 1 (got 0)"));
    }
    if !(layout.column_width > 0.0 && layout.row_height > 0.0) {
        return Err(config_error(format!(
            "[layout] spacing must be positive (got column_width = {}, row_height = {})",
            layout.column_width, layout.row_height
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_config_error(raw: RawConfigFile, needle: &str) {
        match ConfigFile::try_from(raw) {
            Err(CheckflowError::ConfigError(msg)) => {
                assert!(msg.contains(needle), "unexpected message: {msg}");
            }
            Err(e) => panic!("expected ConfigError, got {e:?}"),
            Ok(_) => panic!("expected ConfigError containing {needle:?}, got Ok"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(ConfigFile::try_from(RawConfigFile::default()).is_ok());
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let mut raw = RawConfigFile::default();
        raw.lifecycle.writing_at_ms = raw.lifecycle.complete_at_ms;
        expect_config_error(raw, "strictly increasing");
    }

    #[test]
    fn rejects_zero_first_threshold() {
        let mut raw = RawConfigFile::default();
        raw.lifecycle.executing_at_ms = 0;
        expect_config_error(raw, "executing_at_ms");
    }

    #[test]
    fn rejects_inverted_batch_range() {
        let mut raw = RawConfigFile::default();
        raw.generator.batch_min = 5;
        raw.generator.batch_max = 3;
        expect_config_error(raw, "batch_min");
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let mut raw = RawConfigFile::default();
        raw.generator.success_probability = 1.5;
        expect_config_error(raw.clone(), "success_probability");

        raw.generator.success_probability = f64::NAN;
        expect_config_error(raw, "success_probability");
    }

    #[test]
    fn rejects_duplicate_and_blank_pops() {
        let mut raw = RawConfigFile::default();
        raw.generator.pops = vec!["SJC".into(), "SJC".into()];
        expect_config_error(raw.clone(), "duplicate");

        raw.generator.pops = vec!["  ".into()];
        expect_config_error(raw.clone(), "blank");

        raw.generator.pops.clear();
        expect_config_error(raw, "at least one");
    }

    #[test]
    fn rejects_zero_periods_and_columns() {
        let mut raw = RawConfigFile::default();
        raw.timing.engine_period_ms = 0;
        expect_config_error(raw, "engine_period_ms");

        let mut raw = RawConfigFile::default();
        raw.layout.columns = 0;
        expect_config_error(raw, "columns");
    }
}

use core::time::Duration;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sweepfield_core::FieldConfig;

use crate::*;

/// Settings of a match, usually read from a TOML file. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub min_rows: usize,
    pub max_rows: usize,
    pub min_cols: usize,
    pub max_cols: usize,
    pub mine_ratios: Vec<f64>,
    pub rounds: u32,
    pub budget_secs: u64,
    /// Signed so that a negative value in a file is reported instead of failing to parse.
    pub delay_ms: i64,
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_rows: 5,
            max_rows: 100,
            min_cols: 5,
            max_cols: 100,
            // the easiest ratio is left out on purpose
            mine_ratios: vec![0.08, 0.12, 0.16, 0.20, 0.24],
            rounds: 5,
            budget_secs: 60,
            delay_ms: 0,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading match configuration from {}", path.display());
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_rows == 0 || self.min_cols == 0 {
            return Err(MatchError::InvalidConfig("fields need at least one row and column"));
        }
        if self.min_rows > self.max_rows || self.min_cols > self.max_cols {
            return Err(MatchError::InvalidConfig("minimum dimension above maximum"));
        }
        if self.mine_ratios.is_empty() {
            return Err(MatchError::InvalidConfig("no mine ratio to choose from"));
        }
        if self.rounds == 0 {
            return Err(MatchError::InvalidConfig("a match needs at least one round"));
        }
        for &ratio in &self.mine_ratios {
            FieldConfig::new(self.min_rows, self.min_cols, ratio)?;
        }
        FieldConfig::new(self.min_rows, self.min_cols, 0.0)?.with_delay_millis(self.delay_ms)?;
        Ok(())
    }

    pub fn row_range(&self) -> RangeInclusive<usize> {
        self.min_rows..=self.max_rows
    }

    pub fn col_range(&self) -> RangeInclusive<usize> {
        self.min_cols..=self.max_cols
    }

    pub fn budget(&self) -> Duration {
        Duration::from_secs(self.budget_secs)
    }

    /// Builds the field settings for one match out of the drawn dimensions and ratio.
    pub fn field_config(&self, rows: usize, cols: usize, mine_ratio: f64) -> Result<FieldConfig> {
        Ok(FieldConfig::new(rows, cols, mine_ratio)?.with_delay_millis(self.delay_ms)?)
    }
}

#[cfg(test)]
mod tests {
    use sweepfield_core::FieldError;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MatchConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.rounds, 5);
        assert_eq!(config.budget(), Duration::from_secs(60));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = MatchConfig::from_toml_str(
            r#"
            rounds = 2
            max_rows = 12
            mine_ratios = [0.1]
            seed = 9
            "#,
        )
        .unwrap();

        assert_eq!(config.rounds, 2);
        assert_eq!(config.row_range(), 5..=12);
        assert_eq!(config.col_range(), 5..=100);
        assert_eq!(config.mine_ratios, vec![0.1]);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn rejects_negative_delay() {
        let err = MatchConfig::from_toml_str("delay_ms = -5").unwrap_err();

        assert!(matches!(
            err,
            MatchError::Field(FieldError::NegativeDelay(-5))
        ));
    }

    #[test]
    fn rejects_impossible_ratio() {
        let err = MatchConfig::from_toml_str("mine_ratios = [0.5, 1.5]").unwrap_err();

        assert!(matches!(
            err,
            MatchError::Field(FieldError::InvalidMineRatio(_))
        ));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = MatchConfig::from_toml_str("min_cols = 20\nmax_cols = 10").unwrap_err();

        assert!(matches!(err, MatchError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_malformed_file() {
        let err = MatchConfig::from_toml_str("rounds = \"many\"").unwrap_err();

        assert!(matches!(err, MatchError::Parse(_)));
    }
}

//! Statistical outlier detection for numeric columns.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{AtlasError, Result};
use crate::schema::Column;

use super::checks::{is_valid_type, Check};
use super::finding::FindingKind;

/// Configuration for the outlier check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    /// A value is an outlier when it lies more than this many standard
    /// deviations from the column mean.
    pub sigma_threshold: f64,
    /// Delta degrees of freedom for the standard deviation (0 = population).
    pub ddof: usize,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            sigma_threshold: 3.0,
            ddof: 0,
        }
    }
}

impl OutlierConfig {
    /// Set the sigma threshold.
    pub fn with_sigma_threshold(mut self, sigma: f64) -> Self {
        self.sigma_threshold = sigma;
        self
    }

    /// Set the delta degrees of freedom.
    pub fn with_ddof(mut self, ddof: usize) -> Self {
        self.ddof = ddof;
        self
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| AtlasError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: OutlierConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds that would make the comparison meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.sigma_threshold.is_finite() || self.sigma_threshold < 0.0 {
            return Err(AtlasError::Config(format!(
                "sigma threshold must be a non-negative number, got {}",
                self.sigma_threshold
            )));
        }
        Ok(())
    }
}

/// Mean and spread of a column's numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnMoments {
    pub count: usize,
    pub mean: f64,
    /// Standard deviation; `None` when there are too few values for the
    /// requested degrees of freedom.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl ColumnMoments {
    /// Compute moments with Welford's algorithm. Returns `None` for no values.
    pub fn from_values(values: impl IntoIterator<Item = f64>, ddof: usize) -> Option<Self> {
        let mut count = 0usize;
        let mut mean = 0.0;
        let mut m2 = 0.0; // Sum of squared differences from mean
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            let delta = value - mean;
            mean += delta / count as f64;
            let delta2 = value - mean;
            m2 += delta * delta2;

            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return None;
        }

        let std = if count > ddof {
            Some((m2 / (count - ddof) as f64).sqrt())
        } else {
            None
        };

        Some(Self {
            count,
            mean,
            std,
            min,
            max,
        })
    }

    /// All values are equal.
    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }

    /// Check `|value - mean| > sigma * std`.
    ///
    /// Constant columns and columns without a defined deviation never
    /// produce outliers.
    pub fn is_outlier(&self, value: f64, sigma: f64) -> bool {
        if self.is_constant() {
            return false;
        }
        match self.std {
            Some(std) if std > 0.0 => (value - self.mean).abs() > sigma * std,
            _ => false,
        }
    }

    /// Calculate the z-score for a value.
    pub fn z_score(&self, value: f64) -> f64 {
        match self.std {
            Some(std) if std > 0.0 => (value - self.mean) / std,
            _ => 0.0,
        }
    }
}

/// Flags numeric values beyond the sigma threshold.
#[derive(Debug, Clone, Default)]
pub struct OutlierCheck {
    config: OutlierConfig,
}

impl OutlierCheck {
    pub fn new(config: OutlierConfig) -> Self {
        Self { config }
    }

    /// Moments over every non-missing value of the column that coerces to a number.
    pub fn moments(&self, column: &Column) -> Option<ColumnMoments> {
        ColumnMoments::from_values(
            column.values.iter().filter_map(|v| v.as_f64()),
            self.config.ddof,
        )
    }
}

impl Check for OutlierCheck {
    fn name(&self) -> &'static str {
        "outlier_check"
    }

    fn kind(&self) -> FindingKind {
        FindingKind::Outlier
    }

    fn check_column(&self, column: &Column) -> Vec<usize> {
        if !column.column_type.is_numeric() {
            return Vec::new();
        }

        let Some(moments) = self.moments(column) else {
            debug!(column = %column.name, "no numeric values, skipping outlier check");
            return Vec::new();
        };

        if moments.is_constant() || moments.std.is_none() {
            debug!(
                column = %column.name,
                count = moments.count,
                "degenerate statistics, no outliers"
            );
            return Vec::new();
        }

        let mut outliers = Vec::new();

        for (row_idx, value) in column.values.iter().enumerate() {
            // Mismatched values are already reported as type errors.
            if value.is_missing() || !is_valid_type(value, column.column_type) {
                continue;
            }

            match value.as_f64() {
                Some(num) => {
                    if moments.is_outlier(num, self.config.sigma_threshold) {
                        trace!(
                            column = %column.name,
                            row = row_idx,
                            z = moments.z_score(num),
                            "outlier"
                        );
                        outliers.push(row_idx);
                    }
                }
                None => {
                    trace!(column = %column.name, row = row_idx, "value not coercible, skipped");
                }
            }
        }

        outliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CellValue, ColumnType};

    fn int_column(values: &[i64]) -> Column {
        Column::new(
            "n",
            ColumnType::Integer,
            values.iter().map(|v| CellValue::Integer(*v)).collect(),
        )
    }

    #[test]
    fn test_population_moments() {
        let moments = ColumnMoments::from_values([1.0, 2.0, 3.0, 1000.0], 0).unwrap();
        assert!((moments.mean - 251.5).abs() < 1e-9);
        let std = moments.std.unwrap();
        assert!((std - 432.147255).abs() < 1e-5);
    }

    #[test]
    fn test_sample_moments() {
        let moments = ColumnMoments::from_values([2.0, 4.0], 1).unwrap();
        assert!((moments.std.unwrap() - 2f64.sqrt()).abs() < 1e-12);

        let single = ColumnMoments::from_values([2.0], 1).unwrap();
        assert_eq!(single.std, None);
    }

    #[test]
    fn test_three_sigma_is_not_approximated() {
        let check = OutlierCheck::default();
        assert!(check.check_column(&int_column(&[1, 2, 3, 1000])).is_empty());
    }

    #[test]
    fn test_detects_extreme_value() {
        let mut values = vec![10; 20];
        values.push(1000);
        let check = OutlierCheck::default();
        assert_eq!(check.check_column(&int_column(&values)), vec![20]);
    }

    #[test]
    fn test_constant_column_has_no_outliers() {
        let check = OutlierCheck::default();
        assert!(check.check_column(&int_column(&[7, 7, 7, 7])).is_empty());

        let floats = Column::new("f", ColumnType::Float, vec![CellValue::Float(0.1); 50]);
        assert!(check.check_column(&floats).is_empty());
    }

    #[test]
    fn test_skips_non_numeric_columns() {
        let column = Column::new(
            "t",
            ColumnType::Text,
            vec![CellValue::text("1"), CellValue::text("1000000")],
        );
        assert!(OutlierCheck::default().check_column(&column).is_empty());
    }

    #[test]
    fn test_skips_type_mismatches() {
        let mut values: Vec<CellValue> = (0..20).map(|_| CellValue::Integer(1)).collect();
        values.push(CellValue::text("-999999"));
        values.push(CellValue::text("abc"));
        let column = Column::new("n", ColumnType::Integer, values);

        assert!(OutlierCheck::default().check_column(&column).is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(OutlierConfig::default().validate().is_ok());
        assert!(OutlierConfig::default().with_sigma_threshold(-1.0).validate().is_err());
        assert!(OutlierConfig::default().with_sigma_threshold(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_config_partial_json() {
        let config: OutlierConfig = serde_json::from_str(r#"{"ddof": 1}"#).unwrap();
        assert_eq!(config.ddof, 1);
        assert_eq!(config.sigma_threshold, 3.0);
    }
}

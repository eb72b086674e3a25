//! Thresholds and limits consumed by the classifier and ranker.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration. Every section falls back to its defaults, so a
/// partial JSON file only needs the keys it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub classifier: ClassifierConfig,
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Highest stock level (inclusive) still reported as "Low Stock".
    pub low_stock_threshold: i64,
    /// Upper bounds of the closed price bands; anything above the last
    /// bound lands in an open-ended band.
    pub price_bands: Vec<f64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 10,
            price_bands: vec![10.0, 50.0, 100.0, 500.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingConfig {
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

impl AnalyticsConfig {
    /// Read and validate a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let cfg: AnalyticsConfig =
            serde_json::from_str(&text).map_err(|e| Error::json(path, e))?;
        cfg.validate()?;
        log::debug!("loaded analytics config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let bands = &self.classifier.price_bands;
        if bands.iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(Error::InvalidConfig(
                "price bands must be finite and non-negative".into(),
            ));
        }
        if bands.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidConfig(
                "price bands must be strictly ascending".into(),
            ));
        }
        if self.classifier.low_stock_threshold < 0 {
            return Err(Error::InvalidConfig(
                "low stock threshold must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{"ranking":{{"topN":3}}}}"#).unwrap();
        let cfg = AnalyticsConfig::from_path(f.path()).unwrap();
        assert_eq!(cfg.ranking.top_n, 3);
        assert_eq!(cfg.classifier, ClassifierConfig::default());
    }

    #[test]
    fn unsorted_bands_are_rejected() {
        let mut cfg = AnalyticsConfig::default();
        cfg.classifier.price_bands = vec![50.0, 10.0];
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }
}

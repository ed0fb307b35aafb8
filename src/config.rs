use crate::units::UnitRatio;
use serde::{Deserialize, Serialize};

/// Document-wide settings for a [crate::PageStore]
///
/// ```
/// use pdf_pages::{Config, Unit};
///
/// let config = Config::default().with_unit(Unit::Mm).with_pdfa(true);
/// assert!((config.unit_ratio() - 72.0 / 25.4).abs() < 1e-9);
/// assert!(config.compress);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// User unit, or a raw number of points per user unit
    pub unit: UnitRatio,
    /// Produce PDF/A output: pages carry no transparency `/Group`
    pub pdfa: bool,
    /// Signature appearance mode: pages carry no `/LastModified`
    pub sigapp: bool,
    /// Flate-compress page content streams
    pub compress: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            unit: UnitRatio::default(),
            pdfa: false,
            sigapp: false,
            compress: true,
        }
    }
}

impl Config {
    pub fn with_unit<U: Into<UnitRatio>>(mut self, unit: U) -> Config {
        self.unit = unit.into();
        self
    }

    pub fn with_pdfa(mut self, pdfa: bool) -> Config {
        self.pdfa = pdfa;
        self
    }

    pub fn with_sigapp(mut self, sigapp: bool) -> Config {
        self.sigapp = sigapp;
        self
    }

    pub fn with_compress(mut self, compress: bool) -> Config {
        self.compress = compress;
        self
    }

    /// Points per user unit
    pub fn unit_ratio(&self) -> f64 {
        self.unit.points_per_unit()
    }
}

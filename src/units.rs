//! Units of measure and their conversion ratios to PDF points.
//!
//! Page sizes and boxes are always stored in points. Margins, regions and cursor
//! positions are expressed in _user units_, which are points divided by the
//! document's unit ratio.

use crate::error::{PageError, Result};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A physical unit of measure
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// PDF points, 1/72 of an inch
    #[default]
    #[display("pt")]
    #[serde(alias = "points", alias = "")]
    Pt,
    /// Pixels, treated as points
    #[display("px")]
    Px,
    #[display("mm")]
    #[serde(alias = "millimeters")]
    Mm,
    #[display("cm")]
    #[serde(alias = "centimeters")]
    Cm,
    #[display("in")]
    #[serde(alias = "inches")]
    In,
}

impl Unit {
    /// Every unit, in the order of the ratio table
    pub const ALL: [Unit; 5] = [Unit::Pt, Unit::Px, Unit::Mm, Unit::Cm, Unit::In];

    /// Number of points in one of this unit
    pub const fn ratio(self) -> f64 {
        match self {
            Unit::Pt | Unit::Px => 1.0,
            Unit::Mm => 72.0 / 25.4,
            Unit::Cm => 72.0 / 2.54,
            Unit::In => 72.0,
        }
    }

    /// Convert a value in points into this unit, rounded to `decimals` places
    pub fn convert_points(self, points: f64, decimals: u32) -> f64 {
        let scale = 10f64.powi(decimals as i32);
        (points / self.ratio() * scale).round() / scale
    }
}

impl FromStr for Unit {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "pt" | "points" => Ok(Unit::Pt),
            "px" => Ok(Unit::Px),
            "mm" | "millimeters" => Ok(Unit::Mm),
            "cm" | "centimeters" => Ok(Unit::Cm),
            "in" | "inches" => Ok(Unit::In),
            _ => Err(PageError::UnknownUnit(s.to_string())),
        }
    }
}

/// The scale between user units and points, either taken from a named [Unit] or
/// given directly as a number of points per user unit
#[derive(Debug, Copy, Clone, PartialEq, From, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitRatio {
    Named(Unit),
    Ratio(f64),
}

impl UnitRatio {
    /// Points per user unit. Non-positive or non-finite raw ratios fall back to 1.
    pub fn points_per_unit(self) -> f64 {
        match self {
            UnitRatio::Named(unit) => unit.ratio(),
            UnitRatio::Ratio(r) if r.is_finite() && r > 0.0 => r,
            UnitRatio::Ratio(r) => {
                log::debug!("invalid unit ratio {r}, using points");
                1.0
            }
        }
    }
}

impl Default for UnitRatio {
    fn default() -> Self {
        UnitRatio::Named(Unit::Pt)
    }
}

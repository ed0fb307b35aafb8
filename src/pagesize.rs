//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in their natural orientation as (width, height) in points.
//! Most formats are portrait; `LEDGER` is the landscape twin of `TABLOID`.
//!
//! # Available Sizes
//!
//! ## North American
//! `LETTER`, `HALF_LETTER`, `JUNIOR_LEGAL`, `LEGAL`, `TABLOID`, `LEDGER`
//!
//! ## ANSI
//! `ANSI_A` through `ANSI_E`
//!
//! ## ISO A-Series
//! `A0` through `A6`
//!
//! ## Traditional
//! `FOLIO`, `QUARTO`, `OCTAVO`
//!
//! # Example
//!
//! ```
//! use pdf_pages::pagesize::{PageFormatProvider, StandardFormats, Orientation};
//!
//! let (w, h, orientation) = StandardFormats.size("a4", Some(Orientation::Landscape)).unwrap();
//! assert!(w > h);
//! assert_eq!(orientation, Orientation::Landscape);
//! ```

use crate::error::{PageError, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Page dimensions as (width, height) in points.
pub type PageSize = (f64, f64);

// north american sizes
pub const LETTER: PageSize = (8.5 * 72.0, 11.0 * 72.0);
pub const HALF_LETTER: PageSize = (5.5 * 72.0, 8.5 * 72.0);
pub const JUNIOR_LEGAL: PageSize = (5.0 * 72.0, 8.0 * 72.0);
pub const LEGAL: PageSize = (8.5 * 72.0, 14.0 * 72.0);
pub const TABLOID: PageSize = (11.0 * 72.0, 17.0 * 72.0);
pub const LEDGER: PageSize = (17.0 * 72.0, 11.0 * 72.0);

// ansi sizes
pub const ANSI_A: PageSize = (8.5 * 72.0, 11.0 * 72.0);
pub const ANSI_B: PageSize = (11.0 * 72.0, 17.0 * 72.0);
pub const ANSI_C: PageSize = (17.0 * 72.0, 22.0 * 72.0);
pub const ANSI_D: PageSize = (22.0 * 72.0, 34.0 * 72.0);
pub const ANSI_E: PageSize = (34.0 * 72.0, 44.0 * 72.0);

// traditional sizes
pub const FOLIO: PageSize = (12.0 * 72.0, 19.0 * 72.0);
pub const QUARTO: PageSize = (9.5 * 72.0, 12.0 * 72.0);
pub const OCTAVO: PageSize = (6.0 * 72.0, 9.0 * 72.0);

// iso a-series (converted from mm to points)
pub const A0: PageSize = (841.0 * 72.0 / 25.4, 1189.0 * 72.0 / 25.4);
pub const A1: PageSize = (594.0 * 72.0 / 25.4, 841.0 * 72.0 / 25.4);
pub const A2: PageSize = (420.0 * 72.0 / 25.4, 594.0 * 72.0 / 25.4);
pub const A3: PageSize = (297.0 * 72.0 / 25.4, 420.0 * 72.0 / 25.4);
pub const A4: PageSize = (210.0 * 72.0 / 25.4, 297.0 * 72.0 / 25.4);
pub const A5: PageSize = (148.0 * 72.0 / 25.4, 210.0 * 72.0 / 25.4);
pub const A6: PageSize = (105.0 * 72.0 / 25.4, 148.0 * 72.0 / 25.4);

/// Name of the format substituted whenever a page has no usable size
pub const DEFAULT_FORMAT: &str = "A4";

const FORMATS: &[(&str, PageSize)] = &[
    ("A0", A0),
    ("A1", A1),
    ("A2", A2),
    ("A3", A3),
    ("A4", A4),
    ("A5", A5),
    ("A6", A6),
    ("LETTER", LETTER),
    ("HALF_LETTER", HALF_LETTER),
    ("JUNIOR_LEGAL", JUNIOR_LEGAL),
    ("LEGAL", LEGAL),
    ("TABLOID", TABLOID),
    ("LEDGER", LEDGER),
    ("ANSI_A", ANSI_A),
    ("ANSI_B", ANSI_B),
    ("ANSI_C", ANSI_C),
    ("ANSI_D", ANSI_D),
    ("ANSI_E", ANSI_E),
    ("FOLIO", FOLIO),
    ("QUARTO", QUARTO),
    ("OCTAVO", OCTAVO),
];

/// Page orientation
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[display("P")]
    #[serde(rename = "P", alias = "portrait")]
    Portrait,
    #[display("L")]
    #[serde(rename = "L", alias = "landscape")]
    Landscape,
}

impl Orientation {
    /// The orientation implied by a width and height: landscape iff wider than tall
    pub fn of(width: f64, height: f64) -> Orientation {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
    /// Returns the size in the requested orientation, or unchanged for `None`,
    /// along with the orientation the result actually has.
    fn oriented(self, orientation: Option<Orientation>) -> (Self, Orientation)
    where
        Self: Sized;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn oriented(self, orientation: Option<Orientation>) -> (PageSize, Orientation) {
        let size = match orientation {
            Some(Orientation::Portrait) => self.portrait(),
            Some(Orientation::Landscape) => self.landscape(),
            None => self,
        };
        (size, Orientation::of(size.0, size.1))
    }
}

/// Resolves a named page format to its size in points
pub trait PageFormatProvider {
    /// Returns `(width, height, orientation)` in points for the named format. With no
    /// orientation the natural orientation of the format is kept.
    fn size(&self, format: &str, orientation: Option<Orientation>)
        -> Result<(f64, f64, Orientation)>;
}

/// The built-in table of ISO, ANSI, North American and traditional paper sizes.
/// Lookups are case-insensitive.
#[derive(Debug, Default, Copy, Clone)]
pub struct StandardFormats;

impl PageFormatProvider for StandardFormats {
    fn size(
        &self,
        format: &str,
        orientation: Option<Orientation>,
    ) -> Result<(f64, f64, Orientation)> {
        let name = format.to_ascii_uppercase();
        let size = FORMATS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, size)| *size)
            .ok_or_else(|| PageError::UnknownFormat(format.to_string()))?;
        let ((w, h), orientation) = size.oriented(orientation);
        Ok((w, h, orientation))
    }
}

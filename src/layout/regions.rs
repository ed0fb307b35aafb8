use super::margins::{Extents, Margins};
use super::EPS;
use serde::{Deserialize, Serialize};

/// The requested geometry of a region: the top-left corner and size, relative to
/// the top-left corner of the page, in user units
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub rx: f64,
    pub ry: f64,
    pub rw: f64,
    pub rh: f64,
}

impl RegionSpec {
    pub fn new(rx: f64, ry: f64, rw: f64, rh: f64) -> RegionSpec {
        RegionSpec { rx, ry, rw, rh }
    }
}

/// A rectangular writable area of a page (a "column"), plus a write cursor.
///
/// `rl` and `rt` are the right and bottom edges measured from the left and top of
/// the page; `rr` and `rb` are the distances of those edges from the right and
/// bottom of the page.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub rx: f64,
    pub ry: f64,
    pub rw: f64,
    pub rh: f64,
    pub rl: f64,
    pub rr: f64,
    pub rt: f64,
    pub rb: f64,
    /// Cursor x position, relative to the page
    pub x: f64,
    /// Cursor y position, relative to the page
    pub y: f64,
}

impl Region {
    /// Clamp the requested geometry into the content area of the page and seed the
    /// cursor at the top-left corner of the region.
    pub fn new(
        spec: RegionSpec,
        margins: &Margins,
        extents: &Extents,
        width: f64,
        height: f64,
    ) -> Region {
        let rw = spec.rw.max(0.0).min(extents.content_width);
        let rx = spec.rx.max(0.0).min(width - margins.pr - rw);
        let rh = spec.rh.max(0.0).min(extents.content_height);
        let ry = spec.ry.max(0.0).min(height - margins.cb - rh);
        Region {
            rx,
            ry,
            rw,
            rh,
            rl: rx + rw,
            rr: width - rx - rw,
            rt: ry + rh,
            rb: height - ry - rh,
            x: rx,
            y: ry,
        }
    }

    /// Move the cursor back to the top-left corner of the region
    pub fn reset_cursor(&mut self) {
        self.x = self.rx;
        self.y = self.ry;
    }

    /// True when `x` or `x + width` falls outside `[rx, rl]`, give or take [EPS]
    pub fn is_x_out(&self, x: f64, width: f64) -> bool {
        x < self.rx - EPS || x + width > self.rl + EPS
    }

    /// True when `y` or `y + height` falls outside `[ry, rt]`, give or take [EPS]
    pub fn is_y_out(&self, y: f64, height: f64) -> bool {
        y < self.ry - EPS || y + height > self.rt + EPS
    }
}

/// Split the content area of a page into regions.
///
/// With a positive number of `columns`, that many equal-width columns are laid
/// out left to right from the content top-left corner. Otherwise `explicit`
/// regions are used, or a single region covering the content area when there are
/// none. Every region is clamped with [Region::new].
pub fn partition(
    margins: &Margins,
    extents: &Extents,
    width: f64,
    height: f64,
    columns: Option<u32>,
    explicit: &[RegionSpec],
) -> Vec<Region> {
    let specs: Vec<RegionSpec> = match columns {
        Some(columns) if columns > 0 => {
            let column_width = extents.content_width / columns as f64;
            (0..columns)
                .map(|i| {
                    RegionSpec::new(
                        margins.pl + i as f64 * column_width,
                        margins.ct,
                        column_width,
                        extents.content_height,
                    )
                })
                .collect()
        }
        _ if !explicit.is_empty() => explicit.to_vec(),
        _ => vec![RegionSpec::new(
            margins.pl,
            margins.ct,
            extents.content_width,
            extents.content_height,
        )],
    };

    specs
        .into_iter()
        .map(|spec| Region::new(spec, margins, extents, width, height))
        .collect()
}

use serde::{Deserialize, Serialize};

/// Page margins in user units. Horizontal margins are measured from the left and
/// right page edges; vertical ones are measured from the top edge (`pt`, `hb`,
/// `ct`) or the bottom edge (`cb`, `ft`, `pb`).
///
/// There is no control preventing content from overflowing the margins. They
/// are guidelines for the page regions, which are derived from them.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Page left
    pub pl: f64,
    /// Page right
    pub pr: f64,
    /// Page top, where the header starts
    pub pt: f64,
    /// Header bottom
    pub hb: f64,
    /// Content top
    pub ct: f64,
    /// Content bottom
    pub cb: f64,
    /// Footer top
    pub ft: f64,
    /// Page bottom, where the footer ends
    pub pb: f64,
    /// Mirror left and right margins on alternating pages (double-sided printing)
    pub booklet: bool,
}

/// Sizes derived from the page size and its margins. These may be negative when
/// the margins are pathological; callers treat a negative content area as their
/// own error.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub content_width: f64,
    pub content_height: f64,
    pub header_height: f64,
    pub footer_height: f64,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins). There is no
    /// header or footer area.
    pub fn trbl(top: f64, right: f64, bottom: f64, left: f64) -> Margins {
        Margins {
            pl: left,
            pr: right,
            pt: top,
            hb: top,
            ct: top,
            cb: bottom,
            ft: bottom,
            pb: bottom,
            booklet: false,
        }
    }

    /// Create margins where all values are equal
    pub fn all(value: f64) -> Margins {
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: f64, horizontal: f64) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::default()
    }

    /// Reserve a header of the given height below the page top margin, pushing the
    /// content down if needed
    pub fn with_header(mut self, height: f64) -> Margins {
        self.hb = self.pt + height;
        self.ct = self.ct.max(self.hb);
        self
    }

    /// Reserve a footer of the given height above the page bottom margin
    pub fn with_footer(mut self, height: f64) -> Margins {
        self.ft = self.pb + height;
        self.cb = self.cb.max(self.ft);
        self
    }

    /// Mirror the left and right margins on alternating pages
    pub fn with_booklet(mut self, booklet: bool) -> Margins {
        self.booklet = booklet;
        self
    }

    /// Sanitize the requested margins for a page of `width` by `height` user units
    /// and derive the content, header and footer extents.
    ///
    /// Every margin is clamped to the page extent on its axis. When `booklet` is set
    /// and `mirror` is true the left and right margins are swapped. The chain is
    /// then clamped once, in order: `pr ≤ width - pl`, `hb ≥ pt`, `ct ≥ hb`,
    /// `cb ≤ height - ct`, `ft ≤ cb`, `pb ≤ ft`.
    pub fn compute(
        width: f64,
        height: f64,
        requested: Option<&Margins>,
        mirror: bool,
    ) -> (Margins, Extents) {
        let requested = requested.cloned().unwrap_or_default();
        let clamp = |value: f64, max: f64| {
            if value.is_nan() || value <= 0.0 {
                0.0
            } else {
                value.min(max)
            }
        };

        let mut m = Margins {
            pl: clamp(requested.pl, width),
            pr: clamp(requested.pr, width),
            pt: clamp(requested.pt, height),
            hb: clamp(requested.hb, height),
            ct: clamp(requested.ct, height),
            cb: clamp(requested.cb, height),
            ft: clamp(requested.ft, height),
            pb: clamp(requested.pb, height),
            booklet: requested.booklet,
        };

        if m.booklet && mirror {
            std::mem::swap(&mut m.pl, &mut m.pr);
        }

        m.pr = m.pr.min(width - m.pl);
        m.hb = m.hb.max(m.pt);
        m.ct = m.ct.max(m.hb);
        m.cb = m.cb.min(height - m.ct);
        m.ft = m.ft.min(m.cb);
        m.pb = m.pb.min(m.ft);

        if m != requested {
            log::debug!("margins clamped from {requested:?} to {m:?}");
        }

        let extents = Extents {
            content_width: width - m.pl - m.pr,
            content_height: height - m.ct - m.cb,
            header_height: m.hb - m.pt,
            footer_height: m.ft - m.pb,
        };
        (m, extents)
    }
}

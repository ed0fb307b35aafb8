//! Page boundary boxes.
//!
//! Every page carries five nested boundary rectangles, all in points:
//!
//! - `MediaBox`: the full extent of the physical medium
//! - `CropBox`: the visible region when the page is displayed or printed
//! - `BleedBox`: the region to clip to in a production environment
//! - `TrimBox`: the intended dimensions of the finished page after trimming
//! - `ArtBox`: the extent of the page's meaningful content
//!
//! Each box may also carry guideline styling (`/BoxColorInfo`) used by viewers
//! that can draw the boxes on screen.

use crate::colour::{colours, ColorFormatter, Colour};
use crate::error::{PageError, Result};
use crate::pagesize::Orientation;
use crate::rect::Rect;
use derive_more::Display;
use pdf_writer::writers::Page as PageWriter;
use pdf_writer::{Finish, Name};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The five fixed page box names
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxKind {
    MediaBox,
    CropBox,
    BleedBox,
    TrimBox,
    ArtBox,
}

impl BoxKind {
    /// All box kinds, in declaration (and output) order
    pub const ALL: [BoxKind; 5] = [
        BoxKind::MediaBox,
        BoxKind::CropBox,
        BoxKind::BleedBox,
        BoxKind::TrimBox,
        BoxKind::ArtBox,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for BoxKind {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self> {
        BoxKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| PageError::UnknownBoxKind(s.to_string()))
    }
}

/// Guideline line style. Serialized as its `/S` token; any string deserializes,
/// following [LineStyle::from_token].
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LineStyle {
    #[default]
    #[display("S")]
    Solid,
    #[display("D")]
    Dashed,
}

impl LineStyle {
    /// Only a token starting with `d` or `D` is dashed; anything else is solid
    pub fn from_token(token: &str) -> LineStyle {
        match token.chars().next() {
            Some(c) if c.eq_ignore_ascii_case(&'d') => LineStyle::Dashed,
            _ => LineStyle::Solid,
        }
    }

    fn name(self) -> Name<'static> {
        match self {
            LineStyle::Solid => Name(b"S"),
            LineStyle::Dashed => Name(b"D"),
        }
    }
}

impl From<String> for LineStyle {
    fn from(token: String) -> Self {
        LineStyle::from_token(&token)
    }
}

impl From<LineStyle> for String {
    fn from(style: LineStyle) -> Self {
        style.to_string()
    }
}

/// Guideline styling for a box. Widths and dash lengths are in user units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    pub colour: Colour,
    pub width: f64,
    pub style: LineStyle,
    pub dash: Vec<f64>,
}

impl BoxStyle {
    /// A solid black line one point wide with a 3-unit dash pattern
    pub fn default_for(unit_ratio: f64) -> BoxStyle {
        BoxStyle {
            colour: colours::BLACK,
            width: 1.0 / unit_ratio,
            style: LineStyle::Solid,
            dash: vec![3.0],
        }
    }
}

/// A single boundary box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBox {
    pub rect: Rect,
    pub style: Option<BoxStyle>,
}

/// The boundary boxes of one page, indexed by [BoxKind]. Serialized as a map
/// keyed by box name, e.g. `{"MediaBox": {"rect": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, PageBox>",
    into = "BTreeMap<String, PageBox>"
)]
pub struct BoxSet {
    boxes: [Option<PageBox>; 5],
}

impl TryFrom<BTreeMap<String, PageBox>> for BoxSet {
    type Error = PageError;

    fn try_from(named: BTreeMap<String, PageBox>) -> Result<Self> {
        let mut set = BoxSet::new();
        for (name, b) in named {
            let kind: BoxKind = name.parse()?;
            set.boxes[kind.index()] = Some(b);
        }
        Ok(set)
    }
}

impl From<BoxSet> for BTreeMap<String, PageBox> {
    fn from(set: BoxSet) -> Self {
        set.iter()
            .map(|(kind, b)| (kind.to_string(), b.clone()))
            .collect()
    }
}

impl BoxSet {
    pub fn new() -> BoxSet {
        BoxSet::default()
    }

    /// All five boxes set to `(0, 0, width, height)` with default styling
    pub fn default_boxes(width: f64, height: f64, unit_ratio: f64) -> BoxSet {
        let mut set = BoxSet::new();
        for kind in BoxKind::ALL {
            set.set(kind, Rect::sized(width, height), None, unit_ratio);
        }
        set
    }

    /// Set a box by name, failing with [PageError::UnknownBoxKind] for anything
    /// other than the five fixed names. Missing styling gets [BoxStyle::default_for].
    pub fn set_box(
        &mut self,
        name: &str,
        rect: Rect,
        style: Option<BoxStyle>,
        unit_ratio: f64,
    ) -> Result<&mut Self> {
        let kind: BoxKind = name.parse()?;
        Ok(self.set(kind, rect, style, unit_ratio))
    }

    /// Set a box. Missing styling gets [BoxStyle::default_for].
    pub fn set(
        &mut self,
        kind: BoxKind,
        rect: Rect,
        style: Option<BoxStyle>,
        unit_ratio: f64,
    ) -> &mut Self {
        let style = style.unwrap_or_else(|| BoxStyle::default_for(unit_ratio));
        self.boxes[kind.index()] = Some(PageBox {
            rect,
            style: Some(style),
        });
        self
    }

    pub fn get(&self, kind: BoxKind) -> Option<&PageBox> {
        self.boxes[kind.index()].as_ref()
    }

    /// Look a box up by name
    pub fn get_named(&self, name: &str) -> Result<Option<&PageBox>> {
        let kind: BoxKind = name.parse()?;
        Ok(self.get(kind))
    }

    pub fn contains(&self, kind: BoxKind) -> bool {
        self.boxes[kind.index()].is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.iter().all(Option::is_none)
    }

    /// The present boxes, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (BoxKind, &PageBox)> {
        BoxKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|b| (kind, b)))
    }

    /// Fill in every missing box: the MediaBox spans `(0, 0, width, height)`, the
    /// CropBox copies the MediaBox and the remaining boxes copy the CropBox.
    pub fn resolve_missing(&mut self, width: f64, height: f64, unit_ratio: f64) {
        if !self.contains(BoxKind::MediaBox) {
            self.set(BoxKind::MediaBox, Rect::sized(width, height), None, unit_ratio);
        }
        if !self.contains(BoxKind::CropBox) {
            let media = self.rect(BoxKind::MediaBox);
            self.set(BoxKind::CropBox, media, None, unit_ratio);
        }
        let crop = self.rect(BoxKind::CropBox);
        for kind in [BoxKind::BleedBox, BoxKind::TrimBox, BoxKind::ArtBox] {
            if !self.contains(kind) {
                self.set(kind, crop, None, unit_ratio);
            }
        }
    }

    /// Give every present box without styling the default styling
    pub fn style_missing(&mut self, unit_ratio: f64) {
        for b in self.boxes.iter_mut().flatten() {
            if b.style.is_none() {
                b.style = Some(BoxStyle::default_for(unit_ratio));
            }
        }
    }

    fn rect(&self, kind: BoxKind) -> Rect {
        self.get(kind).map(|b| b.rect).unwrap_or_default()
    }

    /// The orientation of the MediaBox
    pub fn orientation(&self) -> Orientation {
        let media = self.rect(BoxKind::MediaBox);
        Orientation::of(media.width(), media.height())
    }

    /// Exchange x and y coordinates of every present box, flipping the orientation.
    /// Applying it twice restores the original set.
    pub fn swap_coordinates(&mut self) {
        for b in self.boxes.iter_mut().flatten() {
            b.rect = b.rect.swapped();
        }
    }

    /// Writes `/<Name> [llx lly urx ury]` for every present box
    pub fn render_boxes(&self, page: &mut PageWriter<'_>) {
        for (kind, b) in self.iter() {
            let rect = b.rect.into();
            match kind {
                BoxKind::MediaBox => page.media_box(rect),
                BoxKind::CropBox => page.crop_box(rect),
                BoxKind::BleedBox => page.bleed_box(rect),
                BoxKind::TrimBox => page.trim_box(rect),
                BoxKind::ArtBox => page.art_box(rect),
            };
        }
    }

    /// Writes the `/BoxColorInfo` dictionary for every present box that carries
    /// styling. Widths and dashes are scaled from user units to points. Nothing is
    /// written when no box is styled.
    pub fn render_styling(
        &self,
        page: &mut PageWriter<'_>,
        unit_ratio: f64,
        formatter: &dyn ColorFormatter,
    ) {
        let styled: Vec<(BoxKind, &BoxStyle)> = self
            .iter()
            .filter_map(|(kind, b)| b.style.as_ref().map(|s| (kind, s)))
            .collect();
        if styled.is_empty() {
            return;
        }

        let mut info = page.insert(Name(b"BoxColorInfo")).dict();
        for (kind, style) in styled {
            let name = kind.to_string();
            let mut entry = info.insert(Name(name.as_bytes())).dict();
            entry
                .insert(Name(b"C"))
                .array()
                .items(formatter.rgb_components(&style.colour));
            if style.width != 0.0 {
                entry.pair(Name(b"W"), (style.width * unit_ratio) as f32);
            }
            entry.pair(Name(b"S"), style.style.name());
            if !style.dash.is_empty() {
                entry
                    .insert(Name(b"D"))
                    .array()
                    .items(style.dash.iter().map(|dash| (dash * unit_ratio) as f32));
            }
            entry.finish();
        }
        info.finish();
    }
}

use crate::boxes::{BoxKind, BoxSet};
use crate::error::Result;
use crate::layout::{partition, Extents, Margins, Region, RegionSpec};
use crate::pagesize::{Orientation, PageFormatProvider, PageOrientation, DEFAULT_FORMAT};
use crate::transition::{Transition, TransitionInput};
use serde::{Deserialize, Serialize};

/// Format name recorded for pages sized by width and height rather than by name
pub const CUSTOM_FORMAT: &str = "CUSTOM";

/// Format name asking for the page size to be taken from the supplied MediaBox
pub const MEDIABOX_FORMAT: &str = "MediaBox";

/// Everything a caller may specify when adding a page. Every field is optional;
/// missing or invalid values are defaulted or clamped when the page is built.
///
/// An entirely empty input asks the store to clone the geometry of the most
/// recently added page instead.
///
/// ```
/// use pdf_pages::{PageInput, Margins};
///
/// let input = PageInput::default()
///     .with_format("A5")
///     .with_margins(Margins::all(10.0))
///     .with_columns(2);
/// assert!(!input.is_empty());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInput {
    pub group: Option<u32>,
    /// Clockwise rotation in degrees, a multiple of 90
    pub rotation: Option<i32>,
    pub zoom: Option<f64>,
    /// A named format (see [crate::pagesize]), or [MEDIABOX_FORMAT]
    pub format: Option<String>,
    pub orientation: Option<Orientation>,
    /// Page width in user units, used when no format is named
    pub width: Option<f64>,
    /// Page height in user units, used when no format is named
    pub height: Option<f64>,
    pub boxes: Option<BoxSet>,
    pub transition: Option<TransitionInput>,
    pub margins: Option<Margins>,
    /// Split the content area into this many equal columns
    pub columns: Option<u32>,
    /// Explicit regions, used when no column count is given
    pub regions: Vec<RegionSpec>,
    pub auto_break: Option<bool>,
    /// Modification time, in seconds since the Unix epoch
    pub time: Option<i64>,
    pub content: Option<String>,
    /// Object numbers of the page's annotations
    pub annotation_refs: Vec<u32>,
    /// Rendered page number, overriding the group numbering
    pub number: Option<u32>,
}

impl PageInput {
    pub fn is_empty(&self) -> bool {
        *self == PageInput::default()
    }

    pub fn with_group(mut self, group: u32) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_format<S: ToString>(mut self, format: S) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Size the page in user units instead of by format name
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_boxes(mut self, boxes: BoxSet) -> Self {
        self.boxes = Some(boxes);
        self
    }

    pub fn with_transition(mut self, transition: TransitionInput) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = Some(margins);
        self
    }

    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_regions(mut self, regions: Vec<RegionSpec>) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_auto_break(mut self, enabled: bool) -> Self {
        self.auto_break = Some(enabled);
        self
    }

    pub fn with_time(mut self, unix_seconds: i64) -> Self {
        self.time = Some(unix_seconds);
        self
    }

    pub fn with_content<S: ToString>(mut self, content: S) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn with_annotation_refs(mut self, refs: Vec<u32>) -> Self {
        self.annotation_refs = refs;
        self
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }
}

/// One page of the stack.
///
/// Sizes come in two flavours: `pwidth`/`pheight` and the boxes are in points,
/// while `width`/`height`, the margins and the regions are in user units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Position in the stack
    pub id: usize,
    /// Value of the store's allocation counter when the page was added
    pub max_id_at_creation: usize,
    pub group: u32,
    /// Explicit page number, overriding the group numbering
    pub number: Option<u32>,
    /// Modification time, in seconds since the Unix epoch
    pub time: i64,
    /// Content fragments, concatenated when rendered
    pub content: Vec<String>,
    /// Content lengths recorded by [crate::PageStore::mark_content]
    pub content_marks: Vec<usize>,
    pub format: String,
    pub orientation: Orientation,
    pub pwidth: f64,
    pub pheight: f64,
    pub width: f64,
    pub height: f64,
    pub boxes: BoxSet,
    pub margins: Margins,
    pub extents: Extents,
    pub regions: Vec<Region>,
    pub current_region: usize,
    pub rotation: i32,
    pub zoom: f64,
    pub transition: Option<Transition>,
    pub annotation_refs: Vec<u32>,
    pub auto_break: bool,
    /// Page dictionary object number, assigned when the page tree is rendered
    pub object_number: Option<i32>,
}

impl Page {
    /// The currently selected region
    pub fn region(&self) -> &Region {
        &self.regions[self.current_region]
    }

    pub fn region_mut(&mut self) -> &mut Region {
        &mut self.regions[self.current_region]
    }

    /// Number of regions (columns) on the page
    pub fn columns(&self) -> usize {
        self.regions.len()
    }

    /// All content fragments joined together
    pub fn content_text(&self) -> String {
        self.content.concat()
    }

    /// A fresh page with this page's geometry and settings but none of its
    /// per-instance state (time, content, annotations, number, marks, cursors)
    pub(crate) fn clone_geometry(&self, time: i64) -> Page {
        let mut page = self.clone();
        page.time = time;
        page.content = vec![String::new()];
        page.content_marks = vec![0];
        page.annotation_refs.clear();
        page.number = None;
        page.object_number = None;
        page.current_region = 0;
        page.regions.iter_mut().for_each(Region::reset_cursor);
        page
    }
}

/// Resolved page size: format name, orientation, and size in points and user units
struct Geometry {
    format: String,
    orientation: Orientation,
    pwidth: f64,
    pheight: f64,
    width: f64,
    height: f64,
}

/// Turns a [PageInput] into a fully valid [Page]
pub(crate) struct PageBuilder<'a> {
    pub unit_ratio: f64,
    pub formats: &'a dyn PageFormatProvider,
    /// Swap left and right margins of booklet pages
    pub mirror_margins: bool,
    /// Current time, used when the input carries none
    pub now: i64,
}

impl PageBuilder<'_> {
    /// Runs the sanitation steps in order: group, rotation, zoom, format, boxes,
    /// transition, margins, regions, then the per-instance fields. The stack
    /// position fields (`id`, `max_id_at_creation`) are left for the store to fill.
    pub fn build(&self, input: PageInput) -> Result<Page> {
        let group = input.group.unwrap_or(0);
        let rotation = sanitize_rotation(input.rotation);
        let zoom = sanitize_zoom(input.zoom);
        let geometry = self.resolve_format(&input)?;
        let (geometry, boxes) = self.resolve_boxes(&input, geometry)?;
        let transition = input.transition.as_ref().map(Transition::sanitize);

        let (margins, extents) = Margins::compute(
            geometry.width,
            geometry.height,
            input.margins.as_ref(),
            self.mirror_margins,
        );
        let regions = partition(
            &margins,
            &extents,
            geometry.width,
            geometry.height,
            input.columns,
            &input.regions,
        );

        Ok(Page {
            id: 0,
            max_id_at_creation: 0,
            group,
            number: input.number.filter(|n| *n > 0),
            time: input.time.map(|t| t.max(0)).unwrap_or(self.now),
            content: vec![input.content.unwrap_or_default()],
            content_marks: vec![0],
            format: geometry.format,
            orientation: geometry.orientation,
            pwidth: geometry.pwidth,
            pheight: geometry.pheight,
            width: geometry.width,
            height: geometry.height,
            boxes,
            margins,
            extents,
            regions,
            current_region: 0,
            rotation,
            zoom,
            transition,
            annotation_refs: input.annotation_refs,
            auto_break: input.auto_break.unwrap_or(true),
            object_number: None,
        })
    }

    /// Resolve a named format through the provider, or a custom width and height,
    /// falling back to portrait A4 when neither is usable
    fn resolve_format(&self, input: &PageInput) -> Result<Geometry> {
        match input.format.as_deref() {
            Some(name) if !name.is_empty() && name != MEDIABOX_FORMAT => {
                let (pwidth, pheight, orientation) =
                    self.formats.size(name, input.orientation)?;
                Ok(self.from_points(name.to_string(), orientation, pwidth, pheight))
            }
            _ => self.custom(input.width, input.height, input.orientation),
        }
    }

    fn custom(
        &self,
        width: Option<f64>,
        height: Option<f64>,
        orientation: Option<Orientation>,
    ) -> Result<Geometry> {
        let usable = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
        match (usable(width), usable(height)) {
            (Some(width), Some(height)) => {
                let ((width, height), orientation) = (width, height).oriented(orientation);
                Ok(Geometry {
                    format: CUSTOM_FORMAT.to_string(),
                    orientation,
                    pwidth: width * self.unit_ratio,
                    pheight: height * self.unit_ratio,
                    width,
                    height,
                })
            }
            _ => {
                log::debug!("no usable page size, defaulting to {DEFAULT_FORMAT}");
                let (pwidth, pheight, orientation) = self
                    .formats
                    .size(DEFAULT_FORMAT, Some(Orientation::Portrait))?;
                Ok(self.from_points(DEFAULT_FORMAT.to_string(), orientation, pwidth, pheight))
            }
        }
    }

    fn from_points(
        &self,
        format: String,
        orientation: Orientation,
        pwidth: f64,
        pheight: f64,
    ) -> Geometry {
        Geometry {
            format,
            orientation,
            pwidth,
            pheight,
            width: pwidth / self.unit_ratio,
            height: pheight / self.unit_ratio,
        }
    }

    /// Fill in missing boxes and styling, sizing the page from the MediaBox when asked to, and
    /// swap box coordinates once if their orientation disagrees with the page's
    fn resolve_boxes(&self, input: &PageInput, geometry: Geometry) -> Result<(Geometry, BoxSet)> {
        let mut boxes = match &input.boxes {
            Some(boxes) if !boxes.is_empty() => boxes.clone(),
            _ => {
                let boxes =
                    BoxSet::default_boxes(geometry.pwidth, geometry.pheight, self.unit_ratio);
                return Ok((geometry, boxes));
            }
        };

        let geometry = match boxes.get(BoxKind::MediaBox) {
            Some(media) if input.format.as_deref() == Some(MEDIABOX_FORMAT) => self.custom(
                Some(media.rect.width() / self.unit_ratio),
                Some(media.rect.height() / self.unit_ratio),
                input.orientation,
            )?,
            _ => geometry,
        };

        boxes.resolve_missing(geometry.pwidth, geometry.pheight, self.unit_ratio);
        boxes.style_missing(self.unit_ratio);
        if boxes.orientation() != geometry.orientation {
            log::debug!(
                "page boxes are not {}, swapping coordinates",
                geometry.orientation
            );
            boxes.swap_coordinates();
        }
        Ok((geometry, boxes))
    }
}

fn sanitize_rotation(rotation: Option<i32>) -> i32 {
    match rotation {
        Some(r) if r % 90 == 0 => r,
        Some(r) => {
            log::debug!("rotation {r} is not a multiple of 90, using 0");
            0
        }
        None => 0,
    }
}

fn sanitize_zoom(zoom: Option<f64>) -> f64 {
    match zoom {
        Some(z) if z.is_finite() && z > 0.0 => z,
        Some(z) => {
            log::debug!("invalid zoom {z}, using 1");
            1.0
        }
        None => 1.0,
    }
}

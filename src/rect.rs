use serde::{Deserialize, Serialize};

/// A rectangle in points, specified by its lower-left and upper-right corners.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub llx: f64,
    /// The y-coordinate of the lower-left corner.
    pub lly: f64,
    /// The x-coordinate of the upper-right corner.
    pub urx: f64,
    /// The y-coordinate of the upper-right corner.
    pub ury: f64,
}

impl Rect {
    pub fn new(llx: f64, lly: f64, urx: f64, ury: f64) -> Rect {
        Rect { llx, lly, urx, ury }
    }

    /// A rectangle anchored at the origin
    pub fn sized(width: f64, height: f64) -> Rect {
        Rect::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        (self.urx - self.llx).abs()
    }

    pub fn height(&self) -> f64 {
        (self.ury - self.lly).abs()
    }

    /// Exchange the x and y coordinate of each corner, turning a portrait
    /// rectangle into a landscape one and vice versa
    pub fn swapped(self) -> Rect {
        Rect {
            llx: self.lly,
            lly: self.llx,
            urx: self.ury,
            ury: self.urx,
        }
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.llx as f32,
            y1: r.lly as f32,
            x2: r.urx as f32,
            y2: r.ury as f32,
        }
    }
}

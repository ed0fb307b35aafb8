//! Presentation-mode page transitions (`/Trans` dictionaries).
//!
//! Callers describe a transition loosely with [TransitionInput]; the store
//! sanitizes it into a [Transition] where every entry is valid for the chosen
//! style. Entries that don't apply to the style are dropped rather than rejected.

use derive_more::Display;
use pdf_writer::types::TransitionAngle;
use pdf_writer::writers::Page as PageWriter;
use pdf_writer::{Finish, Name};
use serde::{Deserialize, Serialize};

/// The transition effect
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionStyle {
    Split,
    Blinds,
    Box,
    Wipe,
    Dissolve,
    Glitter,
    /// Replace: the old page is simply replaced by the new one
    #[default]
    R,
    Fly,
    Push,
    Cover,
    Uncover,
    Fade,
}

impl TransitionStyle {
    const ALL: [TransitionStyle; 12] = [
        TransitionStyle::Split,
        TransitionStyle::Blinds,
        TransitionStyle::Box,
        TransitionStyle::Wipe,
        TransitionStyle::Dissolve,
        TransitionStyle::Glitter,
        TransitionStyle::R,
        TransitionStyle::Fly,
        TransitionStyle::Push,
        TransitionStyle::Cover,
        TransitionStyle::Uncover,
        TransitionStyle::Fade,
    ];

    /// Exact-name lookup
    pub fn from_name(name: &str) -> Option<TransitionStyle> {
        TransitionStyle::ALL
            .into_iter()
            .find(|style| style.to_string() == name)
    }
}

impl From<TransitionStyle> for pdf_writer::types::TransitionStyle {
    fn from(style: TransitionStyle) -> Self {
        use pdf_writer::types::TransitionStyle as Pdf;
        match style {
            TransitionStyle::Split => Pdf::Split,
            TransitionStyle::Blinds => Pdf::Blinds,
            TransitionStyle::Box => Pdf::Box,
            TransitionStyle::Wipe => Pdf::Wipe,
            TransitionStyle::Dissolve => Pdf::Dissolve,
            TransitionStyle::Glitter => Pdf::Glitter,
            TransitionStyle::R => Pdf::R,
            TransitionStyle::Fly => Pdf::Fly,
            TransitionStyle::Push => Pdf::Push,
            TransitionStyle::Cover => Pdf::Cover,
            TransitionStyle::Uncover => Pdf::Uncover,
            TransitionStyle::Fade => Pdf::Fade,
        }
    }
}

/// The dimension in which `Split` and `Blinds` effects occur
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    /// Horizontal
    H,
    /// Vertical
    V,
}

/// The direction of motion for `Split`, `Box` and `Fly` effects
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// Inward from the edges of the page
    I,
    /// Outward from the centre of the page
    O,
}

/// The direction in which the effect moves, in degrees counterclockwise from
/// left-to-right, or `None` (only meaningful for `Fly`)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DirectionRepr", into = "DirectionRepr")]
pub enum Direction {
    Angle(i32),
    None,
}

impl Direction {
    /// The `/Di` value, for the angles PDF defines
    pub fn angle(self) -> Option<TransitionAngle> {
        match self {
            Direction::Angle(0) => Some(TransitionAngle::LeftToRight),
            Direction::Angle(90) => Some(TransitionAngle::BottomToTop),
            Direction::Angle(180) => Some(TransitionAngle::RightToLeft),
            Direction::Angle(270) => Some(TransitionAngle::TopToBottom),
            Direction::Angle(315) => Some(TransitionAngle::TopLeftToBottomRight),
            Direction::Angle(_) => None,
            Direction::None => Some(TransitionAngle::None),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DirectionRepr {
    Angle(i32),
    Name(String),
}

impl TryFrom<DirectionRepr> for Direction {
    type Error = String;

    fn try_from(repr: DirectionRepr) -> Result<Self, Self::Error> {
        match repr {
            DirectionRepr::Angle(angle) => Ok(Direction::Angle(angle)),
            DirectionRepr::Name(name) if name == "None" => Ok(Direction::None),
            DirectionRepr::Name(name) => Err(format!("unknown transition direction: {name}")),
        }
    }
}

impl From<Direction> for DirectionRepr {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Angle(angle) => DirectionRepr::Angle(angle),
            Direction::None => DirectionRepr::Name("None".to_string()),
        }
    }
}

/// A transition as requested by the caller. Names are the PDF key names.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionInput {
    /// Display duration of the page, in seconds, before advancing automatically
    #[serde(rename = "Dur")]
    pub dur: Option<f64>,
    /// Style name
    #[serde(rename = "S")]
    pub s: Option<String>,
    /// Duration of the effect, in seconds
    #[serde(rename = "D")]
    pub d: Option<f64>,
    /// `H` or `V`
    #[serde(rename = "Dm")]
    pub dm: Option<String>,
    /// `I` or `O`
    #[serde(rename = "M")]
    pub m: Option<String>,
    #[serde(rename = "Di")]
    pub di: Option<Direction>,
    /// Scale at which `Fly` changes are drawn
    #[serde(rename = "SS")]
    pub ss: Option<f64>,
    /// Whether the area flown in by `Fly` is rectangular and opaque
    #[serde(rename = "B")]
    pub b: Option<bool>,
}

impl TransitionInput {
    pub fn new<S: ToString>(style: S) -> TransitionInput {
        TransitionInput {
            s: Some(style.to_string()),
            ..TransitionInput::default()
        }
    }

    pub fn with_page_duration(mut self, seconds: f64) -> Self {
        self.dur = Some(seconds);
        self
    }

    pub fn with_effect_duration(mut self, seconds: f64) -> Self {
        self.d = Some(seconds);
        self
    }

    pub fn with_dimension<S: ToString>(mut self, dimension: S) -> Self {
        self.dm = Some(dimension.to_string());
        self
    }

    pub fn with_motion<S: ToString>(mut self, motion: S) -> Self {
        self.m = Some(motion.to_string());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.di = Some(direction);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.ss = Some(scale);
        self
    }

    pub fn with_opaque(mut self, opaque: bool) -> Self {
        self.b = Some(opaque);
        self
    }
}

/// A sanitized page transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub page_duration: Option<f64>,
    pub style: TransitionStyle,
    pub effect_duration: f64,
    pub dimension: Option<Dimension>,
    pub motion: Option<Motion>,
    pub direction: Option<Direction>,
    pub scale: Option<f64>,
    pub opaque: bool,
}

impl Transition {
    /// Validate every entry against the style, defaulting or dropping anything
    /// that doesn't fit
    pub fn sanitize(input: &TransitionInput) -> Transition {
        use TransitionStyle::*;

        let style = match input.s.as_deref().map(TransitionStyle::from_name) {
            Some(Some(style)) => style,
            Some(None) => {
                log::debug!("unknown transition style {:?}, using R", input.s);
                R
            }
            None => R,
        };

        let page_duration = input.dur.filter(|d| *d > 0.0);
        let effect_duration = match input.d {
            Some(d) if d.is_finite() => d.max(0.0),
            _ => 1.0,
        };

        let dimension = match input.dm.as_deref() {
            Some("H") if matches!(style, Split | Blinds) => Some(Dimension::H),
            Some("V") if matches!(style, Split | Blinds) => Some(Dimension::V),
            _ => None,
        };

        let motion = match input.m.as_deref() {
            Some("I") if matches!(style, Split | Box | Fly) => Some(Motion::I),
            Some("O") if matches!(style, Split | Box | Fly) => Some(Motion::O),
            _ => None,
        };

        let direction = input.di.filter(|di| {
            matches!(style, Wipe | Glitter | Fly | Cover | Uncover | Push)
                && match di {
                    Direction::Angle(0 | 270) => true,
                    Direction::Angle(90 | 180) => style == Wipe,
                    Direction::Angle(315) => style == Glitter,
                    Direction::None => style == Fly,
                    Direction::Angle(_) => false,
                }
        });

        let scale = input
            .ss
            .filter(|ss| style == Fly && ss.is_finite() && *ss > 0.0);

        Transition {
            page_duration,
            style,
            effect_duration,
            dimension,
            motion,
            direction,
            scale,
            opaque: input.b.unwrap_or(false),
        }
    }

    /// Writes the optional page-level `/Dur` entry and the `/Trans` dictionary
    pub fn write(&self, page: &mut PageWriter<'_>) {
        if let Some(dur) = self.page_duration {
            page.duration(dur as f32);
        }
        let mut trans = page.transition();
        trans.style(self.style.into());
        trans.duration(self.effect_duration as f32);
        if let Some(dm) = self.dimension {
            trans.dimension(dm == Dimension::V);
        }
        if let Some(m) = self.motion {
            trans.direction(m == Motion::O);
        }
        if let Some(angle) = self.direction.and_then(Direction::angle) {
            trans.angle(angle);
        }
        if let Some(ss) = self.scale {
            trans.scale(ss as f32);
        }
        // `/B` has no setter on the transition writer
        trans.pair(Name(b"B"), self.opaque);
        trans.finish();
    }
}

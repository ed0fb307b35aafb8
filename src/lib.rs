//! Page-level layout state for PDF writers: boundary boxes, margins, columns,
//! a page stack with automatic page breaks, and serialization of the finished
//! page tree into PDF object syntax.

mod boxes;
pub use boxes::*;

mod codec;
pub use codec::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

/// Margins and the regions (columns) derived from them
pub mod layout;
pub use layout::{Extents, Margins, Region, RegionSpec};

mod page;
pub use page::*;

/// Pre-defined paper sizes and format lookup
pub mod pagesize;
pub use pagesize::{Orientation, PageFormatProvider, StandardFormats};

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod serializer;
pub use serializer::*;

mod store;
pub use store::*;

mod transition;
pub use transition::*;

mod units;
pub use units::*;

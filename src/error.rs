use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PageError>;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PageError {
    /// The box name is not one of `MediaBox`, `CropBox`, `BleedBox`, `TrimBox`, `ArtBox`
    #[error("unknown page box type: {0}")]
    UnknownBoxKind(String),

    /// The unit name has no entry in the unit ratio table
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// The page format name has no entry in the format table
    #[error("unknown page format: {0}")]
    UnknownFormat(String),

    /// The page index does not refer to a live page. `None` means the store has no
    /// current page (it is empty).
    #[error("{}", page_not_found(.0))]
    PageNotFound(Option<usize>),

    /// Pages can only be moved to an earlier position in the stack
    #[error("cannot move page {from} to position {to}")]
    InvalidMove { from: usize, to: usize },

    /// Object numbers start at 1, so the counter handed to a render must not be
    /// negative, and the numbers it allocates must fit in an `i32`
    #[error("cannot allocate object numbers after {0}")]
    InvalidObjectNumber(i32),

    #[error(transparent)]
    /// An I/O error occurred while writing rendered pages
    Io(#[from] std::io::Error),
}

fn page_not_found(pid: &Option<usize>) -> String {
    match pid {
        Some(pid) => format!("the page with index {pid} does not exist"),
        None => "the page stack is empty".to_string(),
    }
}

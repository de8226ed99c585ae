use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BreakpointError {
    /// An upper bound was requested for the widest breakpoint.
    #[error("breakpoint \"{0}\" has no upper limit")]
    InvalidBreakpoint(String),
    #[error("unknown breakpoint \"{0}\"")]
    UnknownBreakpoint(String),
    #[error("breakpoint \"{name}\" has index {index} at position {position}")]
    IndexMismatch {
        name: String,
        index: usize,
        position: usize,
    },
    #[error("at least two breakpoints are required, found {0}")]
    TooFewBreakpoints(usize),
    #[error("no width given for breakpoint \"{0}\"")]
    MissingWidth(String),
    #[error("width for breakpoint \"{0}\" given more than once")]
    DuplicateWidth(String),
    #[error("width {width} of breakpoint \"{name}\" is negative or not finite")]
    InvalidWidth { name: String, width: f64 },
    #[error(
        "breakpoint \"{name}\" ({width}px) is narrower than \"{previous}\" ({previous_width}px)"
    )]
    Unordered {
        name: String,
        width: f64,
        previous: String,
        previous_width: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseQueryError {
    #[error("empty media query")]
    Empty,
    #[error("unsupported media feature {0:?}")]
    UnsupportedFeature(String),
    #[error("invalid pixel length {0:?}")]
    InvalidLength(String),
    #[error("media feature {0:?} given more than once")]
    DuplicateFeature(String),
}


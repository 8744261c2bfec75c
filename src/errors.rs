use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Everything that can go wrong while parsing or evaluating a filter
#[derive(Debug, Clone, PartialEq, Eq, Error)] // `Error` derive gives Display + std::error::Error
pub enum FilterError {
    // Filter text is blank, does not split into subject/comparator/controls,
    // or the subject is blank; raised at parse time
    #[error("invalid filter '{filter}': {reason}")]
    MalformedFilter { filter: String, reason: String },

    // Comparator text that matches no alias in the catalog
    #[error("unknown comparator: '{0}'")]
    UnknownComparator(String),

    // List controls without the `[...]` wrapper
    #[error("invalid list controls '{controls}': {reason}")]
    MalformedList { controls: String, reason: String },

    // Range controls without the `[...]` wrapper, or not exactly 2 values
    #[error("invalid range controls '{controls}': {reason}")]
    MalformedRange { controls: String, reason: String },

    // Comparator used in an evaluation mode it does not support,
    // e.g. `is defined` against literal data
    #[error("comparator '{0}' is not applicable here")]
    UnsupportedOperation(String),

    // Comparator configuration that cannot be evaluated, e.g. an invalid `match` pattern;
    // only surfaces from literal-mode evaluation
    #[error("invalid comparator '{comparator}': {reason}")]
    InvalidComparator { comparator: String, reason: String },
}

// Type alias for results that use `FilterError` as the error type
pub type Result<T> = std::result::Result<T, FilterError>;

impl FilterError {
    // Shorthand constructors; each copies the offending text into the error
    pub(crate) fn malformed_filter(filter: &str, reason: impl Into<String>) -> Self {
        FilterError::MalformedFilter { filter: filter.to_string(), reason: reason.into() }
    }

    pub(crate) fn malformed_list(controls: &str, reason: impl Into<String>) -> Self {
        FilterError::MalformedList { controls: controls.to_string(), reason: reason.into() }
    }

    pub(crate) fn malformed_range(controls: &str, reason: impl Into<String>) -> Self {
        FilterError::MalformedRange { controls: controls.to_string(), reason: reason.into() }
    }
}

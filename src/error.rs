//! Crate-wide error type.
//!
//! Every fallible operation in the pipeline returns `PlotError`. The variants
//! distinguish the three user-facing rejection kinds (bad data kind, unknown
//! location, bad series kind) from infrastructure failures (fetch, CSV,
//! model, render), so callers can decide whether to abort a batch or keep
//! going with the remaining locations.

/// Errors produced by the fetch/resolve/transform/render pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotError {
    /// The data-type selector was not one of `cases` / `deaths`.
    InvalidDataKind { given: String },
    /// The series selector was not one of `cumulative` / `new` / `trend`.
    InvalidSeriesKind { given: String },
    /// The location did not match the national aliases, a known state name,
    /// or a known county FIPS code.
    UnknownLocation { given: String },
    /// HTTP download failed or returned a non-success status.
    Fetch { message: String },
    /// The downloaded CSV could not be parsed.
    Csv { message: String },
    /// Trend model fitting failed.
    Trend { message: String },
    /// Chart rendering failed.
    Render { message: String },
    /// Local file I/O (exports, chart output) failed.
    Io { message: String },
}

impl PlotError {
    pub fn fetch(message: impl Into<String>) -> Self {
        PlotError::Fetch {
            message: message.into(),
        }
    }

    pub fn csv(message: impl Into<String>) -> Self {
        PlotError::Csv {
            message: message.into(),
        }
    }

    pub fn trend(message: impl Into<String>) -> Self {
        PlotError::Trend {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        PlotError::Render {
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        PlotError::Io {
            message: message.into(),
        }
    }

    /// Process exit code for the binary.
    ///
    /// 2 = invalid arguments/inputs, 3 = unknown location, 4 = fetch/parse/
    /// model/render failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            PlotError::InvalidDataKind { .. } | PlotError::InvalidSeriesKind { .. } => 2,
            PlotError::Io { .. } => 2,
            PlotError::UnknownLocation { .. } => 3,
            PlotError::Fetch { .. }
            | PlotError::Csv { .. }
            | PlotError::Trend { .. }
            | PlotError::Render { .. } => 4,
        }
    }
}

impl std::fmt::Display for PlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotError::InvalidDataKind { given } => write!(
                f,
                "Plot aborted. Unrecognized data type '{given}': expected 'cases' or 'deaths'."
            ),
            PlotError::InvalidSeriesKind { given } => write!(
                f,
                "Plot aborted. Unrecognized series type '{given}': expected 'cumulative', 'new', or 'trend'."
            ),
            PlotError::UnknownLocation { given } => write!(
                f,
                "Plot aborted. Unrecognized location '{given}': expected 'US'/'USA', a state name, or a county FIPS code."
            ),
            PlotError::Fetch { message } => write!(f, "Download failed: {message}"),
            PlotError::Csv { message } => write!(f, "CSV parse failed: {message}"),
            PlotError::Trend { message } => write!(f, "Trend fit failed: {message}"),
            PlotError::Render { message } => write!(f, "Chart render failed: {message}"),
            PlotError::Io { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PlotError {}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("A rally is already in progress")]
    RallyAlreadyInProgress,

    #[error("No rally in progress")]
    NoRallyInProgress,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid score format: {0}")]
    InvalidScoreFormat(String),

    #[error("Invalid server number: {0} (expected 1 or 2)")]
    InvalidServerNumber(u32),

    #[error("Rally index {index} out of range (have {len} rallies)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f64),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(f64),

    #[error("Invalid segment {index}: out frame {out_frame} precedes in frame {in_frame}")]
    InvalidSegment {
        index: usize,
        in_frame: u64,
        out_frame: u64,
    },

    #[error("Frame position overflowed at segment {index}")]
    FrameOverflow { index: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// True for errors caused by calling an operation in the wrong rally phase
    pub fn is_phase_error(&self) -> bool {
        matches!(
            self,
            Error::RallyAlreadyInProgress | Error::NoRallyInProgress | Error::NothingToUndo
        )
    }
}

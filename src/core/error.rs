use std::path::PathBuf;

/// Errors raised while loading data, aggregating it, or navigating the deck.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("failed to load {}: {reason}", path.display())]
    DataLoad { path: PathBuf, reason: String },

    #[error("row {row}: field `{field}` has invalid value {value:?}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("cannot average {what} over an empty group")]
    EmptyGroup { what: &'static str },

    #[error("slide index {index} is out of range for a deck of {len} slides")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("deck has no slides")]
    EmptyDeck,
}

pub type Result<T> = std::result::Result<T, DeckError>;

impl DeckError {
    pub fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DeckError::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Short label used in the inline fallback shown in place of a chart.
    pub fn kind_label(&self) -> &'static str {
        match self {
            DeckError::DataLoad { .. } => "Data could not be loaded",
            DeckError::Parse { .. } => "Data could not be parsed",
            DeckError::EmptyGroup { .. } => "Nothing to show for this selection",
            DeckError::IndexOutOfRange { .. } | DeckError::EmptyDeck => "Slide not found",
        }
    }
}

use thiserror::Error;

/// Input that cannot be simulated.
///
/// Missing data, an underivable week cursor, or an empty remaining schedule are
/// not errors; those produce empty results. Only malformed input ends up here.
#[derive(Error, Debug)]
pub enum SeasonError {
    #[error("failed to parse season data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid week key: {0:?}")]
    InvalidWeek(String),

    #[error("non-finite {what}: {value}")]
    NonFiniteValue { what: String, value: f64 },

    #[error("roster {0} listed more than once")]
    DuplicateRoster(u32),
}

pub type Result<T> = std::result::Result<T, SeasonError>;

use thiserror::Error;

/// Provider data we could not make sense of.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("event {event_id} has an invalid date {value:?}: {source}")]
    InvalidDate {
        event_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("event {event_id} has an invalid timestamp {value:?}: {source}")]
    InvalidDateTime {
        event_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
}

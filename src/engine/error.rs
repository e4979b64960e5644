#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    MalformedDate { value: String },
    InvalidMonth { year: i32, month: u32 },
    LimitExceeded(&'static str),
    InvalidCommand(String),
    Json(String),
    Io(String),
}

impl std::fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityError::MalformedDate { value } => {
                write!(f, "malformed date {value:?}: expected YYYY-MM-DD")
            }
            AvailabilityError::InvalidMonth { year, month } => {
                write!(f, "invalid month: {year}-{month:02}")
            }
            AvailabilityError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            AvailabilityError::InvalidCommand(msg) => write!(f, "invalid command: {msg}"),
            AvailabilityError::Json(e) => write!(f, "invalid booking JSON: {e}"),
            AvailabilityError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for AvailabilityError {}

impl From<serde_json::Error> for AvailabilityError {
    fn from(e: serde_json::Error) -> Self {
        AvailabilityError::Json(e.to_string())
    }
}

impl From<std::io::Error> for AvailabilityError {
    fn from(e: std::io::Error) -> Self {
        AvailabilityError::Io(e.to_string())
    }
}

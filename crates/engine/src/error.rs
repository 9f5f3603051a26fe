use std::fmt;

#[derive(Debug)]
pub enum InventoryError {
    /// Path is neither "tickets" nor "tickets.<levelId>".
    UnrecognizedPath { path: String, name: String },
    /// Key is present but matches neither date shape.
    UnrecognizedKey { key: String, name: String },
    /// Temporal query on a capacity snapshot.
    NotAPerformance { name: String },
    /// Time-of-day query on a date-only record.
    NoTimeAvailable { name: String, key: String },
    /// IANA zone name not in the tz database.
    UnknownZone(String),
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedPath { path, name } => {
                write!(f, "record '{name}': unrecognized path shape '{path}'")
            }
            Self::UnrecognizedKey { key, name } => {
                write!(f, "record '{name}': unrecognized key shape '{key}'")
            }
            Self::NotAPerformance { name } => {
                write!(f, "record '{name}' is a capacity snapshot, not a performance")
            }
            Self::NoTimeAvailable { name, key } => {
                write!(f, "record '{name}' has a date but no time of day (key: '{key}')")
            }
            Self::UnknownZone(zone) => write!(f, "unknown time zone '{zone}'"),
        }
    }
}

impl std::error::Error for InventoryError {}

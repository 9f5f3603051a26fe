use chrono::{NaiveDate, NaiveDateTime};

use crate::error::InventoryError;
use crate::model::{
    ClassifiedBatch, ClassifiedRecord, RawRecord, RecordKind, Scope, Showtime, SkippedRecord,
};

const FORM_PATH: &str = "tickets";
const LEVEL_PATH_PREFIX: &str = "tickets.";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Classify one raw record: scope from `path`, kind (and showtime) from `key`.
pub fn classify(raw: &RawRecord) -> Result<ClassifiedRecord, InventoryError> {
    let scope = parse_scope(raw)?;
    let kind = parse_kind(raw)?;
    Ok(ClassifiedRecord {
        scope,
        kind,
        name: raw.name.clone(),
        key: raw.key.clone(),
        sold: raw.sold,
        quantity: raw.quantity,
    })
}

/// Classify a form's full record set. A record that fails never aborts the
/// batch: it is kept aside in `skipped` with its raw fields and the error.
pub fn classify_all(records: &[RawRecord]) -> ClassifiedBatch {
    let mut batch = ClassifiedBatch {
        records: Vec::new(),
        skipped: Vec::new(),
    };
    for raw in records {
        match classify(raw) {
            Ok(rec) => batch.records.push(rec),
            Err(error) => batch.skipped.push(SkippedRecord {
                path: raw.path.clone(),
                name: raw.name.clone(),
                key: raw.key.clone(),
                error,
            }),
        }
    }
    batch
}

fn parse_scope(raw: &RawRecord) -> Result<Scope, InventoryError> {
    if raw.path == FORM_PATH {
        return Ok(Scope::FormTotal);
    }
    if let Some(level_id) = raw.path.strip_prefix(LEVEL_PATH_PREFIX) {
        if !level_id.is_empty() && !level_id.contains('.') {
            return Ok(Scope::TicketLevel(level_id.to_string()));
        }
    }
    Err(InventoryError::UnrecognizedPath {
        path: raw.path.clone(),
        name: raw.name.clone(),
    })
}

fn parse_kind(raw: &RawRecord) -> Result<RecordKind, InventoryError> {
    let Some(key) = raw.key.as_deref() else {
        return Ok(RecordKind::Capacity);
    };
    // Shape first: chrono's %Y also accepts short years, so the parser alone
    // would let "22-07-22" through as year 22.
    let parsed = if is_date_only(key) {
        NaiveDate::parse_from_str(key, DATE_FORMAT).map(Showtime::DateOnly)
    } else {
        NaiveDateTime::parse_from_str(key, DATE_TIME_FORMAT).map(Showtime::WithTime)
    };
    match parsed {
        Ok(showtime) => Ok(RecordKind::Performance(showtime)),
        Err(_) => Err(InventoryError::UnrecognizedKey {
            key: key.to_string(),
            name: raw.name.clone(),
        }),
    }
}

/// Ten bytes shaped `\d{4}-\d{2}-\d{2}`.
fn is_date_only(key: &str) -> bool {
    let bytes = key.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

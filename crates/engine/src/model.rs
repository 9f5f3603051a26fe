use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One record of a form's inventory report, exactly as the API returns it.
///
/// The upstream response is a single flat collection in which the same shape
/// carries three different kinds of fact, told apart only by `path` and `key`:
///
/// - `path: "tickets"`, no key: overall capacity for the whole form.
/// - `path: "tickets.adult"`, no key: one ticket level's capacity
///   (`name` is the display label, "General Admission"). Omitted entirely for
///   forms with only the one default level.
/// - `path: "tickets"` or `"tickets.adult"`, `key: "2022-07-22 20:00"`:
///   sales for one performance, at form or level scope. `name` echoes the key
///   after a trailing hyphen ("General Admission-2022-07-22 20:00").
///
/// `sold` and `quantity` are the numbers, and upstream edits them
/// retroactively when capacity is adjusted mid-run. A fetched snapshot is only
/// ever "as of now".
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    pub sold: i64,
    pub quantity: i64,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Which part of the form a record describes. Fully determined by `path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// `path == "tickets"`: the form as a whole.
    FormTotal,
    /// `path == "tickets.<levelId>"`: one named ticket level.
    TicketLevel(String),
}

impl Scope {
    pub fn level_id(&self) -> Option<&str> {
        match self {
            Self::FormTotal => None,
            Self::TicketLevel(id) => Some(id),
        }
    }
}

/// When a performance happens: the parsed identity of a record's `key`.
///
/// Equality and hashing are the grouping identity for performances. Ordering
/// is chronological; a date-only showtime sorts before any timed showtime on
/// the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Showtime {
    /// Key shaped `YYYY-MM-DD`, no time of day known.
    DateOnly(NaiveDate),
    /// Key shaped `YYYY-MM-DD HH:MM`.
    WithTime(NaiveDateTime),
}

impl Showtime {
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::DateOnly(d) => *d,
            Self::WithTime(ts) => ts.date(),
        }
    }

    pub fn time(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateOnly(_) => None,
            Self::WithTime(ts) => Some(*ts),
        }
    }

    /// A timed showtime is upcoming at or after `now`; a date-only showtime
    /// stays upcoming through its whole calendar date.
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        match self {
            Self::DateOnly(d) => *d >= now.date(),
            Self::WithTime(ts) => *ts >= now,
        }
    }
}

impl Ord for Showtime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date().cmp(&other.date()).then_with(|| match (self, other) {
            (Self::DateOnly(_), Self::DateOnly(_)) => Ordering::Equal,
            (Self::DateOnly(_), Self::WithTime(_)) => Ordering::Less,
            (Self::WithTime(_), Self::DateOnly(_)) => Ordering::Greater,
            (Self::WithTime(a), Self::WithTime(b)) => a.time().cmp(&b.time()),
        })
    }
}

impl PartialOrd for Showtime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Capacity snapshot vs. per-performance sales. Determined by `key` presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// No key: current capacity, not tied to any performance.
    Capacity,
    /// Key present: sales for the performance the key names.
    Performance(Showtime),
}

/// A raw record plus its derived classification.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedRecord {
    pub scope: Scope,
    pub kind: RecordKind,
    pub name: String,
    pub key: Option<String>,
    pub sold: i64,
    pub quantity: i64,
}

impl ClassifiedRecord {
    /// The parsed performance identity; capacity snapshots have none.
    pub fn showtime(&self) -> Result<Showtime, InventoryError> {
        match self.kind {
            RecordKind::Performance(st) => Ok(st),
            RecordKind::Capacity => Err(InventoryError::NotAPerformance {
                name: self.name.clone(),
            }),
        }
    }

    /// Calendar date of the performance.
    pub fn event_date(&self) -> Result<NaiveDate, InventoryError> {
        Ok(self.showtime()?.date())
    }

    /// Full timestamp of the performance. Date-only records have none; the
    /// error names the record's display label and key so the offending
    /// upstream record is identifiable.
    pub fn event_time(&self) -> Result<NaiveDateTime, InventoryError> {
        let st = self.showtime()?;
        st.time().ok_or_else(|| InventoryError::NoTimeAvailable {
            name: self.name.clone(),
            key: self.key.clone().unwrap_or_default(),
        })
    }

    /// Whether the performance is still upcoming at `now` (venue-local naive
    /// time, see `VenueClock`). Timed records compare full timestamps;
    /// date-only records stay upcoming through their whole calendar date.
    pub fn is_upcoming(&self, now: NaiveDateTime) -> Result<bool, InventoryError> {
        Ok(self.showtime()?.is_upcoming(now))
    }

    /// Negation of `is_upcoming`, on the same domain.
    pub fn is_past(&self, now: NaiveDateTime) -> Result<bool, InventoryError> {
        Ok(!self.is_upcoming(now)?)
    }

    /// True iff the record is performance-scoped (carries a key).
    pub fn is_performance(&self) -> bool {
        matches!(self.kind, RecordKind::Performance(_))
    }

    /// Zero sold on a performance record is ambiguous upstream: a show that
    /// never sold, or one whose orders were all moved away before it was
    /// hidden. Flagged, not resolved. Capacity snapshots are never flagged.
    pub fn zero_sold_ambiguous(&self) -> bool {
        self.sold == 0 && self.is_performance()
    }
}

// ---------------------------------------------------------------------------
// Batch output
// ---------------------------------------------------------------------------

/// One record the classifier refused, with its raw fields kept for reporting.
#[derive(Debug)]
pub struct SkippedRecord {
    pub path: String,
    pub name: String,
    pub key: Option<String>,
    pub error: InventoryError,
}

/// Classifier output for one form's full record set. A bad record never
/// aborts the batch; it lands in `skipped`.
#[derive(Debug)]
pub struct ClassifiedBatch {
    pub records: Vec<ClassifiedRecord>,
    pub skipped: Vec<SkippedRecord>,
}

// ---------------------------------------------------------------------------
// Reconciliation view values
// ---------------------------------------------------------------------------

/// A capacity snapshot (form total or one ticket level), as of the fetch that
/// built the view. For the form total, `name` is all the upstream offers on a
/// single-level form, where no per-level capacity records exist.
#[derive(Debug, Clone, Serialize)]
pub struct CapacityFigures {
    pub name: String,
    pub sold: i64,
    pub quantity: i64,
}

/// Sales figures for one scope of one performance.
#[derive(Debug, Clone, Serialize)]
pub struct SalesFigures {
    pub name: String,
    pub sold: i64,
    pub quantity: i64,
}

impl SalesFigures {
    /// Zero sold on a performance is ambiguous upstream; see
    /// `ClassifiedRecord::zero_sold_ambiguous`.
    pub fn zero_sold_ambiguous(&self) -> bool {
        self.sold == 0
    }
}

/// All sales facts for one performance, across scopes.
#[derive(Debug, Clone, Serialize)]
pub struct Performance {
    pub showtime: Showtime,
    /// Verbatim upstream key shared by this performance's records.
    pub key: String,
    /// Form-total sales, when the upstream sent a form-scope record.
    pub total: Option<SalesFigures>,
    /// Per-level sales, keyed by level id.
    pub levels: BTreeMap<String, SalesFigures>,
}

impl Performance {
    pub fn level(&self, level_id: &str) -> Option<&SalesFigures> {
        self.levels.get(level_id)
    }

    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.showtime.is_upcoming(now)
    }
}

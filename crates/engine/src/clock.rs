use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::InventoryError;

/// The venue's wall clock.
///
/// Inventory keys carry no zone, so every upcoming/past comparison needs a
/// "now" someone chose a zone for on purpose. This wraps that choice instead
/// of silently reading the host's local zone: construct it once with the
/// venue's IANA name and feed its `now()` to the temporal queries.
#[derive(Debug, Clone, Copy)]
pub struct VenueClock {
    zone: Tz,
}

impl VenueClock {
    /// `zone` is an IANA name, e.g. "America/New_York".
    pub fn new(zone: &str) -> Result<Self, InventoryError> {
        let zone = Tz::from_str(zone).map_err(|_| InventoryError::UnknownZone(zone.to_string()))?;
        Ok(VenueClock { zone })
    }

    /// Current venue-local time, naive, fit for `is_upcoming` and the view's
    /// partition queries.
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.zone).naive_local()
    }

    /// Current venue-local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn zone_name(&self) -> &'static str {
        self.zone.name()
    }
}

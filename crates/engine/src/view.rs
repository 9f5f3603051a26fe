use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::classify::classify_all;
use crate::model::{
    CapacityFigures, ClassifiedRecord, Performance, RawRecord, RecordKind, SalesFigures, Scope,
    Showtime, SkippedRecord,
};

/// Queryable reconciliation of one form's full inventory record set.
///
/// Built fresh from each fetch. Upstream edits sold/quantity retroactively,
/// so a view is a snapshot of one response, never a cache.
#[derive(Debug)]
pub struct InventoryView {
    records: Vec<ClassifiedRecord>,
    skipped: Vec<SkippedRecord>,
    form_capacity: Option<CapacityFigures>,
    level_capacity: BTreeMap<String, CapacityFigures>,
    level_names: Vec<String>,
    performances: Vec<Performance>,
}

impl InventoryView {
    /// Classify and aggregate one form's records. Unclassifiable records are
    /// kept aside in `skipped`, never dropped silently and never fatal.
    pub fn from_raw(raw: &[RawRecord]) -> Self {
        let batch = classify_all(raw);

        let mut form_capacity = None;
        let mut level_capacity: BTreeMap<String, CapacityFigures> = BTreeMap::new();
        let mut level_names: Vec<String> = Vec::new();
        let mut by_showtime: BTreeMap<Showtime, Performance> = BTreeMap::new();

        for rec in &batch.records {
            let figures_name = rec.name.clone();
            match (&rec.kind, &rec.scope) {
                (RecordKind::Capacity, Scope::FormTotal) => {
                    // Last record wins within a batch.
                    form_capacity = Some(CapacityFigures {
                        name: figures_name,
                        sold: rec.sold,
                        quantity: rec.quantity,
                    });
                }
                (RecordKind::Capacity, Scope::TicketLevel(level_id)) => {
                    if !level_names.contains(&rec.name) {
                        level_names.push(rec.name.clone());
                    }
                    level_capacity.insert(
                        level_id.clone(),
                        CapacityFigures {
                            name: figures_name,
                            sold: rec.sold,
                            quantity: rec.quantity,
                        },
                    );
                }
                (RecordKind::Performance(showtime), scope) => {
                    let perf = by_showtime.entry(*showtime).or_insert_with(|| Performance {
                        showtime: *showtime,
                        key: rec.key.clone().unwrap_or_default(),
                        total: None,
                        levels: BTreeMap::new(),
                    });
                    let figures = SalesFigures {
                        name: figures_name,
                        sold: rec.sold,
                        quantity: rec.quantity,
                    };
                    match scope {
                        Scope::FormTotal => perf.total = Some(figures),
                        Scope::TicketLevel(level_id) => {
                            perf.levels.insert(level_id.clone(), figures);
                        }
                    }
                }
            }
        }

        InventoryView {
            records: batch.records,
            skipped: batch.skipped,
            form_capacity,
            level_capacity,
            level_names,
            // BTreeMap iteration gives chronological order via Showtime's Ord.
            performances: by_showtime.into_values().collect(),
        }
    }

    /// Distinct ticket-level display names, first-seen order, from the
    /// per-level capacity records only. Empty for single-level forms: the
    /// upstream sends no per-level capacity records there, and the only name
    /// anywhere is `form_capacity().name`.
    pub fn ticket_level_names(&self) -> &[String] {
        &self.level_names
    }

    /// All distinct performances, chronological.
    pub fn performances(&self) -> &[Performance] {
        &self.performances
    }

    /// Performances not yet over at `now` (venue-local naive time).
    pub fn upcoming_performances(&self, now: NaiveDateTime) -> Vec<&Performance> {
        self.performances
            .iter()
            .filter(|p| p.is_upcoming(now))
            .collect()
    }

    /// Complement of `upcoming_performances`; together they are always the
    /// whole of `performances`.
    pub fn past_performances(&self, now: NaiveDateTime) -> Vec<&Performance> {
        self.performances
            .iter()
            .filter(|p| !p.is_upcoming(now))
            .collect()
    }

    /// Sales for one ticket level of one performance, by level id and the
    /// performance's verbatim upstream key.
    pub fn sales_for_level(&self, level_id: &str, key: &str) -> Option<&SalesFigures> {
        self.performances
            .iter()
            .find(|p| p.key == key)
            .and_then(|p| p.level(level_id))
    }

    /// A ticket level's capacity as of this view's fetch.
    pub fn capacity_for_level(&self, level_id: &str) -> Option<&CapacityFigures> {
        self.level_capacity.get(level_id)
    }

    /// The form-total capacity snapshot.
    pub fn form_capacity(&self) -> Option<&CapacityFigures> {
        self.form_capacity.as_ref()
    }

    /// Every record that classified, input order.
    pub fn records(&self) -> &[ClassifiedRecord] {
        &self.records
    }

    /// Records the classifier refused, with their errors.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }
}

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

use housecount_engine::{
    classify, classify_all, InventoryError, InventoryView, RawRecord, Scope, Showtime,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(name: &str) -> Vec<RawRecord> {
    let path = fixtures_dir().join(name);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("cannot decode {name}: {e}"))
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

// -------------------------------------------------------------------------
// Two-level theater run (Lenox Ave)
// -------------------------------------------------------------------------

#[test]
fn lenox_ave_full_reconciliation() {
    let records = load_fixture("lenox-ave-inventory.json");
    let view = InventoryView::from_raw(&records);

    assert!(view.skipped().is_empty());
    assert_eq!(view.records().len(), 18);

    assert_eq!(
        view.ticket_level_names(),
        ["General Admission", "Standing Room Only"]
    );

    let total = view.form_capacity().unwrap();
    assert_eq!(total.name, "tickets");
    assert_eq!(total.sold, 167);
    assert_eq!(total.quantity, 600);

    let ga = view.capacity_for_level("adult").unwrap();
    assert_eq!(ga.name, "General Admission");
    assert_eq!(ga.quantity, 500);
    let sro = view.capacity_for_level("standingRoomOnly").unwrap();
    assert_eq!(sro.name, "Standing Room Only");
    assert_eq!(sro.sold, 15);

    let perfs = view.performances();
    assert_eq!(perfs.len(), 5);
    let keys: Vec<&str> = perfs.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "2022-07-20 20:00",
            "2022-07-22 20:00",
            "2022-07-23 14:00",
            "2022-07-23 20:00",
            "2022-07-24 15:00",
        ]
    );

    // Each performance carries a form total and both levels, and the level
    // sales sum to the total.
    for perf in perfs {
        let form_sales = perf.total.as_ref().unwrap();
        assert_eq!(perf.levels.len(), 2);
        let level_sum: i64 = perf.levels.values().map(|s| s.sold).sum();
        assert_eq!(level_sum, form_sales.sold, "performance {}", perf.key);
    }

    let matinee_sro = view.sales_for_level("standingRoomOnly", "2022-07-23 14:00").unwrap();
    assert_eq!(matinee_sro.sold, 2);
    assert_eq!(matinee_sro.quantity, 25);
}

#[test]
fn lenox_ave_upcoming_past_partition() {
    let records = load_fixture("lenox-ave-inventory.json");
    let view = InventoryView::from_raw(&records);

    // Mid-run: Saturday 15:00, after the matinee has started.
    let now = at("2022-07-23 15:00");
    let upcoming = view.upcoming_performances(now);
    let past = view.past_performances(now);
    assert_eq!(upcoming.len() + past.len(), view.performances().len());

    let upcoming_keys: Vec<&str> = upcoming.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(upcoming_keys, ["2022-07-23 20:00", "2022-07-24 15:00"]);
    let past_keys: Vec<&str> = past.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(
        past_keys,
        ["2022-07-20 20:00", "2022-07-22 20:00", "2022-07-23 14:00"]
    );

    // Every sales record answers exactly one of upcoming/past, whenever asked.
    for now in [at("2022-07-01 00:00"), at("2022-07-23 14:00"), at("2022-08-01 09:30")] {
        for rec in view.records().iter().filter(|r| r.is_performance()) {
            assert_ne!(rec.is_upcoming(now).unwrap(), rec.is_past(now).unwrap());
        }
    }
}

#[test]
fn lenox_ave_zero_sold_preview_flagged() {
    let records = load_fixture("lenox-ave-inventory.json");
    let view = InventoryView::from_raw(&records);

    let preview = view
        .performances()
        .iter()
        .find(|p| p.key == "2022-07-20 20:00")
        .unwrap();
    assert!(preview.total.as_ref().unwrap().zero_sold_ambiguous());
    assert!(preview.level("adult").unwrap().zero_sold_ambiguous());

    // Only that performance's records are flagged; capacity rows never are.
    for rec in view.records() {
        let expected = rec.is_performance() && rec.key.as_deref() == Some("2022-07-20 20:00");
        assert_eq!(rec.zero_sold_ambiguous(), expected, "record {}", rec.name);
    }
}

// -------------------------------------------------------------------------
// Single-level gala with a date-only showtime and junk records
// -------------------------------------------------------------------------

#[test]
fn gala_dirty_records_go_to_skipped() {
    let records = load_fixture("gala-inventory.json");
    let view = InventoryView::from_raw(&records);

    assert_eq!(view.records().len(), 2);
    assert_eq!(view.skipped().len(), 2);
    assert!(matches!(
        view.skipped()[0].error,
        InventoryError::UnrecognizedPath { .. }
    ));
    assert_eq!(view.skipped()[0].path, "donations");
    assert!(matches!(
        view.skipped()[1].error,
        InventoryError::UnrecognizedKey { .. }
    ));
    assert_eq!(view.skipped()[1].key.as_deref(), Some("TBD"));

    // The clean records still reconcile.
    assert!(view.ticket_level_names().is_empty());
    assert_eq!(view.form_capacity().unwrap().name, "tickets");
    assert_eq!(view.performances().len(), 1);
}

#[test]
fn gala_date_only_semantics() {
    let records = load_fixture("gala-inventory.json");
    let view = InventoryView::from_raw(&records);

    let gala = &view.performances()[0];
    assert_eq!(
        gala.showtime,
        Showtime::DateOnly(NaiveDate::from_ymd_opt(2022, 9, 10).unwrap())
    );

    // Upcoming through the whole date, past from the next midnight.
    assert!(gala.is_upcoming(at("2022-09-10 23:00")));
    assert!(!gala.is_upcoming(at("2022-09-11 00:30")));

    // Asking the sales record for a time of day fails, naming the record.
    let sales = view
        .records()
        .iter()
        .find(|r| r.key.as_deref() == Some("2022-09-10"))
        .unwrap();
    assert_eq!(
        sales.event_date().unwrap(),
        NaiveDate::from_ymd_opt(2022, 9, 10).unwrap()
    );
    let err = sales.event_time().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("tickets-2022-09-10"), "message: {msg}");
    assert!(msg.contains("'2022-09-10'"), "message: {msg}");
}

// -------------------------------------------------------------------------
// Regrouping invariant
// -------------------------------------------------------------------------

#[test]
fn regrouping_outputs_matches_input_groups() {
    for fixture in ["lenox-ave-inventory.json", "gala-inventory.json"] {
        let records = load_fixture(fixture);
        let batch = classify_all(&records);

        let input_groups: HashSet<(&str, Option<&str>)> = records
            .iter()
            .filter(|r| classify(r).is_ok())
            .map(|r| (r.path.as_str(), r.key.as_deref()))
            .collect();
        let output_groups: HashSet<(&Scope, Option<&str>)> = batch
            .records
            .iter()
            .map(|r| (&r.scope, r.key.as_deref()))
            .collect();

        assert_eq!(input_groups.len(), output_groups.len(), "fixture {fixture}");
    }
}

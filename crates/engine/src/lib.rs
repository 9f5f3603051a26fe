//! `housecount-engine`: Webconnex/TicketSpice inventory classification engine.
//!
//! Pure engine crate: receives pre-fetched inventory records, classifies each
//! one, and builds a queryable per-form reconciliation view. No HTTP or IO
//! dependencies; "now" always comes from the caller.

pub mod classify;
pub mod clock;
pub mod error;
pub mod model;
pub mod view;

pub use classify::{classify, classify_all};
pub use clock::VenueClock;
pub use error::InventoryError;
pub use model::{
    CapacityFigures, ClassifiedBatch, ClassifiedRecord, Performance, RawRecord, RecordKind,
    SalesFigures, Scope, Showtime, SkippedRecord,
};
pub use view::InventoryView;

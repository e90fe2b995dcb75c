//! Bookkeeping core: entries, the in-memory store, aggregation over it, the
//! month grid, the tag registry and the navigation state machine.
//!
//! Nothing in this crate reads the wall clock. Callers pass the reference
//! date or timestamp in, which keeps every function deterministic.

pub use aggregation::{
    DateGroups, Totals, daily_summary, group_by_date, month_totals, recent_locations,
    sort_newest_first, sum_by_kind, totals,
};
pub use calendar::{
    DayCell, GRID_CELLS, MonthGrid, MonthPosition, WeekStart, YearMonth, month_grid,
};
pub use draft::{PAYMENT_METHODS, TransactionDraft};
pub use error::EngineError;
pub use money::{Money, coerce_amount};
pub use navigation::{Action, Outcome, Screen, Session, Tab};
pub use store::TransactionStore;
pub use tags::{QUICK_TAGS, RECOMMENDED_TAGS, Tag, TagRegistry};
pub use transactions::{OccurredDate, Transaction, TransactionId, TransactionKind, parse_time};

mod aggregation;
mod calendar;
mod draft;
mod error;
mod money;
mod navigation;
mod seed;
mod store;
mod tags;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

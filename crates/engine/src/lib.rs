//! Schema-driven store for sales records.
//!
//! The engine owns the `sales` table: it whitelists client field maps through
//! the [`schema`], compiles client filters into a [`Predicate`], runs bulk
//! create/read/update/delete as atomic units of work and derives the dashboard
//! reports from a snapshot of the store.

pub use aggregate::{
    ActivityShare, ApplicationMeans, Dashboard, DoctorRanking, Report, ScatterPoint,
    SeriesPoint, StackedSeries, StateSeries, Summary,
};
pub use error::EngineError;
pub use filter::Predicate;
pub use ops::{Affected, Engine, EngineBuilder};
pub use sales::Record;
pub use schema::{Field, FieldMap, Projection};

pub mod aggregate;
pub mod sales;
pub mod schema;

mod error;
mod filter;
mod ops;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

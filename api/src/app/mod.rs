//! Application services
//!
//! The rating-board engine: pure scoring and color functions plus the
//! services that read and mutate the tabular store. The dispatcher is the
//! only entry point; everything else is invoked under its lock.

pub mod aggregate;
pub mod colors;
pub mod dispatch;
pub mod links;
pub mod ratings;
pub mod roster;
pub mod scoring;
pub mod standings;

pub use aggregate::AggregationService;
pub use dispatch::{DispatchOutcome, DispatchService};
pub use ratings::{RatingService, RatingUpdateSummary};
pub use roster::RosterResolver;
pub use standings::StandingsService;

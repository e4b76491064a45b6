//! Core journey logic for Greenfield.
//!
//! [`JourneyStore`] owns the canonical [`JourneyState`](greenfield_types::JourneyState)
//! and snapshots it through a [`JourneyRepository`] after every mutation.

mod clock;
pub mod errors;
mod repository;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::RepositoryError;
pub use repository::{FileRepository, InMemoryRepository, JourneyRepository};
pub use store::{JourneyStore, StoreOptions};

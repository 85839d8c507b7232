//! Feed loading, filtering, search overlay and display reconciliation.

mod controller;
mod state;

pub use controller::FeedController;
pub use state::{FeedRequest, FeedState, FeedView, LoadKind, LoadOutcome, SearchTicket};

//! Remote drive listing: the paginated API client and the flat file
//! records it produces. Records are immutable once mapped; the tree
//! assembly in [`crate::scan`] consumes them exactly once.

mod client;
mod record;

pub use client::{DriveClient, ListingError, ListingItem, ListingPage};
pub use record::FileRecord;

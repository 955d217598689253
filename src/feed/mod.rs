//! Fetch several ICS feeds and merge their events.

mod error;
pub use error::FeedError;

mod source;
pub use source::source_name;

mod fetch;
pub use fetch::{FetchFeed, HttpFetcher, HttpFetcherBuilder};

mod window;
pub use window::TimeWindow;

mod aggregate;
pub use aggregate::{Aggregator, MAX_EVENTS};

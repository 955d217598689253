use std::panic::AssertUnwindSafe;

use futures::{FutureExt, future::join_all};
use itertools::Itertools;
use tracing::{debug, error, instrument, warn};

use super::{FetchFeed, TimeWindow, source_name};
use crate::{
    component::EventParser,
    response::{CalendarResponse, NormalizedEvent},
    types::Tz,
};

/// Upper bound on the number of events returned by one aggregation.
pub const MAX_EVENTS: usize = 20;

/// Merges the events of several feeds into one chronological list.
///
/// Every call fetches and parses all feeds again; nothing is cached between calls.
pub struct Aggregator<F: FetchFeed> {
    feeds: Vec<String>,
    fetcher: F,
    tz: Tz,
}

impl<F: FetchFeed> Aggregator<F> {
    pub fn new(feeds: Vec<String>, fetcher: F) -> Self {
        Self {
            feeds,
            fetcher,
            tz: Tz::Local,
        }
    }

    /// Zone used for date-only and floating times.
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    #[inline]
    pub fn is_configured(&self) -> bool {
        !self.feeds.is_empty()
    }

    /// Events from all feeds overlapping `window`, earliest first, at most [`MAX_EVENTS`].
    ///
    /// A feed that cannot be fetched contributes no events. If the pipeline itself fails
    /// unexpectedly, the result is a configured response without events.
    pub async fn aggregate(&self, window: &TimeWindow) -> CalendarResponse {
        if !self.is_configured() {
            debug!("no calendar feeds configured");
            return CalendarResponse::not_configured();
        }

        match AssertUnwindSafe(self.collect(window)).catch_unwind().await {
            Ok(events) => CalendarResponse::new(events),
            Err(_) => {
                error!("calendar aggregation failed unexpectedly");
                CalendarResponse::degraded()
            }
        }
    }

    async fn collect(&self, window: &TimeWindow) -> Vec<NormalizedEvent> {
        let per_feed = join_all(self.feeds.iter().map(|url| self.feed_events(url, window))).await;

        per_feed
            .into_iter()
            .flatten()
            .sorted_by_key(|event| event.start)
            .take(MAX_EVENTS)
            .collect()
    }

    #[instrument(level = "debug", skip(self, window))]
    async fn feed_events(&self, url: &str, window: &TimeWindow) -> Vec<NormalizedEvent> {
        let text = match self.fetcher.fetch(url).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "skipping unavailable feed");
                return vec![];
            }
        };

        let source = source_name(url);
        let events: Vec<_> = EventParser::from_str(&text, self.tz)
            .filter(|event| window.overlaps(event.start, event.end))
            .map(|event| NormalizedEvent::new(event, source.as_str()))
            .collect();
        debug!(%source, count = events.len(), "parsed feed");
        events
    }
}

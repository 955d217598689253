const VALUE_DELIMITER: char = ':';
const PARAM_DELIMITER: char = ';';

pub mod parser;
pub use parser::{ContentLine, Line, LineReader};

pub mod types;
pub use types::{CalDateTime, CalDateTimeError, Tz};

pub mod component;
pub use component::{EventParser, IcalEvent};

pub mod feed;
pub use feed::{Aggregator, FeedError, FetchFeed, HttpFetcher, MAX_EVENTS, TimeWindow};

pub mod response;
pub use response::{CalendarResponse, NormalizedEvent};

pub mod alert;
pub use alert::EventAlert;

pub mod config;

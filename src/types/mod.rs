mod timezone;
pub use timezone::Tz;

mod datetime;
pub use datetime::{CalDateTime, CalDateTimeError, decode};

//! Turn ICS documents into events.
//!
//! Only `VEVENT` blocks are considered. Everything outside them (calendar properties,
//! `VTIMEZONE`, `VTODO`, ...) is skipped. Lines of a sub-component nested in an event,
//! such as `VALARM`, are read as properties of that event.

mod event;
pub use event::{EventParser, IcalEvent, parse_events};

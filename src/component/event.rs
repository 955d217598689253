use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::{
    parser::{ContentLine, Line, LineReader},
    types::{Tz, decode},
};

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";
const DEFAULT_TITLE: &str = "Untitled";

/// An event read from a single feed, not yet tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcalEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
}

/// Properties of the currently open `VEVENT`, last value wins.
#[derive(Debug)]
struct EventBlock {
    line: usize,
    properties: HashMap<String, String>,
}

impl EventBlock {
    fn new(line: usize) -> Self {
        Self {
            line,
            properties: HashMap::new(),
        }
    }

    #[inline]
    fn add_content_line(&mut self, prop: ContentLine) {
        self.properties.insert(prop.name, prop.value);
    }

    /// Non-empty value of a property.
    fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn build(self, tz: &Tz) -> Option<IcalEvent> {
        let start = match self.get("DTSTART").map(|value| decode(value, tz)) {
            Some(Ok(start)) => start,
            Some(Err(err)) => {
                debug!(line = self.line, error = %err, "dropping VEVENT with undecodable DTSTART");
                return None;
            }
            None => {
                debug!(line = self.line, "dropping VEVENT without DTSTART");
                return None;
            }
        };
        let end = self
            .get("DTEND")
            .and_then(|value| decode(value, tz).ok())
            .unwrap_or(start);

        Some(IcalEvent {
            title: self.get("SUMMARY").unwrap_or(DEFAULT_TITLE).to_owned(),
            start,
            end,
            location: self.get("LOCATION").unwrap_or_default().to_owned(),
        })
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InBlock(EventBlock),
}

/// Iterator over the events of one ICS document, in document order.
///
/// Blocks that lack a decodable `DTSTART` and a block left open at the end of the input
/// are skipped without error.
pub struct EventParser<I: Iterator<Item = Line>> {
    lines: I,
    tz: Tz,
    state: State,
}

impl EventParser<LineReader> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str, tz: Tz) -> Self {
        Self::new(LineReader::from_str(input), tz)
    }
}

impl<I: Iterator<Item = Line>> EventParser<I> {
    pub fn new(lines: I, tz: Tz) -> Self {
        Self {
            lines,
            tz,
            state: State::Idle,
        }
    }
}

impl<I: Iterator<Item = Line>> Iterator for EventParser<I> {
    type Item = IcalEvent;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            match line.as_str() {
                // An unterminated block is overwritten
                BEGIN_EVENT => self.state = State::InBlock(EventBlock::new(line.number())),
                END_EVENT if matches!(self.state, State::InBlock(_)) => {
                    if let State::InBlock(block) = std::mem::take(&mut self.state)
                        && let Some(event) = block.build(&self.tz)
                    {
                        return Some(event);
                    }
                }
                content => {
                    if let State::InBlock(block) = &mut self.state
                        && let Some(prop) = ContentLine::parse(content)
                    {
                        block.add_content_line(prop);
                    }
                }
            }
        }

        if let State::InBlock(block) = std::mem::take(&mut self.state) {
            debug!(line = block.line, "dropping VEVENT left open at end of input");
        }
        None
    }
}

/// Parse every event of an ICS document.
pub fn parse_events(input: &str, tz: &Tz) -> Vec<IcalEvent> {
    EventParser::from_str(input, *tz).collect()
}

//! Extraction of lessons from the raw HTML of the NSMU web schedule.
//!
//! The extraction grammar is tied to one fixed page layout: lessons are
//! located by a structural selector and the individual fields are read
//! from fixed child-node positions inside each lesson block. A layout
//! change on the site means updating the extractors here, nothing else.
//!
//! Lesson HTML block:
//! ```html
//! <div style="...">
//!   <span class="time_para">
//!     <b>13:00-14:40 </b>
//!     <i>08.11.2025</i>
//!   </span>
//!   <div style="color:#1c5bdd">Лекция: <i>Психиатрия</i></div>
//!   <!---->
//!   <div>
//!     <b>Уч. ауд. № &nbsp;2102, СГМУ Административный корпус</b>,
//!     <br>
//!   </div>
//! </div>
//! ```

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::{
    datetime,
    error::ExtractError,
    types::{Lesson, LessonType, Schedule},
};

/// Structural path to one lesson block inside a schedule page.
const LESSON_SELECTOR: &str = "body > div > div > div > div > div";

/// Auditorium placeholder as decoded by the HTML parser (`&nbsp;` is
/// U+00A0 in text) and in its raw entity form.
const LOCATION_PLACEHOLDER: &str = "Уч. ауд. № \u{a0}";
const LOCATION_PLACEHOLDER_RAW: &str = "Уч. ауд. № &nbsp;";
const LOCATION_LABEL: &str = "Ауд. №";

/// Marker of the university's online learning platform.
const ONLINE_MARKER: &str = "Moodle";

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([01][0-9]|2[0-3]):([0-5][0-9])").unwrap());
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-2]\d|3[01])\.(0[1-9]|1[012])\.(20\d\d)").unwrap());

/// Hour and minute of a lesson boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimeOfDay {
    hour: u32,
    minute: u32,
}

/// Start and end of a lesson within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimeRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

/// Calendar date with a 0-based month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateParts {
    day: u32,
    month_index: u32,
    year: i32,
}

/// Type label and subject title from the lesson header, both trimmed
/// and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LessonHeader {
    type_label: String,
    title: String,
}

/// Parser for the NSMU web schedule pages.
pub struct WebScheduleParser {
    lesson_selector: Selector,
}

impl Default for WebScheduleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WebScheduleParser {
    pub fn new() -> Self {
        Self {
            lesson_selector: Selector::parse(LESSON_SELECTOR).unwrap(),
        }
    }

    /// Extracts all lessons from the given pages, one page per week.
    ///
    /// Fragments that fail any extractor are dropped with a diagnostic;
    /// an empty or unparseable page contributes zero lessons. Output
    /// order is page order, then in-page fragment order.
    pub fn parse_schedule(&self, pages: &[String]) -> Schedule {
        let mut schedule = Schedule::new();
        for (page_index, page) in pages.iter().enumerate() {
            let document = Html::parse_document(page);
            for fragment in document.select(&self.lesson_selector) {
                match build_lesson(fragment) {
                    Ok(lesson) => schedule.push(lesson),
                    Err(error) => {
                        tracing::debug!(page_index, %error, "dropping lesson fragment");
                    }
                }
            }
        }
        schedule
    }
}

/// Runs all field extractors over one lesson fragment and assembles a
/// lesson, all-or-nothing: the first failing extractor voids the whole
/// fragment and no partial lesson is ever produced.
fn build_lesson(fragment: ElementRef<'_>) -> Result<Lesson, ExtractError> {
    let times = extract_times(fragment)?;
    let date = extract_date(fragment)?;
    let header = extract_header(fragment)?;
    let location = extract_location(fragment)?;

    let start_time = datetime::assemble(
        date.year,
        date.month_index,
        date.day,
        times.start.hour,
        times.start.minute,
    )?;
    let end_time = datetime::assemble(
        date.year,
        date.month_index,
        date.day,
        times.end.hour,
        times.end.minute,
    )?;
    let is_online = is_lesson_online(&location);

    Ok(
        Lesson::new(start_time, end_time, header.title, location, is_online)
            .with_type(LessonType::classify(&header.type_label)),
    )
}

/// First two `HH:MM` occurrences in the fragment text are the start and
/// end of the lesson.
fn extract_times(fragment: ElementRef<'_>) -> Result<TimeRange, ExtractError> {
    let text = fragment_text(fragment);
    let mut times = TIME_RE
        .captures_iter(&text)
        .filter_map(|caps| parse_number_pair(&caps).map(|(hour, minute)| TimeOfDay { hour, minute }));

    let start = times.next().ok_or(ExtractError::Time)?;
    let end = times.next().ok_or(ExtractError::Time)?;
    Ok(TimeRange { start, end })
}

/// First `DD.MM.YYYY` occurrence in the fragment text.
fn extract_date(fragment: ElementRef<'_>) -> Result<DateParts, ExtractError> {
    let text = fragment_text(fragment);
    let caps = DATE_RE.captures(&text).ok_or(ExtractError::Date)?;

    let (day, month) = parse_number_pair(&caps).ok_or(ExtractError::Date)?;
    let year = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or(ExtractError::Date)?;

    Ok(DateParts {
        day,
        // The page prints months 1-12.
        month_index: month - 1,
        year,
    })
}

/// The lesson header lives in the fourth child node and reads
/// `"<type label>: <title>"`; both halves are trimmed and lowercased.
fn extract_header(fragment: ElementRef<'_>) -> Result<LessonHeader, ExtractError> {
    let header = child_node_text(fragment, 3).ok_or(ExtractError::Header)?;
    let (type_label, title) = header.split_once(':').ok_or(ExtractError::Header)?;

    let type_label = type_label.trim().to_lowercase();
    let title = title.trim().to_lowercase();
    if type_label.is_empty() || title.is_empty() {
        return Err(ExtractError::Header);
    }

    Ok(LessonHeader { type_label, title })
}

/// The location lives in the seventh child node. The auditorium
/// placeholder is shortened once; the rest of the string, including any
/// building or address text, is kept as-is.
fn extract_location(fragment: ElementRef<'_>) -> Result<String, ExtractError> {
    let raw = child_node_text(fragment, 6).ok_or(ExtractError::Location)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::Location);
    }

    Ok(trimmed
        .replacen(LOCATION_PLACEHOLDER, LOCATION_LABEL, 1)
        .replacen(LOCATION_PLACEHOLDER_RAW, LOCATION_LABEL, 1))
}

/// A lesson is held online when its location names the online platform.
fn is_lesson_online(location: &str) -> bool {
    location.contains(ONLINE_MARKER)
}

/// Text of the `index`-th child node of the fragment.
///
/// Text nodes count, comment nodes do not; an element child yields its
/// full descendant text. Reading past the available children is an
/// ordinary `None`, never a panic.
fn child_node_text(fragment: ElementRef<'_>, index: usize) -> Option<String> {
    let node = fragment
        .children()
        .filter(|n| !n.value().is_comment())
        .nth(index)?;

    match node.value() {
        Node::Text(text) => Some(text.to_string()),
        Node::Element(_) => ElementRef::wrap(node).map(|el| el.text().collect()),
        _ => Some(String::new()),
    }
}

fn fragment_text(fragment: ElementRef<'_>) -> String {
    fragment.text().collect()
}

fn parse_number_pair(caps: &regex::Captures<'_>) -> Option<(u32, u32)> {
    let first = caps.get(1)?.as_str().parse().ok()?;
    let second = caps.get(2)?.as_str().parse().ok()?;
    Some((first, second))
}

#[cfg(test)]
mod tests;

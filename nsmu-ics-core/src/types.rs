//! Domain model: lesson, lesson type and schedule.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Kind of a lesson, classified from the free-text label on the schedule
/// page. `Unknown` is both the parse-failure default and a displayable
/// value of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LessonType {
    Practice,
    Seminar,
    Lection,
    #[serde(rename = "Laboratory work")]
    Laboratory,
    #[serde(rename = "Clinical Practice")]
    ClinicalPractice,
    #[default]
    Unknown,
}

impl LessonType {
    /// Maps a type label scraped from the page to a lesson type.
    ///
    /// The input is trimmed and lowercased here even though the parser
    /// already normalizes it, so direct callers get the same answer for
    /// any casing or padding of a known label.
    pub fn classify(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "лекция" => Self::Lection,
            "практические занятия" => Self::Practice,
            "лабораторное занятие" => Self::Laboratory,
            "семинар" => Self::Seminar,
            "клинические практические занятия" => Self::ClinicalPractice,
            _ => Self::Unknown,
        }
    }

    /// Display string used in the JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Practice => "Practice",
            Self::Seminar => "Seminar",
            Self::Lection => "Lection",
            Self::Laboratory => "Laboratory work",
            Self::ClinicalPractice => "Clinical Practice",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lesson extracted from the web schedule.
///
/// Times are local to the institution (fixed UTC+3 offset). The value is
/// immutable once built; classification happens before construction is
/// finalized via [`Lesson::with_type`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    /// Subject name, lowercase-normalized.
    pub title: String,
    /// Room/building string with the auditorium placeholder shortened.
    pub location: String,
    pub lesson_type: LessonType,
    /// Derived from `location` containing the online-platform marker.
    pub is_online: bool,
}

impl Lesson {
    /// Creates a lesson with the type left at `Unknown`.
    pub fn new(
        start_time: DateTime<FixedOffset>,
        end_time: DateTime<FixedOffset>,
        title: impl Into<String>,
        location: impl Into<String>,
        is_online: bool,
    ) -> Self {
        Self {
            start_time,
            end_time,
            title: title.into(),
            location: location.into(),
            lesson_type: LessonType::default(),
            is_online,
        }
    }

    /// Finishes construction with a classified lesson type.
    pub fn with_type(mut self, lesson_type: LessonType) -> Self {
        self.lesson_type = lesson_type;
        self
    }
}

/// Ordered collection of lessons.
///
/// Order is extraction order: page order first, in-page fragment order
/// second. Lessons are never sorted by time and never deduplicated;
/// consumers that need chronological order must sort themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    lessons: Vec<Lesson>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, lesson: Lesson) {
        self.lessons.push(lesson);
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lesson> {
        self.lessons.iter()
    }

    /// Derived schedule keeping only lessons matching the predicate,
    /// in the original order.
    pub fn filter(&self, predicate: impl Fn(&Lesson) -> bool) -> Self {
        self.lessons
            .iter()
            .filter(|l| predicate(l))
            .cloned()
            .collect()
    }

    /// Serializes the whole schedule to an iCalendar document with the
    /// default generator settings.
    pub fn to_calendar_text(&self) -> String {
        crate::ics::IcsGenerator::default().generate(self)
    }
}

impl From<Vec<Lesson>> for Schedule {
    fn from(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }
}

impl FromIterator<Lesson> for Schedule {
    fn from_iter<I: IntoIterator<Item = Lesson>>(iter: I) -> Self {
        Self {
            lessons: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Schedule {
    type Item = Lesson;
    type IntoIter = std::vec::IntoIter<Lesson>;

    fn into_iter(self) -> Self::IntoIter {
        self.lessons.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Lesson;
    type IntoIter = std::slice::Iter<'a, Lesson>;

    fn into_iter(self) -> Self::IntoIter {
        self.lessons.iter()
    }
}

/// Identity of a study group on the schedule website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupId {
    /// Group code in the `курс/группа` form the site expects.
    pub group: String,
    /// Speciality code.
    pub spec: String,
}

impl GroupId {
    pub fn new(group: impl Into<String>, spec: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            spec: spec.into(),
        }
    }

    /// Builds the group identity from separate course and group numbers,
    /// the way the HTTP routes expose them.
    pub fn from_parts(curse: &str, group: &str, spec: &str) -> Self {
        Self::new(format!("{curse}/{group}"), spec)
    }
}

#[cfg(test)]
mod tests;

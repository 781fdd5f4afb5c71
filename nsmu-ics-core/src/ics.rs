//! iCalendar serialization of a schedule.

use chrono::Utc;
use uuid::Uuid;

use crate::types::{Lesson, LessonType, Schedule};

/// Compact UTC timestamp form used for DTSTAMP/DTSTART/DTEND.
const ICS_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Source of event identifiers.
///
/// Injected into the generator so tests can supply deterministic
/// identifiers; production uses random UUIDs, so two serializations of
/// the same schedule produce different identifiers.
pub trait UidSource: Send + Sync {
    fn next_uid(&self) -> String;
}

/// Default identifier source backed by random v4 UUIDs.
pub struct RandomUid;

impl UidSource for RandomUid {
    fn next_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Calendar-level generation options.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    /// Calendar name (X-WR-CALNAME).
    pub calendar_name: Option<String>,
    /// Display timezone hint (X-WR-TIMEZONE).
    pub timezone: Option<String>,
}

impl Default for IcsOptions {
    fn default() -> Self {
        Self {
            calendar_name: Some("Расписание СГМУ".to_string()),
            timezone: Some("Europe/Moscow".to_string()),
        }
    }
}

/// ICS calendar generator.
pub struct IcsGenerator {
    options: IcsOptions,
    uid_source: Box<dyn UidSource>,
}

impl IcsGenerator {
    pub fn new(options: IcsOptions) -> Self {
        Self::with_uid_source(options, Box::new(RandomUid))
    }

    pub fn with_uid_source(options: IcsOptions, uid_source: Box<dyn UidSource>) -> Self {
        Self {
            options,
            uid_source,
        }
    }

    /// Produces one calendar document with one event per lesson, in
    /// schedule order. No sorting by time is performed.
    pub fn generate(&self, schedule: &Schedule) -> String {
        let mut ics = String::new();

        ics.push_str("BEGIN:VCALENDAR\r\n");
        ics.push_str("VERSION:2.0\r\n");
        ics.push_str("PRODID:-//NSMU ICS//NSMU Schedule Calendar//RU\r\n");
        ics.push_str("CALSCALE:GREGORIAN\r\n");

        if let Some(ref name) = self.options.calendar_name {
            ics.push_str(&format!("X-WR-CALNAME:{}\r\n", name));
        }

        if let Some(ref timezone) = self.options.timezone {
            ics.push_str(&format!("X-WR-TIMEZONE:{}\r\n", timezone));
        }

        for lesson in schedule {
            self.add_lesson_event(&mut ics, lesson);
        }

        ics.push_str("END:VCALENDAR\r\n");

        ics
    }

    /// Appends one VEVENT block for a lesson.
    fn add_lesson_event(&self, ics: &mut String, lesson: &Lesson) {
        let uid = self.uid_source.next_uid();
        let dtstamp = Utc::now().format(ICS_TIME_FORMAT).to_string();
        let dtstart = lesson
            .start_time
            .with_timezone(&Utc)
            .format(ICS_TIME_FORMAT)
            .to_string();
        let dtend = lesson
            .end_time
            .with_timezone(&Utc)
            .format(ICS_TIME_FORMAT)
            .to_string();

        ics.push_str("BEGIN:VEVENT\r\n");
        ics.push_str(&format!("UID:{}\r\n", uid));
        ics.push_str(&format!("DTSTAMP:{}\r\n", dtstamp));
        ics.push_str(&format!("DTSTART:{}\r\n", dtstart));
        ics.push_str(&format!("DTEND:{}\r\n", dtend));
        ics.push_str(&format!(
            "SUMMARY:{}\r\n",
            escape_text(&build_summary(lesson))
        ));
        // Kept byte-for-byte so calendar clients show the room string the
        // schedule page published.
        ics.push_str(&format!("LOCATION:{}\r\n", lesson.location));
        ics.push_str("END:VEVENT\r\n");
    }
}

impl Default for IcsGenerator {
    fn default() -> Self {
        Self::new(IcsOptions::default())
    }
}

/// Event summary: icon glyph, title, localized type name in parentheses.
fn build_summary(lesson: &Lesson) -> String {
    format!(
        "{}{} ({})",
        type_icon(lesson.lesson_type),
        lesson.title,
        type_display_ru(lesson.lesson_type)
    )
}

/// Icon glyph for a lesson type; the `Unknown` arm is the fallback.
pub fn type_icon(lesson_type: LessonType) -> &'static str {
    match lesson_type {
        LessonType::Lection => "📖",
        LessonType::Practice => "✏️",
        LessonType::Laboratory => "🔬",
        LessonType::Seminar => "💬",
        LessonType::ClinicalPractice => "🩺",
        LessonType::Unknown => "❔",
    }
}

/// Russian display name for a lesson type; the `Unknown` arm is the
/// fallback.
pub fn type_display_ru(lesson_type: LessonType) -> &'static str {
    match lesson_type {
        LessonType::Lection => "Лекция",
        LessonType::Practice => "Практическое занятие",
        LessonType::Laboratory => "Лабораторное занятие",
        LessonType::Seminar => "Семинар",
        LessonType::ClinicalPractice => "Клиническое практическое занятие",
        LessonType::Unknown => "Неизвестный тип",
    }
}

/// Escapes ICS text content.
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

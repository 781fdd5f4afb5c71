use chrono::{TimeZone, Utc};
use scraper::{ElementRef, Html};

use super::*;
use crate::datetime;

const LESSON_HTML: &str = r#"<div style="">
    <span class="time_para"><b>13:00-14:40 </b><i>08.11.2025</i></span>
    <div style="color:#1c5bdd">Лекция: <i>Психиатрия</i></div>
    <!---->
    <div>
      <b>Уч. ауд. № &nbsp;2102, СГМУ Административный корпус</b>,
      <br>
      Пр. Троицкий, д. 51
    </div>
  </div>"#;

const SEMINAR_HTML: &str = r#"<div style="">
    <span class="time_para"><b>09:00-10:35 </b><i>10.11.2025</i></span>
    <div style="color:#1c5bdd">Семинар: <i>Хирургия</i></div>
    <!---->
    <div>
      <b>Уч. ауд. № &nbsp;318, Морфологический корпус</b>,
      <br>
    </div>
  </div>"#;

const ONLINE_HTML: &str = r#"<div style="">
    <span class="time_para"><b>15:00-16:35 </b><i>12.11.2025</i></span>
    <div style="color:#1c5bdd">Лекция: <i>Биоэтика</i></div>
    <!---->
    <div>
      <b>Moodle — онлайн</b>,
      <br>
    </div>
  </div>"#;

/// Wraps lesson fragments into the five-level container structure of a
/// real schedule page.
fn page_with(fragments: &str) -> String {
    format!(
        "<html><body><div><div><div><div>{fragments}</div></div></div></div></body></html>"
    )
}

fn first_fragment<'a>(parser: &WebScheduleParser, document: &'a Html) -> ElementRef<'a> {
    document
        .select(&parser.lesson_selector)
        .next()
        .expect("page should contain a lesson fragment")
}

#[test]
fn parse_schedule_keeps_page_then_fragment_order() {
    let parser = WebScheduleParser::new();
    let pages = vec![page_with(LESSON_HTML), page_with(SEMINAR_HTML)];

    let schedule = parser.parse_schedule(&pages);

    assert_eq!(schedule.len(), 2);
    let lessons: Vec<_> = schedule.iter().collect();
    assert_eq!(lessons[0].title, "психиатрия");
    assert_eq!(lessons[0].lesson_type, LessonType::Lection);
    assert_eq!(lessons[1].title, "хирургия");
    assert_eq!(lessons[1].lesson_type, LessonType::Seminar);
}

#[test]
fn parse_schedule_finds_multiple_fragments_within_one_page() {
    let parser = WebScheduleParser::new();
    let page = page_with(&format!("{LESSON_HTML}{SEMINAR_HTML}"));

    let schedule = parser.parse_schedule(&[page]);

    assert_eq!(schedule.len(), 2);
}

#[test]
fn empty_page_contributes_nothing() {
    let parser = WebScheduleParser::new();
    let pages = vec![String::new(), page_with(LESSON_HTML)];

    let schedule = parser.parse_schedule(&pages);

    assert_eq!(schedule.len(), 1);
}

#[test]
fn page_without_lesson_containers_yields_empty_schedule() {
    let parser = WebScheduleParser::new();
    let pages = vec!["<html><body><p>Сервис недоступен</p></body></html>".to_string()];

    assert!(parser.parse_schedule(&pages).is_empty());
}

#[test]
fn build_lesson_round_trip() {
    let parser = WebScheduleParser::new();
    let document = Html::parse_document(&page_with(LESSON_HTML));
    let fragment = first_fragment(&parser, &document);

    let lesson = build_lesson(fragment).unwrap();

    assert_eq!(lesson.start_time, datetime::assemble(2025, 10, 8, 13, 0).unwrap());
    assert_eq!(lesson.end_time, datetime::assemble(2025, 10, 8, 14, 40).unwrap());
    assert_eq!(
        lesson.start_time.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2025, 11, 8, 10, 0, 0).unwrap()
    );
    assert_eq!(lesson.title, "психиатрия");
    assert_eq!(lesson.lesson_type, LessonType::Lection);
    assert!(lesson.location.contains("Ауд. №2102"));
    assert!(lesson.location.contains("СГМУ Административный корпус"));
    assert!(!lesson.is_online);
}

#[test]
fn build_lesson_detects_online_location() {
    let parser = WebScheduleParser::new();
    let document = Html::parse_document(&page_with(ONLINE_HTML));
    let fragment = first_fragment(&parser, &document);

    let lesson = build_lesson(fragment).unwrap();

    assert!(lesson.is_online);
    assert!(lesson.location.contains("Moodle"));
}

#[test]
fn build_lesson_fails_as_a_whole_when_one_field_is_missing() {
    let parser = WebScheduleParser::new();
    let dateless = LESSON_HTML.replace("08.11.2025", "");
    let document = Html::parse_document(&page_with(&dateless));
    let fragment = first_fragment(&parser, &document);

    assert_eq!(build_lesson(fragment), Err(ExtractError::Date));
}

#[test]
fn extract_times_reads_start_and_end() {
    let parser = WebScheduleParser::new();
    let document = Html::parse_document(&page_with(LESSON_HTML));
    let fragment = first_fragment(&parser, &document);

    let times = extract_times(fragment).unwrap();

    assert_eq!(times.start, TimeOfDay { hour: 13, minute: 0 });
    assert_eq!(times.end, TimeOfDay { hour: 14, minute: 40 });
}

#[test]
fn extract_times_needs_two_occurrences() {
    let parser = WebScheduleParser::new();
    let single = LESSON_HTML.replace("13:00-14:40", "13:00");
    let document = Html::parse_document(&page_with(&single));
    let fragment = first_fragment(&parser, &document);

    assert_eq!(extract_times(fragment), Err(ExtractError::Time));
}

#[test]
fn extract_date_returns_zero_based_month() {
    let parser = WebScheduleParser::new();
    let document = Html::parse_document(&page_with(LESSON_HTML));
    let fragment = first_fragment(&parser, &document);

    let date = extract_date(fragment).unwrap();

    assert_eq!(date.day, 8);
    assert_eq!(date.month_index, 10);
    assert_eq!(date.year, 2025);
}

#[test]
fn extract_date_fails_without_a_date() {
    let parser = WebScheduleParser::new();
    let dateless = LESSON_HTML.replace("08.11.2025", "суббота");
    let document = Html::parse_document(&page_with(&dateless));
    let fragment = first_fragment(&parser, &document);

    assert_eq!(extract_date(fragment), Err(ExtractError::Date));
}

#[test]
fn extract_header_splits_type_and_title() {
    let parser = WebScheduleParser::new();
    let document = Html::parse_document(&page_with(LESSON_HTML));
    let fragment = first_fragment(&parser, &document);

    let header = extract_header(fragment).unwrap();

    assert_eq!(header.type_label, "лекция");
    assert_eq!(header.title, "психиатрия");
}

#[test]
fn extract_header_fails_without_a_colon() {
    let parser = WebScheduleParser::new();
    let broken = LESSON_HTML.replace("Лекция: <i>Психиатрия</i>", "Лекция без разделителя");
    let document = Html::parse_document(&page_with(&broken));
    let fragment = first_fragment(&parser, &document);

    assert_eq!(extract_header(fragment), Err(ExtractError::Header));
}

#[test]
fn truncated_fragment_is_a_failure_not_a_crash() {
    let parser = WebScheduleParser::new();
    let truncated = r#"<div><span class="time_para">13:00-14:40 08.11.2025</span></div>"#;
    let document = Html::parse_document(&page_with(truncated));
    let fragment = first_fragment(&parser, &document);

    assert_eq!(extract_header(fragment), Err(ExtractError::Header));
    assert_eq!(extract_location(fragment), Err(ExtractError::Location));
}

#[test]
fn extract_location_shortens_the_auditorium_placeholder() {
    let parser = WebScheduleParser::new();
    let document = Html::parse_document(&page_with(LESSON_HTML));
    let fragment = first_fragment(&parser, &document);

    let location = extract_location(fragment).unwrap();

    assert!(location.starts_with("Ауд. №2102"));
    assert!(location.contains("СГМУ Административный корпус"));
    assert!(location.contains("Пр. Троицкий, д. 51"));
}

#[test]
fn online_detection_is_a_plain_containment_check() {
    assert!(!is_lesson_online("Ауд. № 101"));
    assert!(is_lesson_online("Moodle — онлайн"));
}

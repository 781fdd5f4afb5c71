use serde_json::json;

use super::*;
use crate::datetime;

fn sample_lesson(title: &str) -> Lesson {
    Lesson::new(
        datetime::assemble(2025, 10, 8, 13, 0).unwrap(),
        datetime::assemble(2025, 10, 8, 14, 40).unwrap(),
        title,
        "Ауд. №2102, СГМУ Административный корпус",
        false,
    )
}

#[test]
fn classify_maps_the_five_known_labels() {
    assert_eq!(LessonType::classify("лекция"), LessonType::Lection);
    assert_eq!(LessonType::classify("практические занятия"), LessonType::Practice);
    assert_eq!(LessonType::classify("лабораторное занятие"), LessonType::Laboratory);
    assert_eq!(LessonType::classify("семинар"), LessonType::Seminar);
    assert_eq!(
        LessonType::classify("клинические практические занятия"),
        LessonType::ClinicalPractice
    );
}

#[test]
fn classify_is_invariant_under_casing_and_padding() {
    assert_eq!(
        LessonType::classify(" ЛЕКЦИЯ "),
        LessonType::classify("лекция")
    );
    assert_eq!(
        LessonType::classify("\tКлинические Практические Занятия\n"),
        LessonType::ClinicalPractice
    );
}

#[test]
fn classify_yields_unknown_for_anything_else() {
    assert_eq!(LessonType::classify("неизвестный тип"), LessonType::Unknown);
    assert_eq!(LessonType::classify(""), LessonType::Unknown);
    assert_eq!(LessonType::classify("   "), LessonType::Unknown);
}

#[test]
fn display_strings_follow_the_json_contract() {
    assert_eq!(LessonType::Lection.to_string(), "Lection");
    assert_eq!(LessonType::Laboratory.to_string(), "Laboratory work");
    assert_eq!(LessonType::ClinicalPractice.to_string(), "Clinical Practice");
    assert_eq!(LessonType::Unknown.to_string(), "Unknown");
}

#[test]
fn lesson_type_defaults_to_unknown_until_classified() {
    let lesson = sample_lesson("психиатрия");
    assert_eq!(lesson.lesson_type, LessonType::Unknown);

    let classified = lesson.with_type(LessonType::Lection);
    assert_eq!(classified.lesson_type, LessonType::Lection);
}

#[test]
fn lesson_serializes_with_camel_case_keys_and_display_type() {
    let lesson = sample_lesson("гистология").with_type(LessonType::Laboratory);

    let value = serde_json::to_value(&lesson).unwrap();

    assert_eq!(value["title"], json!("гистология"));
    assert_eq!(value["lessonType"], json!("Laboratory work"));
    assert_eq!(value["isOnline"], json!(false));
    assert_eq!(value["startTime"], json!("2025-11-08T13:00:00+03:00"));
    assert_eq!(value["endTime"], json!("2025-11-08T14:40:00+03:00"));
    assert!(value["location"].as_str().unwrap().contains("Ауд. №2102"));
}

#[test]
fn schedule_serializes_as_a_plain_array() {
    let schedule: Schedule = vec![sample_lesson("анатомия")].into();
    let value = serde_json::to_value(&schedule).unwrap();
    assert!(value.is_array());
    assert_eq!(value.as_array().unwrap().len(), 1);
}

#[test]
fn schedule_filter_preserves_insertion_order() {
    let schedule: Schedule = vec![
        sample_lesson("a").with_type(LessonType::Lection),
        sample_lesson("b").with_type(LessonType::Seminar),
        sample_lesson("c").with_type(LessonType::Lection),
    ]
    .into();

    let lections = schedule.filter(|l| l.lesson_type == LessonType::Lection);

    let titles: Vec<_> = lections.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["a", "c"]);
    // The original is untouched.
    assert_eq!(schedule.len(), 3);
}

#[test]
fn group_id_combines_course_and_group_numbers() {
    let group = GroupId::from_parts("3", "2", "31.05.01");
    assert_eq!(group.group, "3/2");
    assert_eq!(group.spec, "31.05.01");
}

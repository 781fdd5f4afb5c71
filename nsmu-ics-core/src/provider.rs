//! Lessons provider: fetches schedule pages and turns them into lessons.

use async_trait::async_trait;

use crate::{
    loader::WebScheduleLoader,
    parser::WebScheduleParser,
    types::{GroupId, LessonType, Schedule},
};

/// Anything that can produce a group's schedule.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn group_schedule(&self, group: &GroupId) -> Schedule;
}

/// Default provider combining the web loader and the HTML parser.
///
/// Degrades gracefully by construction: unavailable pages arrive as empty
/// strings and parse to zero lessons, so every method returns a schedule,
/// possibly empty, never an error.
pub struct LessonsProvider {
    loader: WebScheduleLoader,
    parser: WebScheduleParser,
}

impl LessonsProvider {
    pub fn new(loader: WebScheduleLoader) -> Self {
        Self {
            loader,
            parser: WebScheduleParser::new(),
        }
    }

    /// Provider configured from `NSMU_BASE_URL`.
    pub fn from_env() -> Self {
        Self::new(WebScheduleLoader::from_env())
    }

    /// All lessons of a group, in extraction order.
    pub async fn get_lessons(&self, group: &GroupId) -> Schedule {
        let pages = self.loader.load_schedule(group).await;
        let schedule = self.parser.parse_schedule(&pages);
        tracing::info!(
            group = %group.group,
            spec = %group.spec,
            lessons = schedule.len(),
            "parsed web schedule"
        );
        schedule
    }

    /// Lections only.
    pub async fn get_lections(&self, group: &GroupId) -> Schedule {
        self.get_lessons(group)
            .await
            .filter(|l| l.lesson_type == LessonType::Lection)
    }

    /// Everything that is not a lection.
    pub async fn get_practices(&self, group: &GroupId) -> Schedule {
        self.get_lessons(group)
            .await
            .filter(|l| l.lesson_type != LessonType::Lection)
    }
}

impl Default for LessonsProvider {
    fn default() -> Self {
        Self::new(WebScheduleLoader::default())
    }
}

#[async_trait]
impl ScheduleSource for LessonsProvider {
    async fn group_schedule(&self, group: &GroupId) -> Schedule {
        self.get_lessons(group).await
    }
}

//! CLI command implementations.

use std::fs;

use anyhow::{Context, Result};
use nsmu_ics_core::{
    GroupId, Schedule,
    loader::WebScheduleLoader,
    parser::WebScheduleParser,
    provider::LessonsProvider,
};

use crate::OutputFormat;

/// Параметры команды generate
pub struct GenerateParams {
    pub curse: String,
    pub group: String,
    pub spec: String,
    pub lections_only: bool,
    pub format: OutputFormat,
    pub output: Option<String>,
    pub base_url: Option<String>,
}

/// Загружает расписание с сайта и сериализует его.
pub async fn generate_command(params: GenerateParams) -> Result<()> {
    let group = GroupId::from_parts(&params.curse, &params.group, &params.spec);
    tracing::info!(group = %group.group, spec = %group.spec, "запрос расписания");

    let provider = match params.base_url {
        Some(url) => LessonsProvider::new(WebScheduleLoader::new(url)),
        None => LessonsProvider::from_env(),
    };

    let schedule = if params.lections_only {
        provider.get_lections(&group).await
    } else {
        provider.get_lessons(&group).await
    };

    println!("✓ Получено занятий: {}", schedule.len());

    write_schedule(&schedule, params.format, params.output.as_deref())
}

/// Разбирает локальные HTML-страницы и сериализует результат.
pub fn convert_command(
    files: Vec<String>,
    format: OutputFormat,
    output: Option<String>,
) -> Result<()> {
    let pages = files
        .iter()
        .map(|file| {
            fs::read_to_string(file).with_context(|| format!("не удалось прочитать {file}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let schedule = WebScheduleParser::new().parse_schedule(&pages);
    println!("✓ Разобрано занятий: {}", schedule.len());

    write_schedule(&schedule, format, output.as_deref())
}

fn write_schedule(schedule: &Schedule, format: OutputFormat, output: Option<&str>) -> Result<()> {
    let content = match format {
        OutputFormat::Ics => schedule.to_calendar_text(),
        OutputFormat::Json => serde_json::to_string_pretty(schedule)?,
    };

    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("не удалось записать {path}"))?;
            println!("✓ Расписание сохранено в: {path}");
        }
        None => println!("{content}"),
    }

    Ok(())
}

//! NSMU schedule export tool.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nsmu-ics")]
#[command(about = "Экспорт веб-расписания СГМУ в ICS и JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Включить подробные логи
    #[arg(short, long)]
    verbose: bool,
}

/// Output serialization of a schedule.
#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Ics,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Загрузить расписание с сайта и сохранить его
    Generate {
        /// Курс
        #[arg(short, long)]
        curse: String,

        /// Номер группы
        #[arg(short, long)]
        group: String,

        /// Код специальности
        #[arg(short, long)]
        spec: String,

        /// Только лекции
        #[arg(long)]
        lections_only: bool,

        /// Формат вывода
        #[arg(short, long, value_enum, default_value = "ics")]
        format: OutputFormat,

        /// Файл вывода (по умолчанию stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Шаблон URL расписания (иначе NSMU_BASE_URL или сайт СГМУ)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Разобрать сохранённые HTML-страницы расписания
    Convert {
        /// HTML-файлы, по одному на неделю
        files: Vec<String>,

        /// Формат вывода
        #[arg(short, long, value_enum, default_value = "ics")]
        format: OutputFormat,

        /// Файл вывода (по умолчанию stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    format!("nsmu_ics={log_level},nsmu_ics_core={log_level}").into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Generate {
            curse,
            group,
            spec,
            lections_only,
            format,
            output,
            base_url,
        } => {
            commands::generate_command(commands::GenerateParams {
                curse,
                group,
                spec,
                lections_only,
                format,
                output,
                base_url,
            })
            .await
        }

        Commands::Convert {
            files,
            format,
            output,
        } => commands::convert_command(files, format, output),
    }
}

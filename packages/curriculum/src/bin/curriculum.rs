//! CLI for generating curriculum content
//!
//! Every generating subcommand reads a JSON request file and prints the
//! resulting record as JSON on stdout. Logs go to stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use curriculum::config::Config;
use curriculum::generate::{
    course_prompt, department_prompt, lecture_prompt, professor_prompt, topics_prompt,
};
use curriculum::{
    prompts, Course, CurriculumGenerator, Department, GenerationError, Lecture, Professor,
    PromptBuildError, Topic,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "curriculum")]
#[command(about = "Generate departments, faculty, courses and lectures")]
struct Cli {
    /// Model to use (alias, registered name or backend:model)
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Complete a department
    Department { request: PathBuf },

    /// Create a professor persona
    Professor { request: PathBuf },

    /// Complete a course catalog entry
    Course { request: PathBuf },

    /// Plan a course's weekly topics
    Topics { request: PathBuf },

    /// Write a lecture
    Lecture { request: PathBuf },

    /// Print the prompt a request would send, without generating
    Prompt { entity: Entity, request: PathBuf },

    /// List prompt templates
    Templates,
}

#[derive(Clone, Copy, ValueEnum)]
enum Entity {
    Department,
    Professor,
    Course,
    Topics,
    Lecture,
}

// ============================================================================
// JSON Request Types
// ============================================================================

#[derive(Deserialize)]
struct DepartmentRequest {
    department: Department,
    #[serde(default)]
    existing: Vec<Department>,
}

#[derive(Deserialize)]
struct ProfessorRequest {
    professor: Professor,
    #[serde(default)]
    department: Option<Department>,
    #[serde(default)]
    existing: Vec<Professor>,
}

#[derive(Deserialize)]
struct CourseRequest {
    course: Course,
    #[serde(default)]
    department: Option<Department>,
    #[serde(default)]
    existing: Vec<Course>,
}

#[derive(Deserialize)]
struct TopicsRequest {
    course: Course,
    #[serde(default)]
    professor: Option<Professor>,
}

#[derive(Deserialize)]
struct LectureRequest {
    lecture: Lecture,
    course: Course,
    #[serde(default)]
    professor: Option<Professor>,
    #[serde(default)]
    outline: Vec<Topic>,
}

#[derive(Serialize)]
struct TemplateInfo<'a> {
    name: &'a str,
    fingerprint: String,
    required: &'a [&'static str],
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,curriculum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if is_bad_request(&err) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Templates => {
            let templates: Vec<TemplateInfo> = prompts::all()
                .into_iter()
                .map(|t| TemplateInfo {
                    name: t.name(),
                    fingerprint: t.fingerprint(),
                    required: t.required(),
                })
                .collect();
            print_json(&templates)
        }
        Commands::Prompt { entity, request } => {
            println!("{}", render_prompt(entity, &request)?);
            Ok(())
        }
        command => {
            let mut settings = config.generation_settings();
            settings.model = cli.model;
            let client = config.llm_client()?;
            tracing::info!(
                default_model = %client.registry().default_model(),
                backends = ?client.available_backends(),
                "LLM client ready"
            );
            let generator = CurriculumGenerator::with_settings(client, settings);
            generate(&generator, command).await
        }
    }
}

async fn generate(
    generator: &CurriculumGenerator<llm_client::LlmClient>,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Department { request } => {
            let req: DepartmentRequest = read_request(&request)?;
            print_json(&generator.generate_department(&req.department, &req.existing).await?)
        }
        Commands::Professor { request } => {
            let req: ProfessorRequest = read_request(&request)?;
            let professor = generator
                .generate_professor(&req.professor, req.department.as_ref(), &req.existing)
                .await?;
            print_json(&professor)
        }
        Commands::Course { request } => {
            let req: CourseRequest = read_request(&request)?;
            let course = generator
                .generate_course(&req.course, req.department.as_ref(), &req.existing)
                .await?;
            print_json(&course)
        }
        Commands::Topics { request } => {
            let req: TopicsRequest = read_request(&request)?;
            let outline = generator
                .generate_topics(&req.course, req.professor.as_ref())
                .await?;
            print_json(&outline)
        }
        Commands::Lecture { request } => {
            let req: LectureRequest = read_request(&request)?;
            let lecture = generator
                .generate_lecture(&req.lecture, &req.course, req.professor.as_ref(), &req.outline)
                .await?;
            print_json(&lecture)
        }
        Commands::Prompt { .. } | Commands::Templates => Ok(()),
    }
}

fn render_prompt(entity: Entity, path: &Path) -> Result<String> {
    let prompt = match entity {
        Entity::Department => {
            let req: DepartmentRequest = read_request(path)?;
            department_prompt(&req.department, &req.existing)?
        }
        Entity::Professor => {
            let req: ProfessorRequest = read_request(path)?;
            professor_prompt(&req.professor, req.department.as_ref(), &req.existing)?
        }
        Entity::Course => {
            let req: CourseRequest = read_request(path)?;
            course_prompt(&req.course, req.department.as_ref(), &req.existing)?
        }
        Entity::Topics => {
            let req: TopicsRequest = read_request(path)?;
            topics_prompt(&req.course, req.professor.as_ref())?
        }
        Entity::Lecture => {
            let req: LectureRequest = read_request(path)?;
            lecture_prompt(&req.lecture, &req.course, req.professor.as_ref(), &req.outline)?
        }
    };
    Ok(prompt)
}

fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid request in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Input problems, as opposed to generator or configuration failures.
fn is_bad_request(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PromptBuildError>().is_some()
        || err.downcast_ref::<serde_json::Error>().is_some()
        || err
            .downcast_ref::<GenerationError>()
            .is_some_and(GenerationError::is_client_error)
}

//! CLI Tooling
//!
//! Command-line interface over the record store, the analytics reports and the
//! insight service. Every command resolves to a string for the binary to print.

use crate::analytics::{at_risk, class_statistics, course_breakdown, summarize, top_performers};
use crate::config::{ConfigLoader, RosterConfig};
use crate::error::{ApiError, StoreError, ValidationError};
use crate::insight::prompt::{
    class_analysis_prompt, feedback_prompt, intervention_prompt, predictive_prompt,
};
use crate::insight::{InsightKind, InsightService, InsightWorker};
use crate::store::{FileRecordStore, RecordStore};
use crate::tooling::format::{
    format_at_risk_text, format_class_statistics_text, format_course_breakdown_text,
    format_dashboard_text, format_insight_text, format_record_list_text, format_records_table,
    format_top_performers_text, to_json,
};
use crate::types::{RecordPatch, StudentRecord};
use crate::validation::{validate_age, validate_id, validate_patch, validate_record};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Roster CLI - Student records and class analytics
#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Manage student records and report on class performance")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data file path (overrides storage.data_file)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a student record
    Add {
        /// Student ID (letters and digits, at least one of each)
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        age: i64,
        #[arg(long)]
        course: String,
        #[arg(long, allow_hyphen_values = true)]
        gpa: f64,
    },
    /// List all student records
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show a single student record
    Show {
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Update fields of a student record
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        age: Option<i64>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        gpa: Option<f64>,
    },
    /// Delete a student record
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Show the dashboard summary
    Dashboard {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the top performers by GPA
    Top {
        /// Number of students to show
        #[arg(short = 'n', long = "count", default_value = "5", allow_hyphen_values = true)]
        count: i64,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List students below the at-risk GPA threshold
    AtRisk {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show class statistics and GPA distribution
    Stats {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show per-course averages
    Courses {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Generate insight reports
    Insight {
        #[command(subcommand)]
        command: InsightCommands,
    },
}

#[derive(Subcommand)]
pub enum InsightCommands {
    /// Analyze the whole class
    Class,
    /// Suggest an intervention plan for one student
    Intervene { id: String },
    /// Write personalized feedback for one student
    Feedback { id: String },
    /// Predict course-level trends
    Predict,
}

/// Output format shared by the read commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self, ApiError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::InputError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// CLI context holding the record store and insight service
pub struct CliContext {
    store: Arc<dyn RecordStore>,
    insight: Arc<InsightService>,
}

impl CliContext {
    /// Load configuration: an explicit file, or the layered lookup from `base_dir`.
    pub fn load_config(
        config_path: Option<&Path>,
        base_dir: &Path,
    ) -> Result<RosterConfig, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(base_dir)?,
        };
        config.insight.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }

    /// Create a context from loaded config, opening the data file.
    pub fn new(
        config: &RosterConfig,
        data_file: Option<&Path>,
        base_dir: &Path,
    ) -> Result<Self, ApiError> {
        let path = config.storage.resolve_data_file(data_file, base_dir)?;
        let store = FileRecordStore::open(path.clone())?;
        info!(path = %path.display(), "Using data file");
        Ok(Self {
            store: Arc::new(store),
            insight: Arc::new(InsightService::from_config(&config.insight)),
        })
    }

    /// Create a context over an existing store and insight service.
    pub fn with_store(store: Arc<dyn RecordStore>, insight: InsightService) -> Self {
        Self {
            store,
            insight: Arc::new(insight),
        }
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Add {
                id,
                name,
                age,
                course,
                gpa,
            } => self.handle_add(id, name, *age, course, *gpa),
            Commands::List { format } => self.handle_list(OutputFormat::parse(format)?),
            Commands::Show { id, format } => self.handle_show(id, OutputFormat::parse(format)?),
            Commands::Update {
                id,
                name,
                age,
                course,
                gpa,
            } => {
                let patch = RecordPatch {
                    name: name.clone(),
                    age: age.map(validate_age).transpose()?,
                    course: course.clone(),
                    gpa: *gpa,
                };
                self.handle_update(id, &patch)
            }
            Commands::Delete { id, force } => self.handle_delete(id, *force),
            Commands::Dashboard { format } => self.handle_dashboard(OutputFormat::parse(format)?),
            Commands::Top { count, format } => {
                self.handle_top(*count, OutputFormat::parse(format)?)
            }
            Commands::AtRisk { format } => self.handle_at_risk(OutputFormat::parse(format)?),
            Commands::Stats { format } => self.handle_stats(OutputFormat::parse(format)?),
            Commands::Courses { format } => self.handle_courses(OutputFormat::parse(format)?),
            Commands::Insight { command } => self.handle_insight_command(command),
        }
    }

    fn handle_add(
        &self,
        id: &str,
        name: &str,
        age: i64,
        course: &str,
        gpa: f64,
    ) -> Result<String, ApiError> {
        let record = StudentRecord::new(id, name, validate_age(age)?, course, gpa);
        validate_record(&record)?;
        self.store.add(record)?;
        Ok(format!("Student added successfully! (ID: {})", id))
    }

    fn handle_list(&self, format: OutputFormat) -> Result<String, ApiError> {
        let records = self.store.load_all()?;
        match format {
            OutputFormat::Json => to_json(&records),
            OutputFormat::Text => Ok(format_record_list_text(&records)),
        }
    }

    fn handle_show(&self, id: &str, format: OutputFormat) -> Result<String, ApiError> {
        let record = self.require(id)?;
        match format {
            OutputFormat::Json => to_json(&record),
            OutputFormat::Text => Ok(format_records_table(std::slice::from_ref(&record))),
        }
    }

    fn handle_update(&self, id: &str, patch: &RecordPatch) -> Result<String, ApiError> {
        validate_id(id)?;
        if patch.is_empty() {
            return Err(ApiError::InputError(
                "Nothing to update: pass at least one of --name, --age, --course, --gpa"
                    .to_string(),
            ));
        }
        validate_patch(patch)?;
        self.store.update(id, patch)?;
        Ok("Student record updated successfully!".to_string())
    }

    fn handle_delete(&self, id: &str, force: bool) -> Result<String, ApiError> {
        // Fail on an unknown id before asking for confirmation.
        let record = self.require(id)?;

        if !force {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Delete student '{}' ({})?",
                    record.name, record.id
                ))
                .interact()
                .map_err(|e| ApiError::InputError(format!("Failed to get user input: {}", e)))?;

            if !confirmed {
                return Ok("Deletion cancelled".to_string());
            }
        }

        self.store.delete(id)?;
        Ok("Student record deleted successfully!".to_string())
    }

    fn handle_dashboard(&self, format: OutputFormat) -> Result<String, ApiError> {
        let stats = summarize(&self.store.load_all()?);
        match format {
            OutputFormat::Json => to_json(&stats),
            OutputFormat::Text => Ok(format_dashboard_text(&stats)),
        }
    }

    fn handle_top(&self, count: i64, format: OutputFormat) -> Result<String, ApiError> {
        if count <= 0 {
            return Err(ValidationError::NonPositiveCount.into());
        }
        let records = self.store.load_all()?;
        let top = top_performers(&records, usize::try_from(count).unwrap_or(usize::MAX));
        match format {
            OutputFormat::Json => to_json(&top),
            OutputFormat::Text => Ok(format_top_performers_text(&top)),
        }
    }

    fn handle_at_risk(&self, format: OutputFormat) -> Result<String, ApiError> {
        let records = self.store.load_all()?;
        let flagged = at_risk(&records);
        match format {
            OutputFormat::Json => to_json(&flagged),
            OutputFormat::Text => Ok(format_at_risk_text(records.len(), &flagged)),
        }
    }

    fn handle_stats(&self, format: OutputFormat) -> Result<String, ApiError> {
        let stats = class_statistics(&self.store.load_all()?);
        match format {
            OutputFormat::Json => to_json(&stats),
            OutputFormat::Text => Ok(format_class_statistics_text(stats.as_ref())),
        }
    }

    fn handle_courses(&self, format: OutputFormat) -> Result<String, ApiError> {
        let courses = course_breakdown(&self.store.load_all()?);
        match format {
            OutputFormat::Json => to_json(&courses),
            OutputFormat::Text => Ok(format_course_breakdown_text(&courses)),
        }
    }

    fn handle_insight_command(&self, command: &InsightCommands) -> Result<String, ApiError> {
        let (kind, prompt) = match command {
            InsightCommands::Class => {
                let records = self.store.load_all()?;
                if records.is_empty() {
                    return Ok("No student data available for analysis.".to_string());
                }
                (InsightKind::ClassAnalysis, class_analysis_prompt(&summarize(&records)))
            }
            InsightCommands::Intervene { id } => {
                let record = self.require(id)?;
                (InsightKind::Intervention, intervention_prompt(&record))
            }
            InsightCommands::Feedback { id } => {
                let record = self.require(id)?;
                (InsightKind::Feedback, feedback_prompt(&record))
            }
            InsightCommands::Predict => {
                let courses = course_breakdown(&self.store.load_all()?);
                if courses.is_empty() {
                    return Ok("No student data available for analysis.".to_string());
                }
                (InsightKind::Predictive, predictive_prompt(&courses))
            }
        };

        info!(
            kind = kind.title(),
            remote = self.insight.has_remote(),
            "Generating insight"
        );
        let text = InsightWorker::spawn(Arc::clone(&self.insight), prompt).wait();
        Ok(format_insight_text(kind, &text))
    }

    fn require(&self, id: &str) -> Result<StudentRecord, ApiError> {
        validate_id(id)?;
        self.store
            .find_by_id(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()).into())
    }
}

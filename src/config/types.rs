//! Configuration types for report generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so a partial file only overrides what it names.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Input workbook locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    /// Directory holding the three input workbooks.
    pub tables_dir: PathBuf,
    /// File name of the staff roster workbook.
    pub roster_file: String,
    /// Sheet of the staff roster workbook to read.
    pub roster_sheet: String,
    /// File name of the registration workbook (first sheet is read).
    pub registration_file: String,
    /// File name of the work permit workbook (first sheet is read).
    pub permit_file: String,
}

impl SourceFiles {
    /// Path to the staff roster workbook.
    pub fn roster_path(&self) -> PathBuf {
        self.tables_dir.join(&self.roster_file)
    }

    /// Path to the registration workbook.
    pub fn registration_path(&self) -> PathBuf {
        self.tables_dir.join(&self.registration_file)
    }

    /// Path to the work permit workbook.
    pub fn permit_path(&self) -> PathBuf {
        self.tables_dir.join(&self.permit_file)
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            tables_dir: PathBuf::from("tables"),
            roster_file: "все сотрудники в штате  по моремании.xlsx".to_string(),
            roster_sheet: "TDSheet".to_string(),
            registration_file: "регистрация.xlsx".to_string(),
            permit_file: "патент.xlsx".to_string(),
        }
    }
}

/// A location entry of the registry.
///
/// The secret and destination can be given literally or through the name
/// of an environment variable; the literal wins when both are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationConfig {
    /// Marker text of the location in the staff roster.
    pub display_name: String,
    /// Shared secret for on-demand reports.
    #[serde(default)]
    pub password: Option<String>,
    /// Environment variable holding the shared secret.
    #[serde(default)]
    pub password_env: Option<String>,
    /// Destination chat id for the report.
    #[serde(default)]
    pub chat_id: Option<String>,
    /// Environment variable holding the destination chat id.
    #[serde(default)]
    pub chat_id_env: Option<String>,
}

impl LocationConfig {
    fn new(display_name: &str, password_env: &str, chat_id_env: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            password: None,
            password_env: Some(password_env.to_string()),
            chat_id: None,
            chat_id_env: Some(chat_id_env.to_string()),
        }
    }
}

/// A weekly report job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduledJob {
    /// Location key to report on.
    pub location: String,
    /// Three-letter day of week (`mon` .. `sun`).
    pub day_of_week: String,
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Minute of hour, 0-59.
    pub minute: u32,
}

/// Scheduler configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Offset from UTC, in hours, that job times are written in.
    pub utc_offset_hours: i32,
    /// Weekly jobs.
    pub jobs: Vec<ScheduledJob>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: 3,
            jobs: vec![
                ScheduledJob {
                    location: "kievskaya".to_string(),
                    day_of_week: "fri".to_string(),
                    hour: 14,
                    minute: 24,
                },
                ScheduledJob {
                    location: "dmitrovka".to_string(),
                    day_of_week: "mon".to_string(),
                    hour: 10,
                    minute: 2,
                },
            ],
        }
    }
}

/// The complete report configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Text shared by every location marker row in the roster.
    pub family_marker: String,
    /// Role keywords; employees whose name contains one are left out.
    pub exclusion_keywords: Vec<String>,
    /// Input workbooks.
    pub sources: SourceFiles,
    /// Directory the reports are written to.
    pub output_dir: PathBuf,
    /// Location registry keyed by location key.
    pub locations: BTreeMap<String, LocationConfig>,
    /// Weekly jobs.
    pub schedule: ScheduleConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let locations = [
            (
                "kievskaya",
                LocationConfig::new(
                    "Моремания Киевская",
                    "PASSWORD_KIEVSKAYA",
                    "CHAT_ID_KIEVSKAYA",
                ),
            ),
            (
                "dolgoprudny",
                LocationConfig::new(
                    "Моремания Долгопрудный",
                    "PASSWORD_DOLGOPRUDNY",
                    "CHAT_ID_DOLGOPRUDNY",
                ),
            ),
            (
                "dmitrovka",
                LocationConfig::new(
                    "Моремания Дмитровка",
                    "PASSWORD_DMITROVKA",
                    "CHAT_ID_DMITROVKA",
                ),
            ),
        ]
        .into_iter()
        .map(|(key, location)| (key.to_string(), location))
        .collect();

        Self {
            family_marker: "Моремания".to_string(),
            exclusion_keywords: [
                "Клининг",
                "Помощник",
                "Эксперт",
                "Наставник",
                "Повар",
                "шеф",
                "Шеф",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            sources: SourceFiles::default(),
            output_dir: PathBuf::from("выгрузки"),
            locations,
            schedule: ScheduleConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Path of the report for a location key.
    ///
    /// # Example
    ///
    /// ```
    /// use staff_report::config::ReportConfig;
    /// use std::path::Path;
    ///
    /// let config = ReportConfig::default();
    /// assert_eq!(
    ///     config.output_path("kievskaya"),
    ///     Path::new("выгрузки/выгрузка_по_точке_kievskaya.xlsx")
    /// );
    /// ```
    pub fn output_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("выгрузка_по_точке_{}.xlsx", key))
    }
}

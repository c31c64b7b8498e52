//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Sales source configuration.
    #[serde(default)]
    pub input: InputConfig,
    /// Report artifact configuration.
    #[serde(default)]
    pub output: OutputConfig,
    /// Presentation configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the sales records are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the sales spreadsheet (or CSV file).
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    /// Name of the sheet holding the sales table. Ignored for CSV sources.
    #[serde(default = "default_input_sheet")]
    pub sheet: String,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data/sales.xlsx")
}

fn default_input_sheet() -> String {
    "Vendas".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            sheet: default_input_sheet(),
        }
    }
}

/// Where the report artifacts are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the generated workbook.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Directory receiving the intermediate chart images.
    #[serde(default = "default_graphics_dir")]
    pub graphics_dir: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output/General_Report.xlsx")
}

fn default_graphics_dir() -> PathBuf {
    PathBuf::from("graphics")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            graphics_dir: default_graphics_dir(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Locale identifier used for currency formatting (e.g. `pt_BR.UTF-8`).
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Raster resolution of the chart images.
    #[serde(default = "default_chart_dpi")]
    pub chart_dpi: u32,
}

fn default_locale() -> String {
    "pt_BR.UTF-8".to_string()
}

fn default_chart_dpi() -> u32 {
    300
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            chart_dpi: default_chart_dpi(),
        }
    }
}

/// Legacy variable naming the sales file.
pub const SALES_FILE_PATH_VAR: &str = "SALES_FILE_PATH";
/// Legacy variable naming the sales sheet.
pub const SHEET_NAME_VAR: &str = "SHEET_NAME";

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// `SALES_REPORT__SECTION__KEY` variables, and finally the legacy
    /// `SALES_FILE_PATH` / `SHEET_NAME` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(::config::Environment::with_prefix("SALES_REPORT").separator("__"))
            .set_override_option("input.path", std::env::var(SALES_FILE_PATH_VAR).ok())?
            .set_override_option("input.sheet", std::env::var(SHEET_NAME_VAR).ok())?
            .build()?;

        config.try_deserialize()
    }
}

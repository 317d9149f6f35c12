use crate::config::{DEFAULT_GROUP_SIZE, DEFAULT_TARGET_WIDTH};
use crate::core::ConfigProvider;
use crate::domain::model::MissingKeyPolicy;
use crate::utils::error::{Result, StackError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub compose: Option<ComposeConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
    pub filename_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComposeConfig {
    pub target_width: Option<u32>,
    pub group_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_missing_key: Option<MissingKeyPolicy>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StackError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| StackError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.dir
    }

    fn output_path(&self) -> &str {
        &self.output.dir
    }

    fn target_width(&self) -> u32 {
        self.compose
            .as_ref()
            .and_then(|c| c.target_width)
            .unwrap_or(DEFAULT_TARGET_WIDTH)
    }

    fn group_size(&self) -> usize {
        self.compose
            .as_ref()
            .and_then(|c| c.group_size)
            .unwrap_or(DEFAULT_GROUP_SIZE)
    }

    fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_missing_key)
            .unwrap_or(MissingKeyPolicy::Fail)
    }

    fn filename_prefix(&self) -> &str {
        self.output.filename_prefix.as_deref().unwrap_or("combined")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("input.dir", &self.input.dir)?;
        validation::validate_path("output.dir", &self.output.dir)?;

        if let Some(compose) = &self.compose {
            if let Some(size) = compose.group_size {
                validation::validate_positive_number("compose.group_size", size, 1)?;
            }
            if let Some(width) = compose.target_width {
                validation::validate_range("compose.target_width", width, 1, 10_000)?;
            }
        }

        if let Some(prefix) = &self.output.filename_prefix {
            validation::validate_non_empty_string("output.filename_prefix", prefix)?;
        }

        Ok(())
    }
}

pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::MissingKeyPolicy;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_WIDTH: u32 = 900;
pub const DEFAULT_GROUP_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "img-stacker")]
#[command(about = "Stacks batches of numbered JPEG images into single combined images")]
pub struct CliConfig {
    #[arg(long, default_value = "./images")]
    pub input_path: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value_t = DEFAULT_TARGET_WIDTH)]
    pub target_width: u32,

    #[arg(long, default_value_t = DEFAULT_GROUP_SIZE)]
    pub group_size: usize,

    #[arg(
        long,
        value_enum,
        default_value = "fail",
        help = "Policy for filenames without digits"
    )]
    pub on_missing_key: MissingKeyPolicy,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn target_width(&self) -> u32 {
        self.target_width
    }

    fn group_size(&self) -> usize {
        self.group_size
    }

    fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.on_missing_key
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("group_size", self.group_size, 1)?;
        validation::validate_range("target_width", self.target_width, 1, 10_000)?;
        Ok(())
    }
}

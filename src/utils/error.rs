use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Cannot read input directory {path}: {source}")]
    InputDirError {
        path: String,
        source: std::io::Error,
    },

    #[error("No digits in filename: {filename}")]
    MissingNumericKey { filename: String },

    #[error("Numeric key in {filename} is too large: {digits}")]
    InvalidNumericKey { filename: String, digits: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, StackError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Image,
    Config,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StackError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StackError::IoError(_) | StackError::InputDirError { .. } => ErrorCategory::Io,
            StackError::ImageError(_) => ErrorCategory::Image,
            StackError::ConfigError { .. }
            | StackError::InvalidConfigValueError { .. }
            | StackError::MissingConfigError { .. } => ErrorCategory::Config,
            StackError::MissingNumericKey { .. }
            | StackError::InvalidNumericKey { .. }
            | StackError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Config => ErrorSeverity::Medium,
            ErrorCategory::Image | ErrorCategory::Processing => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StackError::IoError(e) => format!("A file operation failed: {}", e),
            StackError::ImageError(e) => {
                format!("An image could not be decoded or encoded: {}", e)
            }
            StackError::InputDirError { path, .. } => {
                format!("The input directory could not be read: {}", path)
            }
            StackError::MissingNumericKey { filename } => {
                format!("The filename '{}' contains no digits to order it by", filename)
            }
            StackError::InvalidNumericKey { filename, digits } => {
                format!(
                    "The digits '{}' in filename '{}' do not form a usable number",
                    digits, filename
                )
            }
            StackError::ConfigError { message } => {
                format!("The configuration is invalid: {}", message)
            }
            StackError::InvalidConfigValueError { field, value, .. } => {
                format!("The value '{}' is not valid for '{}'", value, field)
            }
            StackError::MissingConfigError { field } => {
                format!("The configuration field '{}' is required", field)
            }
            StackError::ProcessingError { message } => {
                format!("Image processing failed: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StackError::IoError(_) => "Check file permissions and available disk space",
            StackError::ImageError(_) => "Verify the file is a valid JPEG image",
            StackError::InputDirError { .. } => {
                "Check that the input directory exists and is readable"
            }
            StackError::MissingNumericKey { .. } | StackError::InvalidNumericKey { .. } => {
                "Rename the file to include an index number, or rerun with --on-missing-key skip"
            }
            StackError::ConfigError { .. }
            | StackError::InvalidConfigValueError { .. }
            | StackError::MissingConfigError { .. } => {
                "Review the configuration values and try again"
            }
            StackError::ProcessingError { .. } => {
                "Inspect the input images for unusual dimensions"
            }
        }
    }
}

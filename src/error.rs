/// Exit code for usage errors and unreadable/malformed input files.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for datasets with no usable rows.
pub const EXIT_NO_DATA: u8 = 3;
/// Exit code for model-level failures (invalid ranges, bad stacks, failed checks).
pub const EXIT_MODEL: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Usage / input-file error (exit code 2).
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    /// Empty-dataset error (exit code 3).
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(EXIT_NO_DATA, message)
    }

    /// Model-level error (exit code 4).
    pub fn model(message: impl Into<String>) -> Self {
        Self::new(EXIT_MODEL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

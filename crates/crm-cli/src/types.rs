use std::path::PathBuf;

use crm_cli::pipeline::FileOutcome;

#[derive(Debug, Default)]
pub struct ImportRun {
    pub outcomes: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
    /// Where the JSON plan was written, if anywhere.
    pub output: Option<PathBuf>,
}

impl ImportRun {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

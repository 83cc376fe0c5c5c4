use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Errors from the comparison/copy capabilities
#[derive(Error, Debug)]
pub enum CompareError {
    /// The platform lacks the external tooling; the caller should skip the
    /// comparison rather than fail it
    #[error("comparison tooling unavailable: {0}")]
    Unsupported(String),

    /// The external tool ran and misbehaved
    #[error("{0}")]
    Tool(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Line-diff capability for golden comparison
pub trait FileDiff {
    /// `Ok(None)` when the files are identical; `Ok(Some(text))` carries the
    /// full unified diff for diagnosis.
    fn diff(&self, golden: &Path, got: &Path) -> Result<Option<String>, CompareError>;
}

/// Copy capability for golden updating
pub trait FileCopy {
    fn copy(&self, from: &Path, to: &Path) -> Result<(), CompareError>;
}

/// Default diff: the external POSIX `diff -u`
pub struct SystemDiff {
    program: PathBuf,
}

impl SystemDiff {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemDiff {
    fn default() -> Self {
        Self::new("/usr/bin/diff")
    }
}

impl FileDiff for SystemDiff {
    fn diff(&self, golden: &Path, got: &Path) -> Result<Option<String>, CompareError> {
        if !self.program.exists() {
            return Err(CompareError::Unsupported(format!(
                "no {} on this platform",
                self.program.display()
            )));
        }

        let output = Command::new(&self.program)
            .arg("-u")
            .arg(golden)
            .arg(got)
            .output()?;

        // POSIX diff: 0 = identical, 1 = different, >1 = trouble.
        match output.status.code() {
            Some(0) => Ok(None),
            Some(1) => Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned())),
            _ => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                Ok(Some(text))
            }
        }
    }
}

/// Default copy: the external `cp`
pub struct SystemCopy {
    program: PathBuf,
}

impl SystemCopy {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemCopy {
    fn default() -> Self {
        Self::new("/bin/cp")
    }
}

impl FileCopy for SystemCopy {
    fn copy(&self, from: &Path, to: &Path) -> Result<(), CompareError> {
        if !self.program.exists() {
            return Err(CompareError::Unsupported(format!(
                "no {} on this platform",
                self.program.display()
            )));
        }

        let status = Command::new(&self.program).arg(from).arg(to).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(CompareError::Tool(format!(
                "{} {} {} exited with {status}",
                self.program.display(),
                from.display(),
                to.display()
            )))
        }
    }
}

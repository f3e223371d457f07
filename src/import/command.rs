use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

use super::callback::{FileImporter, ImportOutcome};

/// A [`FileImporter`] backed by the host application's per-file import
/// command. The resolved input path is appended as the final argument and
/// stdout is parsed as an [`ImportOutcome`] JSON object.
///
/// A non-zero exit or unparseable output is a callback error, which the
/// orchestrator absorbs into that file's job result.
#[derive(Debug, Clone)]
pub struct CommandImporter {
    program: String,
    args: Vec<String>,
}

impl CommandImporter {
    /// `command` is the program followed by its fixed arguments.
    pub fn new(command: Vec<String>) -> Result<Self> {
        let mut parts = command.into_iter();
        let program = parts.next().context("importer command is empty")?;
        Ok(CommandImporter {
            program,
            args: parts.collect(),
        })
    }
}

impl FileImporter for CommandImporter {
    fn import(&self, location: &Path) -> Result<ImportOutcome> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(location)
            .output()
            .with_context(|| format!("spawn importer command {:?}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "importer command exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        serde_json::from_slice(&output.stdout).with_context(|| {
            format!(
                "parse importer output for {} as an import outcome",
                location.display()
            )
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        assert!(CommandImporter::new(Vec::new()).is_err());
    }

    #[test]
    fn parses_json_outcome_from_stdout() {
        let importer = CommandImporter::new(vec![
            "sh".to_string(),
            "-c".to_string(),
            r#"echo '{"success":true,"message":"ok","success_count":3}'"#.to_string(),
        ])
        .unwrap();
        let outcome = importer.import(Path::new("ignored.csv")).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.success_count, Some(3));
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let importer = CommandImporter::new(vec![
            "sh".to_string(),
            "-c".to_string(),
            "echo bad >&2; exit 3".to_string(),
        ])
        .unwrap();
        let err = importer.import(Path::new("ignored.csv")).unwrap_err();
        assert!(err.to_string().contains("exited with"), "{err}");
    }

    #[test]
    fn garbage_output_is_an_error() {
        let importer = CommandImporter::new(vec!["echo".to_string()]).unwrap();
        assert!(importer.import(Path::new("ignored.csv")).is_err());
    }
}

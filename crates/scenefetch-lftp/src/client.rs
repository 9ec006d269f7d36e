//! Invocation of the transfer tool.

use std::io::{self, Write};
use std::process::{Command, Output};

use crate::entry::{parse_listing, DirectoryEntry};
use crate::error::{Error, Result};
use crate::script::Script;

/// Listing command time style, matching [`crate::TIME_FORMAT`] plus the
/// zone abbreviation.
const TIME_STYLE: &str = "%F %T %z %Z";

/// A configured transfer tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// Executable name or path.
    pub path: String,
    /// Command used to queue a transfer, e.g. `mirror`.
    pub get_cmd: String,
}

impl Client {
    pub fn new(path: impl Into<String>, get_cmd: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            get_cmd: get_cmd.into(),
        }
    }

    /// Build the command that lists the directories below `dir` on `site`.
    pub fn list_command(&self, site: &str, dir: &str) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.arg("-c").arg(format!(
            "open {} && cls --classify --date --time-style='{}' {}/",
            site,
            TIME_STYLE,
            dir.trim_end_matches('/')
        ));
        cmd
    }

    /// List the directories below `dir` on `site`.
    pub fn list(&self, site: &str, dir: &str) -> Result<Vec<DirectoryEntry>> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Listing {} on {}", dir, site);

        let output = self.output(self.list_command(site, dir))?;
        parse_listing(&String::from_utf8_lossy(&output.stdout))
    }

    /// Write the script to a temporary file and execute it.
    pub fn run(&self, script: &Script) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("scenefetch-")
            .suffix(".lftp")
            .tempfile()?;
        file.write_all(script.to_string().as_bytes())?;
        file.flush()?;

        #[cfg(feature = "tracing")]
        tracing::info!("Running {} with {} queued transfers", self.path, script.len());

        let mut cmd = Command::new(&self.path);
        cmd.arg("-f").arg(file.path());
        self.output(cmd)?;
        Ok(())
    }

    fn output(&self, mut cmd: Command) -> Result<Output> {
        let output = cmd.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::tool_not_found(&self.path),
            _ => Error::tool_failed(&self.path, e.to_string()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::tool_failed(
                &self.path,
                format!("{}: {}", output.status, stderr.trim()),
            ));
        }

        Ok(output)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new("lftp", "mirror")
    }
}

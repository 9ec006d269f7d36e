//! Transfer tool detection.

use std::path::PathBuf;
use std::process::Command;

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its version line.
///
/// ```no_run
/// use scenefetch_lftp::check_tool;
///
/// let info = check_tool("lftp");
/// if info.available {
///     println!("lftp version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(name: &str) -> ToolInfo {
    let path = which::which(name).ok();
    let output = Command::new(name).arg("--version").output();

    match output {
        Ok(output) if output.status.success() => ToolInfo {
            name: name.to_string(),
            available: true,
            version: String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.trim().to_string()),
            path,
        },
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path,
        },
    }
}

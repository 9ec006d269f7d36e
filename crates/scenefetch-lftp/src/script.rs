//! Queue scripts executed by the transfer tool.

use std::fmt;

/// An `lftp` script that queues one transfer per item and waits for the
/// queue to drain.
///
/// ```
/// use scenefetch_lftp::Script;
///
/// let mut script = Script::new("siteA", "mirror");
/// script.push("/foo", "/tmp");
/// assert_eq!(
///     script.to_string(),
///     "open siteA\nqueue mirror /foo /tmp\nqueue start\nwait\nexit\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    site: String,
    get_cmd: String,
    transfers: Vec<(String, String)>,
}

impl Script {
    pub fn new(site: impl Into<String>, get_cmd: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            get_cmd: get_cmd.into(),
            transfers: Vec::new(),
        }
    }

    /// Queue a transfer of `remote` to `local`.
    pub fn push(&mut self, remote: impl Into<String>, local: impl Into<String>) {
        self.transfers.push((remote.into(), local.into()));
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "open {}", self.site)?;
        for (remote, local) in &self.transfers {
            writeln!(f, "queue {} {} {}", self.get_cmd, remote, local)?;
        }
        writeln!(f, "queue start")?;
        writeln!(f, "wait")?;
        writeln!(f, "exit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script() {
        let mut script = Script::new("siteA", "mirror");
        script.push("/foo", "/tmp");
        script.push("/bar", "/tmp");
        let expected = "open siteA
queue mirror /foo /tmp
queue mirror /bar /tmp
queue start
wait
exit
";
        assert_eq!(script.to_string(), expected);
        assert_eq!(script.len(), 2);
    }

    #[test]
    fn test_empty_script() {
        let script = Script::new("siteA", "mirror");
        assert!(script.is_empty());
        assert_eq!(script.to_string(), "open siteA\nqueue start\nwait\nexit\n");
    }
}

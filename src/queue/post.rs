//! Post-transfer command.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// A command that receives the serialized queue on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCommand {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Vec<u8>,
}

impl PostCommand {
    /// Split `command` into program and arguments using shell word rules.
    pub fn new(command: &str, stdin: Vec<u8>) -> Result<Self> {
        let mut words = shlex::split(command)
            .ok_or_else(|| Error::process(command, "cannot split command"))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| Error::process(command, "empty command"))?;

        Ok(Self {
            program,
            args: words.collect(),
            stdin,
        })
    }

    /// Run the command to completion. Only the exit status signals success.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Running post command: {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| Error::process(&self.program, e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&self.stdin) {
                // The command may exit without reading its input
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other?,
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(Error::process(&self.program, status.to_string()));
        }
        Ok(())
    }
}

use std::ffi::OsStr;
use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::error::{Error, Result};

/// A running gnuplot process fed through its stdin.
pub struct Session {
    child: Child,
    stdin: Option<ChildStdin>,
}

impl Session {
    pub fn spawn<S: AsRef<OsStr>>(program: S) -> Result<Self> {
        let program = program.as_ref();
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    Error::ProgramNotFound(program.to_string_lossy().into_owned())
                }
                _ => Error::Io(e),
            })?;
        let stdin = child.stdin.take();
        log::debug!("spawned {} (pid {})", program.to_string_lossy(), child.id());
        Ok(Self { child, stdin })
    }

    /// Sends one command line and flushes it.
    pub fn send(&mut self, command: &str) -> Result<()> {
        log::debug!("gnuplot> {}", command);
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "gnuplot stdin closed"))?;
        stdin.write_all(command.as_bytes())?;
        stdin.write_all(b"\n")?;
        stdin.flush()?;
        Ok(())
    }

    pub fn send_all<I, S>(&mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for command in commands {
            self.send(command.as_ref())?;
        }
        Ok(())
    }

    /// Sends every command, then waits for gnuplot to exit. When gnuplot
    /// quits early the write fails with a broken pipe; its exit status and
    /// stderr are reported instead.
    pub fn run<I, S>(mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sent = self.send_all(commands);
        match (sent, self.finish()) {
            (_, Err(e @ Error::Gnuplot { .. })) => Err(e),
            (Err(e), _) => Err(e),
            (Ok(()), finished) => finished,
        }
    }

    /// Closes stdin and waits for gnuplot to exit.
    pub fn finish(mut self) -> Result<()> {
        drop(self.stdin.take());
        let output = self.child.wait_with_output()?;
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(Error::Gnuplot {
                status: output.status,
                stderr,
            });
        }
        if !stderr.is_empty() {
            // gnuplot reports warnings on stderr without failing
            log::warn!("gnuplot: {}", stderr);
        }
        Ok(())
    }
}

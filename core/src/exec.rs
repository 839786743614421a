//! External tool invocation
//!
//! The pipeline never parses binary imaging data itself; it shells out to
//! the dump/info tools and scrapes their stdout. [`ToolRunner`] is the
//! narrow seam over that collaboration so the harvester can be driven by a
//! mock in tests.

use log::debug;
use std::ffi::OsStr;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Command-execution collaborator
///
/// Given an executable name and argument list, returns captured stdout text.
/// Every failure mode — missing binary, failure to spawn, non-zero exit,
/// timeout — yields empty text; stderr is discarded. Callers treat empty
/// output as "no data" and degrade the affected fields accordingly.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> String;
}

/// Production [`ToolRunner`] backed by `std::process::Command`
///
/// Each invocation is bounded by a timeout; expiry kills the child and
/// degrades to empty output like any other tool failure.
pub struct SystemToolRunner {
    timeout: Duration,
}

impl SystemToolRunner {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn capture(&self, program: &str, args: &[&OsStr]) -> Option<String> {
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                debug!("failed to start {program}: {err}");
                return None;
            }
        };

        // Drain stdout on its own thread; a full pipe would otherwise block
        // the child and turn large dumps into spurious timeouts.
        let mut stdout = child.stdout.take()?;
        let drain = std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf);
            buf
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        debug!("{program} timed out after {:?}", self.timeout);
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = drain.join();
                        return None;
                    }
                    std::thread::sleep(Duration::from_millis(20));
                }
                Err(err) => {
                    debug!("failed to wait for {program}: {err}");
                    let _ = child.kill();
                    let _ = drain.join();
                    return None;
                }
            }
        };

        let output = drain.join().unwrap_or_default();
        if !status.success() {
            debug!("{program} exited with {status}");
            return None;
        }
        Some(String::from_utf8_lossy(&output).into_owned())
    }
}

impl Default for SystemToolRunner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl ToolRunner for SystemToolRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> String {
        self.capture(program, args).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn sh(runner: &SystemToolRunner, script: &str) -> String {
        runner.run("sh", &[OsStr::new("-c"), OsStr::new(script)])
    }

    #[test]
    fn test_missing_program_yields_empty() {
        let runner = SystemToolRunner::default();
        assert_eq!(runner.run("definitely-not-a-real-tool", &[]), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let runner = SystemToolRunner::default();
        assert_eq!(sh(&runner, "printf 'hello'"), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_yields_empty() {
        let runner = SystemToolRunner::default();
        assert_eq!(sh(&runner, "printf 'partial'; exit 3"), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_is_discarded() {
        let runner = SystemToolRunner::default();
        assert_eq!(sh(&runner, "echo noise >&2; printf 'ok'"), "ok");
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_child_and_yields_empty() {
        let runner = SystemToolRunner::new(Duration::from_millis(200));
        let start = Instant::now();
        assert_eq!(sh(&runner, "sleep 10"), "");
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}

//! Subprocess output piping.
//!
//! Forwards a child's stdout lines as INFO and stderr lines as WARN, each
//! prefixed with `[name]`. The returned [`OutputPipe`] must be awaited after
//! the child exits so the last buffered lines are logged before moving on:
//!
//! ```rust,ignore
//! let (mut child, pipe) = spawn_logged(logger.clone(), Command::new("make"), "build")?;
//! let status = child.wait().await?;
//! pipe.wait().await;
//! ```

use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::error::{LogError, LogResult};
use crate::format::CallSite;
use crate::level::LogLevel;
use crate::logger::Logger;

/// Completion handle for the stdout/stderr forwarding tasks.
#[must_use = "await `wait` after the child exits to flush every line"]
pub struct OutputPipe {
    stdout: JoinHandle<()>,
    stderr: JoinHandle<()>,
}

impl OutputPipe {
    /// Resolves once both streams reached end of file.
    pub async fn wait(self) {
        for task in [self.stdout, self.stderr] {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Output forwarding task failed");
            }
        }
    }
}

/// Attaches to the piped stdout and stderr of `child`.
///
/// The child must have been spawned with `Stdio::piped()` for both streams.
#[track_caller]
pub fn pipe_child(logger: Arc<Logger>, child: &mut Child, name: &str) -> LogResult<OutputPipe> {
    let callsite = CallSite::caller();
    let stdout = child.stdout.take().ok_or(LogError::MissingPipe("stdout"))?;
    let stderr = child.stderr.take().ok_or(LogError::MissingPipe("stderr"))?;

    let name: Arc<str> = Arc::from(name);
    Ok(OutputPipe {
        stdout: tokio::spawn(forward(
            stdout,
            logger.clone(),
            LogLevel::Info,
            name.clone(),
            callsite,
        )),
        stderr: tokio::spawn(forward(stderr, logger, LogLevel::Warn, name, callsite)),
    })
}

/// Pipes stdout/stderr of `command`, spawns it and attaches the forwarders.
#[track_caller]
pub fn spawn_logged(
    logger: Arc<Logger>,
    mut command: Command,
    name: &str,
) -> LogResult<(Child, OutputPipe)> {
    command.stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = command.spawn().map_err(LogError::Spawn)?;
    let pipe = pipe_child(logger, &mut child, name)?;
    Ok((child, pipe))
}

async fn forward<R>(
    stream: R,
    logger: Arc<Logger>,
    level: LogLevel,
    name: Arc<str>,
    callsite: CallSite,
) where
    R: AsyncRead + Unpin,
{
    // Lines are split on raw bytes; invalid UTF-8 is replaced, not fatal.
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(trim_line_ending(&buf));
                logger.log_at(level, callsite, format_args!("[{name}] {line}"));
            }
            Err(e) => {
                logger.log_at(
                    LogLevel::Error,
                    callsite,
                    format_args!("[{name}] failed to read output: {e}"),
                );
                break;
            }
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

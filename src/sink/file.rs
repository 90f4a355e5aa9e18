//! Lazily-initialized append file with history replay.

use std::fs::{DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{LogError, LogResult};

#[derive(Default)]
struct FileSinkState {
    path: Option<PathBuf>,
    handle: Option<File>,
    history: Vec<String>,
}

/// Append-only log file sink.
///
/// Every formatted line is kept in memory for the lifetime of the sink so a
/// later [`FileSink::initialize`] writes the complete record, including lines
/// produced before the first initialization or after a [`FileSink::close`].
pub struct FileSink {
    state: Mutex<FileSinkState>,
    diagnostics: Mutex<Box<dyn Write + Send>>,
}

impl FileSink {
    /// Creates a disabled sink reporting write failures to `diagnostics`.
    pub fn new(diagnostics: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(FileSinkState::default()),
            diagnostics: Mutex::new(diagnostics),
        }
    }

    /// Points the sink at `path`, or disables it when `path` is empty.
    pub fn initialize(&self, path: impl AsRef<Path>) -> LogResult<()> {
        let path = path.as_ref();
        let mut state = self.lock_state();

        if path.as_os_str().is_empty() {
            state.handle = None;
            state.path = None;
            return Ok(());
        }

        let mut file = open_log_file(path)?;

        for line in &state.history {
            if let Err(e) = write_line(&mut file, line) {
                self.report(path, &e);
            }
        }

        state.handle = Some(file);
        state.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Records `line` in history and writes it to the open file, if any.
    pub fn append(&self, line: &str) {
        let mut state = self.lock_state();
        state.history.push(line.to_string());

        let FileSinkState { path, handle, .. } = &mut *state;
        if let Some(file) = handle.as_mut() {
            if let Err(e) = write_line(file, line) {
                let path = path.as_deref().unwrap_or(Path::new("???"));
                self.report(path, &e);
            }
        }
    }

    /// Flushes and closes the open file. History is kept.
    pub fn close(&self) {
        let mut state = self.lock_state();
        if let Some(mut file) = state.handle.take() {
            let _ = file.flush();
        }
        state.path = None;
    }

    /// Closes the file only if `path` is still the one open. Returns whether
    /// it closed.
    pub fn close_if(&self, path: &Path) -> bool {
        let mut state = self.lock_state();
        if state.path.as_deref() != Some(path) {
            return false;
        }
        if let Some(mut file) = state.handle.take() {
            let _ = file.flush();
        }
        state.path = None;
        true
    }

    /// Path of the open file.
    pub fn path(&self) -> Option<PathBuf> {
        self.lock_state().path.clone()
    }

    pub fn is_open(&self) -> bool {
        self.lock_state().handle.is_some()
    }

    /// Number of lines held in history.
    pub fn pending_len(&self) -> usize {
        self.lock_state().history.len()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FileSinkState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn report(&self, path: &Path, err: &io::Error) {
        let mut out = self.diagnostics.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(
            out,
            "ERROR: Failed to write log line to {}: {}",
            path.display(),
            err
        );
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("FileSink")
            .field("path", &state.path)
            .field("open", &state.handle.is_some())
            .field("history_len", &state.history.len())
            .finish()
    }
}

fn write_line(file: &mut File, line: &str) -> io::Result<()> {
    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');
    file.write_all(buf.as_bytes())
}

fn open_log_file(path: &Path) -> LogResult<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o750);
        }
        builder.create(dir).map_err(|source| LogError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut options = OpenOptions::new();
    options.append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o640);
    }
    options.open(path).map_err(|source| LogError::OpenFile {
        path: path.to_path_buf(),
        source,
    })
}

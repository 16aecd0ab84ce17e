// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::{
    cell::RefCell,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Once,
};

use anyhow::Result;
use flac_to_alac::{
    conversion_error::ConversionError,
    element::AlacConverter,
    environment::{Environment, Platform, ToolStatus},
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use relative_path::RelativePathBuf;
use tempfile::{tempdir, TempDir};
use walkdir::WalkDir;

/// A host with FFmpeg in a fixed place.
pub struct FakeEnvironment {
    pub platform: Result<Platform, String>,
    pub tool_status: ToolStatus,
    pub tool_path: Option<PathBuf>,
}

impl Default for FakeEnvironment {
    fn default() -> Self {
        FakeEnvironment {
            platform: Ok(Platform::MacOs),
            tool_status: ToolStatus::Found,
            tool_path: Some(PathBuf::from("/opt/homebrew/bin/ffmpeg")),
        }
    }
}

impl Environment for FakeEnvironment {
    fn detect_platform(&self) -> Result<Platform, String> {
        self.platform.clone()
    }

    fn probe_tool(&self) -> ToolStatus {
        self.tool_status.clone()
    }

    fn locate_tool(&self, _platform: Platform) -> Option<PathBuf> {
        self.tool_path.clone()
    }
}

pub type Invocations = Rc<RefCell<Vec<(PathBuf, PathBuf)>>>;

/// Writes an empty destination file instead of running FFmpeg.
pub struct RecordingConverter {
    pub invocations: Invocations,
    pub failing_source_name: Option<String>,
}

impl AlacConverter for RecordingConverter {
    fn convert(&self, source_file: &Path, destination_file: &Path) -> Result<(), ConversionError> {
        self.invocations
            .borrow_mut()
            .push((source_file.to_path_buf(), destination_file.to_path_buf()));

        let is_failing = self
            .failing_source_name
            .as_deref()
            .is_some_and(|name| source_file.file_name().is_some_and(|file| file == name));

        if is_failing {
            return Err(ConversionError::CommandCannotExecuted {
                command: "ffmpeg".to_owned(),
                error: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            });
        }

        File::create(destination_file)?;

        Ok(())
    }
}

/// Creates `files` (and their parent directories) under a new temporary directory.
pub fn prepare_library(files: &[&str]) -> Result<TempDir> {
    let directory = tempdir()?;

    for file in files {
        let path = directory.path().join(file);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        File::create(path)?;
    }

    Ok(directory)
}

/// Every file and directory under `root`, as sorted `/` separated relative paths.
pub fn list_tree(root: &Path) -> Result<Vec<String>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        let relative = RelativePathBuf::from_path(entry.path().strip_prefix(root)?)?;

        entries.push(relative.into_string());
    }

    entries.sort();

    Ok(entries)
}

thread_local! {
    static LOG_LINES: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Keeps log lines per thread, so tests running in parallel do not mix.
struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            LOG_LINES.with(|lines| {
                lines
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }
    }

    fn flush(&self) {}
}

static CAPTURING_LOGGER: CapturingLogger = CapturingLogger;
static INSTALL_LOGGER: Once = Once::new();

/// Starts capturing the log lines written by the current thread.
pub fn capture_log() {
    INSTALL_LOGGER.call_once(|| {
        log::set_logger(&CAPTURING_LOGGER).unwrap();
        log::set_max_level(LevelFilter::Info);
    });

    LOG_LINES.with(|lines| lines.borrow_mut().clear());
}

/// Log lines written by the current thread since `capture_log`.
pub fn captured_log() -> Vec<(Level, String)> {
    LOG_LINES.with(|lines| lines.borrow().clone())
}

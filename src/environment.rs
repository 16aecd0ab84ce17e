// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Probing the host for the platform and for FFmpeg.

use std::{fmt, io, path::PathBuf};

use log::debug;

use crate::process_invoker::{self, CapturedOutput};

/// The name of the external conversion tool.
pub const FFMPEG_COMMAND: &str = "ffmpeg";

/// Platforms this tool runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
}

impl Platform {
    /// Classifies an OS identity as reported by `std::env::consts::OS`.
    pub fn detect(os_name: &str) -> Option<Platform> {
        match os_name {
            "windows" => Some(Platform::Windows),
            "macos" => Some(Platform::MacOs),
            _ => None,
        }
    }

    /// The command that prints where an executable is found in `PATH`.
    pub fn locator_command(&self) -> &'static str {
        match self {
            Platform::Windows => "where",
            Platform::MacOs => "which",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::MacOs => write!(f, "macOS"),
        }
    }
}

/// Result of asking the tool for its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    Found,
    NotFound,
    LaunchError(String),
}

impl ToolStatus {
    pub fn is_installed(&self) -> bool {
        matches!(self, ToolStatus::Found)
    }

    fn from_version_query(result: io::Result<CapturedOutput>) -> ToolStatus {
        match result {
            Ok(output) if output.is_blank() => ToolStatus::NotFound,
            Ok(_) => ToolStatus::Found,
            Err(error) if error.kind() == io::ErrorKind::NotFound => ToolStatus::NotFound,
            Err(error) => ToolStatus::LaunchError(error.to_string()),
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolStatus::Found => write!(f, "found"),
            ToolStatus::NotFound => write!(f, "not found"),
            ToolStatus::LaunchError(detail) => write!(f, "cannot be launched: {detail}"),
        }
    }
}

/// Host facts the converter depends on.
#[cfg_attr(test, mockall::automock)]
pub trait Environment {
    /// The running platform, or the name of the OS that is not supported.
    fn detect_platform(&self) -> Result<Platform, String>;

    fn probe_tool(&self) -> ToolStatus;

    fn locate_tool(&self, platform: Platform) -> Option<PathBuf>;
}

/// The real host.
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn detect_platform(&self) -> Result<Platform, String> {
        let os_name = std::env::consts::OS;

        Platform::detect(os_name).ok_or_else(|| os_name.to_owned())
    }

    fn probe_tool(&self) -> ToolStatus {
        let mut command = process_invoker::hidden_command(FFMPEG_COMMAND);
        command.arg("-version");

        let status = ToolStatus::from_version_query(process_invoker::capture_output(&mut command));

        debug!("{FFMPEG_COMMAND} -version: {status}");

        status
    }

    fn locate_tool(&self, platform: Platform) -> Option<PathBuf> {
        let locator = platform.locator_command();
        let mut command = process_invoker::hidden_command(locator);
        command.arg(FFMPEG_COMMAND);

        match process_invoker::capture_output(&mut command) {
            Ok(output) => output.first_stdout_line().map(PathBuf::from),
            Err(error) => {
                debug!("{locator} cannot be executed: {error}. Searching PATH directly.");

                process_invoker::find_in_path(FFMPEG_COMMAND)
                    .map_err(|error| debug!("{error}"))
                    .ok()
            }
        }
    }
}

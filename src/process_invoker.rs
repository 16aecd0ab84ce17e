// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Launching external commands and waiting for them.

use std::{
    ffi::OsStr,
    io,
    path::PathBuf,
    process::{Command, Stdio},
};

use which::which;

use crate::conversion_error::ConversionError;

/// Text written by a finished command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    /// Returns true when neither stream contains anything but whitespace.
    pub fn is_blank(&self) -> bool {
        self.stdout.trim().is_empty() && self.stderr.trim().is_empty()
    }

    /// The first non-empty line of the standard output.
    pub fn first_stdout_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

/// Creates a command that does not open a console window.
pub fn hidden_command<S: AsRef<OsStr>>(program: S) -> Command {
    #[allow(unused_mut)]
    let mut command = Command::new(program);

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;

        const CREATE_NO_WINDOW: u32 = 0x0800_0000;

        command.creation_flags(CREATE_NO_WINDOW);
    }

    command
}

/// Runs `command` to the end and captures its standard output and standard error.
///
/// The exit status is not checked. Only a failure to launch is an error.
pub fn capture_output(command: &mut Command) -> io::Result<CapturedOutput> {
    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    Ok(CapturedOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Runs `command` to the end and fails unless it exits successfully.
pub fn run_command(command: &mut Command, command_name: &str) -> Result<(), ConversionError> {
    let result = command.status();

    match result {
        Ok(exit_status) => {
            if exit_status.success() {
                Ok(())
            } else {
                Err(ConversionError::CommandFailed {
                    command: command_name.to_string(),
                    status: exit_status,
                })
            }
        }
        Err(error) => Err(ConversionError::CommandCannotExecuted {
            command: command_name.to_string(),
            error,
        }),
    }
}

/// Searches `PATH` for `command` without spawning a process.
pub fn find_in_path(command: &str) -> Result<PathBuf, ConversionError> {
    which(command).map_err(|error| ConversionError::CommandNotFound {
        command: command.to_string(),
        error,
    })
}

// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Error about conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("{path} is not a directory.")]
    NotDirectory { path: PathBuf },

    #[error("Command {command} is not found: {error}")]
    CommandNotFound {
        command: String,
        error: which::Error,
    },

    #[error("Command {command} is failed: {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("Command {command} cannot be executed: {error}")]
    CommandCannotExecuted {
        command: String,
        error: std::io::Error,
    },

    #[error("I/O error: {error}")]
    IoError { error: std::io::Error },
}

impl From<std::io::Error> for ConversionError {
    fn from(error: std::io::Error) -> Self {
        ConversionError::IoError { error }
    }
}

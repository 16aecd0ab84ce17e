// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Deciding which directories are converted.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

/// Name of the directory that converted files are written to.
pub const OUTPUT_DIRECTORY_NAME: &str = "alac";

/// A directory whose name contains this marker holds converted files.
pub const CONVERTED_MARKER: &str = "alac";

/// Returns `argument`, or the directory of the running executable.
pub fn resolve_target_directory(argument: Option<&Path>) -> io::Result<PathBuf> {
    match argument {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            let executable = env::current_exe()?;

            executable.parent().map(Path::to_path_buf).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} has no parent directory", executable.display()),
                )
            })
        }
    }
}

pub fn exists(path: &Path) -> bool {
    path.is_dir()
}

/// Returns true when the last component of `path` contains the converted marker.
pub fn is_converted_directory(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(CONVERTED_MARKER))
        .unwrap_or(false)
}

/// Immediate subdirectories of `directory`, sorted.
pub fn list_subdirectories(directory: &Path) -> io::Result<Vec<PathBuf>> {
    let mut subdirectories = Vec::new();

    for entry in fs::read_dir(directory)? {
        let path = entry?.path();

        if path.is_dir() {
            subdirectories.push(path);
        }
    }

    subdirectories.sort();

    Ok(subdirectories)
}

/// Directories converted one by one.
///
/// Without subdirectories the target itself is the only unit. Otherwise every
/// subdirectory is a unit, except the ones that hold converted files.
pub fn enumerate_units(target_directory: &Path) -> io::Result<Vec<PathBuf>> {
    let subdirectories = list_subdirectories(target_directory)?;

    if subdirectories.is_empty() {
        return Ok(vec![target_directory.to_path_buf()]);
    }

    Ok(subdirectories
        .into_iter()
        .filter(|directory| !is_converted_directory(directory))
        .collect())
}

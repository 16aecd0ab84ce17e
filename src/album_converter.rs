// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Converting the FLAC files directly inside one directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{error, info};

use crate::{
    conversion_error::ConversionError,
    directory_resolver::{self, OUTPUT_DIRECTORY_NAME},
    element::AlacConverter,
};

/// A source file and the file converted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// What happened to a directory.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UnitOutcome {
    /// True when the directory already had converted files.
    pub skipped: bool,
    pub converted_files: Vec<ConvertedFile>,
    /// Sources that could not be converted. Only filled when conversion keeps going.
    pub failed_files: Vec<PathBuf>,
}

pub fn is_flac(file: &Path) -> bool {
    match file.extension() {
        Some(extension) => extension.eq_ignore_ascii_case("flac"),
        None => false,
    }
}

/// Everything before the first dot of the filename.
///
/// Bytes that are not UTF-8 are replaced with U+FFFD.
pub fn output_stem(source_file: &Path) -> String {
    let filename = source_file
        .file_name()
        .map(|filename| filename.to_string_lossy())
        .unwrap_or_default();

    filename.split('.').next().unwrap_or_default().to_owned()
}

fn has_converted_directory(unit: &Path) -> Result<bool, ConversionError> {
    Ok(directory_resolver::list_subdirectories(unit)?
        .iter()
        .any(|directory| directory_resolver::is_converted_directory(directory)))
}

fn list_flac_files(unit: &Path) -> Result<Vec<PathBuf>, ConversionError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(unit)? {
        let path = entry?.path();

        if path.is_file() && is_flac(&path) {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

/// Converts every FLAC file directly inside `unit` into `unit/alac`.
///
/// A directory that already contains a converted directory is left untouched.
/// When `keep_going` is false the first failure is returned, otherwise failed
/// files are recorded and the rest are still converted.
pub fn process_unit(
    unit: &Path,
    converter: &dyn AlacConverter,
    keep_going: bool,
) -> Result<UnitOutcome, ConversionError> {
    if !unit.is_dir() {
        return Err(ConversionError::NotDirectory {
            path: unit.to_path_buf(),
        });
    }

    if has_converted_directory(unit)? {
        info!("Skipped {}: already converted.", unit.display());

        return Ok(UnitOutcome {
            skipped: true,
            ..UnitOutcome::default()
        });
    }

    let output_directory = unit.join(OUTPUT_DIRECTORY_NAME);
    fs::create_dir(&output_directory)?;

    let mut outcome = UnitOutcome::default();

    for source in list_flac_files(unit)? {
        let stem = output_stem(&source);
        let destination = output_directory.join(format!("{stem}.m4a"));

        match converter.convert(&source, &destination) {
            Ok(()) => {
                info!("Processed {stem}.flac successfully!");

                outcome
                    .converted_files
                    .push(ConvertedFile { source, destination });
            }
            Err(conversion_error) if keep_going => {
                error!("{} cannot be converted: {conversion_error}", source.display());

                outcome.failed_files.push(source);
            }
            Err(conversion_error) => return Err(conversion_error),
        }
    }

    Ok(outcome)
}

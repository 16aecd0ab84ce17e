// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::process::exit;

use clap::Parser;

use env_logger::Env;
use flac_to_alac::flac_to_alac::{flac_to_alac, FlacToAlacError, Setting};
use log::error;

fn initialize_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .format_timestamp(None)
        .init();
}

fn main() {
    initialize_logging();

    if let Err(error) = flac_to_alac(&Setting::parse()) {
        match &error {
            FlacToAlacError::ConversionError(conversion_error) => {
                error!("Conversion is failed. Detail: {conversion_error}");
            }
            FlacToAlacError::TargetDirectoryUnresolvable(io_error) => {
                error!("Target directory cannot be determined. Detail: {io_error}");
            }
            _ => error!("{error}"),
        }

        exit(error.exit_code());
    }
}

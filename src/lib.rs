// SPDX-FileCopyrightText: 2024 Keita Kita <maoutwo@gmail.com>
//
// SPDX-License-Identifier: MIT

pub mod album_converter;
pub mod conversion_error;
pub mod directory_resolver;
pub mod element;
pub mod environment;
pub mod flac_to_alac;
pub mod process_invoker;

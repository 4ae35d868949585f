// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod commission;
pub mod config;
pub mod db;
pub mod error;
pub mod ids;
pub mod models;
pub mod store;
pub mod summary;
pub mod utils;

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Personal budget dashboard and restaurant profit & loss, each over its own
//! local ledgers.
//!
//! [`aggregate`] holds all of the arithmetic and is usable on its own with
//! in-memory snapshots; the remaining modules are the SQLite store and CLI
//! around it.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Input rejected before it reaches the store or the aggregator.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("Quantity must be greater than zero, got {0}")]
    NonPositiveQuantity(Decimal),
    #[error("Category must not be empty")]
    EmptyCategory,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("Unknown employee status '{0}' (use active|inactive|on-leave)")]
    UnknownStatus(String),
    #[error("Unknown unit '{0}' (use kg|g|liter|ml|pcs|dozen|box|pack|bag)")]
    UnknownUnit(String),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

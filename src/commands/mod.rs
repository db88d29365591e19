// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod entries;
pub mod purchases;
pub mod employees;
pub mod budgets;
pub mod summary;
pub mod reports;
pub mod exporter;
pub mod settings;

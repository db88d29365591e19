// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Rent",
    "Utilities",
    "Maintenance",
    "Salaries",
    "Supplies",
    "Marketing",
    "Insurance",
    "Miscellaneous",
];

pub const DEFAULT_REVENUE_CATEGORIES: &[&str] = &[
    "Dine-in",
    "Takeaway",
    "Delivery",
    "Catering",
    "Event/Party",
    "Other",
];

pub const PURCHASE_CATEGORIES: &[&str] = &[
    "Meat & Poultry",
    "Seafood",
    "Vegetables",
    "Fruits",
    "Dairy",
    "Spices",
    "Beverages",
    "Bakery",
    "Frozen",
    "Dry Goods",
    "Cleaning Supplies",
    "Other",
];

/// Category assigned to purchases recorded without one.
pub const FALLBACK_PURCHASE_CATEGORY: &str = "Other";

/// A dated, categorized monetary record.
///
/// Categories are free text: any label the user types is a valid category and
/// grouping is by exact string equality. The default lists above are only
/// suggestions shown by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            amount,
            category: category.into(),
            description: description.into(),
        }
    }
}

/// Which ledger a transaction belongs to.
///
/// `Spending` is the personal budget's ledger; the other three are the
/// restaurant's books and never count against a budget cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ledger {
    Spending,
    Expense,
    Revenue,
    Purchase,
}

impl Ledger {
    pub fn label(self) -> &'static str {
        match self {
            Ledger::Spending => "Spending",
            Ledger::Expense => "Expense",
            Ledger::Revenue => "Revenue",
            Ledger::Purchase => "Purchase",
        }
    }

    /// Sign applied when ledgers are merged into one cash-flow listing.
    pub fn sign(self) -> Decimal {
        match self {
            Ledger::Revenue => Decimal::ONE,
            Ledger::Spending | Ledger::Expense | Ledger::Purchase => Decimal::NEGATIVE_ONE,
        }
    }

    /// Built-in category suggestions. Personal spending has none: its
    /// categories are whatever the user has already typed.
    pub fn suggested_categories(self) -> &'static [&'static str] {
        match self {
            Ledger::Spending => &[],
            Ledger::Expense => DEFAULT_EXPENSE_CATEGORIES,
            Ledger::Revenue => DEFAULT_REVENUE_CATEGORIES,
            Ledger::Purchase => PURCHASE_CATEGORIES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseUnit {
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "liter")]
    Liter,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "pcs")]
    Pieces,
    #[serde(rename = "dozen")]
    Dozen,
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "pack")]
    Pack,
    #[serde(rename = "bag")]
    Bag,
}

impl PurchaseUnit {
    pub const ALL: [PurchaseUnit; 9] = [
        PurchaseUnit::Kg,
        PurchaseUnit::Gram,
        PurchaseUnit::Liter,
        PurchaseUnit::Ml,
        PurchaseUnit::Pieces,
        PurchaseUnit::Dozen,
        PurchaseUnit::Box,
        PurchaseUnit::Pack,
        PurchaseUnit::Bag,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseUnit::Kg => "kg",
            PurchaseUnit::Gram => "g",
            PurchaseUnit::Liter => "liter",
            PurchaseUnit::Ml => "ml",
            PurchaseUnit::Pieces => "pcs",
            PurchaseUnit::Dozen => "dozen",
            PurchaseUnit::Box => "box",
            PurchaseUnit::Pack => "pack",
            PurchaseUnit::Bag => "bag",
        }
    }
}

impl fmt::Display for PurchaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PurchaseUnit::ALL
            .into_iter()
            .find(|u| u.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownUnit(s.trim().to_string()))
    }
}

/// Inventory purchase. `total_cost` is always `quantity * unit_cost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub date: NaiveDate,
    pub item_name: String,
    pub category: Option<String>,
    pub quantity: Decimal,
    pub unit: PurchaseUnit,
    pub unit_cost: Decimal,
    pub total_cost: Decimal,
    pub supplier: Option<String>,
    pub note: Option<String>,
}

impl Purchase {
    pub fn total_cost(quantity: Decimal, unit_cost: Decimal) -> Decimal {
        quantity * unit_cost
    }

    pub fn category_or_fallback(&self) -> &str {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => FALLBACK_PURCHASE_CATEGORY,
        }
    }

    /// View of the purchase as a ledger entry, costed at `total_cost`.
    pub fn to_transaction(&self) -> Transaction {
        Transaction {
            id: self.id.clone(),
            date: self.date,
            amount: self.total_cost,
            category: self.category_or_fallback().to_string(),
            description: self.item_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "on-leave",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(EmployeeStatus::Active),
            "inactive" => Ok(EmployeeStatus::Inactive),
            "on-leave" | "on_leave" | "onleave" => Ok(EmployeeStatus::OnLeave),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub designation: String,
    pub salary_monthly: Decimal,
    pub status: EmployeeStatus,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Employee {
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

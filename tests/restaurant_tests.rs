// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetflow::aggregate::{Books, active_salaries, monthly_trend, profit_summary};
use budgetflow::models::{Employee, EmployeeStatus, Purchase, PurchaseUnit, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(amount: Decimal, date: &str, category: &str) -> Transaction {
    Transaction::new(day(date), amount, category, "")
}

fn employee(name: &str, salary: Decimal, status: EmployeeStatus) -> Employee {
    Employee {
        id: name.to_lowercase(),
        name: name.to_string(),
        designation: "Staff".to_string(),
        salary_monthly: salary,
        status,
        phone: None,
        email: None,
    }
}

fn roster() -> Vec<Employee> {
    vec![
        employee("Amal", dec!(100), EmployeeStatus::Active),
        employee("Bina", dec!(150), EmployeeStatus::Active),
        employee("Chen", dec!(500), EmployeeStatus::Inactive),
    ]
}

#[test]
fn profit_and_margin_for_a_month() {
    let revenue = vec![
        tx(dec!(600), "2024-07-02", "Dine-in"),
        tx(dec!(400), "2024-07-19", "Delivery"),
        tx(dec!(5000), "2024-06-30", "Catering"),
    ];
    let expenses = vec![tx(dec!(200), "2024-07-01", "Rent")];
    let purchases = vec![
        tx(dec!(120), "2024-07-05", "Seafood"),
        tx(dec!(180), "2024-07-06", "Vegetables"),
    ];
    let employees = roster();

    let s = profit_summary(
        Books {
            revenue: &revenue,
            expenses: &expenses,
            purchases: &purchases,
            employees: &employees,
        },
        day("2024-07-15"),
    );

    assert_eq!(s.month, day("2024-07-01"));
    assert_eq!(s.total_revenue, dec!(1000));
    assert_eq!(s.total_expenses, dec!(200));
    assert_eq!(s.total_purchases, dec!(300));
    assert_eq!(s.total_salaries, dec!(250));
    assert_eq!(s.employee_count, 2);
    assert_eq!(s.net_profit, dec!(250));
    assert_eq!(s.profit_margin, dec!(25));

    assert_eq!(s.revenue.categories[0].category, "Dine-in");
    assert_eq!(s.revenue.categories[0].percentage, dec!(60));
    assert_eq!(s.purchases.categories[0].category, "Vegetables");
    assert_eq!(s.expenses.daily.len(), 31);
    assert_eq!(s.expenses.daily[0].amount, dec!(200));
}

#[test]
fn month_without_revenue_has_zero_margin() {
    let expenses = vec![tx(dec!(80), "2024-07-01", "Utilities")];
    let employees = roster();
    let s = profit_summary(
        Books {
            revenue: &[],
            expenses: &expenses,
            purchases: &[],
            employees: &employees,
        },
        day("2024-07-01"),
    );
    assert_eq!(s.net_profit, dec!(-330));
    assert_eq!(s.profit_margin, Decimal::ZERO);
}

#[test]
fn salaries_come_from_the_current_roster_for_any_month() {
    let employees = roster();
    let books = Books {
        revenue: &[],
        expenses: &[],
        purchases: &[],
        employees: &employees,
    };
    let old = profit_summary(books, day("2019-01-01"));
    let now = profit_summary(books, day("2024-07-01"));
    assert_eq!(old.total_salaries, dec!(250));
    assert_eq!(now.total_salaries, dec!(250));

    let mut on_leave = roster();
    on_leave[0].status = EmployeeStatus::OnLeave;
    assert_eq!(active_salaries(&on_leave), dec!(150));
}

#[test]
fn purchases_are_costed_at_quantity_times_unit_cost() {
    let p = Purchase {
        id: "p1".into(),
        date: day("2024-07-03"),
        item_name: "Tomatoes".into(),
        category: Some("  ".into()),
        quantity: dec!(2.5),
        unit: PurchaseUnit::Kg,
        unit_cost: dec!(4.20),
        total_cost: Purchase::total_cost(dec!(2.5), dec!(4.20)),
        supplier: None,
        note: None,
    };
    let t = p.to_transaction();
    assert_eq!(t.amount, dec!(10.5));
    assert_eq!(t.category, "Other");
    assert_eq!(t.description, "Tomatoes");
}

#[test]
fn trend_runs_oldest_first_and_crosses_year_end() {
    let revenue = vec![
        tx(dec!(900), "2023-11-04", "Dine-in"),
        tx(dec!(1200), "2024-01-20", "Dine-in"),
    ];
    let expenses = vec![tx(dec!(100), "2023-12-01", "Rent")];
    let purchases = vec![tx(dec!(50), "2024-01-02", "Dairy")];
    let employees = vec![employee("Amal", dec!(300), EmployeeStatus::Active)];

    let points = monthly_trend(
        Books {
            revenue: &revenue,
            expenses: &expenses,
            purchases: &purchases,
            employees: &employees,
        },
        day("2024-01-31"),
        3,
    );

    let months: Vec<NaiveDate> = points.iter().map(|p| p.month).collect();
    assert_eq!(
        months,
        vec![day("2023-11-01"), day("2023-12-01"), day("2024-01-01")]
    );
    assert_eq!(points[0].profit, dec!(600));
    assert_eq!(points[1].costs, dec!(400));
    assert_eq!(points[1].profit, dec!(-400));
    assert_eq!(points[2].revenue, dec!(1200));
    assert_eq!(points[2].costs, dec!(350));
    assert_eq!(points[2].profit, dec!(850));
}

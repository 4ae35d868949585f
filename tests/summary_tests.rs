// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate};
use rideledger::commands::summary as summary_cmd;
use rideledger::config::Config;
use rideledger::error::LedgerError;
use rideledger::models::{DateRange, NewRecord, RecordKind, parse_timestamp};
use rideledger::{cli, db};
use rideledger::store;
use rideledger::summary::{Summary, summarize};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn add(conn: &mut Connection, kind: RecordKind, at: &str, amount: Decimal) {
    store::insert_record(
        conn,
        &NewRecord {
            kind,
            timestamp: parse_timestamp(at).unwrap(),
            category: "Uber".into(),
            amount,
            description: None,
        },
    )
    .unwrap();
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn empty_range_is_all_zero() {
    let conn = db::open_in_memory().unwrap();
    let s = summarize(&conn, &DateRange::day(day("2024-01-01"))).unwrap();
    assert_eq!(s, Summary::default());
}

#[test]
fn one_income_record_has_no_hours() {
    let mut conn = db::open_in_memory().unwrap();
    add(&mut conn, RecordKind::Income, "2024-01-01 08:00:00", dec!(50));
    add(&mut conn, RecordKind::Expense, "2024-01-01 20:00:00", dec!(5));
    let s = summarize(&conn, &DateRange::all()).unwrap();
    assert_eq!(s.hours_worked, Decimal::ZERO);
    assert_eq!(s.total_income, dec!(50));
}

#[test]
fn shift_span_and_totals() {
    let mut conn = db::open_in_memory().unwrap();
    add(&mut conn, RecordKind::Income, "2024-01-01 17:30:00", dec!(73.45));
    add(&mut conn, RecordKind::Income, "2024-01-01 08:00:00", dec!(17.81));
    // expenses never stretch the shift
    add(&mut conn, RecordKind::Expense, "2024-01-01 06:00:00", dec!(30));
    add(&mut conn, RecordKind::Expense, "2024-01-01 22:00:00", dec!(12.5));

    let s = summarize(&conn, &DateRange::day(day("2024-01-01"))).unwrap();
    assert_eq!(s.hours_worked, dec!(9.5));
    assert_eq!(s.total_income, dec!(91.26));
    assert_eq!(s.total_expense, dec!(42.5));
    assert_eq!(s.net, dec!(48.76));
}

#[test]
fn range_excludes_other_days() {
    let mut conn = db::open_in_memory().unwrap();
    add(&mut conn, RecordKind::Income, "2024-01-01 23:59:00", dec!(10));
    add(&mut conn, RecordKind::Income, "2024-01-02 00:00:01", dec!(20));
    add(&mut conn, RecordKind::Expense, "2024-01-02 09:00:00", dec!(4));

    let jan1 = summarize(&conn, &DateRange::day(day("2024-01-01"))).unwrap();
    assert_eq!(jan1.total_income, dec!(10));
    assert_eq!(jan1.total_expense, Decimal::ZERO);
    assert_eq!(jan1.hours_worked, Decimal::ZERO);

    let from_jan2 = summarize(&conn, &DateRange::new(Some(day("2024-01-02")), None)).unwrap();
    assert_eq!(from_jan2.total_income, dec!(20));
    assert_eq!(from_jan2.net, dec!(16));

    let everything = summarize(&conn, &DateRange::all()).unwrap();
    assert_eq!(everything.total_income, dec!(30));
    // 23:59:00 -> 00:00:01 next day
    assert_eq!(everything.hours_worked, dec!(0.0));
}

#[test]
fn corrupt_timestamp_degrades_hours_only() {
    let conn = db::open_in_memory().unwrap();
    for (did, at) in [("GA-001", "2024-01-01 08:00:00"), ("GA-002", "2024-01-01 9am")] {
        conn.execute(
            "INSERT INTO records(display_id, kind, occurred_at, category, amount) VALUES (?1,'income',?2,'Uber','10')",
            params![did, at],
        )
        .unwrap();
    }
    let s = summarize(&conn, &DateRange::all()).unwrap();
    assert_eq!(s.hours_worked, Decimal::ZERO);
    assert_eq!(s.total_income, dec!(20));
}

fn insert_raw(conn: &Connection, did: &str, kind: &str, at: &str, amount: &str) {
    conn.execute(
        "INSERT INTO records(display_id, kind, occurred_at, category, amount) VALUES (?1,?2,?3,'Fuel',?4)",
        params![did, kind, at, amount],
    )
    .unwrap();
}

#[test]
fn oversized_totals_are_an_error() {
    let conn = db::open_in_memory().unwrap();
    // each fits in a Decimal, their sum does not
    insert_raw(&conn, "GO-001", "expense", "2024-01-01 08:00:00", "50000000000000000000000000000");
    insert_raw(&conn, "GO-002", "expense", "2024-01-01 09:00:00", "50000000000000000000000000000");
    let err = summarize(&conn, &DateRange::all()).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)), "{:?}", err);
}

#[test]
fn unreadable_amount_is_a_storage_error() {
    let conn = db::open_in_memory().unwrap();
    insert_raw(&conn, "GO-001", "expense", "2024-01-01 08:00:00", "abc");
    let err = summarize(&conn, &DateRange::all()).unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)), "{:?}", err);
}

fn summary_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("summary", sub)) => sub.clone(),
        _ => panic!("no summary subcommand"),
    }
}

fn today_at(time: &str) -> String {
    format!("{} {}", Local::now().date_naive(), time)
}

#[test]
fn summary_defaults_to_today() {
    let mut conn = db::open_in_memory().unwrap();
    add(&mut conn, RecordKind::Income, &today_at("08:00:00"), dec!(40));
    add(&mut conn, RecordKind::Income, &today_at("10:00:00"), dec!(20));
    add(&mut conn, RecordKind::Income, "2020-05-01 08:00:00", dec!(500));

    let (range, s) = summary_cmd::compute(&conn, &summary_matches(&["rideledger", "summary"])).unwrap();
    assert_eq!(range, DateRange::day(Local::now().date_naive()));
    assert_eq!(s.total_income, dec!(60));
    assert_eq!(s.hours_worked, dec!(2.0));

    let (range, s) =
        summary_cmd::compute(&conn, &summary_matches(&["rideledger", "summary", "--all"])).unwrap();
    assert_eq!(range, DateRange::all());
    assert_eq!(s.total_income, dec!(560));

    let args = ["rideledger", "summary", "--from", "2020-05-01", "--to", "2020-05-01"];
    let (_, s) = summary_cmd::compute(&conn, &summary_matches(&args)).unwrap();
    assert_eq!(s.total_income, dec!(500));
}

#[test]
fn summary_handler_prints_table_and_json() {
    let mut conn = db::open_in_memory().unwrap();
    add(&mut conn, RecordKind::Income, &today_at("08:00:00"), dec!(40));
    let config = Config::with_db_path(":memory:");

    summary_cmd::handle(&conn, &config, &summary_matches(&["rideledger", "summary"])).unwrap();
    summary_cmd::handle(&conn, &config, &summary_matches(&["rideledger", "summary", "--json"]))
        .unwrap();
}

#[test]
fn summary_rejects_bad_date_argument() {
    let conn = db::open_in_memory().unwrap();
    let args = ["rideledger", "summary", "--from", "01/05/2020"];
    assert!(summary_cmd::compute(&conn, &summary_matches(&args)).is_err());
}

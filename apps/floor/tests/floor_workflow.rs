//! End-to-end floor scenarios: placing tables, taking orders, settling.

use std::fs;

use tableside_core::{GuestId, Money, PlacementScheme, Sides, Side, TableNumber, Tender};
use tableside_floor::commands::{bill, layout, order, payment};
use tableside_floor::error::ErrorCode;
use tableside_floor::FloorApp;
use tableside_store::{FloorConfig, LayoutSource};
use tempfile::TempDir;

fn app_in(dir: &TempDir) -> FloorApp {
    let mut config = FloorConfig::default();
    config.layout.file = dir.path().join("table_layout.json");
    let (app, loaded) = FloorApp::bootstrap(&config);
    assert_eq!(loaded.source, LayoutSource::Default);
    app
}

fn select(app: &FloorApp, x: i32, y: i32) -> Option<TableNumber> {
    layout::select_table_at(&app.layout, &app.ledgers, &app.selection, &app.config, x, y).unwrap()
}

fn guest_total(app: &FloorApp, table: u32, guest: &str) -> Money {
    app.ledgers
        .with_ledger(TableNumber::new(table).unwrap(), |l| {
            l.guest_total(&GuestId::new(guest).unwrap())
        })
        .unwrap()
}

#[test]
fn test_startup_installs_default_layout_without_writing_it() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);

    let plan = layout::floor_plan(&app.layout, &app.selection, &app.config);
    assert_eq!(plan.tables.len(), 2);
    assert_eq!(plan.tables[0].seats.len(), 8);
    assert_eq!(plan.tables[1].seats.len(), 8);
    assert!(app.ledgers.contains(TableNumber::new(1).unwrap()));
    assert!(app.ledgers.contains(TableNumber::new(2).unwrap()));
    assert!(!dir.path().join("table_layout.json").exists());
}

#[test]
fn test_coffee_and_cake_paid_in_cash() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);

    assert_eq!(select(&app, 100, 100), TableNumber::new(1).ok());
    order::add_guest(&app.selection, &app.ledgers, "K1").unwrap();
    order::add_order(&app.selection, &app.ledgers, Some("K1"), "Coffee", "2", "1.50").unwrap();
    let orders =
        order::add_order(&app.selection, &app.ledgers, Some("K1"), "Cake", "1", "3.00").unwrap();
    assert_eq!(orders.total_display, Money::from_cents(600));
    assert_eq!(guest_total(&app, 1, "K1"), Money::from_cents(600));

    let view = payment::begin_payment(&app.selection, &app.ledgers, &app.payment, &app.config)
        .unwrap();
    assert_eq!(view.amount_due, Money::from_cents(600));

    let record = payment::tender_cash(&app.ledgers, &app.payment, &app.config, "10.00").unwrap();
    assert_eq!(
        record.tender,
        Tender::Cash {
            received: Money::from_cents(1000),
            change: Money::from_cents(400),
        }
    );
    assert_eq!(record.receipt.lines.len(), 2);
    assert!(record.text.starts_with("RECEIPT / Table 1\nGuest: K1"));
    assert!(record.text.contains("Total: 6.00 €"));
    assert!(record.text.ends_with("Payment: cash\nReceived: 10.00 €\nChange: 4.00 €"));

    assert_eq!(guest_total(&app, 1, "K1"), Money::zero());
    let orders = order::table_orders(&app.selection, &app.ledgers).unwrap();
    assert!(orders.rows.is_empty());
    assert_eq!(orders.guests.len(), 1);
}

#[test]
fn test_insufficient_cash_leaves_items() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);
    select(&app, 100, 100);
    order::add_guest(&app.selection, &app.ledgers, "K1").unwrap();
    order::add_order(&app.selection, &app.ledgers, None, "Soup", "1", "6.00").unwrap();

    payment::begin_payment(&app.selection, &app.ledgers, &app.payment, &app.config).unwrap();
    let err = payment::tender_cash(&app.ledgers, &app.payment, &app.config, "5.99").unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentError);

    let orders = order::table_orders(&app.selection, &app.ledgers).unwrap();
    assert_eq!(orders.rows.len(), 1);
    assert_eq!(guest_total(&app, 1, "K1"), Money::from_cents(600));

    let record = payment::tender_cash(&app.ledgers, &app.payment, &app.config, "6.00").unwrap();
    assert_eq!(
        record.tender,
        Tender::Cash {
            received: Money::from_cents(600),
            change: Money::zero(),
        }
    );
}

#[test]
fn test_card_payment_needs_confirmation() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);
    select(&app, 260, 120);
    order::add_guest(&app.selection, &app.ledgers, "A").unwrap();
    order::add_guest(&app.selection, &app.ledgers, "B").unwrap();
    order::add_order(&app.selection, &app.ledgers, Some("A"), "Wine", "1", "7.50").unwrap();
    order::add_order(&app.selection, &app.ledgers, Some("B"), "Beer", "2", "3.20").unwrap();

    payment::begin_payment(&app.selection, &app.ledgers, &app.payment, &app.config).unwrap();
    payment::select_payment_guest(&app.ledgers, &app.payment, &app.config, "B").unwrap();
    payment::choose_payment_method(&app.ledgers, &app.payment, &app.config, "card").unwrap();

    // Nothing is settled until the terminal confirms.
    assert_eq!(guest_total(&app, 2, "B"), Money::from_cents(640));

    let record = payment::confirm_card_payment(&app.ledgers, &app.payment, &app.config).unwrap();
    assert_eq!(record.tender, Tender::Card);
    assert_eq!(record.guest.as_str(), "B");
    assert!(record.text.ends_with("Payment: card\nStatus: Paid"));

    assert_eq!(guest_total(&app, 2, "B"), Money::zero());
    assert_eq!(guest_total(&app, 2, "A"), Money::from_cents(750));
    assert!(!app.payment.is_open());
}

#[test]
fn test_split_and_shared_bill() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);
    select(&app, 100, 100);
    order::add_guest(&app.selection, &app.ledgers, "K1").unwrap();
    order::add_guest(&app.selection, &app.ledgers, "K2").unwrap();
    order::add_guest(&app.selection, &app.ledgers, "K3").unwrap();
    order::add_order(&app.selection, &app.ledgers, Some("K1"), "Coffee", "2", "1.50").unwrap();
    order::add_order(&app.selection, &app.ledgers, Some("K2"), "Cake", "1", "3.00").unwrap();

    let split = bill::split_bill(&app.selection, &app.ledgers, &app.config).unwrap();
    assert_eq!(
        split,
        "Split bill:\n- K1: 3.00 €\n- K2: 3.00 €\n- K3: 0.00 €\nTotal: 6.00 €"
    );

    let shared = bill::shared_bill(&app.selection, &app.ledgers, &app.config).unwrap();
    assert_eq!(shared, "Shared bill for the whole table: 6.00 €");
}

#[test]
fn test_ledger_commands_need_a_selected_table() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);

    let err = order::add_guest(&app.selection, &app.ledgers, "K1").unwrap_err();
    assert_eq!(err.code, ErrorCode::PreconditionFailed);
    let err = bill::split_bill(&app.selection, &app.ledgers, &app.config).unwrap_err();
    assert_eq!(err.code, ErrorCode::PreconditionFailed);
    let err = payment::begin_payment(&app.selection, &app.ledgers, &app.payment, &app.config)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PreconditionFailed);
}

#[test]
fn test_add_order_on_table_without_guests() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);
    select(&app, 100, 100);

    let err = order::add_order(&app.selection, &app.ledgers, None, "Coffee", "1", "1.50")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PreconditionFailed);
}

#[test]
fn test_two_seat_table_numbers_left_to_right_above_top_edge() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);

    let view = layout::place_table(
        &app.layout,
        &app.ledgers,
        &app.selection,
        &app.config,
        1,
        100,
        100,
        Sides::new(2, 0, 0, 0),
    )
    .unwrap();

    assert_eq!(view.seats.len(), 2);
    let (first, second) = (view.seats[0], view.seats[1]);
    assert_eq!((first.number, second.number), (1, 2));
    assert!(first.x < second.x);
    assert_eq!(first.side, Side::Up);
    assert_eq!(second.side, Side::Up);
    assert!(first.y < view.bounds.top as f64);
    assert!(second.y < view.bounds.top as f64);
}

#[test]
fn test_layout_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);

    layout::begin_table_placement(&app.ledgers, &app.selection, &app.config, 5, Sides::new(1, 2, 1, 2))
        .unwrap();
    select(&app, 400, 300);

    let target = dir.path().join("saved").join("floor.json");
    let written = layout::save_layout(&app.layout, Some(target.clone())).unwrap();
    assert_eq!(written, target);
    assert_eq!(app.layout.path(), target);

    let before = app.layout.with_layout(|f| f.layout.clone());

    let fresh = app_in(&TempDir::new().unwrap());
    let loaded = layout::load_layout(&fresh.layout, &fresh.ledgers, &fresh.config, Some(target.clone()));
    assert_eq!(loaded.source, LayoutSource::File);
    assert_eq!(loaded.tables, 3);
    assert_eq!(loaded.warning, None);
    assert_eq!(fresh.layout.with_layout(|f| f.layout.clone()), before);
    assert_eq!(fresh.layout.path(), target);
    assert!(fresh.ledgers.contains(TableNumber::new(5).unwrap()));
}

#[test]
fn test_malformed_layout_file_degrades_to_empty_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("table_layout.json");
    fs::write(&path, r#"{"tables": {"one": {"x": 1, "y": 2}}}"#).unwrap();

    let mut config = FloorConfig::default();
    config.layout.file = path;
    let (app, loaded) = FloorApp::bootstrap(&config);

    assert_eq!(loaded.source, LayoutSource::Empty);
    assert!(loaded.warning.unwrap().starts_with("Loading the layout failed"));
    assert_eq!(app.layout.with_layout(|f| f.layout.len()), 0);
    assert_eq!(select(&app, 100, 100), None);
}

#[test]
fn test_anchored_layout_is_loaded_under_anchored_scheme() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("round.json");
    fs::write(&path, r#"{"tables": {"3": {"x": 10, "y": 20}}}"#).unwrap();

    let mut config = FloorConfig::default();
    config.layout.file = path;
    config.layout.scheme = PlacementScheme::Anchored;
    let (app, loaded) = FloorApp::bootstrap(&config);

    assert_eq!(loaded.source, LayoutSource::File);
    // Circle of diameter 60 anchored at (10, 20).
    assert_eq!(select(&app, 40, 50), TableNumber::new(3).ok());
    let plan = layout::floor_plan(&app.layout, &app.selection, &app.config);
    assert!(plan.tables[0].seats.is_empty());
    assert!(plan.tables[0].selected);
}

#[test]
fn test_failed_save_keeps_current_layout_file() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir);
    let before = app.layout.path();

    // A regular file where the target's parent directory should be.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let err = layout::save_layout(&app.layout, Some(blocker.join("floor.json"))).unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageError);
    assert_eq!(app.layout.path(), before);

    let written = layout::save_layout(&app.layout, None).unwrap();
    assert_eq!(written, before);
    assert!(before.exists());
}

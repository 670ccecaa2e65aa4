//! # Tableside Floor Library
//!
//! Orchestration layer for the floor screen: holds the state the
//! presentation layer works on and exposes one command per UI action.
//!
//! ## Module Organization
//! ```text
//! tableside_floor/
//! ├── lib.rs          ◄─── You are here (FloorApp, startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── layout.rs   ◄─── Layout + layout file path
//! │   ├── ledger.rs   ◄─── Per-table ledgers
//! │   ├── selection.rs◄─── Selected table, pending placement
//! │   ├── payment.rs  ◄─── Open settlement
//! │   └── config.rs   ◄─── Geometry, scheme, currency
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── layout.rs   ◄─── place_table, select_table_at, save/load
//! │   ├── order.rs    ◄─── add_guest, add_order, table_orders
//! │   ├── payment.rs  ◄─── begin_payment … tender_cash, confirm_card_payment
//! │   └── bill.rs     ◄─── split_bill, shared_bill
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    FloorApp                                             │
//! │                                                                         │
//! │  ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌───────┐ │
//! │  │ layout     │ │ ledgers    │ │ selection  │ │ payment    │ │config │ │
//! │  └────────────┘ └────────────┘ └────────────┘ └────────────┘ └───────┘ │
//! │                                                                         │
//! │  Each command takes only the states it needs.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::layout::LoadLayoutResponse;
use state::{ConfigState, LayoutState, LedgerState, PaymentState, SelectionState};
use tableside_core::Layout;
use tableside_store::FloorConfig;

/// All state of one floor screen.
#[derive(Debug)]
pub struct FloorApp {
    pub config: ConfigState,
    pub layout: LayoutState,
    pub ledgers: LedgerState,
    pub selection: SelectionState,
    pub payment: PaymentState,
}

impl FloorApp {
    /// Builds the state and loads the configured layout file.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. ConfigState from FloorConfig                                        │
    /// │  2. Load layout file                                                    │
    /// │     • missing  → default layout (not written)                           │
    /// │     • broken   → empty layout + warning                                 │
    /// │  3. One ledger per loaded table                                         │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn bootstrap(config: &FloorConfig) -> (Self, LoadLayoutResponse) {
        let app = FloorApp {
            config: ConfigState::from(config),
            layout: LayoutState::new(Layout::new(), config.layout_file().clone()),
            ledgers: LedgerState::new(),
            selection: SelectionState::new(),
            payment: PaymentState::new(),
        };

        let loaded = commands::layout::load_layout(&app.layout, &app.ledgers, &app.config, None);
        if let Some(warning) = &loaded.warning {
            warn!(%warning, "Started with an empty layout");
        }

        info!(
            tables = loaded.tables,
            scheme = %app.config.scheme,
            "Floor state initialized"
        );
        (app, loaded)
    }
}

/// Loads config, builds the floor and prints the floor plan as JSON.
pub fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Tableside floor service");

    let config = FloorConfig::load(config_path)?;
    let (app, loaded) = FloorApp::bootstrap(&config);
    if let Some(warning) = loaded.warning {
        eprintln!("{}", warning);
    }

    let plan = commands::layout::floor_plan(&app.layout, &app.selection, &app.config);
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tableside=trace` - Show trace for tableside crates only
/// - Default: INFO, DEBUG for tableside crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tableside=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

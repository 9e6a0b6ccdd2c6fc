#![doc(test(attr(deny(warnings))))]

//! Accounts Core is the ledger engine behind a personal income/expense tracker: it
//! validates entries, keeps them in a durable CSV ledger, and computes the totals,
//! monthly series, category breakdowns, and budget figures a dashboard displays.
//!
//! ```no_run
//! use accounts_core::{
//!     config::LedgerConfig,
//!     core::{services::SummaryService, LedgerStore},
//! };
//!
//! # fn main() -> accounts_core::errors::Result<()> {
//! let config = LedgerConfig::default();
//! let mut store = LedgerStore::open_csv(&config.data_file, config.rules());
//! store.load()?;
//! let totals = SummaryService::totals(&store.subset());
//! println!("balance: {}", totals.balance);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Accounts Core tracing initialized.");
    });
}

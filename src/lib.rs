#![doc(test(attr(deny(warnings))))]

//! Billbook keeps a personal ledger of people, the bills they owe, and the
//! installments paid against those bills, persisted locally as JSON.

pub mod cli;
pub mod errors;
pub mod session;
pub mod utils;

pub use session::{ImportReport, LedgerSession};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Billbook tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

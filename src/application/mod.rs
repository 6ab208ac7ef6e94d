//! Application layer containing the kiosk's business logic.
//!
//! `CatalogProvider` serves the product list and `TokenLedger` issues and redeems
//! tokens. Both receive their storage backend at construction and never touch
//! global state.

pub mod catalog;
pub mod ledger;

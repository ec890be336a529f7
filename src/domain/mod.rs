//! Domain layer: the account cell, the request vocabulary and the ledger port.

pub mod account;
pub mod ports;
pub mod request;

//! Application layer: request handling on top of the ledger port.
//!
//! The `Teller` validates incoming requests, forwards them to an injected
//! ledger and shapes the outcome into a response.

pub mod teller;

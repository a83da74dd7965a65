//! # Plotsync Protocol
//!
//! Protocol types for the Plotsync offline-sync layer.
//!
//! This crate provides:
//! - `Command` for client-submitted mutations (verb, target, body)
//! - `ExecutionOutcome` for the downstream executor's result
//! - `SyncResponse` for the counter-stamped, cached response tuple
//! - JSON encoding/decoding
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod error;
mod identity;
mod response;

pub use command::{Command, CommandVerb};
pub use error::{CodecError, CodecResult};
pub use identity::ClientId;
pub use response::{ExecutionOutcome, SyncResponse};

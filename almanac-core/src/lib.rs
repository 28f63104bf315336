//! Core types for almanac.
//!
//! This crate turns free-text event listings produced by a text-generation
//! backend into structured records, and publishes them as `.ics` files plus
//! a browsable page:
//! - `config` for group documents (subjects and their backend)
//! - `prompt` and `parse` for the request/reply side of a backend
//! - `dedupe` and `index` for shaping the global event set
//! - `ics`, `naming` and `page` for the emitted artifacts
//! - `pipeline` and `publish` for a full run

pub mod config;
pub mod dedupe;
pub mod error;
pub mod event;
pub mod generator;
pub mod ics;
pub mod index;
pub mod naming;
pub mod page;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod publish;

pub use error::{AlmanacError, AlmanacResult};
pub use event::{EventRecord, EventSet};

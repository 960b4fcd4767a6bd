//! Core of the nanolink URL shortener.
//!
//! This crate owns every piece of state the service has: the alias store
//! (a concurrency-safe keyed collection of URL records), alias generation,
//! bounded access-history analytics, and the background expiration reaper.
//! The HTTP layer is a thin adapter in `nanolink-gateway`.

pub mod alias;
pub mod error;
pub mod generator;
pub mod reaper;
pub mod record;
pub mod store;

pub use alias::Alias;
pub use error::{Result, StoreError};
pub use generator::{Generator, RandomGenerator, SeqGenerator};
pub use reaper::{Reaper, ReaperHandle};
pub use record::{UrlRecord, MAX_ACCESS_HISTORY};
pub use store::{AliasAnalytics, AliasStore, CreateParams, UpdateParams, DEFAULT_TTL};

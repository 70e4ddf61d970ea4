//! Normalization and fallback layer on top of user agent detection backends
//!
//! This crate does not detect anything itself. It wraps detection backends
//! ("providers"), filters out their placeholder sentinels, normalizes version
//! strings, and maps everything into one canonical [`model::UserAgent`].
//! A [`provider::Chain`] tries providers in order until one yields a result.
//!
//! # Architecture
//!
//! ```text
//! raw user agent string
//!        │
//!        ▼
//! ┌──────────────┐   ┌───────────────────┐
//! │   Provider   │──▶│ PlaceholderFilter │  "unknown" / "UNK" / "misc" → None
//! │  (backend)   │   └───────────────────┘
//! └──────────────┘   ┌───────────────────┐
//!        │           │  Version parser   │  "5.6.3b" → major 5, minor 6, patch 3
//!        │           └───────────────────┘
//!        ▼
//! ┌──────────────┐
//! │  UserAgent   │  browser / engine / os / device / bot
//! └──────────────┘
//!        ▲
//!        │ first provider with a usable result wins
//! ┌──────────────┐
//! │    Chain     │
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`model`]: canonical result entities and their serialized form
//! - [`filter`]: per-provider placeholder tables
//! - [`provider`]: the `Provider` trait, concrete adapters and the chain
//! - [`error`]: the error taxonomy shared by all providers

pub mod error;
pub mod filter;
pub mod model;
pub mod provider;

pub use error::ParseError;
pub use model::UserAgent;
pub use provider::{Chain, Provider};

//! Canonical result entities
//!
//! One [`UserAgent`] aggregate per parse call, owning one each of
//! [`Browser`], [`RenderingEngine`], [`OperatingSystem`], [`Device`] and
//! [`Bot`]. All fields are optional; `None` always means "not detected".

pub mod bot;
pub mod browser;
pub mod device;
pub mod operating_system;
pub mod rendering_engine;
pub mod user_agent;
pub mod version;

pub use bot::Bot;
pub use browser::Browser;
pub use device::Device;
pub use operating_system::OperatingSystem;
pub use rendering_engine::RenderingEngine;
pub use user_agent::UserAgent;
pub use version::Version;

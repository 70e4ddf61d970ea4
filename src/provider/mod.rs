//! Provider layer
//! - traits.rs: the `Provider` contract
//! - types.rs: capability matrix types
//! - chain.rs: fallback orchestration across providers
//! - woothee.rs: library-backed adapter (woothee crate)
//! - http/: adapters for remote HTTP backends

pub mod chain;
pub mod http;
pub mod traits;
pub mod types;
pub mod woothee;

pub use chain::Chain;
pub use http::{NeutrinoApiCom, UdgerCom, UserAgentApiCom};
pub use traits::Provider;
pub use types::DetectionCapabilities;
pub use woothee::Woothee;

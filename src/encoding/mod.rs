pub mod catalog;
pub mod errors;
#[cfg(feature = "evm")]
pub mod evm;
pub mod models;
mod serde_primitives;

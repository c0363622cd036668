pub mod constants;
pub mod encoder_registry;
pub mod flash_loans;
pub mod lending;
pub mod singletons;
pub mod swap_encoder;
pub mod transfers;
pub mod utils;
pub mod vaults;

//! Application configuration module
//!
//! `Config` is read from the environment (and `.env`); anything unset falls
//! back to the defaults in `constants`.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;

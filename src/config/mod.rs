//! Configuration document for tokendash
//!
//! - `schemas`: the typed document and its defaults
//! - `utils`: loading, validation, denylist edits and atomic saving

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Blacklist, ChatTarget, Config, Settings};
pub use utils::{load_config, save_config, split_lines, validate_config};

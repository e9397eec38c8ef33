//! Token data: snapshot/row types, the SQLite store and display screening

pub mod database;
pub mod screening;
pub mod types;

pub use database::TokenDatabase;
pub use screening::{screen_record, screen_snapshot, BoundCheck, ScreeningReport};
pub use types::{Snapshot, TokenRecord};

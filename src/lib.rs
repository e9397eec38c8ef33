pub mod apis;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod run;
pub mod telegram;
pub mod tokens;

#[cfg(test)]
mod test_support;

pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod sanitize;
pub mod stream;
pub mod terminal;
pub mod truncate;
pub mod types;
pub mod util;

#[cfg(test)]
mod test_support;

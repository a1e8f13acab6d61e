pub mod check;
pub mod config_loader;
pub mod defaults;
pub mod dump;
pub mod keys;

#[cfg(test)]
mod config_loader_tests;

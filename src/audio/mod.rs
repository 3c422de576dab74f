pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod playback;
pub mod state;
pub mod traits;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub mod config;
pub mod resolve;
pub mod state;
pub mod time;

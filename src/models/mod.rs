pub mod error;
pub mod race;
pub mod session;
pub mod standings;

//! Pure payload-to-view-model normalization, kept free of network and
//! terminal concerns so it can be tested in isolation.

pub mod race;
pub mod schedule;
pub mod season;
pub mod standings;

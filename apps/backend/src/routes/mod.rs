pub mod modes;
pub mod sessions;
pub mod stats;

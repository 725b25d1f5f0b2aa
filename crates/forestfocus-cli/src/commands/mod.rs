pub mod coins;
pub mod config;
pub mod forest;
pub mod session;
pub mod share;
pub mod stats;
pub mod timer;
pub mod wallet;

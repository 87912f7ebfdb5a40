//! Ferrous Split DNS Infrastructure Layer
pub mod dns;
pub mod logging;
pub mod system;

//! Marketplace API boundary.

pub mod ports;

//! Shared fixtures for core integration tests.

#![allow(dead_code)]

pub mod marketplace;

pub use marketplace::{application, job, shop, FakeMarketplace};

//! Error conversions between infrastructure and domain.

pub mod conversions;

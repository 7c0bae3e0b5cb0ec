//! Macro for implementing Display and FromStr for wire-level enums
//!
//! The marketplace API speaks in upper-case status strings (`PENDING`,
//! `SHOP_OWNER`, ...) while configuration and the CLI accept any casing.
//! This macro keeps both directions in one place.
//!
//! # Example
//!
//! ```rust
//! use localstore_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Hidden,
//! }
//!
//! impl_domain_status_conversions!(Visibility {
//!     Public => "PUBLIC",
//!     Hidden => "HIDDEN",
//! });
//!
//! assert_eq!(Visibility::Hidden.to_string(), "HIDDEN");
//! assert_eq!("public".parse::<Visibility>().unwrap(), Visibility::Public);
//! ```

/// Implements Display and FromStr traits for status enums
///
/// * Display writes the canonical wire string.
/// * FromStr compares case-insensitively against the wire string.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical wire representation.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

//! Macro for implementing Display and FromStr for wire-name enums
//!
//! UMAPI spells its enum values in camelCase (`ignoreIfAlreadyExists`). This
//! macro maps each variant to its exact wire spelling for `Display` and
//! accepts any casing of that spelling in `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use umsync_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum CreateOption {
//!     IgnoreIfExists,
//!     UpdateIfExists,
//! }
//!
//! impl_wire_name_conversions!(CreateOption {
//!     IgnoreIfExists => "ignoreIfAlreadyExists",
//!     UpdateIfExists => "updateIfAlreadyExists",
//! });
//!
//! assert_eq!(CreateOption::IgnoreIfExists.to_string(), "ignoreIfAlreadyExists");
//! ```

/// Implements Display and FromStr traits for enums with a fixed wire name
///
/// This macro generates:
/// - Display trait: writes the exact wire name of the variant
/// - FromStr trait: parses the wire name ignoring ASCII case
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

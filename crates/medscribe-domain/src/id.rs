//! UUIDv7-backed identifier newtypes

/// Declares a `u128` identifier generated from UUIDv7.
///
/// UUIDv7 keeps identifiers chronologically sortable without coordination.
#[macro_export]
macro_rules! uuid_v7_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u128);

        impl $name {
            /// Generate a new identifier
            pub fn new() -> Self {
                Self($crate::__uuid::Uuid::now_v7().as_u128())
            }

            /// Create an identifier from a raw u128 value
            pub fn from_value(value: u128) -> Self {
                Self(value)
            }

            /// Parse an identifier from its UUID string form
            pub fn from_string(s: &str) -> Result<Self, String> {
                $crate::__uuid::Uuid::parse_str(s)
                    .map(|u| Self(u.as_u128()))
                    .map_err(|e| format!("Invalid UUID string: {}", e))
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", $crate::__uuid::Uuid::from_u128(self.0))
            }
        }
    };
}

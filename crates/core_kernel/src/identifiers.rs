//! Strongly-typed identifiers for engine records
//!
//! Newtype wrappers around UUIDs keep line-item and schedule ids
//! from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(raw)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(LineItemId, "LI");
define_id!(ScheduleId, "SCH");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_id_display() {
        assert!(LineItemId::new().to_string().starts_with("LI-"));
    }

    #[test]
    fn test_id_parsing_with_and_without_prefix() {
        let original = ScheduleId::new();
        let parsed: ScheduleId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: ScheduleId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, bare);
    }
}

//! Strongly typed entity identifiers
//!
//! Ids are 64-bit integers. The store assigns positive ids; the client cache
//! hands out negative *provisional* ids for records it creates optimistically,
//! which are swapped for the real id once the server confirms.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap a raw id
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw integer value
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Client-synthesized id not yet known to the server
            pub const fn is_provisional(self) -> bool {
                self.0 < 0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifies the authenticated owner of boards
    UserId
);
define_id!(BoardId);
define_id!(ColumnId);
define_id!(CardId);
define_id!(LabelId);

//! Strongly typed identifier wrappers.
//!
//! Scene nodes, sequences, and steps are identified by string ids authored in
//! an external backend, so the string-backed keys wrap `String` rather than an
//! integer index.  Wrapping them prevents accidental cross-use at call sites
//! (a `SuspendToken` can never be passed where a `NodeId` is expected, which
//! matters for a capability-style token).  The two runtime-internal counters
//! (`ExecutionId`, `ListenerId`) stay as integer keys.

use std::fmt;

/// Generate a typed key wrapper around an owned `String`.
macro_rules! typed_key {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        $vis struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// `true` when the key is empty or whitespace-only — authored data
            /// with a blank key must be replaced by a freshly minted one
            /// before it enters a registry.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

/// Generate a typed counter key around a `u64`.
macro_rules! typed_counter {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_key! {
    /// Identifier of a scene node as assigned by the authoring backend.
    pub struct NodeId;
}

typed_key! {
    /// Identifier of a sequence group — the unit of ordered execution under
    /// one `(node, action)`.
    pub struct SequenceId;
}

typed_key! {
    /// Identifier of one authored behavior step.
    pub struct BehaviorId;
}

typed_key! {
    /// Opaque capability handle for exactly one outstanding suspension.
    ///
    /// Minted by [`IdMinter`](crate::IdMinter); never derived from authored
    /// data, so a token cannot be guessed or replayed by the host.
    pub struct SuspendToken;
}

typed_counter! {
    /// Identifier of one live sequence execution, unique per runtime.
    pub struct ExecutionId;
}

typed_counter! {
    /// Handle returned by listener registration, used for removal.
    pub struct ListenerId;
}

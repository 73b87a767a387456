//! Strongly typed, zero-cost identifier wrappers for buses, stops, and signals.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys without
//! ceremony.  The inner integer is `pub` to allow direct indexing into dense
//! arrays via `id.0 as usize`, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Dense, 0-based identifier of a bus in the fleet.
    pub struct BusId(u32);
}

typed_id! {
    /// Dense, 0-based identifier of a stop (stop 0 is the origin terminal).
    pub struct StopId(u32);
}

typed_id! {
    /// Identifier of a signalized intersection.
    pub struct SignalId(u32);
}

//! Helpers for PATCH-like request bodies where `null` and a missing field
//! mean different things.

use serde::{Deserialize, Deserializer};

/// Deserialize into `Some(None)` for an explicit `null` and `Some(Some(v))`
/// for a value. Combine with `#[serde(default)]` so a missing field stays
/// `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

//! Raw-JSON-backed model layer shared by every endpoint.
//!
//! Models are typed views over a [`FrozenStore`]: fields are decoded on
//! access rather than at parse time, unknown keys are kept, and absent
//! keys stay distinct from explicit JSON `null`s.

pub mod enums;
pub mod macros;
pub mod params;
pub mod store;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

pub use enums::{ApiEnum, WireEnum};
pub use params::Params;
pub use store::{Draft, Field, FrozenStore, RawMap, RawStore};

/// Eager check of a decoded value and everything nested inside it.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

macro_rules! validate_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate(&self) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

validate_leaf!(
    String,
    bool,
    i32,
    i64,
    u32,
    u64,
    f32,
    f64,
    Value,
    RawMap,
    DateTime<Utc>,
    NaiveDate,
);

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        for (index, item) in self.iter().enumerate() {
            item.validate()
                .map_err(|err| err.in_field(&format!("[{}]", index)))?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<()> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

impl<E: WireEnum> Validate for ApiEnum<E> {
    fn validate(&self) -> Result<()> {
        ApiEnum::validate(self)
    }
}

/// Argument accepted by `optional` and `nullable` setters.
///
/// Takes a bare value, an `Option` of it, or a `&str` for `String` fields.
pub trait IntoOptional<T> {
    fn into_optional(self) -> Option<T>;
}

impl<T> IntoOptional<T> for T {
    fn into_optional(self) -> Option<T> {
        Some(self)
    }
}

impl<T> IntoOptional<T> for Option<T> {
    fn into_optional(self) -> Option<T> {
        self
    }
}

impl IntoOptional<String> for &str {
    fn into_optional(self) -> Option<String> {
        Some(self.to_string())
    }
}

/// A record type backed by exactly one [`FrozenStore`].
pub trait Model: Sized + Validate + Serialize + DeserializeOwned {
    fn from_store(store: FrozenStore) -> Self;

    fn store(&self) -> &FrozenStore;

    /// Wrap an already-parsed payload without checking any field.
    fn from_raw_unchecked(map: RawMap) -> Self {
        Self::from_store(FrozenStore::from_map(map))
    }

    /// Parse a JSON object. Field types are not checked until accessed.
    fn from_json(bytes: &[u8]) -> Result<Self> {
        let map: RawMap = serde_json::from_slice(bytes)?;
        Ok(Self::from_raw_unchecked(map))
    }

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.store())?)
    }

    fn to_value(&self) -> Value {
        self.store().to_value()
    }

    fn raw(&self) -> &RawMap {
        self.store().as_map()
    }

    fn has_field(&self, key: &str) -> bool {
        self.store().contains_key(key)
    }

    /// True only for a key present with a JSON `null`.
    fn is_null(&self, key: &str) -> bool {
        matches!(self.store().raw(key), Some(Value::Null))
    }
}

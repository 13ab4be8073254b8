//! Raw JSON storage behind every request and response type.
//!
//! A [`RawStore`] starts out mutable and is frozen exactly once into a
//! [`FrozenStore`], an `Arc`-shared map that never changes again. Typed
//! accessors decode individual fields lazily from the frozen map, so a
//! payload carrying fields this SDK does not know about still parses.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{LexvaultError, Result};

/// Parsed but untyped JSON object.
pub type RawMap = Map<String, Value>;

/// Presence state of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The key is not in the map.
    Absent,
    /// The key is present with a JSON `null`.
    Null,
    /// The key is present and decoded.
    Value(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Collapse absent and null into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Absent => Field::Absent,
            Self::Null => Field::Null,
            Self::Value(value) => Field::Value(value),
        }
    }
}

#[derive(Debug, Clone)]
enum StoreState {
    Mutable(RawMap),
    Frozen(FrozenStore),
}

/// Key/value store that can be written until it is frozen.
#[derive(Debug, Clone)]
pub struct RawStore {
    state: StoreState,
}

impl Default for RawStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RawStore {
    pub fn new() -> Self {
        Self::from_map(RawMap::new())
    }

    /// Wrap an existing map; the result is still mutable.
    pub fn from_map(map: RawMap) -> Self {
        Self {
            state: StoreState::Mutable(map),
        }
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.state, StoreState::Frozen(_))
    }

    pub fn len(&self) -> usize {
        match &self.state {
            StoreState::Mutable(map) => map.len(),
            StoreState::Frozen(frozen) => frozen.as_map().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match &self.state {
            StoreState::Mutable(map) => map.contains_key(key),
            StoreState::Frozen(frozen) => frozen.as_map().contains_key(key),
        }
    }

    /// Insert or overwrite `key`.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        let map = self.map_mut(&key)?;
        map.insert(key, value);
        Ok(())
    }

    /// Serialize `value` and store it under `key`.
    pub fn set_field<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value)
    }

    /// Store `value`, or leave the key out entirely when it is `None`.
    pub fn set_optional<T: Serialize>(&mut self, key: &str, value: Option<T>) -> Result<()> {
        match value {
            Some(value) => self.set_field(key, &value),
            None => self.remove(key).map(|_| ()),
        }
    }

    /// Store `value`, or a literal JSON `null` when it is `None`.
    pub fn set_nullable<T: Serialize>(&mut self, key: &str, value: Option<T>) -> Result<()> {
        match value {
            Some(value) => self.set_field(key, &value),
            None => self.set(key, Value::Null),
        }
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<Value>> {
        let map = self.map_mut(key)?;
        Ok(map.remove(key))
    }

    /// Freeze the store and return its immutable view.
    ///
    /// The first call moves the map behind an `Arc`; later calls hand out
    /// clones of that same `Arc`.
    pub fn freeze(&mut self) -> FrozenStore {
        let frozen = match &mut self.state {
            StoreState::Frozen(frozen) => return frozen.clone(),
            StoreState::Mutable(map) => FrozenStore::from_map(std::mem::take(map)),
        };
        debug!("Froze raw store with {} field(s)", frozen.as_map().len());
        self.state = StoreState::Frozen(frozen.clone());
        frozen
    }

    fn map_mut(&mut self, key: &str) -> Result<&mut RawMap> {
        match &mut self.state {
            StoreState::Mutable(map) => Ok(map),
            StoreState::Frozen(_) => Err(LexvaultError::Frozen {
                key: key.to_string(),
            }),
        }
    }
}

/// Immutable, structurally shared view over a raw map.
#[derive(Debug, Clone, Default)]
pub struct FrozenStore(Arc<RawMap>);

impl FrozenStore {
    pub fn from_map(map: RawMap) -> Self {
        Self(Arc::new(map))
    }

    pub fn as_map(&self) -> &RawMap {
        &self.0
    }

    /// The undecoded JSON node stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// True when both views share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Copy the map into a fresh mutable store.
    pub fn to_mutable(&self) -> RawStore {
        RawStore::from_map(self.0.as_ref().clone())
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.as_ref().clone())
    }

    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<Field<T>> {
        match self.0.get(key) {
            None => Ok(Field::Absent),
            Some(Value::Null) => Ok(Field::Null),
            Some(value) => decode(key, value).map(Field::Value),
        }
    }

    pub fn get_optional<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.field(key).map(Field::into_option)
    }

    pub fn get_required<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        match self.0.get(key) {
            None | Some(Value::Null) => Err(LexvaultError::MissingField {
                field: key.to_string(),
            }),
            Some(value) => decode(key, value),
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|source| LexvaultError::TypeMismatch {
        field: key.to_string(),
        source,
    })
}

impl PartialEq for FrozenStore {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for FrozenStore {}

impl Serialize for FrozenStore {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FrozenStore {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawMap::deserialize(deserializer).map(Self::from_map)
    }
}

/// Builder-side store that defers the first write error to `finish`.
#[derive(Debug, Default)]
pub struct Draft {
    store: RawStore,
    error: Option<LexvaultError>,
}

impl Draft {
    pub fn from_store(store: RawStore) -> Self {
        Self { store, error: None }
    }

    pub fn set_required<T: Serialize>(&mut self, key: &str, value: T) {
        let result = self.store.set_field(key, &value);
        self.record(result);
    }

    pub fn set_optional<T: Serialize>(&mut self, key: &str, value: Option<T>) {
        let result = self.store.set_optional(key, value);
        self.record(result);
    }

    pub fn set_nullable<T: Serialize>(&mut self, key: &str, value: Option<T>) {
        let result = self.store.set_nullable(key, value);
        self.record(result);
    }

    pub fn set_raw(&mut self, key: impl Into<String>, value: Value) {
        let result = self.store.set(key, value);
        self.record(result);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    pub fn finish(mut self) -> Result<FrozenStore> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self.store.freeze()),
        }
    }

    fn record(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{LexvaultError, Result};

/// A closed set of wire tokens known to this SDK version.
pub trait WireEnum: Copy + Eq + fmt::Debug + 'static {
    const VARIANTS: &'static [Self];

    fn as_wire(&self) -> &'static str;

    fn from_wire(raw: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|variant| variant.as_wire() == raw)
    }
}

/// Enum field that keeps values it does not recognise.
///
/// Decoding never fails for an unknown token; the raw value is kept and
/// written back verbatim. Only [`ApiEnum::validate`] rejects it.
#[derive(Debug, Clone)]
pub enum ApiEnum<E> {
    Known(E),
    Unknown(Value),
}

impl<E: WireEnum> ApiEnum<E> {
    /// Wrap a wire value, mapping it to a known variant when possible.
    pub fn from_raw(raw: impl Into<Value>) -> Self {
        let raw = raw.into();
        match raw.as_str().and_then(E::from_wire) {
            Some(known) => Self::Known(known),
            None => Self::Unknown(raw),
        }
    }

    pub fn known(&self) -> Option<E> {
        match self {
            Self::Known(known) => Some(*known),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The value as it appears on the wire.
    pub fn raw(&self) -> Value {
        match self {
            Self::Known(known) => Value::String(known.as_wire().to_string()),
            Self::Unknown(raw) => raw.clone(),
        }
    }

    /// Fails with [`LexvaultError::InvalidEnumValue`] for unrecognised values.
    ///
    /// The error carries no field name; callers attach it with
    /// [`LexvaultError::in_field`].
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Known(_) => Ok(()),
            Self::Unknown(raw) => Err(LexvaultError::InvalidEnumValue {
                field: String::new(),
                value: raw.to_string(),
            }),
        }
    }
}

impl<E: WireEnum> From<E> for ApiEnum<E> {
    fn from(known: E) -> Self {
        Self::Known(known)
    }
}

impl<E: WireEnum> PartialEq for ApiEnum<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => a == b,
            _ => self.raw() == other.raw(),
        }
    }
}

impl<E: WireEnum> Eq for ApiEnum<E> {}

impl<E: WireEnum> PartialEq<E> for ApiEnum<E> {
    fn eq(&self, other: &E) -> bool {
        self.known() == Some(*other)
    }
}

impl<E: WireEnum> Hash for ApiEnum<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Object keys serialize sorted, so this text is canonical.
        self.raw().to_string().hash(state);
    }
}

impl<E: WireEnum> fmt::Display for ApiEnum<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(known) => f.write_str(known.as_wire()),
            Self::Unknown(Value::String(raw)) => f.write_str(raw),
            Self::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

impl<E: WireEnum> Serialize for ApiEnum<E> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Known(known) => serializer.serialize_str(known.as_wire()),
            Self::Unknown(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, E: WireEnum> Deserialize<'de> for ApiEnum<E> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_raw)
    }
}

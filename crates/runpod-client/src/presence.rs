//! Tri-state attribute values
//!
//! RunPod applies its own defaults to any attribute missing from a request body,
//! so "the caller said nothing" and "the caller asked for zero" must stay distinct
//! all the way to the wire. [`Field`] carries that distinction: payload structs
//! annotate every optional attribute with
//! `#[serde(default, skip_serializing_if = "Field::is_unset")]`, which omits unset
//! keys on encode and restores `Unset` for absent keys on decode.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An attribute that is either unset (no caller intent) or explicitly set.
///
/// `Field::Value(0)`, `Field::Value(String::new())` and `Field::Value(false)` are
/// all distinct from `Field::Unset`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// No value was declared; the remote default applies
    #[default]
    Unset,
    /// A value was declared and must be transmitted verbatim
    Value(T),
}

impl<T> Field<T> {
    /// True when no value was declared.
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    /// True when a value (possibly a zero value) was declared.
    pub fn is_set(&self) -> bool {
        matches!(self, Field::Value(_))
    }

    /// Borrow the declared value, if any.
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Unset => None,
        }
    }

    /// Consume the field, returning the declared value, if any.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Unset => None,
        }
    }

    /// Keep `self` when set, otherwise fall back to `other`.
    pub fn or(self, other: Field<T>) -> Field<T> {
        match self {
            Field::Value(_) => self,
            Field::Unset => other,
        }
    }
}

impl<T: Clone> Field<T> {
    /// Overlay a newer declaration: set values in `newer` win, unset ones keep `self`.
    pub fn overlaid_by(&self, newer: &Field<T>) -> Field<T> {
        newer.clone().or(self.clone())
    }
}

impl<T> Field<T> {
    /// `Some` becomes a declared value, `None` stays unset.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Value(v),
            None => Field::Unset,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Value(value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            // Only reachable when a payload forgets `skip_serializing_if`.
            Field::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Field::Value)
    }
}

//! The open conversion protocol.
//!
//! Every participating type provides a [`ToVariant`]/[`FromVariant`] pair,
//! resolved statically at the point of use. The pair is the single source
//! of truth for the type's mapping onto the eight kinds and must be a
//! best-effort inverse: exact for in-memory scalar kinds, not necessarily
//! bit-exact for types whose textual form loses precision. Container impls
//! delegate element conversion to the element type's own pair, which is
//! what lets the protocol compose over arbitrarily nested types without
//! this crate knowing about them.
use std::{
    collections::{BTreeSet, HashSet},
    fmt::Write,
    hash::{BuildHasher, Hash},
    rc::Rc,
    sync::Arc,
};

use compact_str::CompactString;
use variant_time::{Microseconds, TimePoint};

use crate::{error::Error, object::Object, value::Variant};

/// Conversion into a [`Variant`].
///
/// Implementing this (together with [`FromVariant`]) is the sole
/// integration point for new serializable types; the core never needs to
/// change.
pub trait ToVariant {
    fn to_variant(&self) -> Variant;
}

/// Conversion out of a [`Variant`].
pub trait FromVariant: Sized {
    fn from_variant(value: &Variant) -> Result<Self, Error>;

    /// Converts into an existing value in place.
    ///
    /// The default replaces `self` wholesale. Impls that own reusable
    /// storage (notably `Box` and an occupied `Option`) override this to
    /// convert into the existing allocation instead, which preserves the
    /// identity of the destination object. On failure `self` is left
    /// unchanged.
    fn assign_variant(&mut self, value: &Variant) -> Result<(), Error> {
        *self = Self::from_variant(value)?;
        Ok(())
    }
}

/// Converts `value` through its [`ToVariant`] impl.
pub fn to_variant<T: ToVariant + ?Sized>(value: &T) -> Variant {
    value.to_variant()
}

/// Converts `value` into a `T` through its [`FromVariant`] impl.
pub fn from_variant<T: FromVariant>(value: &Variant) -> Result<T, Error> {
    T::from_variant(value)
}

impl Variant {
    /// Converts this value into any [`FromVariant`] type.
    ///
    /// A missing impl for `T` is a compile error, never a runtime one.
    pub fn as_type<T: FromVariant>(&self) -> Result<T, Error> {
        T::from_variant(self)
    }
}

impl<T: ToVariant + ?Sized> ToVariant for &T {
    fn to_variant(&self) -> Variant {
        (**self).to_variant()
    }
}

impl ToVariant for Variant {
    fn to_variant(&self) -> Variant {
        self.clone()
    }
}

impl FromVariant for Variant {
    fn from_variant(value: &Variant) -> Result<Variant, Error> {
        Ok(value.clone())
    }
}

macro_rules! signed_protocol {
    ($($ty:ty),*) => {
        $(
            impl ToVariant for $ty {
                fn to_variant(&self) -> Variant {
                    Variant::from(*self)
                }
            }

            impl FromVariant for $ty {
                #[allow(trivial_numeric_casts, clippy::cast_possible_truncation)]
                fn from_variant(value: &Variant) -> Result<$ty, Error> {
                    Ok(value.as_int64()? as $ty)
                }
            }
        )*
    };
}

// Narrow widths normalize through the full-width coercion and truncate on
// the way back; an 8/16/32-bit unsigned value never sign-extends.
macro_rules! unsigned_protocol {
    ($($ty:ty),*) => {
        $(
            impl ToVariant for $ty {
                fn to_variant(&self) -> Variant {
                    Variant::from(*self)
                }
            }

            impl FromVariant for $ty {
                #[allow(trivial_numeric_casts, clippy::cast_possible_truncation)]
                fn from_variant(value: &Variant) -> Result<$ty, Error> {
                    Ok(value.as_uint64()? as $ty)
                }
            }
        )*
    };
}

signed_protocol!(i8, i16, i32, i64, isize);
unsigned_protocol!(u8, u16, u32, u64, usize);

impl ToVariant for f64 {
    fn to_variant(&self) -> Variant {
        Variant::Double(*self)
    }
}

impl FromVariant for f64 {
    fn from_variant(value: &Variant) -> Result<f64, Error> {
        value.as_double()
    }
}

impl ToVariant for f32 {
    fn to_variant(&self) -> Variant {
        Variant::Double(f64::from(*self))
    }
}

impl FromVariant for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_variant(value: &Variant) -> Result<f32, Error> {
        Ok(value.as_double()? as f32)
    }
}

impl ToVariant for bool {
    fn to_variant(&self) -> Variant {
        Variant::Bool(*self)
    }
}

impl FromVariant for bool {
    fn from_variant(value: &Variant) -> Result<bool, Error> {
        value.as_bool()
    }
}

impl ToVariant for str {
    fn to_variant(&self) -> Variant {
        Variant::String(self.into())
    }
}

impl ToVariant for String {
    fn to_variant(&self) -> Variant {
        Variant::String(self.as_str().into())
    }
}

impl FromVariant for String {
    fn from_variant(value: &Variant) -> Result<String, Error> {
        value.as_string()
    }
}

impl ToVariant for CompactString {
    fn to_variant(&self) -> Variant {
        Variant::String(self.clone())
    }
}

impl FromVariant for CompactString {
    fn from_variant(value: &Variant) -> Result<CompactString, Error> {
        Ok(value.as_string()?.into())
    }
}

impl ToVariant for char {
    fn to_variant(&self) -> Variant {
        Variant::from(*self)
    }
}

impl ToVariant for Object {
    fn to_variant(&self) -> Variant {
        Variant::Object(Box::new(self.clone()))
    }
}

impl FromVariant for Object {
    fn from_variant(value: &Variant) -> Result<Object, Error> {
        value.get_object().cloned()
    }
}

/// Sequences map to Array preserving element order. `Vec<u8>` doubles as
/// the raw byte buffer mapping: an Array of per-byte UInt64 values,
/// preserving exact bytes.
impl<T: ToVariant> ToVariant for [T] {
    fn to_variant(&self) -> Variant {
        Variant::Array(self.iter().map(ToVariant::to_variant).collect())
    }
}

impl<T: ToVariant> ToVariant for Vec<T> {
    fn to_variant(&self) -> Variant {
        self.as_slice().to_variant()
    }
}

impl<T: FromVariant> FromVariant for Vec<T> {
    fn from_variant(value: &Variant) -> Result<Vec<T>, Error> {
        value.get_array()?.iter().map(T::from_variant).collect()
    }
}

/// Sets map to Array; element order in the Array is unspecified, but the
/// element set is exact on round trip.
impl<T: ToVariant, S> ToVariant for HashSet<T, S> {
    fn to_variant(&self) -> Variant {
        Variant::Array(self.iter().map(ToVariant::to_variant).collect())
    }
}

impl<T, S> FromVariant for HashSet<T, S>
where
    T: FromVariant + Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_variant(value: &Variant) -> Result<HashSet<T, S>, Error> {
        value.get_array()?.iter().map(T::from_variant).collect()
    }
}

impl<T: ToVariant> ToVariant for BTreeSet<T> {
    fn to_variant(&self) -> Variant {
        Variant::Array(self.iter().map(ToVariant::to_variant).collect())
    }
}

impl<T: FromVariant + Ord> FromVariant for BTreeSet<T> {
    fn from_variant(value: &Variant) -> Result<BTreeSet<T>, Error> {
        value.get_array()?.iter().map(T::from_variant).collect()
    }
}

/// Absent maps to Null; present maps to the held value's own variant.
impl<T: ToVariant> ToVariant for Option<T> {
    fn to_variant(&self) -> Variant {
        match self {
            Some(inner) => inner.to_variant(),
            None => Variant::Null,
        }
    }
}

impl<T: FromVariant> FromVariant for Option<T> {
    fn from_variant(value: &Variant) -> Result<Option<T>, Error> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_variant(value).map(Some)
        }
    }

    /// Null resets to `None`; a present payload is converted into in
    /// place; only an absent destination constructs a fresh value.
    ///
    /// Combined with the `Box` impl below, `Option<Box<T>>` reproduces the
    /// nullable owning-pointer rule: an occupied destination keeps its
    /// allocation and is mutated, never replaced.
    fn assign_variant(&mut self, value: &Variant) -> Result<(), Error> {
        if value.is_null() {
            *self = None;
        } else if let Some(inner) = self {
            inner.assign_variant(value)?;
        } else {
            *self = Some(T::from_variant(value)?);
        }
        Ok(())
    }
}

impl<T: ToVariant + ?Sized> ToVariant for Box<T> {
    fn to_variant(&self) -> Variant {
        (**self).to_variant()
    }
}

impl<T: FromVariant> FromVariant for Box<T> {
    fn from_variant(value: &Variant) -> Result<Box<T>, Error> {
        T::from_variant(value).map(Box::new)
    }

    /// Converts into the existing allocation; the boxed instance keeps its
    /// identity.
    fn assign_variant(&mut self, value: &Variant) -> Result<(), Error> {
        (**self).assign_variant(value)
    }
}

impl<T: ToVariant + ?Sized> ToVariant for Rc<T> {
    fn to_variant(&self) -> Variant {
        (**self).to_variant()
    }
}

/// A shared pointee cannot be mutated in place without interior
/// mutability, so conversion allocates a fresh instance.
impl<T: FromVariant> FromVariant for Rc<T> {
    fn from_variant(value: &Variant) -> Result<Rc<T>, Error> {
        T::from_variant(value).map(Rc::new)
    }
}

impl<T: ToVariant + ?Sized> ToVariant for Arc<T> {
    fn to_variant(&self) -> Variant {
        (**self).to_variant()
    }
}

impl<T: FromVariant> FromVariant for Arc<T> {
    fn from_variant(value: &Variant) -> Result<Arc<T>, Error> {
        T::from_variant(value).map(Arc::new)
    }
}

impl ToVariant for Microseconds {
    fn to_variant(&self) -> Variant {
        Variant::Int64(self.count())
    }
}

impl FromVariant for Microseconds {
    fn from_variant(value: &Variant) -> Result<Microseconds, Error> {
        Ok(Microseconds::new(value.as_int64()?))
    }
}

/// Maps to the ISO-8601 text of the instant. The unformattable sentinel
/// range (beyond chrono's calendar bounds) falls back to the raw
/// microsecond count as Int64 so the round trip still holds.
impl ToVariant for TimePoint {
    fn to_variant(&self) -> Variant {
        let mut text = CompactString::default();
        if write!(text, "{self}").is_ok() {
            Variant::String(text)
        } else {
            Variant::Int64(self.elapsed().count())
        }
    }
}

impl FromVariant for TimePoint {
    fn from_variant(value: &Variant) -> Result<TimePoint, Error> {
        if let Ok(text) = value.get_string() {
            Ok(text.parse()?)
        } else {
            Ok(TimePoint::new(Microseconds::new(value.as_int64()?)))
        }
    }
}

use std::{fmt, ops};

use compact_str::CompactString;

use crate::{error::Error, object::Object};

/// A dynamic value holding exactly one of eight kinds.
///
/// Scalar kinds are stored inline; String, Array, and Object own a single
/// heap payload. `Clone` performs a deep copy, a move transfers the payload
/// in O(1), and [`Variant::take`] is the explicit move that leaves the
/// source Null. The enum stays within 32 bytes on 64-bit targets so values
/// pack uniformly into arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Variant {
    #[default]
    Null,
    Int64(i64),
    UInt64(u64),
    Double(f64),
    Bool(bool),
    String(CompactString),
    Array(Vec<Variant>),
    Object(Box<Object>),
}

const _: () = assert!(std::mem::size_of::<Variant>() <= 32);

/// The discriminant of a [`Variant`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Int64,
    UInt64,
    Double,
    Bool,
    String,
    Array,
    Object,
}

impl Kind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Int64 => "int64",
            Kind::UInt64 => "uint64",
            Kind::Double => "double",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Variant {
    /// The kind currently stored. O(1) tag read.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Variant::Null => Kind::Null,
            Variant::Int64(_) => Kind::Int64,
            Variant::UInt64(_) => Kind::UInt64,
            Variant::Double(_) => Kind::Double,
            Variant::Bool(_) => Kind::Bool,
            Variant::String(_) => Kind::String,
            Variant::Array(_) => Kind::Array,
            Variant::Object(_) => Kind::Object,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    #[must_use]
    pub const fn is_int64(&self) -> bool {
        matches!(self, Variant::Int64(_))
    }

    #[must_use]
    pub const fn is_uint64(&self) -> bool {
        matches!(self, Variant::UInt64(_))
    }

    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Variant::Double(_))
    }

    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Variant::Bool(_))
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Variant::String(_))
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Variant::Array(_))
    }

    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Variant::Object(_))
    }

    /// True for Int64, UInt64, Double, and Bool.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Variant::Int64(_) | Variant::UInt64(_) | Variant::Double(_) | Variant::Bool(_)
        )
    }

    /// Moves the value out, leaving Null behind. O(1).
    #[must_use]
    pub fn take(&mut self) -> Variant {
        std::mem::take(self)
    }

    /// Best-effort coercion to a signed 64-bit integer.
    ///
    /// Numeric kinds interconvert: a Double truncates, a UInt64
    /// reinterprets its bits, Bool maps to 0/1, and Null reads as 0. A
    /// String is parsed as a signed integer. Array and Object fail with a
    /// kind mismatch.
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn as_int64(&self) -> Result<i64, Error> {
        match self {
            Variant::Null => Ok(0),
            Variant::Int64(v) => Ok(*v),
            Variant::UInt64(v) => Ok(*v as i64),
            Variant::Double(v) => Ok(*v as i64),
            Variant::Bool(v) => Ok(i64::from(*v)),
            Variant::String(text) => text.parse().map_err(|_| Error::ParseNumber {
                kind: Kind::Int64,
                text: text.to_string(),
            }),
            other => Err(mismatch(Kind::Int64, other)),
        }
    }

    /// Best-effort coercion to an unsigned 64-bit integer.
    ///
    /// A negative Int64 reinterprets its two's-complement bits rather than
    /// failing.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn as_uint64(&self) -> Result<u64, Error> {
        match self {
            Variant::Null => Ok(0),
            Variant::Int64(v) => Ok(*v as u64),
            Variant::UInt64(v) => Ok(*v),
            Variant::Double(v) => Ok(*v as u64),
            Variant::Bool(v) => Ok(u64::from(*v)),
            Variant::String(text) => text.parse().map_err(|_| Error::ParseNumber {
                kind: Kind::UInt64,
                text: text.to_string(),
            }),
            other => Err(mismatch(Kind::UInt64, other)),
        }
    }

    /// Best-effort coercion to a double.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_double(&self) -> Result<f64, Error> {
        match self {
            Variant::Null => Ok(0.0),
            Variant::Int64(v) => Ok(*v as f64),
            Variant::UInt64(v) => Ok(*v as f64),
            Variant::Double(v) => Ok(*v),
            Variant::Bool(v) => Ok(f64::from(u8::from(*v))),
            Variant::String(text) => text.parse().map_err(|_| Error::ParseNumber {
                kind: Kind::Double,
                text: text.to_string(),
            }),
            other => Err(mismatch(Kind::Double, other)),
        }
    }

    /// Best-effort coercion to a boolean: numeric kinds test against zero,
    /// Null is false, and a String must be exactly `"true"` or `"false"`.
    pub fn as_bool(&self) -> Result<bool, Error> {
        match self {
            Variant::Null => Ok(false),
            Variant::Int64(v) => Ok(*v != 0),
            Variant::UInt64(v) => Ok(*v != 0),
            Variant::Double(v) => Ok(*v != 0.0),
            Variant::Bool(v) => Ok(*v),
            Variant::String(text) => match text.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(Error::ParseBool {
                    text: text.to_string(),
                }),
            },
            other => Err(mismatch(Kind::Bool, other)),
        }
    }

    /// Renders any scalar kind as text: Null becomes `"null"`, Bool becomes
    /// `"true"`/`"false"`, numbers their decimal form. Fails on Array and
    /// Object.
    pub fn as_string(&self) -> Result<String, Error> {
        match self {
            Variant::Null => Ok("null".to_owned()),
            Variant::Int64(v) => Ok(itoa::Buffer::new().format(*v).to_owned()),
            Variant::UInt64(v) => Ok(itoa::Buffer::new().format(*v).to_owned()),
            Variant::Double(v) => Ok(v.to_string()),
            Variant::Bool(v) => Ok(if *v { "true" } else { "false" }.to_owned()),
            Variant::String(text) => Ok(text.to_string()),
            other => Err(mismatch(Kind::String, other)),
        }
    }

    /// Exact read of the String payload; fails on any other kind.
    pub fn get_string(&self) -> Result<&str, Error> {
        match self {
            Variant::String(text) => Ok(text),
            other => Err(mismatch(Kind::String, other)),
        }
    }

    /// Exact read of the Array payload; fails on any other kind.
    pub fn get_array(&self) -> Result<&[Variant], Error> {
        match self {
            Variant::Array(items) => Ok(items),
            other => Err(mismatch(Kind::Array, other)),
        }
    }

    /// Mutable access to the Array payload. Unlike
    /// [`get_or_insert_array`](Variant::get_or_insert_array) this never
    /// promotes a Null value.
    pub fn get_array_mut(&mut self) -> Result<&mut Vec<Variant>, Error> {
        match self {
            Variant::Array(items) => Ok(items),
            other => Err(mismatch(Kind::Array, other)),
        }
    }

    /// Exact read of the Object payload; fails on any other kind.
    pub fn get_object(&self) -> Result<&Object, Error> {
        match self {
            Variant::Object(object) => Ok(object),
            other => Err(mismatch(Kind::Object, other)),
        }
    }

    /// Mutable access to the Object payload; never promotes a Null value.
    pub fn get_object_mut(&mut self) -> Result<&mut Object, Error> {
        match self {
            Variant::Object(object) => Ok(object),
            other => Err(mismatch(Kind::Object, other)),
        }
    }

    /// Mutable access to the Array payload, promoting a Null value in place
    /// to an empty Array first.
    ///
    /// This is the one accessor allowed to retag the value; it supports the
    /// lazy-construction idiom `v.get_or_insert_array()?.push(...)`. Any
    /// kind other than Null or Array fails without mutation.
    pub fn get_or_insert_array(&mut self) -> Result<&mut Vec<Variant>, Error> {
        if self.is_null() {
            *self = Variant::Array(Vec::new());
        }
        match self {
            Variant::Array(items) => Ok(items),
            other => Err(mismatch(Kind::Array, other)),
        }
    }

    /// Mutable access to the Object payload, promoting a Null value in
    /// place to an empty Object first.
    pub fn get_or_insert_object(&mut self) -> Result<&mut Object, Error> {
        if self.is_null() {
            *self = Variant::Object(Box::default());
        }
        match self {
            Variant::Object(object) => Ok(object),
            other => Err(mismatch(Kind::Object, other)),
        }
    }

    /// Looks up a key in an Object value. Returns `None` when the value is
    /// not an Object or the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Variant> {
        match self {
            Variant::Object(object) => object.get(key),
            _ => None,
        }
    }

    /// Looks up an element in an Array value. Returns `None` when the value
    /// is not an Array or the index is out of range.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Variant> {
        match self {
            Variant::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// The number of elements in an Array value; fails on any other kind.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.get_array()?.len())
    }

    /// Whether an Array value has no elements; fails on any other kind.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.get_array()?.is_empty())
    }
}

fn mismatch(expected: Kind, actual: &Variant) -> Error {
    Error::KindMismatch {
        expected,
        actual: actual.kind(),
    }
}

/// Array indexing.
///
/// # Panics
///
/// Indexing a non-Array value or an out-of-range position is a
/// precondition violation and panics. Use [`Variant::at`] for a
/// non-panicking lookup.
impl ops::Index<usize> for Variant {
    type Output = Variant;

    fn index(&self, index: usize) -> &Variant {
        match self {
            Variant::Array(items) => items.get(index).unwrap_or_else(|| {
                panic!(
                    "index {index} out of range for array of length {}",
                    items.len()
                )
            }),
            other => panic!("cannot index {} with an integer", other.kind()),
        }
    }
}

/// Object key lookup.
///
/// # Panics
///
/// Indexing a non-Object value or a missing key is a precondition
/// violation and panics. Use [`Variant::get`] for a non-panicking lookup.
impl ops::Index<&str> for Variant {
    type Output = Variant;

    fn index(&self, key: &str) -> &Variant {
        match self {
            Variant::Object(object) => object
                .get(key)
                .unwrap_or_else(|| panic!("missing object key {key:?}")),
            other => panic!("cannot index {} with a string key", other.kind()),
        }
    }
}

impl From<()> for Variant {
    fn from((): ()) -> Variant {
        Variant::Null
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Variant {
                #[allow(trivial_numeric_casts, clippy::cast_possible_wrap)]
                fn from(value: $ty) -> Variant {
                    Variant::Int64(value as i64)
                }
            }
        )*
    };
}

// Narrow unsigned widths zero-extend through their own `From` impls so
// they never arrive sign-extended via an intermediate signed cast.
macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Variant {
                #[allow(trivial_numeric_casts)]
                fn from(value: $ty) -> Variant {
                    Variant::UInt64(u64::from(value))
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Variant {
    #[allow(clippy::cast_possible_wrap)]
    fn from(value: isize) -> Variant {
        Variant::Int64(value as i64)
    }
}

impl From<usize> for Variant {
    fn from(value: usize) -> Variant {
        Variant::UInt64(value as u64)
    }
}

impl From<f32> for Variant {
    fn from(value: f32) -> Variant {
        Variant::Double(f64::from(value))
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Variant {
        Variant::Double(value)
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Variant {
        Variant::Bool(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Variant {
        Variant::String(value.into())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Variant {
        Variant::String(value.into())
    }
}

impl From<CompactString> for Variant {
    fn from(value: CompactString) -> Variant {
        Variant::String(value)
    }
}

impl From<char> for Variant {
    fn from(value: char) -> Variant {
        let mut buf = [0u8; 4];
        Variant::String((&*value.encode_utf8(&mut buf)).into())
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(value: Vec<Variant>) -> Variant {
        Variant::Array(value)
    }
}

impl From<Object> for Variant {
    fn from(value: Object) -> Variant {
        Variant::Object(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::{Kind, Variant};
    use crate::{error::Error, object::Object};

    #[test]
    fn footprint_is_constant() {
        assert!(std::mem::size_of::<Variant>() <= 32);
        let null = Variant::Null;
        let int = Variant::from(5);
        let array = Variant::Array((0..1000).map(Variant::from).collect());
        assert_eq!(
            std::mem::size_of_val(&null),
            std::mem::size_of_val(&array)
        );
        assert_eq!(std::mem::size_of_val(&null), std::mem::size_of_val(&int));
    }

    #[test_case(Variant::Null, Kind::Null)]
    #[test_case(Variant::from(-3), Kind::Int64)]
    #[test_case(Variant::from(3u8), Kind::UInt64)]
    #[test_case(Variant::from(0.5), Kind::Double)]
    #[test_case(Variant::from(true), Kind::Bool)]
    #[test_case(Variant::from("x"), Kind::String)]
    #[test_case(Variant::from(vec![Variant::Null]), Kind::Array)]
    #[test_case(Variant::from(Object::new()), Kind::Object)]
    fn kind_tag(value: Variant, kind: Kind) {
        assert_eq!(value.kind(), kind);
    }

    #[test]
    fn narrow_unsigned_widths_never_sign_extend() {
        assert_eq!(Variant::from(0xFFu8).as_uint64().unwrap(), 255);
        assert_eq!(Variant::from(0xFFFFu16).as_uint64().unwrap(), 65_535);
        assert_eq!(
            Variant::from(0xFFFF_FFFFu32).as_uint64().unwrap(),
            4_294_967_295
        );
    }

    #[test]
    fn is_numeric_covers_four_kinds() {
        assert!(Variant::from(1).is_numeric());
        assert!(Variant::from(1u64).is_numeric());
        assert!(Variant::from(1.0).is_numeric());
        assert!(Variant::from(true).is_numeric());
        assert!(!Variant::Null.is_numeric());
        assert!(!Variant::from("1").is_numeric());
    }

    #[test]
    fn double_truncates_to_int64() {
        assert_eq!(Variant::from(3.9).as_int64().unwrap(), 3);
        assert_eq!(Variant::from(-3.9).as_int64().unwrap(), -3);
    }

    #[test]
    fn negative_int64_reinterprets_as_uint64() {
        assert_eq!(Variant::from(-1).as_uint64().unwrap(), u64::MAX);
    }

    #[test_case(Variant::Null, 0; "null reads as zero")]
    #[test_case(Variant::from(true), 1; "bool reads as one")]
    #[test_case(Variant::from("42"), 42; "string parses")]
    fn int64_coercion(value: Variant, expected: i64) {
        assert_eq!(value.as_int64().unwrap(), expected);
    }

    #[test]
    fn string_that_is_not_a_number_fails() {
        let err = Variant::from("forty-two").as_int64().unwrap_err();
        assert_eq!(
            err,
            Error::ParseNumber {
                kind: Kind::Int64,
                text: "forty-two".to_owned()
            }
        );
    }

    #[test_case(Variant::from(0), false)]
    #[test_case(Variant::from(7u64), true)]
    #[test_case(Variant::from(0.0), false)]
    #[test_case(Variant::from("true"), true)]
    #[test_case(Variant::from("false"), false)]
    #[test_case(Variant::Null, false)]
    fn bool_coercion(value: Variant, expected: bool) {
        assert_eq!(value.as_bool().unwrap(), expected);
    }

    #[test]
    fn bool_from_arbitrary_string_fails() {
        let err = Variant::from("yes").as_bool().unwrap_err();
        assert_eq!(
            err,
            Error::ParseBool {
                text: "yes".to_owned()
            }
        );
    }

    #[test_case(Variant::Null, "null")]
    #[test_case(Variant::from(42), "42")]
    #[test_case(Variant::from(42u64), "42")]
    #[test_case(Variant::from(3.5), "3.5")]
    #[test_case(Variant::from(false), "false")]
    #[test_case(Variant::from("text"), "text")]
    fn as_string_renders_scalars(value: Variant, expected: &str) {
        assert_eq!(value.as_string().unwrap(), expected);
    }

    #[test]
    fn as_string_rejects_aggregates() {
        let err = Variant::Array(Vec::new()).as_string().unwrap_err();
        assert_eq!(
            err,
            Error::KindMismatch {
                expected: Kind::String,
                actual: Kind::Array
            }
        );
        assert!(Variant::from(Object::new()).as_string().is_err());
    }

    #[test]
    fn exact_reads_require_matching_kind() {
        let value = Variant::from(42);
        let err = value.get_string().unwrap_err();
        assert_eq!(
            err,
            Error::KindMismatch {
                expected: Kind::String,
                actual: Kind::Int64
            }
        );
        // The coercing read on the same value succeeds.
        assert_eq!(value.as_string().unwrap(), "42");
        assert!(value.get_array().is_err());
        assert!(value.get_object().is_err());
    }

    #[test]
    fn null_is_not_promoted_by_strict_mutable_reads() {
        let mut value = Variant::Null;
        assert!(value.get_array_mut().is_err());
        assert!(value.get_object_mut().is_err());
        assert!(value.is_null());
    }

    #[test]
    fn get_or_insert_promotes_null() {
        let mut value = Variant::Null;
        value.get_or_insert_array().unwrap().push(Variant::from(1));
        assert!(value.is_array());
        assert_eq!(value.len().unwrap(), 1);

        let mut value = Variant::Null;
        value
            .get_or_insert_object()
            .unwrap()
            .insert("k", Variant::from(1));
        assert!(value.is_object());
    }

    #[test]
    fn get_or_insert_rejects_other_kinds_without_mutation() {
        let mut value = Variant::from(5);
        assert!(value.get_or_insert_array().is_err());
        assert_eq!(value, Variant::from(5));
        assert!(value.get_or_insert_object().is_err());
        assert_eq!(value, Variant::from(5));
    }

    #[test]
    fn take_leaves_null() {
        let mut source = Variant::from("payload");
        let moved = source.take();
        assert!(source.is_null());
        assert_eq!(moved, Variant::from("payload"));
    }

    #[test]
    fn clone_is_deep() {
        let original = Variant::Array(vec![Variant::from(1), Variant::from(2)]);
        let mut copy = original.clone();
        copy.get_array_mut().unwrap()[0] = Variant::from(99);
        assert_eq!(original[0], Variant::from(1));
        assert_eq!(copy[0], Variant::from(99));
    }

    #[test]
    fn indexing() {
        let array = Variant::Array(vec![Variant::from(10), Variant::from(20)]);
        assert_eq!(array[1], Variant::from(20));
        assert_eq!(array.at(2), None);

        let mut object = Object::new();
        object.insert("answer", Variant::from(42));
        let value = Variant::from(object);
        assert_eq!(value["answer"], Variant::from(42));
        assert_eq!(value.get("missing"), None);
        assert_eq!(value.get("answer"), Some(&Variant::from(42)));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_index_panics() {
        let array = Variant::Array(vec![Variant::Null]);
        let _ = &array[1];
    }

    #[test]
    #[should_panic(expected = "cannot index int64")]
    fn indexing_a_scalar_panics() {
        let _ = &Variant::from(1)[0];
    }

    #[test]
    #[should_panic(expected = "missing object key")]
    fn missing_key_panics() {
        let _ = &Variant::from(Object::new())["absent"];
    }

    #[test]
    fn len_requires_array() {
        assert!(Variant::from(Object::new()).len().is_err());
        assert!(Variant::Array(Vec::new()).is_empty().unwrap());
    }
}

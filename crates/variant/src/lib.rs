//! # variant
//!
//! A compact dynamic value type — the universal interchange format for an
//! extensible serialization protocol.
//!
//! [`Variant`] holds exactly one of eight kinds (Null, Int64, UInt64,
//! Double, Bool, String, Array, Object) in a fixed-size value. Scalars are
//! stored inline; String, Array, and Object own a single heap payload.
//! Cloning deep-copies, moving transfers the payload in O(1), and
//! [`Variant::take`] leaves Null behind.
//!
//! Conversion is an open protocol: any type that implements the
//! [`ToVariant`]/[`FromVariant`] pair participates, including nested
//! user-defined types inside standard containers, without any change to
//! this crate:
//!
//! ```
//! use variant::{from_variant, to_variant};
//!
//! let value = to_variant(&vec![1i64, 2, 3]);
//! assert_eq!(value.len().unwrap(), 3);
//! assert_eq!(from_variant::<Vec<i64>>(&value).unwrap(), vec![1, 2, 3]);
//! ```
//!
//! Read-only traversal goes through [`Visitor`], one tag-dispatched call
//! per value with aggregates delivered whole.
mod convert;
mod error;
pub mod object;
mod value;
mod visit;

pub use convert::{from_variant, to_variant, FromVariant, ToVariant};
pub use error::Error;
pub use object::Object;
pub use value::{Kind, Variant};
pub use visit::Visitor;

// Re-exported so protocol users get the time values without a separate
// dependency declaration.
pub use variant_time::{milliseconds, seconds, Microseconds, ParseTimeError, TimePoint};

mod decimal;
mod decode;
mod descriptor;
mod error;
mod reader;
mod ticks;
mod typed;
mod value;

/// Compact decimal value type.
pub use decimal::Decimal;
/// Descriptor-driven decoding entry points and options.
pub use decode::{DecodeOptions, decode, decode_with_options};
/// Type descriptors that drive decoding.
pub use descriptor::{CompositeBuilder, CompositeShape, EnumMember, EnumShape, FieldDescriptor, PrimitiveKind, TypeDescriptor};
/// Error and result aliases.
pub use error::{DecodeError, ErrorKind, Result};
/// Bounded wire reader.
pub use reader::{MAX_VARINT_LEN, Reader};
/// Tick-count date-time type.
pub use ticks::Ticks;
/// Typed decoding over `Decode` implementors.
pub use typed::{Decode, Fields, decode_as, decode_as_with_options};
/// Decoded runtime value types.
pub use value::{EnumValue, FieldValue, StructValue, Value};

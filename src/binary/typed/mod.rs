use chrono::NaiveDateTime;

use crate::binary::value::mismatch;
use crate::binary::{DecodeError, DecodeOptions, Decimal, ErrorKind, FieldValue, PrimitiveKind, Result, StructValue, Ticks, TypeDescriptor, Value, decode_with_options};

/// A target shape that can be rebuilt from the wire.
///
/// `descriptor` is the registered layout of the type and `from_value` its
/// constructor. Record types usually get both from [`composite!`](crate::composite).
pub trait Decode: Sized {
	/// Wire layout of `Self`.
	fn descriptor() -> TypeDescriptor;

	/// Build `Self` from a value decoded against [`Decode::descriptor`].
	fn from_value(value: Value) -> Result<Self>;
}

/// Decode a `T` with default options.
pub fn decode_as<T: Decode>(bytes: &[u8]) -> Result<T> {
	decode_as_with_options(bytes, &DecodeOptions::default())
}

/// Decode a `T`, inferring the descriptor from the target type.
pub fn decode_as_with_options<T: Decode>(bytes: &[u8], opt: &DecodeOptions) -> Result<T> {
	let value = decode_with_options(bytes, &T::descriptor(), opt)?;
	T::from_value(value)
}

/// Positional consumer of a decoded record's fields.
#[derive(Debug)]
pub struct Fields {
	type_name: Box<str>,
	fields: std::vec::IntoIter<FieldValue>,
}

impl Fields {
	/// Take the next field, which must be named `name`.
	pub fn take<T: Decode>(&mut self, name: &str) -> Result<T> {
		let field = self.fields.next().ok_or_else(|| {
			DecodeError::detached(ErrorKind::MissingField {
				field: format!("{}.{name}", self.type_name),
			})
		})?;
		if &*field.name != name {
			return Err(DecodeError::detached(ErrorKind::FieldMismatch {
				expected: name.to_owned(),
				got: field.name.into_string(),
			}));
		}
		T::from_value(field.value).map_err(|err| err.within(name))
	}
}

impl StructValue {
	/// Consume the record into a positional field reader.
	pub fn into_fields(self) -> Fields {
		Fields {
			type_name: self.type_name,
			fields: self.fields.into_iter(),
		}
	}
}

macro_rules! primitive_decode {
	($($ty:ty => $kind:ident),* $(,)?) => {
		$(
			impl Decode for $ty {
				fn descriptor() -> TypeDescriptor {
					TypeDescriptor::Primitive(PrimitiveKind::$kind)
				}

				fn from_value(value: Value) -> Result<Self> {
					match value {
						Value::$kind(inner) => Ok(inner),
						other => Err(mismatch(PrimitiveKind::$kind.name(), &other)),
					}
				}
			}
		)*
	};
}

primitive_decode! {
	bool => Bool,
	u8 => U8,
	i8 => I8,
	i16 => I16,
	u16 => U16,
	i32 => I32,
	u32 => U32,
	i64 => I64,
	u64 => U64,
	char => Char,
	f32 => F32,
	f64 => F64,
}

impl Decode for String {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::String
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::String(text) => Ok(text.into_string()),
			other => Err(mismatch("string", &other)),
		}
	}
}

impl Decode for Decimal {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::Decimal
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::Decimal(inner) => Ok(inner),
			other => Err(mismatch("decimal", &other)),
		}
	}
}

impl Decode for Ticks {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::DateTime
	}

	fn from_value(value: Value) -> Result<Self> {
		match value {
			Value::DateTime(inner) => Ok(inner),
			other => Err(mismatch("date_time", &other)),
		}
	}
}

impl Decode for NaiveDateTime {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::DateTime
	}

	fn from_value(value: Value) -> Result<Self> {
		let ticks = Ticks::from_value(value)?;
		ticks.to_naive().ok_or(DecodeError::detached(ErrorKind::RangeOverflow {
			target: "date_time",
			value: ticks.get(),
		}))
	}
}

// Collections and optionals have descriptors so they can appear in record
// layouts, but the decoder rejects them with `UnsupportedShape`.
impl<T: Decode> Decode for Vec<T> {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::Sequence(Box::new(T::descriptor()))
	}

	fn from_value(value: Value) -> Result<Self> {
		Err(mismatch("sequence", &value))
	}
}

impl<T: Decode> Decode for Option<T> {
	fn descriptor() -> TypeDescriptor {
		TypeDescriptor::Nullable(Box::new(T::descriptor()))
	}

	fn from_value(value: Value) -> Result<Self> {
		T::from_value(value).map(Some)
	}
}

/// Declare a record type whose wire layout is its field declaration order.
///
/// Generates the struct and a [`Decode`] impl. The descriptor is built once
/// and cached.
///
/// ```
/// binconv::composite! {
/// 	#[derive(Debug, PartialEq)]
/// 	pub struct Person {
/// 		pub id: i32,
/// 		pub name: String,
/// 	}
/// }
///
/// let person: Person = binconv::binary::decode_as(&[42, 3, b'a', b'b', b'c']).unwrap();
/// assert_eq!(person, Person { id: 42, name: "abc".into() });
/// ```
#[macro_export]
macro_rules! composite {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$field_meta:meta])*
				$field_vis:vis $field:ident : $ty:ty
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[$field_meta])*
				$field_vis $field: $ty,
			)*
		}

		impl $crate::binary::Decode for $name {
			fn descriptor() -> $crate::binary::TypeDescriptor {
				static SHAPE: ::std::sync::OnceLock<::std::sync::Arc<$crate::binary::CompositeShape>> = ::std::sync::OnceLock::new();
				let shape = SHAPE.get_or_init(|| {
					::std::sync::Arc::new(
						$crate::binary::CompositeShape::builder(stringify!($name))
							$(.field(stringify!($field), <$ty as $crate::binary::Decode>::descriptor()))*
							.finish(),
					)
				});
				$crate::binary::TypeDescriptor::Composite(::std::sync::Arc::clone(shape))
			}

			fn from_value(value: $crate::binary::Value) -> $crate::binary::Result<Self> {
				#[allow(unused_mut, unused_variables)]
				let mut fields = value.into_struct(stringify!($name))?.into_fields();
				Ok(Self {
					$($field: fields.take(stringify!($field))?,)*
				})
			}
		}
	};
}

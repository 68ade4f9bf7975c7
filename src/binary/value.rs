use serde_json::{Map, Value as Json};

use crate::binary::{DecodeError, Decimal, ErrorKind, Result, Ticks};

/// Runtime value emitted by descriptor-driven decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean scalar.
	Bool(bool),
	/// Unsigned 8-bit scalar.
	U8(u8),
	/// Signed 8-bit scalar.
	I8(i8),
	/// Signed 16-bit scalar.
	I16(i16),
	/// Unsigned 16-bit scalar.
	U16(u16),
	/// Signed 32-bit scalar.
	I32(i32),
	/// Unsigned 32-bit scalar.
	U32(u32),
	/// Signed 64-bit scalar.
	I64(i64),
	/// Unsigned 64-bit scalar.
	U64(u64),
	/// Unicode scalar value.
	Char(char),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// Compact decimal.
	Decimal(Decimal),
	/// Raw enum value, member or not.
	Enum(EnumValue),
	/// Date-time tick count.
	DateTime(Ticks),
	/// UTF-8 string.
	String(Box<str>),
	/// Record-shaped value.
	Struct(StructValue),
}

/// Decoded enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
	/// Enum type name from the descriptor.
	pub type_name: Box<str>,
	/// Underlying value as read from the wire.
	pub raw: i32,
	/// Declared member name for `raw`, if the descriptor lists one.
	pub member: Option<Box<str>>,
}

/// Decoded record with field names preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
	/// Record type name from the descriptor.
	pub type_name: Box<str>,
	/// Decoded field values in declaration order.
	pub fields: Vec<FieldValue>,
}

/// Named decoded field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field identifier.
	pub name: Box<str>,
	/// Decoded field payload.
	pub value: Value,
}

impl Value {
	/// Short name of the value variant.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::U8(_) => "u8",
			Self::I8(_) => "i8",
			Self::I16(_) => "i16",
			Self::U16(_) => "u16",
			Self::I32(_) => "i32",
			Self::U32(_) => "u32",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::Char(_) => "char",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::Decimal(_) => "decimal",
			Self::Enum(_) => "enum",
			Self::DateTime(_) => "date_time",
			Self::String(_) => "string",
			Self::Struct(_) => "struct",
		}
	}

	/// Borrow as a record.
	pub fn as_struct(&self) -> Option<&StructValue> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Take as a record named `type_name`.
	pub fn into_struct(self, type_name: &str) -> Result<StructValue> {
		match self {
			Self::Struct(item) if &*item.type_name == type_name => Ok(item),
			Self::Struct(item) => Err(DecodeError::detached(ErrorKind::FieldMismatch {
				expected: type_name.to_owned(),
				got: item.type_name.into_string(),
			})),
			other => Err(mismatch("struct", &other)),
		}
	}

	/// Render as JSON for inspection.
	///
	/// Decimals and date-times become strings, enums their member name when
	/// known, and non-finite floats `null`.
	pub fn to_json(&self) -> Json {
		match self {
			Self::Bool(value) => Json::from(*value),
			Self::U8(value) => Json::from(*value),
			Self::I8(value) => Json::from(*value),
			Self::I16(value) => Json::from(*value),
			Self::U16(value) => Json::from(*value),
			Self::I32(value) => Json::from(*value),
			Self::U32(value) => Json::from(*value),
			Self::I64(value) => Json::from(*value),
			Self::U64(value) => Json::from(*value),
			Self::Char(value) => Json::from(value.to_string()),
			Self::F32(value) => Json::from(f64::from(*value)),
			Self::F64(value) => Json::from(*value),
			Self::Decimal(value) => Json::from(value.to_string()),
			Self::Enum(value) => match &value.member {
				Some(name) => Json::from(&**name),
				None => Json::from(value.raw),
			},
			Self::DateTime(value) => Json::from(value.to_string()),
			Self::String(value) => Json::from(&**value),
			Self::Struct(item) => item.to_json(),
		}
	}
}

impl StructValue {
	/// Look up a field value by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}

	/// Render as a JSON object.
	pub fn to_json(&self) -> Json {
		let mut out = Map::new();
		for field in &self.fields {
			out.insert(field.name.to_string(), field.value.to_json());
		}
		Json::Object(out)
	}
}

pub(crate) fn mismatch(expected: &'static str, got: &Value) -> DecodeError {
	DecodeError::detached(ErrorKind::TypeMismatch {
		expected,
		got: got.kind_name(),
	})
}

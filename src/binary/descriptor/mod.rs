use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Scalar kinds carried as a single varint or fixed-width float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
	/// Boolean, encoded as varint 0 or 1.
	Bool,
	/// Unsigned 8-bit integer.
	U8,
	/// Signed 8-bit integer.
	I8,
	/// Signed 16-bit integer.
	I16,
	/// Unsigned 16-bit integer.
	U16,
	/// Signed 32-bit integer.
	I32,
	/// Unsigned 32-bit integer.
	U32,
	/// Signed 64-bit integer.
	I64,
	/// Unsigned 64-bit integer.
	U64,
	/// Unicode scalar value.
	Char,
	/// Fixed-width 32-bit float.
	F32,
	/// Fixed-width 64-bit float.
	F64,
}

impl PrimitiveKind {
	/// Short lowercase type name.
	pub fn name(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::U8 => "u8",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::U16 => "u16",
			Self::I32 => "i32",
			Self::U32 => "u32",
			Self::I64 => "i64",
			Self::U64 => "u64",
			Self::Char => "char",
			Self::F32 => "f32",
			Self::F64 => "f64",
		}
	}

	/// Whether the kind travels as a varint rather than a fixed-width float.
	pub fn is_varint(self) -> bool {
		!matches!(self, Self::F32 | Self::F64)
	}
}

/// Shape of a value on the wire.
///
/// Descriptors never change after construction. Record and enum shapes sit
/// behind `Arc`, so cloning a descriptor is cheap and one table can be shared
/// by concurrent decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TypeDescriptor {
	/// Integer-family or float scalar.
	Primitive(PrimitiveKind),
	/// Compact decimal.
	Decimal,
	/// Enumeration over an `i32` underlying value.
	Enum(Arc<EnumShape>),
	/// Date-time as an `i64` tick count.
	DateTime,
	/// Length-prefixed UTF-8 string.
	String,
	/// Record with positionally encoded fields.
	Composite(Arc<CompositeShape>),
	/// Homogeneous collection. Not decodable.
	Sequence(Box<TypeDescriptor>),
	/// Optional wrapper. Not decodable.
	Nullable(Box<TypeDescriptor>),
}

impl TypeDescriptor {
	/// Shorthand for `TypeDescriptor::Primitive(kind)`.
	pub const fn primitive(kind: PrimitiveKind) -> Self {
		Self::Primitive(kind)
	}

	/// Enum descriptor without declared members.
	pub fn enumeration(name: &str) -> Self {
		Self::Enum(Arc::new(EnumShape::new(name)))
	}

	/// Display name used in logs and errors.
	pub fn name(&self) -> &str {
		match self {
			Self::Primitive(kind) => kind.name(),
			Self::Decimal => "decimal",
			Self::Enum(shape) => &*shape.name,
			Self::DateTime => "date_time",
			Self::String => "string",
			Self::Composite(shape) => &*shape.name,
			Self::Sequence(_) => "sequence",
			Self::Nullable(_) => "nullable",
		}
	}

	/// Parse a descriptor from its JSON form.
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}
}

impl From<PrimitiveKind> for TypeDescriptor {
	fn from(kind: PrimitiveKind) -> Self {
		Self::Primitive(kind)
	}
}

/// Declared enumeration with optional named members.
///
/// Members only label values for display; decoding never rejects an
/// undeclared value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumShape {
	/// Enum type name.
	pub name: Box<str>,
	/// Declared members in declaration order.
	#[serde(default)]
	pub members: Vec<EnumMember>,
}

/// One named enum member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
	/// Member identifier.
	pub name: Box<str>,
	/// Underlying value.
	pub value: i32,
}

impl EnumShape {
	/// Enum without members.
	pub fn new(name: &str) -> Self {
		Self {
			name: name.into(),
			members: Vec::new(),
		}
	}

	/// Add a member.
	pub fn member(mut self, name: &str, value: i32) -> Self {
		self.members.push(EnumMember { name: name.into(), value });
		self
	}

	/// Wrap into a descriptor.
	pub fn build(self) -> TypeDescriptor {
		TypeDescriptor::Enum(Arc::new(self))
	}

	/// Name of the first member declared with `raw`.
	pub fn member_name(&self, raw: i32) -> Option<&str> {
		self.members.iter().find(|member| member.value == raw).map(|member| &*member.name)
	}
}

/// Record shape: a name plus fields in wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeShape {
	/// Record type name.
	pub name: Box<str>,
	/// Fields in declaration order, which is also wire order.
	pub fields: Vec<FieldDescriptor>,
}

/// One named record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	/// Field identifier.
	pub name: Box<str>,
	/// Field value shape.
	#[serde(rename = "type")]
	pub ty: TypeDescriptor,
}

impl CompositeShape {
	/// Start registering fields for a record named `name`.
	pub fn builder(name: &str) -> CompositeBuilder {
		CompositeBuilder {
			shape: Self {
				name: name.into(),
				fields: Vec::new(),
			},
		}
	}

	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| &*field.name == name)
	}
}

/// Ordered field registration for a [`CompositeShape`].
#[derive(Debug)]
pub struct CompositeBuilder {
	shape: CompositeShape,
}

impl CompositeBuilder {
	/// Append the next field in wire order.
	pub fn field(mut self, name: &str, ty: impl Into<TypeDescriptor>) -> Self {
		self.shape.fields.push(FieldDescriptor { name: name.into(), ty: ty.into() });
		self
	}

	/// Finish the shape.
	pub fn finish(self) -> CompositeShape {
		self.shape
	}

	/// Finish and wrap into a descriptor.
	pub fn build(self) -> TypeDescriptor {
		TypeDescriptor::Composite(Arc::new(self.shape))
	}
}

#[cfg(test)]
mod tests;

use serde::Deserialize;
use tracing::{debug, debug_span, trace};

use crate::binary::reader::Reader;
use crate::binary::value::{EnumValue, FieldValue, StructValue, Value};
use crate::binary::{CompositeShape, DecodeError, EnumShape, ErrorKind, PrimitiveKind, Result, Ticks, TypeDescriptor};

/// Runtime limits and behavior switches for one decode call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
	/// Maximum record nesting depth.
	pub max_depth: u32,
	/// Maximum accepted string payload in bytes.
	pub max_string_len: usize,
	/// Error when bytes remain after the top-level value.
	pub strict_trailing: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			max_string_len: 16 * 1024 * 1024,
			strict_trailing: false,
		}
	}
}

impl DecodeOptions {
	/// Preset that also rejects trailing input.
	pub fn strict() -> Self {
		Self {
			strict_trailing: true,
			..Self::default()
		}
	}
}

/// Decode one value of shape `descriptor` with default options.
pub fn decode(bytes: &[u8], descriptor: &TypeDescriptor) -> Result<Value> {
	decode_with_options(bytes, descriptor, &DecodeOptions::default())
}

/// Decode one value of shape `descriptor`.
///
/// Bytes are consumed strictly left to right; any failure aborts the whole
/// call and no partial value is returned.
pub fn decode_with_options(bytes: &[u8], descriptor: &TypeDescriptor, opt: &DecodeOptions) -> Result<Value> {
	let _span = debug_span!("decode", shape = descriptor.name(), len = bytes.len()).entered();

	let mut session = Session {
		reader: Reader::new(bytes),
		opt,
	};
	let result = session.decode_root(descriptor);
	match &result {
		Ok(_) => trace!(consumed = session.reader.pos(), "decode finished"),
		Err(err) => debug!(error = %err, "decode failed"),
	}
	result
}

/// State of one top-level decode: the cursor and the limits it runs under.
struct Session<'a, 'o> {
	reader: Reader<'a>,
	opt: &'o DecodeOptions,
}

impl Session<'_, '_> {
	fn decode_root(&mut self, descriptor: &TypeDescriptor) -> Result<Value> {
		let value = self.decode_value(descriptor, 0)?;

		let leftover = self.reader.remaining();
		if leftover > 0 {
			if self.opt.strict_trailing {
				return Err(DecodeError::at(ErrorKind::TrailingBytes { leftover }, self.reader.pos()));
			}
			trace!(leftover, "ignoring trailing bytes");
		}
		Ok(value)
	}

	fn decode_value(&mut self, descriptor: &TypeDescriptor, depth: u32) -> Result<Value> {
		match descriptor {
			TypeDescriptor::Primitive(kind) => self.decode_primitive(*kind),
			TypeDescriptor::Decimal => Ok(Value::Decimal(self.reader.read_compact_decimal()?)),
			TypeDescriptor::Enum(shape) => self.decode_enum(shape),
			TypeDescriptor::DateTime => self.decode_date_time(),
			TypeDescriptor::String => {
				let text = self.reader.read_string(self.opt.max_string_len)?;
				Ok(Value::String(text.into()))
			}
			TypeDescriptor::Composite(shape) => self.decode_composite(shape, depth),
			TypeDescriptor::Sequence(_) | TypeDescriptor::Nullable(_) => Err(DecodeError::at(
				ErrorKind::UnsupportedShape {
					shape: descriptor.name().to_owned(),
				},
				self.reader.pos(),
			)),
		}
	}

	fn decode_composite(&mut self, shape: &CompositeShape, depth: u32) -> Result<Value> {
		if depth >= self.opt.max_depth {
			return Err(DecodeError::at(
				ErrorKind::NestingTooDeep {
					max_depth: self.opt.max_depth,
				},
				self.reader.pos(),
			));
		}

		let mut fields = Vec::with_capacity(shape.fields.len());
		for field in &shape.fields {
			trace!(record = &*shape.name, field = &*field.name, offset = self.reader.pos(), "decoding field");
			let value = self.decode_value(&field.ty, depth + 1).map_err(|err| err.within(&field.name))?;
			fields.push(FieldValue {
				name: field.name.clone(),
				value,
			});
		}

		Ok(Value::Struct(StructValue {
			type_name: shape.name.clone(),
			fields,
		}))
	}

	fn decode_primitive(&mut self, kind: PrimitiveKind) -> Result<Value> {
		match kind {
			PrimitiveKind::F32 => return Ok(Value::F32(self.reader.read_f32()?)),
			PrimitiveKind::F64 => return Ok(Value::F64(self.reader.read_f64()?)),
			_ => {}
		}

		let at = self.reader.pos();
		let raw = self.reader.read_varint()?;
		narrow(kind, raw).ok_or(DecodeError::at(
			ErrorKind::RangeOverflow {
				target: kind.name(),
				value: raw,
			},
			at,
		))
	}

	fn decode_enum(&mut self, shape: &EnumShape) -> Result<Value> {
		// Truncation to the underlying width; undeclared values pass through.
		let raw = self.reader.read_varint()? as i32;
		Ok(Value::Enum(EnumValue {
			type_name: shape.name.clone(),
			raw,
			member: shape.member_name(raw).map(Into::into),
		}))
	}

	fn decode_date_time(&mut self) -> Result<Value> {
		let at = self.reader.pos();
		let raw = self.reader.read_varint()?;
		let ticks = Ticks::new(raw).ok_or(DecodeError::at(
			ErrorKind::RangeOverflow {
				target: "date_time",
				value: raw,
			},
			at,
		))?;
		Ok(Value::DateTime(ticks))
	}
}

/// Narrow a varint's 64-bit pattern to `kind`, or `None` when it does not fit.
///
/// `u64` takes the raw pattern so its whole range round-trips; every other
/// integer kind range-checks the signed value.
fn narrow(kind: PrimitiveKind, raw: i64) -> Option<Value> {
	let value = match kind {
		PrimitiveKind::Bool => match raw {
			0 => Value::Bool(false),
			1 => Value::Bool(true),
			_ => return None,
		},
		PrimitiveKind::U8 => Value::U8(u8::try_from(raw).ok()?),
		PrimitiveKind::I8 => Value::I8(i8::try_from(raw).ok()?),
		PrimitiveKind::I16 => Value::I16(i16::try_from(raw).ok()?),
		PrimitiveKind::U16 => Value::U16(u16::try_from(raw).ok()?),
		PrimitiveKind::I32 => Value::I32(i32::try_from(raw).ok()?),
		PrimitiveKind::U32 => Value::U32(u32::try_from(raw).ok()?),
		PrimitiveKind::I64 => Value::I64(raw),
		PrimitiveKind::U64 => Value::U64(raw as u64),
		PrimitiveKind::Char => Value::Char(char::from_u32(u32::try_from(raw).ok()?)?),
		PrimitiveKind::F32 | PrimitiveKind::F64 => return None,
	};
	Some(value)
}

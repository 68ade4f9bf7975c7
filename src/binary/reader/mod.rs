use crate::binary::{DecodeError, Decimal, ErrorKind, Result};

/// Maximum bytes in a varint carrying 64 payload bits.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION_BIT: u8 = 0x80;
const DATA_MASK: u8 = 0x7F;

/// Bounded cursor over one immutable input buffer.
///
/// Every read advances a single monotonic position; running past the end is
/// reported as [`ErrorKind::Truncated`] at the offset of the missing byte.
pub struct Reader<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Reader<'a> {
	/// Create a reader at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(DecodeError::at(
				ErrorKind::Truncated {
					need: n,
					rem: self.remaining(),
				},
				self.pos,
			));
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a 7-bit varint and return its 64-bit pattern as `i64`.
	///
	/// Negative values arrive as their ten-byte two's complement encoding.
	pub fn read_varint(&mut self) -> Result<i64> {
		Ok(self.read_varint_u64()? as i64)
	}

	/// Read a 7-bit varint as an unsigned 64-bit value.
	pub fn read_varint_u64(&mut self) -> Result<u64> {
		let value = self.read_varint_bits(64)?;
		Ok(value as u64)
	}

	/// Read a 7-bit varint carrying at most `bits` payload bits (`bits <= 128`).
	///
	/// Groups are accumulated least-significant first. A group that would set a
	/// bit at or above `bits` is [`ErrorKind::MalformedVarint`].
	pub fn read_varint_bits(&mut self, bits: u32) -> Result<u128> {
		let start = self.pos;
		let mut result = 0_u128;
		let mut shift = 0_u32;

		loop {
			let byte = self.read_u8()?;
			let data = u128::from(byte & DATA_MASK);

			let overflow = shift >= bits || (bits - shift < 7 && data >> (bits - shift) != 0);
			if overflow {
				return Err(DecodeError::at(ErrorKind::MalformedVarint, start));
			}

			result |= data << shift;
			if byte & CONTINUATION_BIT == 0 {
				return Ok(result);
			}
			shift += 7;
		}
	}

	/// Read a little-endian IEEE-754 `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE-754 `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read a compact decimal: varint `(scale << 1) | sign`, then a varint magnitude.
	pub fn read_compact_decimal(&mut self) -> Result<Decimal> {
		let start = self.pos;
		let header = self.read_varint_u64()?;
		let magnitude = self.read_varint_bits(Decimal::MANTISSA_BITS)?;

		let scale = u8::try_from(header >> 1)
			.ok()
			.filter(|scale| *scale <= Decimal::MAX_SCALE)
			.ok_or(DecodeError::at(ErrorKind::InvalidDecimal { reason: "scale above 28" }, start))?;

		// Bounded by MANTISSA_BITS, so the magnitude always fits.
		let mantissa = magnitude as i128;
		let mantissa = if header & 1 == 1 { -mantissa } else { mantissa };

		Decimal::new(mantissa, scale).ok_or(DecodeError::at(ErrorKind::InvalidDecimal { reason: "mantissa out of range" }, start))
	}

	/// Read a varint byte-count prefix followed by that many UTF-8 bytes.
	pub fn read_string(&mut self, max_len: usize) -> Result<&'a str> {
		let start = self.pos;
		let len = self.read_varint()?;
		let len = i32::try_from(len)
			.ok()
			.and_then(|len| usize::try_from(len).ok())
			.ok_or(DecodeError::at(ErrorKind::InvalidLength { len }, start))?;
		if len > max_len {
			return Err(DecodeError::at(ErrorKind::StringTooLong { len, max: max_len }, start));
		}

		let at = self.pos;
		let bytes = self.read_exact(len)?;
		std::str::from_utf8(bytes).map_err(|_| DecodeError::at(ErrorKind::InvalidUtf8, at))
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}
}

#[cfg(test)]
mod tests;

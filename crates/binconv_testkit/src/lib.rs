//! Shared test helpers: fixture loading and a wire encoder.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// One decode case: descriptor, encoded input, and expected JSON rendering.
#[derive(Debug, Deserialize)]
pub struct Fixture {
	/// Descriptor in its serde JSON form.
	pub descriptor: serde_json::Value,
	/// Encoded input as hex.
	pub hex: String,
	/// Expected `Value::to_json` output.
	pub expected: serde_json::Value,
}

impl Fixture {
	/// Decode the hex input.
	pub fn bytes(&self) -> Vec<u8> {
		hex::decode(&self.hex).expect("fixture hex is valid")
	}
}

/// Load `fixtures/<name>`.
pub fn load_fixture(name: &str) -> Fixture {
	let path = fixture_path(name);
	let text = std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
	serde_json::from_str(&text).unwrap_or_else(|err| panic!("parse {}: {err}", path.display()))
}

/// Test-side encoder producing the wire format the decoder consumes.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
	buf: Vec<u8>,
}

impl WireWriter {
	/// Empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a varint carrying the full 64-bit pattern.
	pub fn varint(mut self, value: u64) -> Self {
		put_varint(&mut self.buf, u128::from(value));
		self
	}

	/// Append a signed integer as its two's complement varint.
	pub fn int(self, value: i64) -> Self {
		self.varint(value as u64)
	}

	/// Append a raw little-endian `f32`.
	pub fn f32(mut self, value: f32) -> Self {
		self.buf.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a raw little-endian `f64`.
	pub fn f64(mut self, value: f64) -> Self {
		self.buf.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a byte-count-prefixed UTF-8 string.
	pub fn string(self, value: &str) -> Self {
		self.varint(value.len() as u64).raw(value.as_bytes())
	}

	/// Append a compact decimal `mantissa * 10^-scale`.
	pub fn decimal(mut self, mantissa: i128, scale: u8) -> Self {
		let header = (u64::from(scale) << 1) | u64::from(mantissa < 0);
		put_varint(&mut self.buf, u128::from(header));
		put_varint(&mut self.buf, mantissa.unsigned_abs());
		self
	}

	/// Append bytes verbatim.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.buf.extend_from_slice(bytes);
		self
	}

	/// Take the encoded bytes.
	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

/// Varint encoding of `value`.
pub fn varint(value: u64) -> Vec<u8> {
	WireWriter::new().varint(value).finish()
}

fn put_varint(buf: &mut Vec<u8>, mut value: u128) {
	loop {
		let byte = (value & 0x7F) as u8;
		value >>= 7;
		if value == 0 {
			buf.push(byte);
			return;
		}
		buf.push(byte | 0x80);
	}
}

#[cfg(test)]
mod tests {
	use super::{WireWriter, varint};

	#[test]
	fn varint_groups_are_least_significant_first() {
		assert_eq!(varint(0), [0x00]);
		assert_eq!(varint(127), [0x7F]);
		assert_eq!(varint(300), [0xAC, 0x02]);
		assert_eq!(varint(u64::MAX).len(), 10);
	}

	#[test]
	fn string_is_length_prefixed() {
		assert_eq!(WireWriter::new().string("abc").finish(), [0x03, b'a', b'b', b'c']);
	}
}

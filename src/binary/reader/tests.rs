use binconv_testkit::{WireWriter, varint};

use super::{MAX_VARINT_LEN, Reader};
use crate::binary::ErrorKind;

#[test]
fn varint_accumulates_low_groups_first() {
	let bytes = [0x00, 0x7F, 0x80, 0x01, 0xAC, 0x02];
	let mut reader = Reader::new(&bytes);
	assert_eq!(reader.read_varint().expect("zero"), 0);
	assert_eq!(reader.read_varint().expect("127"), 127);
	assert_eq!(reader.read_varint().expect("128"), 128);
	assert_eq!(reader.read_varint().expect("300"), 300);
	assert_eq!(reader.remaining(), 0);
	assert_eq!(reader.pos(), bytes.len());
}

#[test]
fn varint_full_width_values() {
	let bytes = varint(u64::MAX);
	assert_eq!(bytes.len(), MAX_VARINT_LEN);
	assert_eq!(Reader::new(&bytes).read_varint_u64().expect("u64 max"), u64::MAX);
	assert_eq!(Reader::new(&bytes).read_varint().expect("as i64"), -1);

	let bytes = WireWriter::new().int(i64::MIN).finish();
	assert_eq!(Reader::new(&bytes).read_varint().expect("i64 min"), i64::MIN);
}

#[test]
fn varint_eleventh_byte_is_malformed() {
	let mut bytes = vec![0x80; MAX_VARINT_LEN];
	bytes.push(0x00);
	let err = Reader::new(&bytes).read_varint().expect_err("too long");
	assert_eq!(err.kind(), &ErrorKind::MalformedVarint);
	assert_eq!(err.offset(), Some(0));
}

#[test]
fn varint_tenth_byte_overflow_is_malformed() {
	let mut bytes = vec![0xFF; MAX_VARINT_LEN - 1];
	bytes.push(0x02);
	let err = Reader::new(&bytes).read_varint().expect_err("bit 64 set");
	assert_eq!(err.kind(), &ErrorKind::MalformedVarint);
}

#[test]
fn varint_cut_mid_group_is_truncated() {
	let mut reader = Reader::new(&[0x05, 0xAC]);
	assert_eq!(reader.read_varint().expect("first"), 5);
	let err = reader.read_varint().expect_err("continuation without next byte");
	assert_eq!(err.kind(), &ErrorKind::Truncated { need: 1, rem: 0 });
	assert_eq!(err.offset(), Some(2));
}

#[test]
fn floats_are_little_endian() {
	let mut reader = Reader::new(&[0x00, 0x00, 0xC0, 0x3F, 0, 0, 0, 0, 0, 0, 0xF0, 0xBF]);
	assert_eq!(reader.read_f32().expect("f32"), 1.5);
	assert_eq!(reader.read_f64().expect("f64"), -1.0);

	let err = Reader::new(&[0x00, 0x00]).read_f32().expect_err("short");
	assert_eq!(err.kind(), &ErrorKind::Truncated { need: 4, rem: 2 });
}

#[test]
fn string_reads_prefixed_utf8() {
	let bytes = WireWriter::new().string("héllo").string("").finish();
	let mut reader = Reader::new(&bytes);
	assert_eq!(reader.read_string(64).expect("first"), "héllo");
	assert_eq!(reader.read_string(64).expect("empty"), "");
	assert_eq!(reader.remaining(), 0);
}

#[test]
fn string_rejects_bad_utf8() {
	let bytes = WireWriter::new().varint(2).raw(&[0xC3, 0x28]).finish();
	let err = Reader::new(&bytes).read_string(64).expect_err("invalid utf-8");
	assert_eq!(err.kind(), &ErrorKind::InvalidUtf8);
	assert_eq!(err.offset(), Some(1));
}

#[test]
fn string_rejects_negative_length() {
	let bytes = WireWriter::new().int(-1).finish();
	let err = Reader::new(&bytes).read_string(64).expect_err("negative");
	assert_eq!(err.kind(), &ErrorKind::InvalidLength { len: -1 });
}

#[test]
fn string_length_checked_before_reading() {
	let bytes = WireWriter::new().varint(1_000).finish();
	let err = Reader::new(&bytes).read_string(16).expect_err("over limit");
	assert_eq!(err.kind(), &ErrorKind::StringTooLong { len: 1_000, max: 16 });

	let err = Reader::new(&bytes).read_string(usize::MAX).expect_err("payload missing");
	assert_eq!(err.kind(), &ErrorKind::Truncated { need: 1_000, rem: 0 });
}

#[test]
fn compact_decimal_reads_sign_scale_and_magnitude() {
	let bytes = WireWriter::new().decimal(1234, 2).decimal(-7, 0).finish();
	let mut reader = Reader::new(&bytes);

	let first = reader.read_compact_decimal().expect("first");
	assert_eq!((first.mantissa(), first.scale()), (1234, 2));
	let second = reader.read_compact_decimal().expect("second");
	assert_eq!((second.mantissa(), second.scale()), (-7, 0));
}

#[test]
fn compact_decimal_accepts_96_bit_magnitude() {
	let max = (1_i128 << 96) - 1;
	let bytes = WireWriter::new().decimal(max, 28).finish();
	let value = Reader::new(&bytes).read_compact_decimal().expect("max magnitude");
	assert_eq!(value.mantissa(), max);

	let bytes = WireWriter::new().decimal(1_i128 << 96, 0).finish();
	let err = Reader::new(&bytes).read_compact_decimal().expect_err("97 bits");
	assert_eq!(err.kind(), &ErrorKind::MalformedVarint);
}

#[test]
fn compact_decimal_rejects_large_scale() {
	let bytes = WireWriter::new().decimal(1, 29).finish();
	let err = Reader::new(&bytes).read_compact_decimal().expect_err("scale 29");
	assert_eq!(err.kind(), &ErrorKind::InvalidDecimal { reason: "scale above 28" });
	assert_eq!(err.offset(), Some(0));
}

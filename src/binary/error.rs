use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Failure of one decode call, located by field path and byte offset.
#[derive(Debug, Error)]
#[error("{kind} (at {location})", location = render_location(.path, .offset))]
pub struct DecodeError {
	/// What went wrong.
	#[source]
	kind: ErrorKind,
	/// Dotted path of the field being decoded, empty at the root.
	path: String,
	/// Byte offset where the failing read started, when one was in progress.
	offset: Option<usize>,
}

/// Categories of decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
	/// Not enough bytes remained for a requested read.
	#[error("truncated input: need {need} bytes, remaining {rem}")]
	Truncated {
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Decoded integer does not fit the target width or signedness.
	#[error("value {value} out of range for {target}")]
	RangeOverflow {
		/// Target type name.
		target: &'static str,
		/// Raw decoded value.
		value: i64,
	},
	/// Descriptor names a shape the decoder does not handle.
	#[error("unsupported shape: {shape}")]
	UnsupportedShape {
		/// Shape name.
		shape: String,
	},
	/// Composite nesting exceeded the configured limit.
	#[error("nesting too deep (max={max_depth})")]
	NestingTooDeep {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Varint ran past its maximum length or overflowed its width.
	#[error("malformed varint")]
	MalformedVarint,
	/// String length prefix was negative or beyond `i32::MAX`.
	#[error("invalid string length {len}")]
	InvalidLength {
		/// Decoded length prefix.
		len: i64,
	},
	/// String length prefix exceeded the configured limit.
	#[error("string too long: len={len}, max={max}")]
	StringTooLong {
		/// Declared byte length.
		len: usize,
		/// Maximum permitted byte length.
		max: usize,
	},
	/// String payload is not valid UTF-8.
	#[error("string payload is not valid utf-8")]
	InvalidUtf8,
	/// Compact decimal header or magnitude is out of range.
	#[error("invalid decimal: {reason}")]
	InvalidDecimal {
		/// What was wrong with the encoding.
		reason: &'static str,
	},
	/// Strict mode found bytes after the top-level value.
	#[error("trailing bytes after value: leftover={leftover}")]
	TrailingBytes {
		/// Unconsumed bytes.
		leftover: usize,
	},
	/// Decoded value kind differs from the one the target type expects.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected value kind.
		expected: &'static str,
		/// Actual value kind.
		got: &'static str,
	},
	/// Decoded record ran out of fields before the target type did.
	#[error("missing field {field}")]
	MissingField {
		/// Field the target type expected next.
		field: String,
	},
	/// Decoded record field does not line up with the target type's field.
	#[error("field mismatch: expected {expected}, got {got}")]
	FieldMismatch {
		/// Field the target type expected next.
		expected: String,
		/// Field actually present at that position.
		got: String,
	},
}

impl DecodeError {
	/// Build an error raised by a read starting at `offset`.
	pub fn at(kind: ErrorKind, offset: usize) -> Self {
		Self {
			kind,
			path: String::new(),
			offset: Some(offset),
		}
	}

	/// Build an error raised outside any byte read.
	pub fn detached(kind: ErrorKind) -> Self {
		Self {
			kind,
			path: String::new(),
			offset: None,
		}
	}

	/// Prefix the field path with an enclosing field name.
	pub fn within(mut self, field: &str) -> Self {
		self.path = if self.path.is_empty() {
			field.to_owned()
		} else {
			format!("{field}.{}", self.path)
		};
		self
	}

	/// Failure category.
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Dotted field path, empty when the failure is at the root.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Byte offset of the failing read, if any.
	pub fn offset(&self) -> Option<usize> {
		self.offset
	}
}

fn render_location(path: &str, offset: &Option<usize>) -> String {
	let path = if path.is_empty() { "<root>" } else { path };
	match *offset {
		Some(offset) => format!("{path}, offset {offset}"),
		None => path.to_owned(),
	}
}

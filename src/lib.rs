//! Decoder for a compact, descriptor-driven binary object format.
//!
//! Values are laid out without tags: integers as 7-bit varints, floats as raw
//! little-endian words, strings with a varint byte-count prefix, and records as
//! the plain concatenation of their fields in declared order.

/// Wire reader, type descriptors, and the descriptor-driven decoder.
pub mod binary;

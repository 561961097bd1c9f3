//! The bitstream module forms the I/O subsystem that both codecs sit on.
//!
//! - bit: a single binary digit.
//! - byte: an 8 bit container with integer and per-position bit access, plus byte/bit helpers.
//! - bitreader: reads a byte source a bit (or a byte) at a time, buffering one byte.
//! - bitwriter: writes bits and bytes to a byte sink, buffering one byte.
//!
//! All bit ordering is most significant bit first.
//!
pub mod bit;
pub mod bitreader;
pub mod bitwriter;
pub mod byte;

//! BitReader: reads a byte source one bit at a time.
//!
//! The reader buffers exactly one source byte. Bits are handed out most significant
//! first; once the least significant bit is consumed the next byte is fetched
//! immediately. When the source is exhausted no byte is buffered and every read
//! reports end of input (None) without failing.
//!
//! NOTE: The source is read one byte per call. Wrap files in a BufReader.
//!

use std::io::{self, Read};

use log::trace;

use super::bit::Bit;
use super::byte::{Byte, MAX_POSITION, NUMBER_OF_BITS};
use crate::error::{CodecError, Result};

/// Reads bits and bytes from any source that supports read().
#[derive(Debug)]
pub struct BitReader<R> {
    source: R,
    /// Byte currently being handed out. None once the source is exhausted.
    buffer: Option<Byte>,
    /// Position of the next bit in the buffer (7 = most significant). Only valid while buffered.
    position: usize,
    /// Set once the first byte has been requested.
    started: bool,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: None,
            position: MAX_POSITION,
            started: false,
        }
    }

    /// Pull the next byte from the source into the buffer, or empty the buffer at end of input.
    fn fetch(&mut self) -> Result<()> {
        self.started = true;
        let mut byte = [0_u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => {
                    self.buffer = None;
                    return Ok(());
                }
                Ok(_) => {
                    self.buffer = Some(Byte::from(byte[0]));
                    self.position = MAX_POSITION;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Return the next bit, or None if there is no more data to read.
    pub fn read_bit(&mut self) -> Result<Option<Bit>> {
        // Nothing buffered: either we have not started or the last fetch found the end.
        if self.buffer.is_none() {
            self.fetch()?;
        }
        let byte = match self.buffer {
            Some(byte) => byte,
            None => return Ok(None),
        };
        let bit = byte.get(self.position)?;
        if self.position == 0 {
            self.fetch()?;
        } else {
            self.position -= 1;
        }
        Ok(Some(bit))
    }

    /// Return the next 8 bits as a byte, or None if no bit at all was available.
    ///
    /// If the input ends part way through, the missing low order bits are zero.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut value = 0_u8;
        for i in 0..NUMBER_OF_BITS {
            match self.read_bit()? {
                Some(bit) => value = value << 1 | bit.value(),
                None if i == 0 => return Ok(None),
                None => {
                    trace!("Partial byte: {} of {} bits read", i, NUMBER_OF_BITS);
                    return Ok(Some(value << (NUMBER_OF_BITS - i)));
                }
            }
        }
        Ok(Some(value))
    }

    /// Fill `buf` with bytes. Returns None if nothing could be read, otherwise the
    /// number of bytes read (short at end of input).
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<Option<usize>> {
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.read_byte()? {
                Some(byte) => *slot = byte,
                None if i == 0 => return Ok(None),
                None => return Ok(Some(i)),
            }
        }
        Ok(Some(buf.len()))
    }

    /// Read a 32 bit big endian word, bit by bit.
    ///
    /// Unlike read_byte there is no zero fill: fewer than 32 remaining bits is an
    /// UnexpectedEndOfStream error.
    pub fn read_u32(&mut self) -> Result<u32> {
        let mut word = 0_u32;
        for _ in 0..u32::BITS {
            let bit = self.read_bit()?.ok_or(CodecError::UnexpectedEndOfStream)?;
            word = word << 1 | u32::from(bit.value());
        }
        Ok(word)
    }

    /// Debugging function. Report the buffered byte and bit position.
    pub fn loc(&self) -> String {
        match (self.started, self.buffer) {
            (false, _) => "[start]".to_string(),
            (true, None) => "[eof]".to_string(),
            (true, Some(byte)) => format!("[{:08b}.{}]", byte.value(), self.position),
        }
    }

    /// Release the reader, returning the underlying source. Dropping the source closes it.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Read for BitReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_bytes(buf) {
            Ok(read) => Ok(read.unwrap_or(0)),
            Err(CodecError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }
}

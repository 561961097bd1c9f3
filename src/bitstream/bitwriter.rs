//! BitWriter: writes a bitstream to any sink that supports write().
//!
//! Bits are collected most significant first in a one byte buffer. The buffer goes to
//! the sink as soon as its last bit is set, or (partially filled, low bits zero) on flush.
//! Closing flushes and then releases the sink; any later write fails with ClosedStream.
//!

use std::io::{self, Write};

use log::{trace, warn};

use super::bit::Bit;
use super::byte::{Byte, MAX_POSITION};
use crate::error::{CodecError, Result};

pub struct BitWriter<W: Write> {
    /// Handle to the output. None once the writer is closed.
    sink: Option<W>,
    /// Byte being assembled.
    buffer: Byte,
    /// Position of the next bit to set (7 = most significant).
    position: usize,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Some(sink),
            buffer: Byte::default(),
            position: MAX_POSITION,
        }
    }

    /// True if the buffer holds bits that have not reached the sink yet.
    fn is_pending(&self) -> bool {
        self.position < MAX_POSITION
    }

    /// Number of bits sitting in the buffer (0-7).
    pub fn pending_bits(&self) -> usize {
        MAX_POSITION - self.position
    }

    /// Push the (possibly partial) buffered byte to the sink and start a fresh buffer.
    fn flush_buffer(&mut self) -> Result<()> {
        if !self.is_pending() {
            return Ok(());
        }
        let sink = self.sink.as_mut().ok_or(CodecError::ClosedStream)?;
        sink.write_all(&[self.buffer.value()])?;
        self.buffer = Byte::default();
        self.position = MAX_POSITION;
        Ok(())
    }

    /// Put one bit on the stream.
    pub fn write_bit(&mut self, bit: Bit) -> Result<()> {
        if self.sink.is_none() {
            return Err(CodecError::ClosedStream);
        }
        self.buffer.set(self.position, bit)?;
        if self.position == 0 {
            // The buffer just filled up, so it goes straight to the sink.
            let sink = self.sink.as_mut().ok_or(CodecError::ClosedStream)?;
            sink.write_all(&[self.buffer.value()])?;
            self.buffer = Byte::default();
            self.position = MAX_POSITION;
        } else {
            self.position -= 1;
        }
        Ok(())
    }

    /// Put a byte value (0-255) on the stream, most significant bit first.
    pub fn write_byte(&mut self, value: i32) -> Result<()> {
        let byte = Byte::new(value)?;
        for bit in byte.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Put a sequence of bits on the stream.
    pub fn write_bits(&mut self, bits: &[Bit]) -> Result<()> {
        bits.iter().try_for_each(|&bit| self.write_bit(bit))
    }

    /// Put a 32 bit word on the stream, big endian.
    pub fn write_u32(&mut self, word: u32) -> Result<()> {
        word.to_be_bytes()
            .iter()
            .try_for_each(|&b| self.write_byte(b as i32))
    }

    /// Write out any partial byte (low bits zero) and flush the sink.
    pub fn flush(&mut self) -> Result<()> {
        if self.is_pending() {
            trace!("Flushing {} pending bits", self.pending_bits());
        }
        self.flush_buffer()?;
        match self.sink.as_mut() {
            Some(sink) => Ok(sink.flush()?),
            None => Err(CodecError::ClosedStream),
        }
    }

    /// Flush, then release the sink. Closing twice is harmless.
    pub fn close(&mut self) -> Result<()> {
        if self.sink.is_none() {
            return Ok(());
        }
        let flushed = self.flush();
        // Drop the sink even if the flush failed.
        self.sink = None;
        flushed
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Flush and hand back the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        self.sink.take().ok_or(CodecError::ClosedStream)
    }
}

impl<W: Write> Write for BitWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &b in buf {
            self.write_byte(b as i32).map_err(into_io)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        BitWriter::flush(self).map_err(into_io)
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            if let Err(e) = self.close() {
                warn!("BitWriter dropped with an unflushed buffer: {}", e);
            }
        }
    }
}

fn into_io(e: CodecError) -> io::Error {
    match e {
        CodecError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}

//! Bit-level run-length encoding.
//!
//! The compressed stream is a sequence of (1 bit value, 1 byte count) pairs. Counts run
//! from 1 to 127, so the top bit of every count byte is zero; longer runs are split
//! into several pairs.

use std::io::{Read, Write};

use log::{debug, trace};

use super::{Compressor, Decompressor};
use crate::bitstream::bit::Bit;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::error::Result;

/// Longest run a single pair can hold (7 bit count).
pub const MAX_COUNT: u8 = (1 << 7) - 1;

pub struct RleCompressor<R, W: Write> {
    input: BitReader<R>,
    output: BitWriter<W>,
    /// Bit that ended the previous run and has not been encoded yet.
    pending: Option<Bit>,
}

impl<R: Read, W: Write> RleCompressor<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::from_bitstreams(BitReader::new(input), BitWriter::new(output))
    }

    /// Use already wrapped streams instead of wrapping them again.
    pub fn from_bitstreams(input: BitReader<R>, output: BitWriter<W>) -> Self {
        Self {
            input,
            output,
            pending: None,
        }
    }

    /// Count the run of `bit` that starts with an already consumed bit.
    ///
    /// The bit that stops the run (a different bit, or the bit read after the count hit
    /// MAX_COUNT) is kept as the next bit to encode. None is kept at end of input.
    pub fn bit_count(&mut self, bit: Bit) -> Result<u8> {
        let mut count = 1;
        loop {
            let next = self.input.read_bit()?;
            match next {
                Some(b) if b == bit && count < MAX_COUNT => count += 1,
                _ => {
                    self.pending = next;
                    return Ok(count);
                }
            }
        }
    }

    fn next_bit(&mut self) -> Result<Option<Bit>> {
        match self.pending.take() {
            Some(bit) => Ok(Some(bit)),
            None => self.input.read_bit(),
        }
    }

    /// Flush and release both streams.
    pub fn close(mut self) -> Result<()> {
        self.output.close()
    }
}

impl<R: Read, W: Write> Compressor for RleCompressor<R, W> {
    fn compress(&mut self) -> Result<()> {
        let mut pairs = 0_usize;
        while let Some(bit) = self.next_bit()? {
            let count = self.bit_count(bit)?;
            trace!("Run of {} x {}", count, bit);
            self.output.write_bit(bit)?;
            self.output.write_byte(count as i32)?;
            pairs += 1;
        }
        debug!("RLE wrote {} pairs", pairs);
        self.output.flush()
    }
}

pub struct RleDecompressor<R, W: Write> {
    input: BitReader<R>,
    output: BitWriter<W>,
}

impl<R: Read, W: Write> RleDecompressor<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::from_bitstreams(BitReader::new(input), BitWriter::new(output))
    }

    pub fn from_bitstreams(input: BitReader<R>, output: BitWriter<W>) -> Self {
        Self { input, output }
    }

    /// Write `bit` to the output `count` times.
    pub fn write_run(&mut self, count: u8, bit: Bit) -> Result<()> {
        (0..count).try_for_each(|_| self.output.write_bit(bit))
    }

    pub fn close(mut self) -> Result<()> {
        self.output.close()
    }
}

impl<R: Read, W: Write> Decompressor for RleDecompressor<R, W> {
    fn decompress(&mut self) -> Result<()> {
        loop {
            let bit = match self.input.read_bit()? {
                Some(bit) => bit,
                None => break,
            };
            let count = match self.input.read_byte()? {
                Some(count) => count,
                None => break,
            };
            trace!("Expanding {} x {}", count, bit);
            self.write_run(count, bit)?;
        }
        self.output.flush()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitstream::byte::{to_binary_string, to_bits};

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut c = RleCompressor::new(data, &mut out);
        c.compress().unwrap();
        c.close().unwrap();
        out
    }

    fn decompress(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut d = RleDecompressor::new(data, &mut out);
        d.decompress().unwrap();
        d.close().unwrap();
        out
    }

    /// Read back (value, count) pairs from compressed bytes.
    fn pairs(data: &[u8]) -> Vec<(u8, u8)> {
        let mut br = BitReader::new(data);
        let mut out = vec![];
        while let (Some(bit), Some(count)) = (br.read_bit().unwrap(), br.read_byte().unwrap()) {
            if count == 0 {
                break;
            }
            out.push((bit.value(), count));
        }
        out
    }

    #[test]
    fn short_runs_test() {
        // 11100 then 000 padding to fill the byte: a run of 3 ones and 5 zeros.
        let out = compress(&[0b1110_0000]);
        assert_eq!(pairs(&out), vec![(1, 3), (0, 5)]);
        assert_eq!(to_binary_string(&out), "100000011000000101000000");
    }

    #[test]
    fn bit_count_keeps_leftover_test() {
        let data = [0b1110_0000_u8];
        let mut out = Vec::new();
        let mut c = RleCompressor::new(data.as_slice(), &mut out);
        let first = c.input.read_bit().unwrap().unwrap();
        assert_eq!(c.bit_count(first).unwrap(), 3);
        assert_eq!(c.pending, Some(Bit::Zero));
        assert_eq!(c.bit_count(Bit::Zero).unwrap(), 5);
        assert_eq!(c.pending, None);
    }

    #[test]
    fn run_cap_test() {
        // 300 one bits are not a whole number of bytes, so pad with zero bits.
        let mut bits = vec![Bit::One; 300];
        bits.extend([Bit::Zero; 4]);
        let mut data = Vec::new();
        {
            let mut bw = BitWriter::new(&mut data);
            bw.write_bits(&bits).unwrap();
        }
        assert_eq!(data.len(), 38);
        let out = compress(&data);
        assert_eq!(pairs(&out), vec![(1, 127), (1, 127), (1, 46), (0, 4)]);
    }

    #[test]
    fn count_never_exceeds_cap_test() {
        let data = vec![0_u8; 100];
        let out = compress(&data);
        let p = pairs(&out);
        assert!(p.iter().all(|&(_, c)| c <= MAX_COUNT));
        assert_eq!(p.iter().map(|&(_, c)| c as usize).sum::<usize>(), 800);
    }

    #[test]
    fn empty_test() {
        assert!(compress(&[]).is_empty());
        assert!(decompress(&[]).is_empty());
    }

    #[test]
    fn round_trip_test() {
        let data = b"Hello, world! \x00\x00\x00\xff\xff\xff\x0f\xf0";
        let out = decompress(&compress(data));
        assert_eq!(out, data.to_vec());
        assert_eq!(to_bits(&out), to_bits(data));
    }
}

//! Huffman container: a self-describing compressed text stream.
//!
//! Layout, most significant bit first:
//!
//! ```text
//! [1 byte: fill bit count P]
//! [P zero fill bits]
//! [tree header, pre-order: leaf = 1 + 32 bit code point, internal = 0 + left + right]
//! [payload: the code of every character of the text, in order]
//! ```
//!
//! The fill bits sit right after the count byte, so the payload always ends exactly on
//! the last byte boundary. Decoding stops when the stream ends at a code boundary; a
//! stream that ends inside a code is corrupt. An empty text compresses to an empty stream.

use std::io::{Read, Write};

use log::{debug, trace};

use super::{Compressor, Decompressor};
use crate::bitstream::bit::Bit;
use crate::bitstream::bitreader::BitReader;
use crate::bitstream::bitwriter::BitWriter;
use crate::bitstream::byte::missing_bits;
use crate::error::{CodecError, Result};
use crate::huffman_coding::encoding_table::EncodingTable;
use crate::huffman_coding::huffman::build_encoding_table;
use crate::tools::freq_count::build_frequency_table;

pub struct HuffmanCompressor<R, W: Write> {
    input: R,
    output: BitWriter<W>,
}

impl<R: Read, W: Write> HuffmanCompressor<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::from_bitwriter(input, BitWriter::new(output))
    }

    pub fn from_bitwriter(input: R, output: BitWriter<W>) -> Self {
        Self { input, output }
    }

    /// Read the whole input as UTF-8 text.
    pub fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        self.input.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Fill bits needed so that header plus payload end on a byte boundary.
    pub fn fill_bit_count(&self, text: &str, table: &EncodingTable) -> Result<usize> {
        Ok(missing_bits(table.header_size() + table.text_size(text)?))
    }

    /// Write `count` zero bits.
    pub fn fill_bits(&mut self, count: usize) -> Result<()> {
        (0..count).try_for_each(|_| self.output.write_bit(Bit::Zero))
    }

    /// Write the code of every character, in order.
    pub fn encode_text(&mut self, text: &str, table: &EncodingTable) -> Result<()> {
        for c in text.chars() {
            for code_bit in table.get_code(c)?.chars() {
                self.output.write_bit(Bit::from(code_bit == '1'))?;
            }
        }
        Ok(())
    }

    pub fn close(mut self) -> Result<()> {
        self.output.close()
    }
}

impl<R: Read, W: Write> Compressor for HuffmanCompressor<R, W> {
    fn compress(&mut self) -> Result<()> {
        let text = self.read_text()?;
        if text.is_empty() {
            debug!("Empty input, nothing to compress");
            return self.output.flush();
        }

        let frequency = build_frequency_table(&text);
        let table = build_encoding_table(&frequency)?;
        let header_bits = table.header_size();
        let text_bits = table.text_size(&text)?;
        let fill = missing_bits(header_bits + text_bits);
        debug!(
            "{} distinct characters, header {} bits, payload {} bits, {} fill bits",
            frequency.len(),
            header_bits,
            text_bits,
            fill
        );
        trace!("Codes: {}", table);

        self.output.write_byte(fill as i32)?;
        self.fill_bits(fill)?;
        table.write_header(&mut self.output)?;
        self.encode_text(&text, &table)?;
        self.output.flush()
    }
}

pub struct HuffmanDecompressor<R, W: Write> {
    input: BitReader<R>,
    output: W,
}

impl<R: Read, W: Write> HuffmanDecompressor<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::from_bitreader(BitReader::new(input), output)
    }

    pub fn from_bitreader(input: BitReader<R>, output: W) -> Self {
        Self { input, output }
    }

    /// Read the fill count and skip that many bits. Returns false on an empty stream.
    pub fn skip_bits(&mut self) -> Result<bool> {
        let fill = match self.input.read_byte()? {
            Some(fill) => fill,
            None => return Ok(false),
        };
        trace!("Skipping {} fill bits", fill);
        for _ in 0..fill {
            self.input
                .read_bit()?
                .ok_or(CodecError::UnexpectedEndOfStream)?;
        }
        Ok(true)
    }

    /// Decode characters until the stream ends at a code boundary.
    pub fn decode_text(&mut self, table: &EncodingTable) -> Result<usize> {
        let mut count = 0;
        let mut utf8 = [0_u8; 4];
        while let Some(c) = table.decode_next(&mut self.input)? {
            self.output.write_all(c.encode_utf8(&mut utf8).as_bytes())?;
            count += 1;
        }
        Ok(count)
    }

    pub fn close(mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}

impl<R: Read, W: Write> Decompressor for HuffmanDecompressor<R, W> {
    fn decompress(&mut self) -> Result<()> {
        if self.skip_bits()? {
            let table = EncodingTable::read_header(&mut self.input)?;
            debug!(
                "Read tree header with {} leaves",
                table.root().leaf_count()
            );
            let count = self.decode_text(&table)?;
            debug!("Decoded {} characters", count);
        } else {
            debug!("Empty input, nothing to decompress");
        }
        self.output.flush()?;
        Ok(())
    }
}

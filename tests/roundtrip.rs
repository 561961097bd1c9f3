use bitpress::bitstream::bitreader::BitReader;
use bitpress::compression::huffman::{HuffmanCompressor, HuffmanDecompressor};
use bitpress::compression::rle::{RleCompressor, RleDecompressor, MAX_COUNT};
use bitpress::compression::{Compressor, Decompressor};
use bitpress::huffman_coding::huffman::build_encoding_table;
use bitpress::tools::freq_count::build_frequency_table;
use bitpress::CodecError;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rle_round_trip(data: &[u8]) -> Vec<u8> {
    let mut packed = Vec::new();
    let mut c = RleCompressor::new(data, &mut packed);
    c.compress().unwrap();
    c.close().unwrap();

    let mut unpacked = Vec::new();
    let mut d = RleDecompressor::new(packed.as_slice(), &mut unpacked);
    d.decompress().unwrap();
    d.close().unwrap();
    unpacked
}

fn huffman_compress(text: &str) -> Vec<u8> {
    let mut packed = Vec::new();
    let mut c = HuffmanCompressor::new(text.as_bytes(), &mut packed);
    c.compress().unwrap();
    c.close().unwrap();
    packed
}

fn huffman_decompress(packed: &[u8]) -> Result<String, CodecError> {
    let mut unpacked = Vec::new();
    let mut d = HuffmanDecompressor::new(packed, &mut unpacked);
    d.decompress()?;
    d.close()?;
    Ok(String::from_utf8(unpacked).unwrap())
}

#[test]
fn rle_random_bytes() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for len in [0, 1, 2, 7, 8, 9, 63, 64, 65, 500] {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        assert_eq!(rle_round_trip(&data), data, "length {}", len);
    }
}

#[test]
fn rle_long_runs() {
    let mut data = vec![0xff_u8; 200];
    data.extend(vec![0_u8; 333]);
    data.extend([0x0f, 0xf0, 0xaa]);
    assert_eq!(rle_round_trip(&data), data);
}

#[test]
fn rle_pairs_stay_in_range() {
    let data = vec![0xff_u8; 64];
    let mut packed = Vec::new();
    let mut c = RleCompressor::new(data.as_slice(), &mut packed);
    c.compress().unwrap();
    c.close().unwrap();

    let mut br = BitReader::new(packed.as_slice());
    let mut total = 0;
    while let (Some(_), Some(count)) = (br.read_bit().unwrap(), br.read_byte().unwrap()) {
        assert!(count <= MAX_COUNT);
        total += count as usize;
    }
    assert_eq!(total, 512);
}

#[test]
fn huffman_random_text() {
    let alphabet: Vec<char> = "abcdefghij ÄÖÜß€😀\n".chars().collect();
    let mut rng = StdRng::seed_from_u64(42);
    for len in [1, 2, 3, 10, 100, 1000] {
        let text: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        assert_eq!(huffman_decompress(&huffman_compress(&text)).unwrap(), text);
    }
}

#[test]
fn huffman_every_length_of_a_text() {
    // Covers every fill bit count.
    let source = "she sells sea shells by the sea shore";
    for end in 1..=source.len() {
        let text = &source[..end];
        assert_eq!(huffman_decompress(&huffman_compress(text)).unwrap(), text);
    }
}

#[test]
fn huffman_output_is_byte_aligned_without_trailing_bits() {
    let text = "abracadabra";
    let packed = huffman_compress(text);
    let table = build_encoding_table(&build_frequency_table(text)).unwrap();
    let bits = 8 + packed[0] as usize + table.header_size() + table.text_size(text).unwrap();
    assert_eq!(bits % 8, 0);
    assert_eq!(packed.len() * 8, bits);
}

#[test]
fn huffman_truncated_stream_fails_unless_cut_on_a_code_boundary() {
    for text in ["aaaa", "aab", "abracadabra abracadabra", "she sells sea shells"] {
        let packed = huffman_compress(text);
        let table = build_encoding_table(&build_frequency_table(text)).unwrap();
        let payload_start = 8 + packed[0] as usize + table.header_size();

        // Payload bit offsets where a character ends, paired with the decoded prefix.
        let mut boundaries = vec![(0, String::new())];
        let mut bits = 0;
        let mut prefix = String::new();
        for c in text.chars() {
            bits += table.get_code(c).unwrap().len();
            prefix.push(c);
            boundaries.push((bits, prefix.clone()));
        }

        for len in 1..packed.len() {
            let cut = len * 8;
            let expected = cut
                .checked_sub(payload_start)
                .and_then(|p| boundaries.iter().find(|(b, _)| *b == p))
                .map(|(_, prefix)| prefix.clone());
            match (huffman_decompress(&packed[..len]), expected) {
                (Ok(decoded), Some(prefix)) => {
                    assert_eq!(decoded, prefix, "{:?} cut to {} bytes", text, len)
                }
                (Err(CodecError::UnexpectedEndOfStream), None) => {}
                (result, expected) => panic!(
                    "{:?} cut to {} bytes: got {:?}, expected {:?}",
                    text, len, result, expected
                ),
            }
        }
    }
}

#[test]
fn huffman_rejects_invalid_utf8() {
    let data = [0xff_u8, 0xfe, 0xfd];
    let mut packed = Vec::new();
    let mut c = HuffmanCompressor::new(data.as_slice(), &mut packed);
    assert!(matches!(c.compress(), Err(CodecError::Io(_))));
}

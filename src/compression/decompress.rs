use std::fs::File;
use std::io::{self, BufReader, Read, Write};

use log::{info, warn};

use super::compress::{describe, finish_input, open_output};
use super::huffman::HuffmanDecompressor;
use super::rle::RleDecompressor;
use super::Decompressor;
use crate::error::Result;
use crate::tools::cli::{Algorithm, CodecOpts};

/// Decompress every file named in opts, or stdin to stdout when there are none.
pub fn decompress(opts: &CodecOpts) -> Result<()> {
    if opts.files.is_empty() {
        info!("Decompressing stdin to stdout with {:?}", opts.algorithm);
        return decompress_stream(opts.algorithm, io::stdin().lock(), io::stdout().lock());
    }
    for file in &opts.files {
        decompress_file(opts, file)?;
    }
    Ok(())
}

/// Run the chosen decompressor from `input` to `output`, then close it.
pub fn decompress_stream<R: Read, W: Write>(
    algorithm: Algorithm,
    input: R,
    output: W,
) -> Result<()> {
    match algorithm {
        Algorithm::Rle => {
            let mut codec = RleDecompressor::new(input, output);
            codec.decompress()?;
            codec.close()
        }
        Algorithm::Huffman => {
            let mut codec = HuffmanDecompressor::new(input, output);
            codec.decompress()?;
            codec.close()
        }
    }
}

/// Output name for a compressed file: strip our extension, or append ".out".
pub fn output_name(fname: &str, algorithm: Algorithm) -> String {
    let suffix = format!(".{}", algorithm.extension());
    match fname.strip_suffix(&suffix) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", fname),
    }
}

fn decompress_file(opts: &CodecOpts, fname: &str) -> Result<()> {
    // The file extension wins over the command line choice.
    let algorithm = match Algorithm::from_path(fname) {
        Some(found) => {
            if found != opts.algorithm {
                warn!("{} looks like {:?} data, decoding it as such", fname, found);
            }
            found
        }
        None => opts.algorithm,
    };
    let out_name = output_name(fname, algorithm);
    info!("Decompressing {} to {}", fname, describe(opts.output, &out_name));

    let fin = BufReader::new(File::open(fname)?);
    let f_out = open_output(opts, &out_name)?;
    decompress_stream(algorithm, fin, f_out)?;
    finish_input(opts, fname)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn output_name_test() {
        assert_eq!(output_name("a.txt.huf", Algorithm::Huffman), "a.txt");
        assert_eq!(output_name("a.txt.rle", Algorithm::Rle), "a.txt");
        assert_eq!(output_name("a.bin", Algorithm::Rle), "a.bin.out");
        assert_eq!(output_name(".rle", Algorithm::Rle), ".rle.out");
    }

    #[test]
    fn stream_round_trip_test() {
        let text = "round and round the ragged rock";
        for algorithm in [Algorithm::Rle, Algorithm::Huffman] {
            let mut packed = Vec::new();
            super::super::compress::compress_stream(algorithm, text.as_bytes(), &mut packed)
                .unwrap();
            let mut unpacked = Vec::new();
            decompress_stream(algorithm, packed.as_slice(), &mut unpacked).unwrap();
            assert_eq!(unpacked, text.as_bytes());
        }
    }
}

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info};

use super::huffman::HuffmanCompressor;
use super::rle::RleCompressor;
use super::Compressor;
use crate::error::Result;
use crate::tools::cli::{Algorithm, CodecOpts, Output};

/// Compress every file named in opts, or stdin to stdout when there are none.
pub fn compress(opts: &CodecOpts) -> Result<()> {
    if opts.files.is_empty() {
        info!("Compressing stdin to stdout with {:?}", opts.algorithm);
        return compress_stream(opts.algorithm, io::stdin().lock(), io::stdout().lock());
    }
    for file in &opts.files {
        compress_file(opts, file)?;
    }
    Ok(())
}

/// Run the chosen compressor from `input` to `output`, then close it.
pub fn compress_stream<R: Read, W: Write>(algorithm: Algorithm, input: R, output: W) -> Result<()> {
    match algorithm {
        Algorithm::Rle => {
            let mut codec = RleCompressor::new(input, output);
            codec.compress()?;
            codec.close()
        }
        Algorithm::Huffman => {
            let mut codec = HuffmanCompressor::new(input, output);
            codec.compress()?;
            codec.close()
        }
    }
}

fn compress_file(opts: &CodecOpts, fname: &str) -> Result<()> {
    let out_name = format!("{}.{}", fname, opts.algorithm.extension());
    info!("Compressing {} to {}", fname, describe(opts.output, &out_name));

    let fin = BufReader::new(File::open(fname)?);
    let f_out = open_output(opts, &out_name)?;
    compress_stream(opts.algorithm, fin, f_out)?;

    if opts.output == Output::File {
        report_sizes(fname, &out_name);
    }
    finish_input(opts, fname)
}

/// Open the destination. Refuses to replace an existing file unless forced.
pub(crate) fn open_output(opts: &CodecOpts, out_name: &str) -> Result<Box<dyn Write>> {
    if opts.output == Output::Stdout {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if Path::new(out_name).exists() && !opts.force_overwrite {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("output file {} already exists (use -f to overwrite)", out_name),
        )
        .into());
    }
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(out_name)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Remove the input after a successful run unless asked to keep it.
pub(crate) fn finish_input(opts: &CodecOpts, fname: &str) -> Result<()> {
    if opts.keep_input_files || opts.output == Output::Stdout {
        return Ok(());
    }
    debug!("Removing input file {}", fname);
    fs::remove_file(fname)?;
    Ok(())
}

pub(crate) fn describe(output: Output, out_name: &str) -> String {
    match output {
        Output::File => out_name.to_string(),
        Output::Stdout => "stdout".to_string(),
    }
}

fn report_sizes(fname: &str, out_name: &str) {
    if let (Ok(src), Ok(dst)) = (fs::metadata(fname), fs::metadata(out_name)) {
        info!(
            "{}: {} bytes in, {} bytes out ({:.3} bits/byte)",
            fname,
            src.len(),
            dst.len(),
            if src.len() == 0 {
                0.0
            } else {
                dst.len() as f64 * 8.0 / src.len() as f64
            }
        );
    }
}

use clap::Parser;
use log::LevelFilter;
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the available codecs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// Run-length encoding of bit runs
    Rle,
    /// Huffman coding of UTF-8 text
    Huffman,
}

impl Algorithm {
    /// File extension added on compression and stripped on decompression.
    pub fn extension(&self) -> &'static str {
        match self {
            Algorithm::Rle => "rle",
            Algorithm::Huffman => "huf",
        }
    }

    /// Guess the codec from a compressed file name.
    pub fn from_path(path: &str) -> Option<Algorithm> {
        [Algorithm::Rle, Algorithm::Huffman]
            .into_iter()
            .find(|a| path.ends_with(&format!(".{}", a.extension())))
    }
}

#[derive(Debug)]
pub struct CodecOpts {
    /// Codec used
    pub algorithm: Algorithm,
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl CodecOpts {
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::Huffman,
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
        }
    }
}

impl Default for CodecOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Bit-level run-length and Huffman compression",
    long_about = None)]
pub struct Args {
    /// Files to process. Without files, read stdin and write stdout
    #[clap()]
    files: Vec<String>,

    /// Compress the input (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Use bit run-length encoding
    #[clap(long = "rle", conflicts_with = "huffman")]
    rle: bool,

    /// Use Huffman coding (default)
    #[clap(long = "huffman")]
    huffman: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Keep input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Suppress all log output
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Parse the command line into our internal structure.
pub fn codec_opts_init() -> CodecOpts {
    from_args(Args::parse())
}

/// Copy parsed arguments into CodecOpts.
pub fn from_args(args: Args) -> CodecOpts {
    let mut opts = CodecOpts::new();
    opts.files = args.files;
    if args.decompress {
        opts.op_mode = Mode::Unzip
    };
    if args.rle {
        opts.algorithm = Algorithm::Rle
    };
    if args.stdout {
        opts.output = Output::Stdout
    };
    opts.keep_input_files = args.keep;
    opts.force_overwrite = args.force;
    opts.verbose = match (args.quiet, args.verbose) {
        (true, _) => Verbosity::Quiet,
        (false, 0) => Verbosity::Warnings,
        (false, 1) => Verbosity::Info,
        (false, 2) => Verbosity::Debug,
        (false, _) => Verbosity::Trace,
    };
    opts
}

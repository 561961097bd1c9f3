//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use bitpress::compression::compress::compress;
use bitpress::compression::decompress::decompress;
use bitpress::tools::cli::{codec_opts_init, Mode};

use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> ExitCode {
    let options = codec_opts_init();

    // Available log levels are Off, Error, Warn, Info, Debug, Trace.
    // Logs go to stderr so that compressed data can go to stdout.
    if let Err(e) = TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }

    info!("Operational mode set to {}", options.op_mode);
    info!("Algorithm set to {:?}", options.algorithm);
    info!("Output set to {}", options.output);

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress(&options),
        Mode::Unzip => decompress(&options),
    };

    match result {
        Ok(()) => {
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

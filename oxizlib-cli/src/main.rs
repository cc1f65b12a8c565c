//! OxiZlib CLI - zlib, gzip and raw DEFLATE streams from the command line.

mod commands;
mod utils;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use commands::{cmd_compress, cmd_constants, cmd_decompress};
use oxizlib_core::{Mode, Strategy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oxizlib")]
#[command(author, version, about = "Streaming zlib, gzip and raw DEFLATE utility")]
#[command(long_about = "
OxiZlib drives the system zlib through a chunked stream engine.
Formats: zlib (RFC 1950), gzip (RFC 1952), raw DEFLATE (RFC 1951)

Examples:
  oxizlib compress notes.txt
  oxizlib compress notes.txt --format gzip --level 9
  oxizlib decompress notes.txt.gz --format gzip
  oxizlib compress data.bin --format raw --window-bits 12 --track-allocs --json
  oxizlib constants --json
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        #[command(flatten)]
        stream: StreamArgs,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Print the exposed numeric constants
    Constants {
        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

/// Arguments shared by compression and decompression.
#[derive(Args, Debug, Clone)]
pub struct StreamArgs {
    /// Input file
    pub input: PathBuf,

    /// Output file (derived from the input name if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stream framing
    #[arg(short, long, value_enum, default_value = "zlib")]
    pub format: Format,

    /// Base-two logarithm of the window size
    #[arg(short = 'w', long, default_value_t = 15, value_parser = clap::value_parser!(i32).range(8..=15))]
    pub window_bits: i32,

    /// Size of the output chunk buffer in bytes
    #[arg(long, default_value_t = 16 * 1024)]
    pub chunk_size: usize,

    /// Route codec allocations through a tracking table and report them
    #[arg(long)]
    pub track_allocs: bool,

    /// Output the report as JSON (machine-readable)
    #[arg(short, long)]
    pub json: bool,

    /// Show progress bar
    #[arg(short = 'P', long)]
    pub progress: bool,
}

/// Compressor tuning.
#[derive(Args, Debug, Clone)]
pub struct TuningArgs {
    /// Compression level (-1 selects the codec default)
    #[arg(
        short,
        long,
        default_value_t = -1,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-1..=9)
    )]
    pub level: i32,

    /// Memory used for compression state
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(i32).range(1..=9))]
    pub mem_level: i32,

    /// Compression strategy
    #[arg(short, long, value_enum, default_value = "default")]
    pub strategy: StrategyArg,
}

/// Stream framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// zlib header and Adler-32 trailer
    Zlib,
    /// gzip header and CRC-32 trailer
    Gzip,
    /// Raw DEFLATE bitstream
    Raw,
}

impl Format {
    /// Mode used to compress into this framing.
    pub fn compress_mode(self) -> Mode {
        match self {
            Self::Zlib => Mode::Deflate,
            Self::Gzip => Mode::Gzip,
            Self::Raw => Mode::DeflateRaw,
        }
    }

    /// Mode used to decompress this framing.
    pub fn decompress_mode(self) -> Mode {
        self.compress_mode().inverse()
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zlib => "zz",
            Self::Gzip => "gz",
            Self::Raw => "deflate",
        }
    }
}

/// Compression strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Normal data
    Default,
    /// Data produced by a filter
    Filtered,
    /// Huffman coding only
    HuffmanOnly,
    /// Run-length encoding
    Rle,
    /// Fixed Huffman codes
    Fixed,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Default => Strategy::Default,
            StrategyArg::Filtered => Strategy::Filtered,
            StrategyArg::HuffmanOnly => Strategy::HuffmanOnly,
            StrategyArg::Rle => Strategy::Rle,
            StrategyArg::Fixed => Strategy::Fixed,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Compress { stream, tuning } => cmd_compress(&stream, &tuning),
        Commands::Decompress { stream } => cmd_decompress(&stream),
        Commands::Constants { json } => cmd_constants(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

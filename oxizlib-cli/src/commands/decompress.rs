//! Decompress command implementation.

use super::run_stream;
use crate::StreamArgs;
use crate::utils::{default_output_path, print_report};
use oxizlib_core::StreamOptions;

pub fn cmd_decompress(args: &StreamArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = StreamOptions::new()
        .with_window_bits(args.window_bits)
        .with_chunk_size(args.chunk_size);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, args.format, false));
    if output == args.input {
        return Err("output would overwrite the input file".into());
    }

    let report = run_stream(args.format.decompress_mode(), args, &options, &output)?;
    print_report(&report, args.json)
}

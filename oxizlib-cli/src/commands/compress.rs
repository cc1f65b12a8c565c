//! Compress command implementation.

use super::run_stream;
use crate::utils::{default_output_path, print_report};
use crate::{StreamArgs, TuningArgs};
use oxizlib_core::StreamOptions;

pub fn cmd_compress(
    args: &StreamArgs,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = StreamOptions::new()
        .with_level(tuning.level)
        .with_window_bits(args.window_bits)
        .with_mem_level(tuning.mem_level)
        .with_strategy(tuning.strategy.into())
        .with_chunk_size(args.chunk_size);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, args.format, true));
    if output == args.input {
        return Err("output would overwrite the input file".into());
    }

    let report = run_stream(args.format.compress_mode(), args, &options, &output)?;
    print_report(&report, args.json)
}

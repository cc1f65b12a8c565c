//! Command implementations for OxiZlib CLI.

pub mod compress;
pub mod constants;
pub mod decompress;

pub use compress::cmd_compress;
pub use constants::cmd_constants;
pub use decompress::cmd_decompress;

use crate::StreamArgs;
use crate::utils::{StreamReport, create_progress_bar};
use oxizlib_core::{Mode, StreamOptions};
use oxizlib_stream::{BlockTable, ZlibWriter};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Stream `args.input` into `output` through a fresh `mode` stream.
pub(crate) fn run_stream(
    mode: Mode,
    args: &StreamArgs,
    options: &StreamOptions,
    output: &Path,
) -> Result<StreamReport, Box<dyn std::error::Error>> {
    options.validate()?;

    let input = File::open(&args.input)?;
    let bytes_in = input.metadata()?.len();
    let mut reader = BufReader::new(input);
    let sink = BufWriter::new(File::create(output)?);

    let table = args.track_allocs.then(BlockTable::new);
    let mut writer = match &table {
        Some(table) => ZlibWriter::with_hooks(sink, mode, options, table.clone())?,
        None => ZlibWriter::new(sink, mode, options)?,
    };
    info!(
        mode = mode.name(),
        input = %args.input.display(),
        output = %output.display(),
        "streaming"
    );

    let pb = create_progress_bar(bytes_in, args.progress);
    let mut buf = vec![0u8; options.chunk_size];
    let mut consumed_total = 0u64;
    'read: loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        let mut pending = &buf[..n];
        while !pending.is_empty() {
            let used = writer.feed(pending)?;
            if used == 0 {
                warn!(
                    ignored = pending.len(),
                    "data after the end of the compressed stream ignored"
                );
                break 'read;
            }
            consumed_total += used as u64;
            pending = &pending[used..];
        }
        pb.inc(n as u64);
    }

    let mut sink = writer.finish()?;
    sink.flush()?;
    drop(sink);
    pb.finish_and_clear();

    let bytes_out = fs::metadata(output)?.len();
    Ok(StreamReport {
        mode: mode.name().to_string(),
        input: args.input.display().to_string(),
        output: output.display().to_string(),
        bytes_in: consumed_total,
        bytes_out,
        allocations: table.map(|t| t.stats().into()),
    })
}

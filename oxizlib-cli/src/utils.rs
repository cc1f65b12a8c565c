//! Utility functions for the CLI.

use crate::Format;
use indicatif::{ProgressBar, ProgressStyle};
use oxizlib_stream::AllocStats;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// Output name used when none is given.
///
/// Compression appends the format's extension. Decompression strips it, or
/// appends `.out` when the input does not carry it.
pub fn default_output_path(input: &Path, format: Format, compress: bool) -> PathBuf {
    let ext = format.extension();
    if compress {
        let mut name = OsString::from(input.as_os_str());
        name.push(".");
        name.push(ext);
        return PathBuf::from(name);
    }

    match input.extension() {
        Some(e) if e == ext && input.file_stem().is_some() => input.with_extension(""),
        _ => {
            let mut name = OsString::from(input.as_os_str());
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

/// Allocation counters as reported by `--track-allocs`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AllocReport {
    pub allocations: u64,
    pub frees: u64,
    pub unknown_frees: u64,
    pub live_blocks: usize,
    pub peak_bytes: usize,
}

impl From<AllocStats> for AllocReport {
    fn from(stats: AllocStats) -> Self {
        Self {
            allocations: stats.allocations,
            frees: stats.frees,
            unknown_frees: stats.unknown_frees,
            live_blocks: stats.live_blocks,
            peak_bytes: stats.peak_bytes,
        }
    }
}

/// Outcome of a compress or decompress run.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreamReport {
    pub mode: String,
    pub input: String,
    pub output: String,
    pub bytes_in: u64,
    pub bytes_out: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocations: Option<AllocReport>,
}

impl StreamReport {
    /// Output size as a percentage of input size.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64 * 100.0
        }
    }
}

/// Print a report as text or JSON.
pub fn print_report(report: &StreamReport, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{} -> {} ({})", report.input, report.output, report.mode);
    println!(
        "  {} bytes in, {} bytes out ({:.1}%)",
        report.bytes_in,
        report.bytes_out,
        report.ratio()
    );
    if let Some(allocs) = &report.allocations {
        println!(
            "  {} allocations, {} frees, {} live, peak {} bytes",
            allocs.allocations, allocs.frees, allocs.live_blocks, allocs.peak_bytes
        );
    }
    Ok(())
}

//! End-to-end tests for the `oxizlib` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn oxizlib(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oxizlib"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn sample() -> Vec<u8> {
    (0..4000)
        .flat_map(|i| format!("record {i} lorem ipsum dolor sit amet\n").into_bytes())
        .collect()
}

#[test]
fn test_round_trip_every_format() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.txt");
    fs::write(&input, sample()).unwrap();

    for (format, ext) in [("zlib", "zz"), ("gzip", "gz"), ("raw", "deflate")] {
        let out = oxizlib(&["compress", path_str(&input), "--format", format]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

        let compressed = dir.path().join(format!("data.txt.{ext}"));
        assert!(compressed.exists());
        assert!(fs::metadata(&compressed).unwrap().len() < sample().len() as u64);

        let restored = dir.path().join(format!("restored-{format}.txt"));
        let out = oxizlib(&[
            "decompress",
            path_str(&compressed),
            "--format",
            format,
            "-o",
            path_str(&restored),
        ]);
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
        assert_eq!(fs::read(&restored).unwrap(), sample());
    }
}

#[test]
fn test_gzip_output_readable_by_magic() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("hello.txt");
    fs::write(&input, b"hello\n").unwrap();

    let out = oxizlib(&["compress", path_str(&input), "-f", "gzip", "--level", "9"]);
    assert!(out.status.success());
    let gz = fs::read(dir.path().join("hello.txt.gz")).unwrap();
    assert_eq!(&gz[..2], &[0x1f, 0x8b]);
}

#[test]
fn test_default_decompress_name_strips_extension() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.md");
    fs::write(&input, b"# notes\n").unwrap();

    assert!(oxizlib(&["compress", path_str(&input)]).status.success());
    fs::remove_file(&input).unwrap();
    assert!(oxizlib(&["decompress", path_str(&dir.path().join("notes.md.zz"))]).status.success());
    assert_eq!(fs::read(&input).unwrap(), b"# notes\n");
}

#[test]
fn test_json_report_with_alloc_tracking() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.bin");
    fs::write(&input, sample()).unwrap();

    let out = oxizlib(&[
        "compress",
        path_str(&input),
        "--track-allocs",
        "--json",
        "--level",
        "-1",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["mode"], "deflate");
    assert_eq!(report["bytes_in"], sample().len() as u64);
    let allocs = &report["allocations"];
    assert!(allocs["allocations"].as_u64().unwrap() > 0);
    assert_eq!(allocs["allocations"], allocs["frees"]);
    assert_eq!(allocs["live_blocks"], 0);
}

#[test]
fn test_constants_json() {
    let out = oxizlib(&["constants", "--json"]);
    assert!(out.status.success());
    let constants: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(constants["Z_FINISH"], 4);
    assert_eq!(constants["Z_DEFAULT_CHUNK"], 16384);
    assert_eq!(constants["Z_BUF_ERROR"], -5);
}

#[test]
fn test_corrupt_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bogus.zz");
    fs::write(&input, b"foo bar").unwrap();

    let out = oxizlib(&["decompress", path_str(&input)]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("DATA_ERROR"), "{stderr}");
}

#[test]
fn test_out_of_range_chunk_size_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.txt");
    fs::write(&input, b"data").unwrap();

    let out = oxizlib(&["compress", path_str(&input), "--chunk-size", "8"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("chunk_size"));
}

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use kira_evsize::EvError;
use kira_evsize::io::zetaview::{check_axis, read_all, read_measurement};
use kira_evsize::layout::AxisCheck;
use tempfile::TempDir;

fn zetaview_text(preamble: usize, rows: &[(f64, u64)]) -> String {
    let mut s = String::new();
    for i in 0..preamble {
        s.push_str(&format!("Instrument parameter {}\t{}\n", i, i * 3));
    }
    for (d, c) in rows {
        s.push_str(&format!("{:.3E}\t{:.3E}\t0.000E+0\n", d, *c as f64));
    }
    s
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn default_rows(scale: u64) -> Vec<(f64, u64)> {
    (0..1200).map(|i| (0.5 + i as f64 * 5.0, (i % 7) * scale)).collect()
}

#[test]
fn reads_default_instrument_layout() {
    let tmp = TempDir::new().unwrap();
    let mut text = zetaview_text(76, &default_rows(1));
    text.push_str("-1\n-1\ntrailer\n");
    let path = write_file(tmp.path(), "s.txt", &text);

    let m = read_measurement(&path, 76, 1200).unwrap();
    assert_eq!(m.diameters.len(), 1200);
    assert_eq!(m.counts.len(), 1200);
    assert_eq!(m.diameters[0], 0.5);
    assert_eq!(m.counts[3], 3);
}

#[test]
fn short_preamble_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(tmp.path(), "s.txt", "a\nb\n");
    let err = read_measurement(&path, 76, 1200).unwrap_err();
    match err {
        EvError::MalformedInput { path: p, reason } => {
            assert_eq!(p, path);
            assert!(reason.contains("preamble"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn too_few_rows_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let rows: Vec<(f64, u64)> = (0..10).map(|i| (i as f64, 1)).collect();
    let path = write_file(tmp.path(), "s.txt", &zetaview_text(76, &rows));
    let err = read_measurement(&path, 76, 1200).unwrap_err();
    assert!(err.to_string().contains("expected 1200 data rows, found 10"));
}

#[test]
fn bad_rows_are_malformed() {
    let tmp = TempDir::new().unwrap();
    for (i, row) in ["10.0\tabc", "10.0\t-3", "10.0\t1.5", "10.0"].iter().enumerate() {
        let path = write_file(tmp.path(), &format!("bad{}.txt", i), &format!("p\n{}\n", row));
        let err = read_measurement(&path, 1, 1).unwrap_err();
        assert!(matches!(err, EvError::MalformedInput { .. }), "row {row}");
    }
}

#[test]
fn large_counts_stay_exact_or_fail() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        tmp.path(),
        "big.txt",
        "p\n1.0\t9007199254740993\n2.0\t18446744073709551615\n3.0\t3.000E+0\n",
    );
    let m = read_measurement(&path, 1, 3).unwrap();
    assert_eq!(m.counts, vec![9_007_199_254_740_993, u64::MAX, 3]);

    for (i, count) in ["1e30", "1.0E+16", "18446744073709551616"].iter().enumerate() {
        let path = write_file(
            tmp.path(),
            &format!("huge{}.txt", i),
            &format!("p\n1.0\t{}\n", count),
        );
        let err = read_measurement(&path, 1, 1).unwrap_err();
        assert!(matches!(err, EvError::MalformedInput { .. }), "count {count}");
    }
}

#[test]
fn non_utf8_preamble_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("latin1.txt");
    let mut bytes = b"Temperature 22.5 \xb0C\n".to_vec();
    bytes.extend_from_slice(b"1.0\t2\n");
    fs::write(&path, bytes).unwrap();
    let m = read_measurement(&path, 1, 1).unwrap();
    assert_eq!(m.counts, vec![2]);
}

#[test]
fn gzip_input_is_decompressed() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("s.txt.gz");
    let mut enc = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    enc.write_all(zetaview_text(2, &[(1.0, 4), (2.0, 5)]).as_bytes())
        .unwrap();
    enc.finish().unwrap();

    let m = read_measurement(&path, 2, 2).unwrap();
    assert_eq!(m.counts, vec![4, 5]);
}

#[test]
fn read_all_keeps_path_order() {
    let tmp = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..6)
        .map(|i| {
            write_file(
                tmp.path(),
                &format!("f{}.txt", i),
                &zetaview_text(1, &[(1.0, i), (2.0, 0)]),
            )
        })
        .collect();
    let ms = read_all(&paths, 1, 2, 0).unwrap();
    let counts: Vec<u64> = ms.iter().map(|m| m.counts[0]).collect();
    assert_eq!(counts, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn axis_check_strict_and_trust() {
    let tmp = TempDir::new().unwrap();
    let a = write_file(tmp.path(), "a.txt", &zetaview_text(1, &[(1.0, 1), (2.0, 1)]));
    let b = write_file(tmp.path(), "b.txt", &zetaview_text(1, &[(1.0, 1), (2.5, 1)]));
    let ms = read_all(&[a, b], 1, 2, 1).unwrap();

    let err = check_axis(&ms, AxisCheck::Strict).unwrap_err();
    match err {
        EvError::AxisMismatch {
            index,
            expected,
            found,
            ..
        } => {
            assert_eq!(index, 1);
            assert_eq!(expected, 2.0);
            assert_eq!(found, 2.5);
        }
        other => panic!("unexpected error: {other}"),
    }

    let (axis, warnings) = check_axis(&ms, AxisCheck::Trust).unwrap();
    assert_eq!(axis, vec![1.0, 2.0]);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("b.txt"));
}

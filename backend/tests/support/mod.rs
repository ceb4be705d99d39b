#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Five patients around Louisville plus one far to the south.
///
/// Row 1 sits on Downtown Clinic, row 6 is ~81 miles from every clinic.
pub const SAMPLE_CSV: &str = "\
PatientId,Latitude,Longitude,Age
P1,38.2527,-85.7585,34
P2,38.2469,-85.8292,51
P3,38.1000,-85.7500,29
P4,38.2000,-85.5000,62
P5,38.3500,-85.7585,45
P6,37.0000,-85.7585,70
";

/// Write `content` to `name` inside a fresh temp dir.
///
/// The returned `TempDir` must outlive the path.
pub fn write_fixture(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    (dir, path)
}

/// Build an in-memory workbook whose first sheet holds `header` and `rows`.
pub fn xlsx_bytes(header: &[&str], rows: &[Vec<XlsxCell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (c, title) in header.iter().enumerate() {
        sheet.write_string(0, c as u16, *title).expect("header write");
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = ((r + 1) as u32, c as u16);
            match cell {
                XlsxCell::Num(n) => {
                    sheet.write_number(r, c, *n).expect("number write");
                }
                XlsxCell::Text(t) => {
                    sheet.write_string(r, c, *t).expect("string write");
                }
                XlsxCell::Blank => {}
            }
        }
    }
    workbook.save_to_buffer().expect("workbook save")
}

pub enum XlsxCell {
    Num(f64),
    Text(&'static str),
    Blank,
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use camino::{Utf8Path, Utf8PathBuf};
use log::{Level, LevelFilter, Log, Metadata, Record};
use mockito::{Matcher, ServerGuard};
use reprov::types::ServiceUrl;
use reprov::{ReprovConfig, StaticToken};
use rstest::*;

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

/// An address where nothing is listening.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

#[fixture]
pub fn server() -> ServerGuard {
    mockito::Server::new()
}

#[fixture]
pub fn tokens() -> StaticToken {
    StaticToken::new(TOKEN)
}

#[fixture]
pub fn tmp() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

pub fn config_for(server: &ServerGuard) -> ReprovConfig {
    ReprovConfig::new(ServiceUrl::try_from(server.url()).unwrap())
}

pub fn unreachable_config() -> ReprovConfig {
    ReprovConfig::new(ServiceUrl::from_static(UNREACHABLE_URL))
}

/// Matches requests which are multipart uploads.
pub fn multipart() -> Matcher {
    Matcher::Regex("^multipart/form-data".to_string())
}

pub fn utf8_dir(dir: &tempfile::TempDir) -> &Utf8Path {
    Utf8Path::from_path(dir.path()).unwrap()
}

/// Write a file under `dir` and return its path.
pub fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> Utf8PathBuf {
    let path = utf8_dir(dir).join(name);
    fs_err::write(&path, contents).unwrap();
    path
}

/// Count the parts of a multipart request body with the given field name.
pub fn count_parts(body: &[u8], field: &str) -> usize {
    let body = String::from_utf8_lossy(body);
    body.matches(&format!("name=\"{}\"", field)).count()
}

/// A response body describing which file parts were uploaded.
pub fn echo_parts(request: &mockito::Request) -> Vec<u8> {
    let body = request.body().map(|b| b.as_slice()).unwrap_or_default();
    serde_json::json!({
        "id": 1,
        "spec_file": count_parts(body, "spec_file"),
        "input_file": count_parts(body, "input_file"),
        "filenames": String::from_utf8_lossy(body).matches("filename=").count(),
    })
    .to_string()
    .into_bytes()
}

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

/// Keeps what `reprov` logs on each test thread.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("reprov")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            RECORDS.with(|r| {
                r.borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Start capturing log messages on this thread, forgetting earlier ones.
pub fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

/// Error-level messages captured since [capture_logs].
pub fn logged_errors() -> Vec<String> {
    RECORDS.with(|r| {
        r.borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread;

const CATALOG: &str = r#"{"markets": {"BTC-USD": {"tickSize": "1", "stepSize": "0.0001", "minOrderSize": "0.001"}}}"#;
const BOOK: &str = r#"{"bids": [{"price": "16643", "size": "0.5"}], "asks": [{"price": "16644", "size": "1.5"}]}"#;

/// Minimal dYdX stand-in: serves the catalog and one order book, 404 for anything else.
fn serve_exchange() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub exchange");
    let addr = listener.local_addr().expect("stub address");
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let _ = answer(stream);
        }
    });
    format!("http://{addr}")
}

fn answer(mut stream: TcpStream) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" {
            break;
        }
    }
    let path = request_line.split_whitespace().nth(1).unwrap_or_default();
    let (status, body) = match path {
        "/v3/markets" => ("200 OK", CATALOG),
        "/v3/orderbook/BTC-USD" => ("200 OK", BOOK),
        _ => ("404 Not Found", "{}"),
    };
    write!(
        stream,
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )?;
    stream.flush()
}

/// A base URL nobody listens on.
fn dead_exchange() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind throwaway port");
    let addr = listener.local_addr().expect("throwaway address");
    drop(listener);
    format!("http://{addr}")
}

fn write_config(dir: &Path, base_url: &str, root: &Path, extra: &str) -> PathBuf {
    let path = dir.join("recorder.toml");
    let body = format!(
        "markets = [\"BTC-USD\"]\n\
         [exchange]\nbase_url = {base_url:?}\nrequest_timeout_ms = 2000\n\
         [retry]\nattempts = 2\ndelay_ms = 0\n\
         [store]\nbackend = \"local\"\nroot = {:?}\n{extra}",
        root.display().to_string()
    );
    std::fs::write(&path, body).expect("write config");
    path
}

fn run_recorder(dir: &Path, config: &Path) -> Output {
    let binary = env!("CARGO_BIN_EXE_quote-recorder");
    Command::new(binary)
        .current_dir(dir)
        .arg("--config")
        .arg(config)
        .output()
        .expect("invoke quote-recorder")
}

fn csv_files(root: &Path) -> Vec<PathBuf> {
    let Ok(markets) = std::fs::read_dir(root) else { return vec![] };
    markets
        .flatten()
        .filter(|e| e.path().is_dir())
        .flat_map(|e| std::fs::read_dir(e.path()).into_iter().flatten().flatten())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect()
}

#[test]
fn help_displays_overview() {
    let binary = env!("CARGO_BIN_EXE_quote-recorder");
    let output = Command::new(binary).arg("--help").output().expect("invoke quote-recorder --help");
    assert!(output.status.success(), "help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--markets"), "expected flag list in help output");
}

#[test]
fn successful_batch_exits_zero_and_writes_a_row() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("data");
    let config = write_config(dir.path(), &serve_exchange(), &root, "");

    let output = run_recorder(dir.path(), &config);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "expected exit 0, stderr: {stderr}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BTC-USD"), "summary should list the market: {stdout}");

    let files = csv_files(&root);
    assert_eq!(files.len(), 1, "expected one day file, got {files:?}");
    let body = std::fs::read_to_string(&files[0]).unwrap();
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("timestamp,bid_price,ask_price,mid,bid_size,ask_size"));
    let row = lines.next().expect("one data row");
    assert!(row.ends_with(",16643.0,16644.0,16643.5,0.5,1.5"), "unexpected row {row}");
    assert_eq!(lines.next(), None);
}

#[test]
fn unreachable_catalog_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("data");
    let config = write_config(dir.path(), &dead_exchange(), &root, "");

    let output = run_recorder(dir.path(), &config);
    assert!(!output.status.success(), "parameter load failure must exit non-zero");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading market parameters"), "unexpected stderr: {stderr}");
    assert!(csv_files(&root).is_empty(), "nothing should be written");
}

#[test]
fn bucket_that_does_not_divide_a_day_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("data");
    let config = write_config(dir.path(), &serve_exchange(), &root, "[batch]\nbucket_secs = 25200\n");

    let output = run_recorder(dir.path(), &config);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("batch.bucket_secs"), "unexpected stderr: {stderr}");
}

#[test]
fn persist_failure_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    // a regular file where the store root should be: every put fails
    let root = dir.path().join("data");
    std::fs::write(&root, b"not a directory").unwrap();
    let config = write_config(dir.path(), &serve_exchange(), &root, "");

    let output = run_recorder(dir.path(), &config);
    assert!(!output.status.success(), "a failed write must exit non-zero");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("persist failed"), "summary should show the failure: {stdout}");
}

//! Minimal HTTP/1.1 JSON server for integration tests.
//!
//! Serves a fixed route table (path + query → status and JSON body) and
//! records every request line and POST body so tests can assert which
//! endpoints were hit. Unknown paths answer 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::Value;

#[derive(Debug, Default)]
struct Log {
    requests: Vec<String>,
    bodies: Vec<(String, Value)>,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct ContentServer {
    base_url: String,
    log: Arc<Mutex<Log>>,
}

impl ContentServer {
    /// API base URL, e.g. `http://127.0.0.1:12345/api`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request lines seen so far, as `METHOD /path`.
    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().requests.clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.split_once(' ').map(|(_, p)| p) == Some(path))
            .count()
    }

    pub fn posted(&self, path: &str) -> Vec<Value> {
        self.log
            .lock()
            .unwrap()
            .bodies
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, b)| b.clone())
            .collect()
    }
}

/// Route table builder. Paths are relative to `/api`.
#[derive(Default)]
pub struct Routes {
    table: HashMap<String, (u16, String)>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, path: &str, body: Value) -> Self {
        self.table
            .insert(format!("/api{path}"), (200, body.to_string()));
        self
    }

    pub fn status(mut self, path: &str, status: u16) -> Self {
        self.table
            .insert(format!("/api{path}"), (status, String::new()));
        self
    }

    /// Starts the server in a background thread.
    pub fn start(self) -> ContentServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let table = Arc::new(self.table);
        let log = Arc::new(Mutex::new(Log::default()));
        let server_log = Arc::clone(&log);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let table = Arc::clone(&table);
                let log = Arc::clone(&server_log);
                thread::spawn(move || handle(stream, &table, &log));
            }
        });
        ContentServer {
            base_url: format!("http://127.0.0.1:{}/api", port),
            log,
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

fn handle(mut stream: TcpStream, table: &HashMap<String, (u16, String)>, log: &Mutex<Log>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("").to_string();
    let target = request_line.next().unwrap_or("").to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let path = target.strip_prefix("/api").unwrap_or(&target).to_string();
    {
        let mut log = log.lock().unwrap();
        log.requests.push(format!("{method} {path}"));
        if method == "POST" {
            let body = &buf[header_end..buf.len().min(header_end + content_length)];
            let body = serde_json::from_slice(body).unwrap_or(Value::Null);
            log.bodies.push((path.clone(), body));
        }
    }

    let (status, body) = table
        .get(&target)
        .cloned()
        .unwrap_or((404, String::new()));
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

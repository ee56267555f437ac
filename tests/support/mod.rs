// One-shot HTTP server for exercising the real clients over a socket.
// It accepts a single connection, records the request and answers with a
// canned status and body.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Request as seen by the stub server. Header names are lowercased.
#[derive(Debug)]
pub struct Captured {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct StubServer {
    pub base_url: String,
    rx: Receiver<Captured>,
}

impl StubServer {
    pub fn respond(status: u16, body: &str) -> Self {
        Self::respond_with_length(status, body, body.len())
    }

    /// Like [`StubServer::respond`] but advertises `advertised` bytes;
    /// a value larger than the body makes the reply end early.
    pub fn respond_with_length(status: u16, body: &str, advertised: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = mpsc::channel();
        let body = body.to_string();

        thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");

            let mut headers = Vec::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).expect("header line");
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    let k = k.trim().to_ascii_lowercase();
                    let v = v.trim().to_string();
                    if k == "content-length" {
                        content_length = v.parse().expect("content-length");
                    }
                    headers.push((k, v));
                }
            }

            let mut buf = vec![0u8; content_length];
            reader.read_exact(&mut buf).expect("body");

            let _ = tx.send(Captured {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8_lossy(&buf).into_owned(),
            });

            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                advertised,
                body
            );
            let mut stream = stream;
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush");
        });

        StubServer {
            base_url: format!("http://{}", addr),
            rx,
        }
    }

    /// The request the server received. Panics if none arrived.
    pub fn captured(&self) -> Captured {
        self.rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("stub server received a request")
    }
}

/// An address nothing listens on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

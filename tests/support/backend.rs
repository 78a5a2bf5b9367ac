//! The only HTTP test server in the crate. Every test that needs a live
//! prediction endpoint lives in `tests/` and goes through [`StubBackend`].

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// One-shot HTTP server standing in for the prediction service.
pub struct StubBackend {
    pub url: String,
    requests: Receiver<String>,
}

impl StubBackend {
    /// Answer the first request with a JSON body and the given status line.
    pub fn respond(status: &str, body: &str) -> Self {
        Self::reply(format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ))
    }

    /// Answer the first request with `raw` bytes exactly as given.
    pub fn reply(raw: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend addr");
        let (tx, requests) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request(&mut stream);
                let _ = stream.write_all(raw.as_bytes());
                let _ = tx.send(request);
            }
        });
        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    /// A base URL nothing is listening on.
    pub fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind free port");
        let addr = listener.local_addr().expect("free port addr");
        drop(listener);
        format!("http://{addr}")
    }

    /// Raw text of the request the stub received.
    pub fn take_request(&self) -> String {
        self.requests.recv().expect("stub backend saw a request")
    }

    /// JSON body of the request the stub received.
    pub fn take_json_body(&self) -> serde_json::Value {
        let request = self.take_request();
        let (_, body) = request.split_once("\r\n\r\n").expect("request body");
        serde_json::from_str(body).expect("json body")
    }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    while let Ok(read) = stream.read(&mut buf) {
        if read == 0 {
            break;
        }
        data.extend_from_slice(&buf[..read]);
        if request_complete(&data) {
            break;
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}

fn request_complete(data: &[u8]) -> bool {
    let text = String::from_utf8_lossy(data);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}

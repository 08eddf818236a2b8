use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// A single-request HTTP endpoint on localhost.
///
/// Answers the first request with `status_line` and hands the raw request
/// back through the join handle.
pub(crate) struct OneShotServer {
    pub(crate) url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    pub(crate) fn start(status_line: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "{status_line}\r\nContent-Length: 0\r\nLocation: http://{addr}/elsewhere\r\nConnection: close\r\n\r\n"
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });

        Self {
            url: format!("http://{addr}/box/manage_mailboxer"),
            handle,
        }
    }

    /// The request as received, lowercased for case-insensitive assertions.
    pub(crate) fn request(self) -> String {
        self.handle.join().unwrap().to_lowercase()
    }
}

/// A localhost URL nothing is listening on.
pub(crate) fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/box")
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

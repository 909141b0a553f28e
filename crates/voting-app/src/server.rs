use std::net::SocketAddr;

use anyhow::anyhow;
use log::{error, info, warn};
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server};
use voting_client::BlockhashSource;

use crate::actions::{self, ActionError, ErrorBody, RULES_PATH, VOTE_PATH};
use crate::ballot::Ballot;

const ACTION_HEADERS: [(&str, &str); 5] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET,POST,PUT,OPTIONS"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, Authorization, Content-Encoding, Accept-Encoding, X-Action-Version, X-Blockchain-Ids",
    ),
    ("Access-Control-Expose-Headers", "X-Action-Version, X-Blockchain-Ids"),
    ("Content-Type", "application/json"),
];

/// Serves the vote action over HTTP, one request at a time.
pub struct ActionServer<S> {
    server: Server,
    source: S,
    ballot: Ballot,
    poll_id: u64,
}

impl<S: BlockhashSource> ActionServer<S> {
    pub fn bind(addr: &str, source: S, ballot: Ballot, poll_id: u64) -> anyhow::Result<Self> {
        let server = Server::http(addr).map_err(|err| anyhow!("cannot bind {addr}: {err}"))?;
        Ok(Self {
            server,
            source,
            ballot,
            poll_id,
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Blocks until the listener shuts down.
    pub fn serve(&self) {
        if let Some(addr) = self.local_addr() {
            info!("action server listening on http://{addr}{VOTE_PATH} (poll {})", self.poll_id);
        }
        for request in self.server.incoming_requests() {
            self.handle(request);
        }
    }

    fn handle(&self, mut request: Request) {
        let method = request.method().clone();
        let url = request.url().to_string();
        let (path, query) = split_url(&url);

        let (status, body) = match (&method, path) {
            (Method::Get | Method::Options, VOTE_PATH) => {
                (200, to_json(&actions::describe(&self.ballot)))
            }
            (Method::Options, RULES_PATH) | (Method::Get, RULES_PATH) => {
                (200, to_json(&actions::rules()))
            }
            (Method::Post, VOTE_PATH) => {
                let candidate = query_param(query, "candidate");
                let mut payload = Vec::new();
                let result = match request.as_reader().read_to_end(&mut payload) {
                    Ok(_) => actions::vote_transaction(
                        &self.source,
                        &self.ballot,
                        self.poll_id,
                        candidate.as_deref(),
                        &payload,
                    ),
                    Err(err) => {
                        warn!("failed to read request body: {err}");
                        Err(ActionError::InvalidBody)
                    }
                };
                match result {
                    Ok(response) => (200, to_json(&response)),
                    Err(err) => {
                        if err.status() >= 500 {
                            error!("{method} {url}: {err}");
                        }
                        (err.status(), to_json(&err.body()))
                    }
                }
            }
            _ => (
                404,
                to_json(&ErrorBody {
                    error: "Not found".to_string(),
                }),
            ),
        };

        info!("{method} {url} -> {status}");
        let mut response = Response::from_data(body.into_bytes()).with_status_code(status);
        for header in action_headers() {
            response.add_header(header);
        }
        if let Err(err) = request.respond(response) {
            warn!("failed to respond to {method} {url}: {err}");
        }
    }
}

fn action_headers() -> Vec<Header> {
    ACTION_HEADERS
        .iter()
        .filter_map(|(name, value)| Header::from_bytes(name.as_bytes(), value.as_bytes()).ok())
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        error!("failed to serialize response: {err}");
        r#"{"error":"Internal error"}"#.to_string()
    })
}

fn split_url(url: &str) -> (&str, &str) {
    url.split_once('?').unwrap_or((url, ""))
}

/// First value of `key` in a form-encoded query string, decoded.
fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(name, _)| decode_component(name) == key)
        .map(|(_, value)| decode_component(value))
}

/// `+` is a space and `%XX` a byte; malformed escapes are kept as written.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => match bytes.get(i + 1..i + 3).and_then(hex_byte) {
                Some(byte) => {
                    out.push(byte);
                    i += 2;
                }
                None => out.push(b'%'),
            },
            byte => out.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_byte(digits: &[u8]) -> Option<u8> {
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let text = std::str::from_utf8(digits).ok()?;
    u8::from_str_radix(text, 16).ok()
}

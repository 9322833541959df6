// src/fetch/mod.rs

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{Result, RosterError};

/// Anything that can hand over the raw tab-separated roster export.
pub trait RosterSource {
    /// Where the text comes from, for log lines.
    fn describe(&self) -> String;

    fn fetch_text(&self) -> Result<String>;
}

/// Downloads the export over HTTP(S).
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// `timeout = None` waits indefinitely for the server.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| RosterError::Fetch {
                url: url.to_string(),
                source,
            })?;
        Ok(Self { client, url })
    }
}

impl RosterSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    fn fetch_text(&self) -> Result<String> {
        let fetch_err = |source: reqwest::Error| RosterError::Fetch {
            url: self.url.to_string(),
            source,
        };
        debug!(url = %self.url, "GET");
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?;
        let text = resp.text().map_err(fetch_err)?;
        info!(url = %self.url, bytes = text.len(), "downloaded roster export");
        Ok(text)
    }
}

/// A source backed by text already in memory.
pub struct StaticSource(pub String);

impl RosterSource for StaticSource {
    fn describe(&self) -> String {
        "in-memory export".to_string()
    }

    fn fetch_text(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::{
        io::{BufRead, BufReader, Write},
        net::TcpListener,
        thread,
    };

    /// Serve exactly one HTTP response and return the URL to hit.
    pub fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                // drain request headers
                while reader.read_line(&mut line).unwrap_or(0) > 0 {
                    if line == "\r\n" {
                        break;
                    }
                    line.clear();
                }
                let mut stream = stream;
                let resp = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes());
                let _ = stream.flush();
            }
        });
        format!("http://{}/TAKP_character.txt", addr)
    }
}

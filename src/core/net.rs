// src/core/net.rs
//
// Blocking HTTPS via reqwest for the Drive/OAuth endpoints, plus a one-shot
// HTTP/1.0 listener over TCP (std-only) for the OAuth loopback redirect.

use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    time::Duration,
};

use reqwest::Url;
use reqwest::blocking::{Client, Response};

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::fetch::FetchError;

pub fn http_client() -> Result<Client, FetchError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// Pass 2xx responses through; anything else becomes `FetchError::Api` with the body text.
pub fn check_status(resp: Response) -> Result<Response, FetchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().to_string();
    let body = resp.text().unwrap_or_default();
    loge!("HTTP {} from {}", status, url);
    Err(FetchError::Api { status: status.as_u16(), body })
}

/// Bind the loopback redirect listener on `port`, else on `port + offset`.
pub fn bind_loopback(port: u16, offset: u16) -> Result<(TcpListener, u16), FetchError> {
    match TcpListener::bind(("127.0.0.1", port)) {
        Ok(l) => Ok((l, port)),
        Err(e) => {
            let alt = port.saturating_add(offset);
            logd!("Port {} unavailable ({}), trying {}", port, e, alt);
            Ok((TcpListener::bind(("127.0.0.1", alt))?, alt))
        }
    }
}

/// Wait for one GET on the listener and return its query parameters.
/// Requests without a query (favicon etc.) are answered and skipped.
pub fn accept_redirect(listener: &TcpListener) -> Result<HashMap<String, String>, FetchError> {
    loop {
        let (stream, _) = listener.accept()?;
        stream.set_read_timeout(Some(Duration::from_secs(15)))?;
        stream.set_write_timeout(Some(Duration::from_secs(15)))?;

        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;
        // Drain headers so closing the socket does not reset the browser.
        let mut header = String::new();
        while reader.read_line(&mut header)? > 0 && !header.trim_end().is_empty() {
            header.clear();
        }
        let mut stream = reader.into_inner();

        let params = parse_request_query(&request_line);
        if params.is_empty() {
            respond(&mut stream, "404 Not Found", "")?;
            continue;
        }

        let body = if params.contains_key("code") {
            "Authentication complete. You may close this window."
        } else {
            "Authentication failed. You may close this window."
        };
        respond(&mut stream, "200 OK", body)?;
        return Ok(params);
    }
}

fn respond(s: &mut TcpStream, status: &str, body: &str) -> Result<(), FetchError> {
    let resp = format!(
        "HTTP/1.0 {status}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    s.write_all(resp.as_bytes())?;
    s.flush()?;
    Ok(())
}

/// `GET /?code=abc&scope=x HTTP/1.1` → {code: abc, scope: x}
pub fn parse_request_query(request_line: &str) -> HashMap<String, String> {
    let mut parts = request_line.split_whitespace();
    let (Some("GET"), Some(target)) = (parts.next(), parts.next()) else {
        return HashMap::new();
    };
    match Url::parse(&join!("http://localhost", target)) {
        Ok(url) => url.query_pairs().into_owned().collect(),
        Err(_) => HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_query_is_decoded() {
        let q = parse_request_query("GET /?code=4%2F0Ab&scope=a+b HTTP/1.1\r\n");
        assert_eq!(q.get("code").map(String::as_str), Some("4/0Ab"));
        assert_eq!(q.get("scope").map(String::as_str), Some("a b"));
    }

    #[test]
    fn non_get_or_bare_path_yields_nothing() {
        assert!(parse_request_query("POST /?code=x HTTP/1.1").is_empty());
        assert!(parse_request_query("GET /favicon.ico HTTP/1.1").is_empty());
        assert!(parse_request_query("").is_empty());
    }

    #[test]
    fn redirect_listener_returns_params() {
        let (listener, _) = bind_loopback(0, 0).unwrap();
        let port = listener.local_addr().unwrap().port();
        let client = std::thread::spawn(move || {
            let mut s = TcpStream::connect(("127.0.0.1", port)).unwrap();
            s.write_all(b"GET /?code=xyz HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
            let mut out = String::new();
            std::io::Read::read_to_string(&mut s, &mut out).unwrap();
            out
        });
        let params = accept_redirect(&listener).unwrap();
        assert_eq!(params.get("code").map(String::as_str), Some("xyz"));
        assert!(client.join().unwrap().starts_with("HTTP/1.0 200 OK"));
    }
}

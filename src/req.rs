use anyhow::{Context, Result, ensure};
use std::borrow::Cow;
use std::collections::HashMap;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

use crate::constants::{MAX_BODY_BYTES, MAX_HEAD_BYTES};

#[derive(Debug, PartialEq)]
pub enum Method {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl TryFrom<&str> for Method {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, anyhow::Error> {
        match value {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(anyhow::anyhow!("Method not supported")),
        }
    }
}

pub struct Request {
    pub method: Method,
    pub path: String,
    /// Header names are lowercased.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Request {
    /// Reads one request off the wire: request line, headers, then `content-length` bytes of body.
    ///
    /// The request line and headers together may not exceed `MAX_HEAD_BYTES`.
    pub async fn new<Reader>(reader: Reader) -> Result<Self>
    where
        Reader: AsyncRead + Unpin,
    {
        let mut head = BufReader::new(reader).take(MAX_HEAD_BYTES as u64);

        // Method and path
        let mut first = String::new();
        head.read_line(&mut first)
            .await
            .context("Failed to read request line")?;
        ensure!(!first.trim().is_empty(), "Empty Request");
        ensure!(
            first.ends_with('\n'),
            "Request line exceeds {} bytes or is truncated",
            MAX_HEAD_BYTES
        );
        let mut request_parts = first.split_whitespace();
        let method: Method = request_parts
            .next()
            .ok_or(anyhow::anyhow!("missing method"))
            .and_then(TryInto::try_into)
            .context("Missing Method")?;
        let target = request_parts.next().context("No Path")?;
        let path = target.split('?').next().unwrap_or(target);

        // Headers
        let mut headers = HashMap::new();
        loop {
            let mut line = String::new();
            let read = head
                .read_line(&mut line)
                .await
                .context("Failed to read header")?;
            if read == 0 {
                ensure!(head.limit() > 0, "Headers exceed {} bytes", MAX_HEAD_BYTES);
                break;
            }
            ensure!(
                line.ends_with('\n'),
                "Headers exceed {} bytes or are truncated",
                MAX_HEAD_BYTES
            );
            if line.trim_end().is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.insert(k.trim().to_lowercase(), v.trim().to_string());
            }
        }

        // Body
        let length = match headers.get("content-length") {
            Some(value) => value
                .parse::<usize>()
                .with_context(|| format!("Invalid Content-Length '{}'", value))?,
            None => 0,
        };
        ensure!(length <= MAX_BODY_BYTES, "Body too large: {} bytes", length);
        let mut reader = head.into_inner();
        let mut body = vec![0; length];
        reader
            .read_exact(&mut body)
            .await
            .context("Failed to read body")?;

        Ok(Request {
            method,
            path: path.into(),
            headers,
            body,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// The body as text. Bytes that are not UTF-8 become U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_head_and_body() {
        let raw = b"POST /api/admin/users/user_1/topup?x=1 HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: 16\r\n\r\n{\"amount\": 10.5}";
        let request = Request::new(&raw[..]).await.unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/admin/users/user_1/topup");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.text(), "{\"amount\": 10.5}");
    }

    #[tokio::test]
    async fn missing_content_length_means_empty_body() {
        let raw = b"POST /x HTTP/1.1\r\nAuthorization: Bearer t\r\n\r\n";
        let request = Request::new(&raw[..]).await.unwrap();

        assert!(request.body.is_empty());
        assert_eq!(request.header("authorization"), Some("Bearer t"));
    }

    #[tokio::test]
    async fn truncated_body_is_an_error() {
        let raw = b"POST /x HTTP/1.1\r\nContent-Length: 50\r\n\r\n{}";
        assert!(Request::new(&raw[..]).await.is_err());
    }

    #[tokio::test]
    async fn rejects_unknown_method_and_empty_input() {
        assert!(Request::new(&b"BREW /pot HTTP/1.1\r\n\r\n"[..]).await.is_err());
        assert!(Request::new(&b""[..]).await.is_err());
    }

    #[tokio::test]
    async fn invalid_utf8_body_is_replaced_not_rejected() {
        let raw = b"POST /x HTTP/1.1\r\nContent-Length: 6\r\n\r\ncaf\xe9!!";
        let request = Request::new(&raw[..]).await.unwrap();

        assert_eq!(request.text(), "caf\u{FFFD}!!");
    }

    #[tokio::test]
    async fn oversized_header_line_is_rejected() {
        let raw = format!("POST /x HTTP/1.1\r\nX-Filler: {}", "a".repeat(MAX_HEAD_BYTES * 2));
        assert!(Request::new(raw.as_bytes()).await.is_err());

        let raw = format!(
            "POST /x HTTP/1.1\r\nX-Filler: {}\r\n\r\n",
            "a".repeat(MAX_HEAD_BYTES)
        );
        assert!(Request::new(raw.as_bytes()).await.is_err());
    }

    #[tokio::test]
    async fn oversized_request_line_is_rejected() {
        let raw = format!("POST /{} HTTP/1.1\r\n\r\n", "p".repeat(MAX_HEAD_BYTES));
        assert!(Request::new(raw.as_bytes()).await.is_err());
    }

    #[tokio::test]
    async fn body_is_not_counted_against_head_limit() {
        let body = "x".repeat(MAX_HEAD_BYTES * 2);
        let raw = format!("POST /x HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}", body.len(), body);
        let request = Request::new(raw.as_bytes()).await.unwrap();

        assert_eq!(request.body.len(), body.len());
    }
}

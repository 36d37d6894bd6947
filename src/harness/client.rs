use std::io::{BufRead, Read, Write};

use serde_json::{json, Map, Value};
use tracing::debug;
use url::Url;

use super::protocol::{Request, RequestId, Response};
use crate::error::{GenError, Result};

/// Longest response line accepted from a server (1 MiB).
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Line-delimited JSON client: one request line out, one response line back.
pub struct McpClient<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> McpClient<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Give back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    pub fn send(&mut self, request: &Request) -> Result<()> {
        let line = serde_json::to_string(request)
            .map_err(|e| GenError::Harness(format!("failed to encode request: {e}")))?;
        debug!(request = %line, "sending request");
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| GenError::Harness(format!("failed to send request: {e}")))
    }

    /// Read the next non-blank line as a response. A line longer than
    /// [`MAX_RESPONSE_BYTES`] is an error; at most one byte past the limit is
    /// buffered.
    pub fn read_response(&mut self) -> Result<Response> {
        let limit = MAX_RESPONSE_BYTES as u64 + 1;
        let mut line = String::new();
        loop {
            line.clear();
            let n = (&mut self.reader)
                .take(limit)
                .read_line(&mut line)
                .map_err(|e| GenError::Harness(format!("failed to read response: {e}")))?;
            if n == 0 {
                return Err(GenError::Harness("no response received".to_string()));
            }
            if n > MAX_RESPONSE_BYTES {
                return Err(GenError::Harness(format!(
                    "response too large: {n} bytes (limit {MAX_RESPONSE_BYTES})"
                )));
            }
            if !line.trim().is_empty() {
                break;
            }
        }
        debug!(response = %line.trim_end(), "received response");
        serde_json::from_str(line.trim())
            .map_err(|e| GenError::Harness(format!("failed to decode response: {e}")))
    }

    pub fn call(
        &mut self,
        method: &str,
        params: Option<Value>,
        id: impl Into<RequestId>,
    ) -> Result<Response> {
        self.send(&Request {
            method: method.to_string(),
            params,
            id: Some(id.into()),
        })?;
        self.read_response()
    }

    pub fn list_resources(&mut self, id: impl Into<RequestId>) -> Result<Response> {
        self.call("resources/list", None, id)
    }

    /// `resources/read` for `uri`, which is trimmed and must parse as a URI
    /// or be an absolute path.
    pub fn read_resource(&mut self, uri: &str, id: impl Into<RequestId>) -> Result<Response> {
        let uri = sanitize_uri(uri)?;
        self.call("resources/read", Some(json!({ "uri": uri })), id)
    }

    pub fn list_tools(&mut self, id: impl Into<RequestId>) -> Result<Response> {
        self.call("tools/list", None, id)
    }

    pub fn call_tool(
        &mut self,
        name: &str,
        arguments: Map<String, Value>,
        id: impl Into<RequestId>,
    ) -> Result<Response> {
        self.call(
            "tools/call",
            Some(json!({ "name": name, "arguments": arguments })),
            id,
        )
    }
}

/// Trim a resource URI and check that it is usable in a request.
pub fn sanitize_uri(uri: &str) -> Result<&str> {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return Err(GenError::Harness("uri is empty".to_string()));
    }
    match Url::parse(trimmed) {
        Ok(_) => Ok(trimmed),
        Err(url::ParseError::RelativeUrlWithoutBase) if trimmed.starts_with('/') => Ok(trimmed),
        Err(e) => Err(GenError::Harness(format!("invalid uri {trimmed:?}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::io::{self, BufReader, Cursor};

    fn client(responses: &str) -> McpClient<Cursor<Vec<u8>>, Vec<u8>> {
        McpClient::new(Cursor::new(responses.as_bytes().to_vec()), Vec::new())
    }

    fn sent(client: McpClient<Cursor<Vec<u8>>, Vec<u8>>) -> Vec<Value> {
        let (_, out) = client.into_inner();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn call_writes_one_line_and_reads_one_line() {
        let mut c = client("{\"result\":[\"a\"],\"id\":1}\n{\"result\":[],\"id\":2}\n");
        let first = c.list_resources(1).unwrap();
        assert_eq!(first.result, Some(json!(["a"])));
        assert_eq!(first.id, Some(RequestId::Number(1)));
        let second = c.list_tools(2).unwrap();
        assert_eq!(second.result, Some(json!([])));
        let lines = sent(c);
        assert_eq!(lines[0], json!({ "method": "resources/list", "id": 1 }));
        assert_eq!(lines[1], json!({ "method": "tools/list", "id": 2 }));
    }

    #[test]
    fn error_response_is_returned_not_raised() {
        let mut c = client("{\"error\":{\"code\":-32601,\"message\":\"nope\"},\"id\":\"x\"}\n");
        let resp = c.list_tools("x").unwrap();
        assert!(resp.is_error());
        assert_eq!(resp.error.unwrap().message, "nope");
    }

    #[test]
    fn read_resource_sends_trimmed_uri() {
        let mut c = client("{\"result\":\"data\",\"id\":3}\n");
        c.read_resource("  file:///tmp/x.txt \n", 3).unwrap();
        let lines = sent(c);
        assert_eq!(lines[0]["params"]["uri"], "file:///tmp/x.txt");
        assert_eq!(lines[0]["method"], "resources/read");
    }

    #[test]
    fn invalid_uri_is_rejected_before_sending() {
        let mut c = client("");
        assert!(matches!(c.read_resource("   ", 1), Err(GenError::Harness(_))));
        assert!(matches!(c.read_resource("not a uri", 1), Err(GenError::Harness(_))));
        assert!(sent(c).is_empty());
    }

    #[test]
    fn absolute_paths_are_accepted() {
        assert_eq!(sanitize_uri(" /var/data ").unwrap(), "/var/data");
        assert_eq!(sanitize_uri("db://main").unwrap(), "db://main");
    }

    #[test]
    fn call_tool_sends_name_and_arguments() {
        let mut c = client("{\"result\":3,\"id\":4}\n");
        let mut args = Map::new();
        args.insert("a".into(), json!(1));
        c.call_tool("add", args, 4).unwrap();
        let lines = sent(c);
        assert_eq!(
            lines[0]["params"],
            json!({ "name": "add", "arguments": { "a": 1 } })
        );
    }

    #[test]
    fn endless_line_stops_at_the_limit() {
        let mut c = McpClient::new(BufReader::new(io::repeat(b'x')), Vec::new());
        let err = c.read_response().unwrap_err();
        assert!(matches!(err, GenError::Harness(m) if m.contains("too large")));
    }

    #[test]
    fn line_at_the_limit_is_accepted() {
        let padding = " ".repeat(MAX_RESPONSE_BYTES - 20);
        let mut c = client(&format!("{{\"id\":1{padding}}}\n"));
        let response = c.read_response().unwrap();
        assert_eq!(response.id, Some(RequestId::Number(1)));
    }

    #[test]
    fn eof_and_garbage_are_harness_errors() {
        let mut c = client("");
        assert!(matches!(c.list_tools(1), Err(GenError::Harness(m)) if m.contains("no response")));
        let mut c = client("not json\n");
        assert!(matches!(c.list_tools(1), Err(GenError::Harness(m)) if m.contains("decode")));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut c = client("\n\n{\"result\":true,\"id\":1}\n");
        assert_eq!(c.list_tools(1).unwrap().result, Some(json!(true)));
    }
}

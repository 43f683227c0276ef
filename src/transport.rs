//! Line transport: read a request line, dispatch it, write one response line.
//!
//! Strictly sequential. A request is fully handled and its response flushed
//! before the next line is read, so responses come out in request order.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ErrorEncoding;
use crate::protocol::{Request, Response};
use crate::registry::ToolRegistry;

#[derive(Debug, Clone)]
pub struct Server {
    registry: ToolRegistry,
    encoding: ErrorEncoding,
}

impl Server {
    pub fn new(registry: ToolRegistry, encoding: ErrorEncoding) -> Self {
        Self { registry, encoding }
    }

    /// Serve stdin/stdout until stdin reaches end-of-stream.
    pub async fn serve_stdio(&self) -> io::Result<u64> {
        let stdin = BufReader::new(io::stdin());
        let stdout = io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve until `reader` reaches end-of-stream. Returns the number of
    /// lines answered. Only I/O errors on the streams themselves end the loop early.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> io::Result<u64>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(tools = ?self.registry.tool_names(), "serving requests");
        let mut buf = Vec::new();
        let mut handled = 0u64;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = self.handle_line(strip_line_ending(&buf)).await;
            writer.write_all(&response.to_line()?).await?;
            writer.flush().await?;
            handled += 1;
        }

        tracing::info!(handled, "input closed, shutting down");
        Ok(handled)
    }

    /// Turn one raw line into exactly one response.
    pub async fn handle_line(&self, line: &[u8]) -> Response {
        let request = match Request::decode(line) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "undecodable request line");
                return Response::decode_failure(&e);
            }
        };
        self.handle_request(request).await
    }

    pub async fn handle_request(&self, request: Request) -> Response {
        let Request { method, params, id } = request;
        let name = method.as_deref().unwrap_or("null");
        tracing::debug!(method = name, id = %id, "dispatching");

        let outcome = self.registry.dispatch(method.as_deref(), params).await;
        if let Err(e) = &outcome {
            tracing::warn!(method = name, id = %id, error = %e, "tool failed");
        }
        Response::from_outcome(id, outcome, self.encoding)
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_lf_and_crlf() {
        assert_eq!(strip_line_ending(b"{}\n"), b"{}");
        assert_eq!(strip_line_ending(b"{}\r\n"), b"{}");
        assert_eq!(strip_line_ending(b"{}"), b"{}");
        assert_eq!(strip_line_ending(b"\n"), b"");
    }
}

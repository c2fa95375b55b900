use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;

use crate::http::writer::ResponseWriter;
use crate::server::dispatcher::Dispatcher;

/// Longest request line we will buffer.
const MAX_LINE_BYTES: u64 = 8 * 1024;
/// Cap on header bytes drained after the request line.
const MAX_HEADER_BYTES: usize = 16 * 1024;
/// Headers are ignored, so we only wait briefly for them.
const HEADER_DRAIN_TIMEOUT: Duration = Duration::from_millis(100);

/// One accepted connection, carrying exactly one request.
pub struct Connection<S> {
    stream: BufReader<S>,
    dispatcher: Arc<Dispatcher>,
    read_timeout: Duration,
    write_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingRequestLine,
    Dispatching(Option<String>),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// The write timeout starts out equal to `read_timeout`.
    pub fn new(stream: S, dispatcher: Arc<Dispatcher>, read_timeout: Duration) -> Self {
        Self {
            stream: BufReader::new(stream),
            dispatcher,
            read_timeout,
            write_timeout: read_timeout,
            state: ConnectionState::AwaitingRequestLine,
        }
    }

    /// Bounds how long a client may take to accept the whole response.
    pub fn with_write_timeout(mut self, write_timeout: Duration) -> Self {
        self.write_timeout = write_timeout;
        self
    }

    /// Drives the connection to `Closed`. The stream is shut down on every
    /// path, including a failed write.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut result = Ok(());

        loop {
            match &mut self.state {
                ConnectionState::AwaitingRequestLine => {
                    let line = self.read_request_line().await;
                    if line.is_some() {
                        self.drain_headers().await;
                    }
                    self.state = ConnectionState::Dispatching(line);
                }

                ConnectionState::Dispatching(line) => {
                    let reply = self.dispatcher.dispatch(line.as_deref()).await;
                    self.state = ConnectionState::Writing(ResponseWriter::new(&reply));
                }

                ConnectionState::Writing(writer) => {
                    result = match timeout(
                        self.write_timeout,
                        writer.write_to_stream(&mut self.stream),
                    )
                    .await
                    {
                        Ok(written) => written,
                        Err(_) => Err(anyhow::anyhow!(
                            "client did not accept response within {} ms",
                            self.write_timeout.as_millis()
                        )),
                    };
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(error = %e, "Shutdown after response failed");
        }

        result
    }

    /// Reads the first line. `None` covers EOF, I/O errors and timeouts alike,
    /// all of which are answered with 400.
    async fn read_request_line(&mut self) -> Option<String> {
        let mut buf = Vec::new();
        let mut limited = (&mut self.stream).take(MAX_LINE_BYTES);

        match timeout(self.read_timeout, limited.read_until(b'\n', &mut buf)).await {
            Ok(Ok(0)) => None,
            Ok(Ok(_)) => {
                let line = String::from_utf8_lossy(&buf);
                Some(line.trim_end_matches(['\r', '\n']).to_string())
            }
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Failed to read request line");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.read_timeout.as_millis() as u64,
                    "Timed out waiting for request line"
                );
                None
            }
        }
    }

    /// Consumes header lines up to the blank line so the peer is not reset
    /// when we close with unread input. Stops quietly on EOF, timeout or cap.
    async fn drain_headers(&mut self) {
        let mut drained = 0usize;

        while drained < MAX_HEADER_BYTES {
            let mut buf = Vec::new();
            let read = timeout(
                HEADER_DRAIN_TIMEOUT,
                self.stream.read_until(b'\n', &mut buf),
            )
            .await;

            match read {
                Ok(Ok(0)) | Ok(Err(_)) | Err(_) => break,
                Ok(Ok(n)) => {
                    drained += n;
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\r', '\n']);
                    if line.is_empty() {
                        break;
                    }
                    tracing::trace!(header = %line, "Request header ignored");
                }
            }
        }
    }
}

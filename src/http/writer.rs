use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Reply, StatusCode};

pub const HTTP_VERSION: &str = "HTTP/1.1";

const CORS_HEADERS: &[(&str, &str)] = &[
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

fn put_header(buf: &mut BytesMut, name: &str, value: &str) {
    buf.put_slice(name.as_bytes());
    buf.put_slice(b": ");
    buf.put_slice(value.as_bytes());
    buf.put_slice(b"\r\n");
}

/// Frames a reply. Header order is fixed: Content-Type, the CORS block (if
/// enabled), then Content-Length.
pub fn serialize_reply(reply: &Reply) -> Bytes {
    let mut buf = BytesMut::with_capacity(256 + reply.body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        reply.status,
        StatusCode::reason_for(reply.status)
    );
    buf.put_slice(status_line.as_bytes());

    put_header(&mut buf, "Content-Type", &reply.content_type);
    if reply.cors {
        for (name, value) in CORS_HEADERS {
            put_header(&mut buf, name, value);
        }
    }
    put_header(&mut buf, "Content-Length", &reply.body.len().to_string());

    // Header/body separator
    buf.put_slice(b"\r\n");

    buf.put_slice(&reply.body);

    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(reply: &Reply) -> Self {
        Self {
            buffer: serialize_reply(reply),
            written: 0,
        }
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

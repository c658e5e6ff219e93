use anyhow::{anyhow, Context, Result};
use futures::{SinkExt, StreamExt};
use tokio::io::BufReader;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::debug;

use super::types::{IncomingMessage, Response};

/// Line-delimited JSON-RPC over stdio. Stdout carries only protocol
/// messages; everything else in the process logs to stderr.
pub struct StdioTransport {
    reader: FramedRead<BufReader<tokio::io::Stdin>, LinesCodec>,
    writer: FramedWrite<tokio::io::Stdout, LinesCodec>,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            reader: FramedRead::new(BufReader::new(tokio::io::stdin()), LinesCodec::new()),
            writer: FramedWrite::new(tokio::io::stdout(), LinesCodec::new()),
        }
    }

    /// Reads the next message; `None` signals EOF (client disconnected).
    pub async fn read_message(&mut self) -> Result<Option<IncomingMessage>> {
        match self.reader.next().await {
            Some(Ok(line)) => {
                debug!("Received: {}", line);
                let message = serde_json::from_str::<IncomingMessage>(&line)
                    .map_err(|e| anyhow!("invalid JSON-RPC message: {}", e))?;
                Ok(Some(message))
            }
            Some(Err(e)) => Err(anyhow!("transport error: {}", e)),
            None => {
                debug!("EOF reached");
                Ok(None)
            }
        }
    }

    pub async fn write_response(&mut self, response: Response) -> Result<()> {
        let json = serde_json::to_string(&response).context("failed to serialize response")?;
        debug!("Sending: {}", json);
        self.writer.send(json).await?;
        Ok(())
    }
}

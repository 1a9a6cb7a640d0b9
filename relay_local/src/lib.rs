//! A wire client that speaks JSON lines instead of IRC.
//!
//! Protocol events are read one JSON object per line, wire actions are written the same way.

use relay_irc::{WireClient, WireEvent};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout},
    sync::{mpsc, Mutex},
    task::JoinHandle,
};
use tokio_stream::{wrappers::LinesStream, StreamExt as _};

#[derive(Debug, serde::Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Line<'a> {
    Say { target: &'a str, text: &'a str },
    Notice { target: &'a str, text: &'a str },
    Action { target: &'a str, text: &'a str },
    Send { command: &'a str, args: &'a [&'a str] },
    Join { channel: &'a str },
    Part { channel: &'a str },
}

pub struct LocalWire<W> {
    out: Mutex<W>,
}

impl<W> LocalWire<W>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    async fn write(&self, line: Line<'_>) -> anyhow::Result<()> {
        let data = serde_json::to_string(&line)?;
        log::trace!("-> {}", data.escape_debug());

        let mut out = self.out.lock().await;
        out.write_all(data.as_bytes()).await?;
        out.write_all(b"\n").await?;
        out.flush().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl<W> WireClient for LocalWire<W>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    async fn say(&self, target: &str, text: &str) -> anyhow::Result<()> {
        self.write(Line::Say { target, text }).await
    }

    async fn notice(&self, target: &str, text: &str) -> anyhow::Result<()> {
        self.write(Line::Notice { target, text }).await
    }

    async fn action(&self, target: &str, text: &str) -> anyhow::Result<()> {
        self.write(Line::Action { target, text }).await
    }

    async fn send(&self, command: &str, args: &[&str]) -> anyhow::Result<()> {
        self.write(Line::Send { command, args }).await
    }

    // there is no server to confirm anything, so writing the line is enough
    async fn join(&self, channel: &str) -> anyhow::Result<()> {
        self.write(Line::Join { channel }).await
    }

    async fn part(&self, channel: &str) -> anyhow::Result<()> {
        self.write(Line::Part { channel }).await
    }
}

/// Reads events from `input` until it ends or the receiver goes away.
///
/// Lines that aren't events are logged and skipped.
pub async fn forward_events<R>(input: R, events: mpsc::Sender<WireEvent>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = LinesStream::new(input.lines());
    while let Some(line) = lines.next().await {
        let line = line?;
        log::trace!("<- {}", line.escape_debug());

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(err) => {
                log::warn!("skipping invalid event: {err}");
                continue;
            }
        };

        if events.send(event).await.is_err() {
            log::debug!("event receiver closed");
            break;
        }
    }
    Ok(())
}

/// A wire client on stdout, fed by events from stdin.
pub fn stdio(capacity: usize) -> (LocalWire<Stdout>, mpsc::Receiver<WireEvent>, JoinHandle<anyhow::Result<()>>) {
    let (tx, rx) = mpsc::channel(capacity);
    let reader = tokio::spawn(forward_events(BufReader::<Stdin>::new(tokio::io::stdin()), tx));
    (LocalWire::new(tokio::io::stdout()), rx, reader)
}

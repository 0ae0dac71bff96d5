//! Line framing for the agent response stream.
//!
//! The runtime emits a line-oriented UTF-8 stream; only lines prefixed
//! `data: ` carry payload. Chunk boundaries fall anywhere, so bytes are
//! buffered until a full line is available. The residual unterminated line
//! at stream close is processed like any other.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const DATA_PREFIX: &str = "data: ";

/// Drain a response byte stream, forwarding payload fragments to `tx`.
///
/// Never returns an error: a failed read becomes one terminal
/// `Error invoking agent: …` fragment and the stream ends. Cancellation is
/// observed between reads.
pub(crate) async fn forward_stream<S, E>(
    mut body: S,
    tx: mpsc::Sender<String>,
    cancel: CancellationToken,
) where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut pending = String::new();

    loop {
        let chunk = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("response stream cancelled");
                return;
            }
            chunk = body.next() => chunk,
        };

        let bytes = match chunk {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => {
                let _ = tx.send(format!("Error invoking agent: {e}")).await;
                return;
            }
            None => break,
        };

        pending.push_str(&String::from_utf8_lossy(&bytes));
        while let Some(pos) = pending.find('\n') {
            let line: String = pending.drain(..=pos).collect();
            if !emit_line(line.trim_end_matches('\n'), &tx).await {
                return;
            }
        }
    }

    if !pending.is_empty() {
        emit_line(&pending, &tx).await;
    }
}

/// Forward one line's payload, if it carries one.
///
/// Returns false once the receiver is gone and pumping should stop.
async fn emit_line(line: &str, tx: &mpsc::Sender<String>) -> bool {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        if !line.is_empty() {
            debug!(line, "skipping non-payload line");
        }
        return true;
    };
    if payload.trim().is_empty() {
        return true;
    }
    tx.send(payload.to_string()).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    async fn run(chunks: Vec<Result<Bytes, std::io::Error>>) -> Vec<String> {
        let (tx, mut rx) = mpsc::channel(16);
        let body = stream::iter(chunks);
        forward_stream(body, tx, CancellationToken::new()).await;

        let mut out = Vec::new();
        while let Some(fragment) = rx.recv().await {
            out.push(fragment);
        }
        out
    }

    fn ok(s: &str) -> Result<Bytes, std::io::Error> {
        Ok(Bytes::copy_from_slice(s.as_bytes()))
    }

    #[tokio::test]
    async fn test_filters_to_payload_lines() {
        let out = run(vec![
            ok("data: Hello\n"),
            ok("data: \n"),
            ok("not-data: ignored\n"),
            ok("data: world\n"),
        ])
        .await;
        assert_eq!(out, vec!["Hello", "world"]);
    }

    #[tokio::test]
    async fn test_reassembles_lines_split_across_chunks() {
        let out = run(vec![ok("data: He"), ok("llo\ndata: world")]).await;
        assert_eq!(out, vec!["Hello", "world"]);
    }

    #[tokio::test]
    async fn test_keeps_incidental_fragment_whitespace() {
        let out = run(vec![ok("data:  current\n")]).await;
        assert_eq!(out, vec![" current"]);
    }

    #[tokio::test]
    async fn test_strips_carriage_returns() {
        let out = run(vec![ok("data: Hi\r\n")]).await;
        assert_eq!(out, vec!["Hi"]);
    }

    #[tokio::test]
    async fn test_transport_error_becomes_terminal_fragment() {
        let out = run(vec![
            ok("data: partial\n"),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset")),
            ok("data: never seen\n"),
        ])
        .await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "partial");
        assert!(out[1].starts_with("Error invoking agent: "));
    }

    #[tokio::test]
    async fn test_cancellation_ends_stream() {
        let (tx, mut rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let body = stream::pending::<Result<Bytes, std::io::Error>>();
        tokio::time::timeout(
            std::time::Duration::from_secs(1),
            forward_stream(body, tx, cancel),
        )
        .await
        .expect("cancelled stream must return promptly");

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_non_payload_noise_only() {
        let out = run(vec![ok(": keep-alive\n\nevent: done\n")]).await;
        assert!(out.is_empty());
    }
}

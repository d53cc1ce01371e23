// src/dashboard/session.rs
//! Trigger streams and the session loop
//!
//! Whatever fires an update (a line entered on stdin, a refresh tick, a
//! one-shot CLI call) becomes a [`Trigger`]. [`run`] drains a stream of
//! triggers and turns each one into a [`Presenter::submit`].

use crate::dashboard::display::Board;
use crate::dashboard::presenter::{Presenter, UpdateOutcome};
use futures::future::{self, Future};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Something asking the dashboard to act
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Replace the input with this identifier and update
    Submit(String),
    /// Update again with the current input
    Resubmit,
    /// End the session
    Quit,
}

/// Interprets one line typed at the prompt
///
/// An empty line resubmits; `quit`/`exit`/`q` end the session.
pub fn parse_line(line: &str) -> Trigger {
    match line.trim() {
        "" => Trigger::Resubmit,
        "quit" | "exit" | "q" => Trigger::Quit,
        other => Trigger::Submit(other.to_string()),
    }
}

/// One trigger per line read from `reader`, then [`Trigger::Quit`] at EOF
pub fn line_triggers<R>(reader: R) -> BoxStream<'static, Trigger>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let lines = stream::unfold(reader.lines(), |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Some((parse_line(&line), lines)),
            Ok(None) => None,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                None
            }
        }
    });
    lines.chain(stream::once(async { Trigger::Quit })).boxed()
}

/// A [`Trigger::Resubmit`] every `period`, the first one immediately
pub fn interval_triggers(period: Duration) -> BoxStream<'static, Trigger> {
    stream::unfold(tokio::time::interval(period), |mut ticker| async move {
        ticker.tick().await;
        Some((Trigger::Resubmit, ticker))
    })
    .boxed()
}

/// A single [`Trigger::Quit`] once `signal` resolves
///
/// If the signal listener fails the error is logged and the stream never
/// yields, so the session keeps running instead of ending before its first
/// update.
pub fn quit_on<F>(signal: F) -> BoxStream<'static, Trigger>
where
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    stream::once(async move {
        if let Err(e) = signal.await {
            log::error!("Failed to listen for shutdown signal: {}", e);
            future::pending::<()>().await;
        }
        Trigger::Quit
    })
    .boxed()
}

/// Feeds triggers into `presenter` until the stream ends or asks to quit
///
/// `render` runs after every update with the board and the outcome.
/// Returns the number of updates performed.
pub async fn run<S, F>(
    presenter: &Presenter,
    mut input: Option<String>,
    mut triggers: S,
    board: &mut Board,
    mut render: F,
) -> usize
where
    S: Stream<Item = Trigger> + Unpin,
    F: FnMut(&Board, &UpdateOutcome, &str),
{
    let mut updates = 0;
    while let Some(trigger) = triggers.next().await {
        match trigger {
            Trigger::Quit => break,
            Trigger::Submit(identifier) => input = Some(identifier),
            Trigger::Resubmit => {}
        }

        let Some(current) = input.as_deref() else {
            log::warn!("No worker address entered yet");
            continue;
        };

        let outcome = presenter.submit(current, board).await;
        updates += 1;
        render(board, &outcome, current);
    }
    updates
}

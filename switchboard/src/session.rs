//! Console session loop: read a line, route it, print the reply.
//!
//! ```rust
//! use switchboard::session::{InputAction, classify_input};
//!
//! assert_eq!(classify_input(Some("  EXIT ")), InputAction::Terminate);
//! assert_eq!(classify_input(None), InputAction::Terminate);
//! assert_eq!(
//!     classify_input(Some("What's 15 + 25?\n")),
//!     InputAction::Route("What's 15 + 25?".to_string())
//! );
//! ```

use std::io;

use srouter::IntentRouter;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const USER_PROMPT: &str = "You: ";
pub const AGENT_PREFIX: &str = "Agent: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Routing,
    Responding,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Terminate,
    Route(String),
}

/// `None` means the input stream ended.
pub fn classify_input(line: Option<&str>) -> InputAction {
    let Some(line) = line else {
        return InputAction::Terminate;
    };

    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") {
        return InputAction::Terminate;
    }

    InputAction::Route(trimmed.to_string())
}

pub struct SessionLoop<R, W> {
    router: IntentRouter,
    reader: R,
    writer: W,
    state: SessionState,
    greeting: Option<String>,
}

impl<R, W> SessionLoop<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(router: IntentRouter, reader: R, writer: W) -> Self {
        Self {
            router,
            reader,
            writer,
            state: SessionState::AwaitingInput,
            greeting: None,
        }
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Runs until the user exits or input ends. Returns the number of routed turns.
    pub async fn run(&mut self) -> io::Result<usize> {
        if let Some(greeting) = self.greeting.take() {
            self.writer.write_all(greeting.as_bytes()).await?;
            self.writer.write_all(b"\n").await?;
        }

        let mut turns = 0;
        while self.step().await? {
            turns += 1;
        }

        Ok(turns)
    }

    /// Handles one line. Returns `false` once the session has terminated.
    pub async fn step(&mut self) -> io::Result<bool> {
        if self.state == SessionState::Terminated {
            return Ok(false);
        }

        self.state = SessionState::AwaitingInput;
        self.writer.write_all(USER_PROMPT.as_bytes()).await?;
        self.writer.flush().await?;

        // Invalid UTF-8 is replaced rather than ending the session.
        let mut buffer = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buffer).await?;
        let line = String::from_utf8_lossy(&buffer);
        let input = (read > 0).then_some(&*line);

        let text = match classify_input(input) {
            InputAction::Terminate => {
                self.state = SessionState::Terminated;
                self.writer.write_all(b"\n").await?;
                self.writer.flush().await?;
                return Ok(false);
            }
            InputAction::Route(text) => text,
        };

        self.state = SessionState::Routing;
        let turn = self.router.respond(&text).await;
        if turn.is_diagnostic() {
            tracing::warn!(phase = "session", event = "turn_failed", error = ?turn.error);
        }

        self.state = SessionState::Responding;
        self.writer
            .write_all(format!("{AGENT_PREFIX}{}\n", turn.reply).as_bytes())
            .await?;
        self.writer.flush().await?;

        self.state = SessionState::AwaitingInput;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_exit_lines_terminate() {
        for line in ["", "\n", "   \r\n", "exit", "Exit\n", " eXiT  "] {
            assert_eq!(classify_input(Some(line)), InputAction::Terminate, "{line:?}");
        }
    }

    #[test]
    fn other_lines_are_routed_trimmed() {
        assert_eq!(
            classify_input(Some("  tell me a joke \n")),
            InputAction::Route("tell me a joke".to_string())
        );
        assert_eq!(
            classify_input(Some("exit now")),
            InputAction::Route("exit now".to_string())
        );
    }
}

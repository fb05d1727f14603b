//! The conversation loop.
//!
//! A [`Chat`] owns the [`Transcript`] and moves through a small set of [`State`]s, one blocking
//! interaction per step:
//!
//! ```text
//! AwaitingInput -> AwaitingCompletion -> AwaitingDecision -> (AwaitingEdit) -> AwaitingInput
//! ```
//!
//! Reading `quit` (in any case) or reaching the end of input moves to [`State::Done`]. A failed
//! completion is reported and its user turn withdrawn, after which the loop waits for new input.
//!
//! All user interaction goes through the [`Console`] trait, all network traffic through
//! [`Completer`].

use std::io;

use crate::{
    Error, RequestError, Transcript,
    client::Completer,
    keys::Decision,
};

/// The literal that ends the session when entered at the input prompt.
pub const QUIT_COMMAND: &str = "quit";

/// User-facing side of the conversation loop.
///
/// Methods returning `None` signal that the user ended the session (end of input or an
/// interrupt).
pub trait Console {
    /// Reads the next user message.
    fn read_input(&mut self) -> io::Result<Option<String>>;

    /// Displays an assistant reply.
    fn show_reply(&mut self, reply: &str) -> io::Result<()>;

    /// Asks whether to keep the reply or revise it.
    fn decide(&mut self) -> io::Result<Option<Decision>>;

    /// Lets the user edit `reply`, returning the submitted text.
    fn edit(&mut self, reply: &str) -> io::Result<Option<String>>;

    /// Reports a failed completion.
    fn show_error(&mut self, error: &RequestError) -> io::Result<()>;
}

/// A state of the conversation loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum State {
    AwaitingInput,
    AwaitingCompletion,
    AwaitingDecision { reply: String },
    AwaitingEdit { reply: String },
    Done,
}

/// Returns whether `line` is the quit command.
pub fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case(QUIT_COMMAND)
}

/// An interactive chat session.
pub struct Chat<C, T> {
    completer: C,
    console: T,
    transcript: Transcript,
}

impl<C, T> Chat<C, T>
where
    C: Completer,
    T: Console,
{
    /// Creates a session with an empty transcript.
    pub fn new(completer: C, console: T) -> Self {
        Self {
            completer,
            console,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn console(&self) -> &T {
        &self.console
    }

    /// Runs the session until the user quits.
    pub fn run(&mut self) -> Result<(), Error> {
        let mut state = State::AwaitingInput;
        while state != State::Done {
            state = self.step(state)?;
        }
        Ok(())
    }

    /// Performs a single transition out of `state`.
    ///
    /// Only console failures are returned as errors; failed completions are handled here.
    pub fn step(&mut self, state: State) -> Result<State, Error> {
        let next = match state {
            State::AwaitingInput => match self.console.read_input()? {
                None => State::Done,
                Some(line) if is_quit(&line) => State::Done,
                Some(line) => {
                    self.transcript.push_user(line);
                    State::AwaitingCompletion
                }
            },
            State::AwaitingCompletion => match self.completer.complete(&self.transcript) {
                Ok(reply) => {
                    self.console.show_reply(&reply)?;
                    State::AwaitingDecision { reply }
                }
                Err(err) => {
                    tracing::warn!(%err, "completion failed, dropping user turn");
                    self.console.show_error(&err)?;
                    self.transcript.rollback();
                    State::AwaitingInput
                }
            },
            State::AwaitingDecision { reply } => match self.console.decide()? {
                None => State::Done,
                Some(Decision::Continue) => {
                    self.transcript.push_assistant(reply);
                    State::AwaitingInput
                }
                Some(Decision::Edit) => State::AwaitingEdit { reply },
            },
            State::AwaitingEdit { reply } => match self.console.edit(&reply)? {
                None => State::Done,
                Some(edited) => {
                    tracing::debug!(
                        original_len = reply.len(),
                        edited_len = edited.len(),
                        "reply edited"
                    );
                    self.transcript.push_assistant(edited);
                    State::AwaitingInput
                }
            },
            State::Done => State::Done,
        };

        Ok(next)
    }
}

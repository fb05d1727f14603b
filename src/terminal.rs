//! Interactive [`Console`] on the process terminal.
//!
//! User messages are read as plain lines from stdin. The decision and edit prompts are
//! [`Reedline`] editors configured in [`crate::keys`].

use std::{
    borrow::Cow,
    io::{self, BufRead, Write},
};

use crossterm::style::Stylize;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, Reedline, Signal};

use crate::{
    RequestError,
    chat::Console,
    keys::{self, Decision},
    render::Renderer,
};

/// Printed once before the first prompt.
pub const STARTUP_MARKER: &str = "start";

const INPUT_PROMPT: &str = "You: ";
const REPLY_LABEL: &str = "LLM: ";
const DECISION_PROMPT: &str = "Press Enter to continue, Backspace to edit response: ";
const EDIT_PROMPT: &str = "Edit LLM's response: ";

/// A reedline prompt consisting of a fixed label.
struct LabelPrompt(&'static str);

impl Prompt for LabelPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// The terminal the chat runs in.
pub struct Terminal {
    renderer: Renderer,
    decision_editor: Reedline,
    edit_editor: Reedline,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            renderer: Renderer::for_terminal(),
            decision_editor: keys::decision_editor(),
            edit_editor: keys::edit_editor(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for Terminal {
    fn read_input(&mut self) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            writeln!(stdout)?;
            write!(stdout, "{INPUT_PROMPT}")?;
            stdout.flush()?;
        }

        read_line(&mut io::stdin().lock())
    }

    fn show_reply(&mut self, reply: &str) -> io::Result<()> {
        let rendered = self.renderer.render(reply);

        let mut stdout = io::stdout().lock();
        writeln!(stdout)?;
        write!(stdout, "{REPLY_LABEL}{rendered}")?;
        if !rendered.ends_with('\n') {
            writeln!(stdout)?;
        }
        stdout.flush()
    }

    fn decide(&mut self) -> io::Result<Option<Decision>> {
        let prompt = LabelPrompt(DECISION_PROMPT);

        loop {
            keys::clear(&mut self.decision_editor);
            match self.decision_editor.read_line(&prompt)? {
                Signal::Success(command) => {
                    if let Some(decision) = Decision::from_host_command(&command) {
                        return Ok(Some(decision));
                    }
                    tracing::debug!(%command, "ignoring unexpected decision prompt result");
                }
                Signal::CtrlC | Signal::CtrlD => return Ok(None),
            }
        }
    }

    fn edit(&mut self, reply: &str) -> io::Result<Option<String>> {
        keys::prefill(&mut self.edit_editor, reply);

        match self.edit_editor.read_line(&LabelPrompt(EDIT_PROMPT))? {
            Signal::Success(buffer) => Ok(Some(buffer)),
            Signal::CtrlC | Signal::CtrlD => Ok(None),
        }
    }

    fn show_error(&mut self, error: &RequestError) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{} {error}", "Error communicating with LLM:".red())?;
        stdout.flush()
    }
}

/// Reads one line, without its line ending. Returns `None` at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(Some(line))
}

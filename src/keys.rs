//! Key bindings for the decision and edit prompts.
//!
//! Both prompts are [`Reedline`] instances. The decision prompt knows nothing but the accept and
//! revise keys (plus the usual interrupts), each resolving the prompt immediately. The edit
//! prompt keeps the default emacs bindings and adds two editing commands on top.

use reedline::{
    EditCommand, Emacs, KeyCode, KeyModifiers, Keybindings, Reedline, ReedlineEvent,
    default_emacs_keybindings,
};

/// Number of characters removed by [`EditorCommand::DeleteChunk`].
///
/// Counted in graphemes, as reedline's backspace deletes them: a base letter followed by a
/// combining mark is one character here, though it is two code points.
pub const DELETE_CHUNK_LEN: usize = 15;

/// The custom commands understood by the prompts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    /// Delete the [`DELETE_CHUNK_LEN`] characters before the cursor.
    DeleteChunk,
    /// Insert a literal newline at the cursor.
    InsertBreak,
    /// Accept the reply as-is.
    Accept,
    /// Revise the reply in the editor.
    Revise,
    /// Submit the edited reply.
    Submit,
}

impl EditorCommand {
    /// The key the command is bound to.
    pub fn binding(self) -> (KeyModifiers, KeyCode) {
        match self {
            EditorCommand::DeleteChunk => (KeyModifiers::NONE, KeyCode::Char('-')),
            EditorCommand::InsertBreak => (KeyModifiers::NONE, KeyCode::Char('=')),
            EditorCommand::Accept => (KeyModifiers::NONE, KeyCode::Enter),
            EditorCommand::Revise => (KeyModifiers::NONE, KeyCode::Backspace),
            EditorCommand::Submit => (KeyModifiers::NONE, KeyCode::Enter),
        }
    }

    /// The event the editor runs when the command's key is pressed.
    pub fn event(self) -> ReedlineEvent {
        match self {
            EditorCommand::DeleteChunk => {
                ReedlineEvent::Edit(vec![EditCommand::Backspace; DELETE_CHUNK_LEN])
            }
            EditorCommand::InsertBreak => ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
            EditorCommand::Accept => {
                ReedlineEvent::ExecuteHostCommand(Decision::Continue.host_command().to_owned())
            }
            EditorCommand::Revise => {
                ReedlineEvent::ExecuteHostCommand(Decision::Edit.host_command().to_owned())
            }
            EditorCommand::Submit => ReedlineEvent::Submit,
        }
    }

    fn bind(self, keybindings: &mut Keybindings) {
        let (modifiers, code) = self.binding();
        keybindings.add_binding(modifiers, code, self.event());
    }
}

/// Outcome of the decision prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Keep the reply unchanged.
    Continue,
    /// Open the reply in the editor.
    Edit,
}

impl Decision {
    /// The host command the decision prompt returns for this decision.
    pub fn host_command(self) -> &'static str {
        match self {
            Decision::Continue => "continue",
            Decision::Edit => "edit",
        }
    }

    /// Resolves the host command returned by the decision prompt.
    pub fn from_host_command(command: &str) -> Option<Self> {
        match command {
            "continue" => Some(Decision::Continue),
            "edit" => Some(Decision::Edit),
            _ => None,
        }
    }
}

/// Bindings of the decision prompt: accept, revise and interrupts, nothing else.
pub fn decision_keybindings() -> Keybindings {
    let mut keybindings = Keybindings::new();

    EditorCommand::Accept.bind(&mut keybindings);
    EditorCommand::Revise.bind(&mut keybindings);

    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('c'), ReedlineEvent::CtrlC);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('d'), ReedlineEvent::CtrlD);

    keybindings
}

/// Bindings of the edit prompt: emacs defaults with the chunk delete and line break overrides.
pub fn edit_keybindings() -> Keybindings {
    let mut keybindings = default_emacs_keybindings();

    EditorCommand::DeleteChunk.bind(&mut keybindings);
    EditorCommand::InsertBreak.bind(&mut keybindings);
    EditorCommand::Submit.bind(&mut keybindings);

    keybindings
}

/// Creates the [`Reedline`] instance used for the decision prompt.
pub fn decision_editor() -> Reedline {
    Reedline::create().with_edit_mode(Box::new(Emacs::new(decision_keybindings())))
}

/// Creates the [`Reedline`] instance used for the edit prompt.
pub fn edit_editor() -> Reedline {
    Reedline::create().with_edit_mode(Box::new(Emacs::new(edit_keybindings())))
}

/// Replaces the editor's buffer with `text`, leaving the cursor at its end.
pub fn prefill(editor: &mut Reedline, text: &str) {
    editor.run_edit_commands(&[EditCommand::Clear, EditCommand::InsertString(text.to_owned())]);
}

/// Empties the editor's buffer.
///
/// reedline keeps the buffer when a host command resolves the prompt, so anything typed before
/// the key would otherwise show up again the next time the editor is read.
pub fn clear(editor: &mut Reedline) {
    editor.run_edit_commands(&[EditCommand::Clear]);
}

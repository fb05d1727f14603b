//! Terminal markdown rendering of replies.

use termimad::{MadSkin, crossterm::style::Color};

/// Renders markdown replies for display in the terminal.
pub struct Renderer {
    skin: MadSkin,
    width: Option<usize>,
}

impl Renderer {
    /// Creates a renderer wrapping lines at `width` columns, or not at all.
    pub fn new(width: Option<usize>) -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code.set_fg(Color::Yellow);

        Self { skin, width }
    }

    /// Creates a renderer wrapping at the current terminal width.
    pub fn for_terminal() -> Self {
        let (columns, _) = termimad::terminal_size();
        Self::new(Some(columns as usize))
    }

    /// Renders `markdown` into styled terminal text.
    pub fn render(&self, markdown: &str) -> String {
        self.skin.text(markdown, self.width).to_string()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(None)
    }
}

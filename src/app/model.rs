//! Application model types: `App`, `InputMode` and `Prompt`.

/// What keystrokes currently edit.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing paths to open (the file picker).
    Open(String),
    /// Typing a position in seconds.
    Seek(String),
}

/// A submitted prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Open(String),
    Seek(String),
}

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    /// Highlighted playlist row.
    pub selected: usize,
    pub mode: InputMode,
    /// Move the cursor along when the active track changes.
    pub follow_active: bool,
    last_active: Option<usize>,
}

impl App {
    pub fn new() -> Self {
        Self {
            follow_active: true,
            ..Self::default()
        }
    }

    pub fn is_prompting(&self) -> bool {
        self.mode != InputMode::Normal
    }

    /// Move down one row, wrapping at `len`.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move up one row, wrapping at the top.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Keep the cursor on a real row after the playlist changed, and follow
    /// the active track when it moves.
    pub fn sync(&mut self, len: usize, active: Option<usize>) {
        if self.follow_active && active != self.last_active {
            if let Some(a) = active {
                self.selected = a;
            }
        }
        self.last_active = active;
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn begin_open(&mut self) {
        self.mode = InputMode::Open(String::new());
    }

    pub fn begin_seek(&mut self) {
        self.mode = InputMode::Seek(String::new());
    }

    pub fn push_char(&mut self, c: char) {
        if let InputMode::Open(buf) | InputMode::Seek(buf) = &mut self.mode {
            buf.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let InputMode::Open(buf) | InputMode::Seek(buf) = &mut self.mode {
            buf.pop();
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Leave the prompt, returning what was typed.
    pub fn submit_prompt(&mut self) -> Option<Prompt> {
        match std::mem::take(&mut self.mode) {
            InputMode::Normal => None,
            InputMode::Open(buf) => Some(Prompt::Open(buf)),
            InputMode::Seek(buf) => Some(Prompt::Seek(buf)),
        }
    }
}

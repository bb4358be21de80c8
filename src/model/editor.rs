//! Style Editor Model
//!
//! Text buffer behind the style editor pane. Tracks undo history and a
//! generation number so the view can tell whether edits are unsaved:
//! `change_generation` marks the current text as the clean point and
//! returns a new generation, `is_clean(gen)` is true while nothing has
//! changed since that generation was handed out.

#[derive(Clone, Debug, PartialEq)]
struct Snapshot {
    lines: Vec<String>,
    cursor: (usize, usize),
}

#[derive(Clone, Debug)]
pub struct EditorState {
    lines: Vec<String>,
    /// (row, column) with the column counted in chars
    cursor: (usize, usize),
    history: Vec<Snapshot>,
    generation: u64,
    clean_text: String,
    /// Line ending of the loaded document, used when the text is joined back
    line_ending: &'static str,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: (0, 0),
            history: Vec::new(),
            generation: 0,
            clean_text: String::new(),
            line_ending: "\n",
        }
    }

    pub fn text(&self) -> String {
        self.lines.join(self.line_ending)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Replace the buffer with a freshly loaded document and treat it as clean.
    ///
    /// The previous contents stay on the undo stack until `clear_history`.
    pub fn load_text(&mut self, text: &str) {
        self.push_history();
        self.line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        self.lines = split_lines(text);
        self.cursor = (0, 0);
        self.clean_text = self.text();
    }

    pub fn is_modified(&self) -> bool {
        self.text() != self.clean_text
    }

    pub fn is_clean(&self, generation: u64) -> bool {
        generation == self.generation && !self.is_modified()
    }

    pub fn change_generation(&mut self) -> u64 {
        self.generation += 1;
        self.clean_text = self.text();
        self.generation
    }

    /// Drop unsaved edits, restoring the text as of the last clean point
    pub fn revert_to_clean(&mut self) {
        if !self.is_modified() {
            return;
        }
        self.push_history();
        self.lines = split_lines(&self.clean_text);
        self.clamp_cursor();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.lines = snapshot.lines;
        self.cursor = snapshot.cursor;
        self.clamp_cursor();
        true
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        self.push_history();
        let (row, col) = self.cursor;
        let line = &mut self.lines[row];
        let at = byte_index(line, col);
        line.insert(at, c);
        self.cursor = (row, col + 1);
    }

    pub fn insert_newline(&mut self) {
        self.push_history();
        let (row, col) = self.cursor;
        let at = byte_index(&self.lines[row], col);
        let rest = self.lines[row].split_off(at);
        self.lines.insert(row + 1, rest);
        self.cursor = (row + 1, 0);
    }

    pub fn backspace(&mut self) {
        let (row, col) = self.cursor;
        if col == 0 && row == 0 {
            return;
        }
        self.push_history();
        if col > 0 {
            let line = &mut self.lines[row];
            let at = byte_index(line, col - 1);
            line.remove(at);
            self.cursor = (row, col - 1);
        } else {
            let line = self.lines.remove(row);
            let prev = &mut self.lines[row - 1];
            let prev_len = prev.chars().count();
            prev.push_str(&line);
            self.cursor = (row - 1, prev_len);
        }
    }

    pub fn move_left(&mut self) {
        let (row, col) = self.cursor;
        if col > 0 {
            self.cursor = (row, col - 1);
        } else if row > 0 {
            self.cursor = (row - 1, self.line_len(row - 1));
        }
    }

    pub fn move_right(&mut self) {
        let (row, col) = self.cursor;
        if col < self.line_len(row) {
            self.cursor = (row, col + 1);
        } else if row + 1 < self.lines.len() {
            self.cursor = (row + 1, 0);
        }
    }

    pub fn move_up(&mut self) {
        let (row, col) = self.cursor;
        if row > 0 {
            self.cursor = (row - 1, col.min(self.line_len(row - 1)));
        }
    }

    pub fn move_down(&mut self) {
        let (row, col) = self.cursor;
        if row + 1 < self.lines.len() {
            self.cursor = (row + 1, col.min(self.line_len(row + 1)));
        }
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        let row = self.cursor.0.min(self.lines.len().saturating_sub(1));
        let col = self.cursor.1.min(self.line_len(row));
        self.cursor = (row, col);
    }

    fn push_history(&mut self) {
        self.history.push(Snapshot {
            lines: self.lines.clone(),
            cursor: self.cursor,
        });
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect()
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
}

//! Capabilities borrowed from the host editor, plus in-memory implementations
//! used by the file-backed binary and by tests.

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use tokio::io::AsyncWriteExt;

use crate::action::Action;

/// Cursor position: zero-based line, character offset within the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// Read/write access to the active document
pub trait Editor {
    fn value(&self) -> String;
    fn line(&self, line: usize) -> Option<String>;
    fn cursor(&self) -> Position;
    /// Insert `text` at `at` without touching the cursor
    fn replace_range(&mut self, text: &str, at: Position);
    /// Replace the current selection (or insert at the cursor) and move the cursor past it
    fn replace_selection(&mut self, text: &str);
}

/// A command palette entry
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: &'static str,
    pub name: String,
    pub action: Action,
}

pub trait CommandRegistry {
    fn add_command(&mut self, command: Command);
}

/// A context menu entry
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub title: String,
    pub icon: &'static str,
    pub action: Action,
}

pub trait MenuBuilder {
    fn add_item(&mut self, item: MenuItem);
}

/// Short user-facing messages
pub trait Notifier: Send + Sync {
    fn notice(&self, message: &str);
}

pub type ClipboardFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Asynchronous text clipboard
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: String) -> ClipboardFuture;
}

/// Document held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryEditor {
    text: String,
    cursor: Position,
}

impl MemoryEditor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: Position::default(),
        }
    }

    pub fn with_cursor(mut self, cursor: Position) -> Self {
        self.cursor = cursor;
        self
    }

    /// Position just after the last character
    pub fn end(&self) -> Position {
        let line = self.text.split('\n').count() - 1;
        let ch = self.text.rsplit('\n').next().map_or(0, |l| l.chars().count());
        Position::new(line, ch)
    }

    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Byte offset of a position, clamped to the document
    fn offset_of(&self, pos: Position) -> usize {
        let mut offset = 0;
        for (index, line) in self.text.split('\n').enumerate() {
            if index == pos.line {
                let within = line
                    .char_indices()
                    .nth(pos.ch)
                    .map_or(line.len(), |(byte, _)| byte);
                return offset + within;
            }
            offset += line.len() + 1;
        }
        self.text.len()
    }
}

impl Editor for MemoryEditor {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn line(&self, line: usize) -> Option<String> {
        self.text.split('\n').nth(line).map(str::to_string)
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn replace_range(&mut self, text: &str, at: Position) {
        let offset = self.offset_of(at);
        self.text.insert_str(offset, text);
    }

    fn replace_selection(&mut self, text: &str) {
        let offset = self.offset_of(self.cursor);
        self.text.insert_str(offset, text);

        let before = &self.text[..offset + text.len()];
        let line = before.matches('\n').count();
        let ch = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
        self.cursor = Position::new(line, ch);
    }
}

/// Collects registered commands
#[derive(Debug, Default)]
pub struct CommandTable {
    pub commands: Vec<Command>,
}

impl CommandTable {
    pub fn find(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.id == id)
    }
}

impl CommandRegistry for CommandTable {
    fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// Collects context menu entries
#[derive(Debug, Default)]
pub struct MenuItems {
    pub items: Vec<MenuItem>,
}

impl MenuBuilder for MenuItems {
    fn add_item(&mut self, item: MenuItem) {
        self.items.push(item);
    }
}

/// Prints notices on stderr
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&self, message: &str) {
        log::info!("notice: {message}");
        eprintln!("{message}");
    }
}

/// Writes copied text to standard output
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&self, text: String) -> ClipboardFuture {
        Box::pin(async move {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
            Ok(())
        })
    }
}

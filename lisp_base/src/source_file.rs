//! Contains the code related to the source code input.
//!
//! Every call to the tokenizer works on one [`SourceFile`]: a named, immutable piece of text
//! that knows where its lines start so that byte offsets can be turned into line/column
//! [`Location`]s for diagnostics.

use std::{
    fmt::{Debug, Display},
    ops::Range,
    sync::Arc,
};

use getset::{CopyGetters, Getters};

/// Represents a source text given to the interpreter.
#[derive(Getters)]
pub struct SourceFile {
    /// Gets the display name of the source (a file path or a pseudo name such as `<stdin>`).
    #[get = "pub"]
    name: String,

    content: String,

    lines: Vec<Range<usize>>,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("lines", &self.lines)
            .finish()
    }
}

impl SourceFile {
    /// Creates a new source file from the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Arc<Self> {
        let content = content.into();
        let lines = get_line_byte_positions(&content);

        Arc::new(Self {
            name: name.into(),
            content,
            lines,
        })
    }

    /// Creates an anonymous source file, named `<input>`, from the given displayable object.
    #[must_use]
    pub fn anonymous(display: impl Display) -> Arc<Self> { Self::new("<input>", display.to_string()) }

    /// Gets the content of the source file.
    #[must_use]
    pub fn content(&self) -> &str { &self.content }

    /// Gets the length of the content in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.content.len() }

    /// Returns `true` if the source file has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.content.is_empty() }

    /// Gets the character starting at the given byte index.
    ///
    /// Returns `None` at the end of the content or if the index is not on a character boundary.
    #[must_use]
    pub fn char_at(&self, byte_index: ByteIndex) -> Option<char> {
        self.content.get(byte_index..)?.chars().next()
    }

    /// Gets the line of the source file at the given line number, including its line terminator.
    ///
    /// The line number starts at 1.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        let range = self.lines.get(line.checked_sub(1)?)?;
        Some(&self.content[range.clone()])
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Gets the [`Location`] of the given byte index.
    ///
    /// The byte index equal to the content length is valid and points just past the last
    /// character.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        if !self.content.is_char_boundary(byte_index) {
            return None;
        }

        // the last line is the fallback for the end-of-content index
        let line = self
            .lines
            .partition_point(|range| range.end <= byte_index)
            .min(self.lines.len() - 1);

        let line_start = self.lines[line].start;
        let column = self.content[line_start..byte_index].chars().count() + 1;

        Some(Location {
            line: line + 1,
            column,
        })
    }
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Represents a range of characters in a source file.
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Gets the start byte index of the span.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: ByteIndex,

    /// Gets the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.str())
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.source_file).hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

/// Is a struct pointing to a particular location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The column number of the location (starts at 1).
    pub column: usize,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Span {
    /// Creates a span from the given start and end byte indices in the source file.
    ///
    /// Returns `None` if the range is reversed, out of bounds or splits a character.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: ByteIndex, end: ByteIndex) -> Option<Self> {
        let content = source_file.content();
        if start > end || !content.is_char_boundary(start) || !content.is_char_boundary(end) {
            return None;
        }

        Some(Self {
            start,
            end,
            source_file,
        })
    }

    /// Creates an empty span located at the end of the source file.
    #[must_use]
    pub fn at_end(source_file: Arc<SourceFile>) -> Self {
        let end = source_file.len();
        Self {
            start: end,
            end,
            source_file,
        }
    }

    /// Gets the string slice of the source code that the span represents.
    #[must_use]
    pub fn str(&self) -> &str { &self.source_file.content()[self.start..self.end] }

    /// Returns `true` if the span covers no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.start == self.end }

    /// Gets the starting [`Location`] of the span.
    #[must_use]
    pub fn start_location(&self) -> Location {
        self.source_file.get_location(self.start).unwrap()
    }

    /// Gets the ending [`Location`] of the span (exclusive).
    #[must_use]
    pub fn end_location(&self) -> Location { self.source_file.get_location(self.end).unwrap() }

    /// Joins the starting position of this span with the end position of the given span.
    #[must_use]
    pub fn join(&self, end: &Self) -> Option<Self> {
        if !Arc::ptr_eq(&self.source_file, &end.source_file) || self.start > end.end {
            return None;
        }

        Some(Self {
            start: self.start,
            end: end.end,
            source_file: self.source_file.clone(),
        })
    }
}

/// Represents an element that is located within a source file.
pub trait SourceElement {
    /// Gets the span location of the element.
    fn span(&self) -> Span;
}

fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((byte, char)) = chars.next() {
        let end = match char {
            '\n' => byte + 1,
            '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                chars.next();
                byte + 2
            }
            '\r' => byte + 1,
            _ => continue,
        };

        results.push(current_position..end);
        current_position = end;
    }

    results.push(current_position..text.len());

    results
}

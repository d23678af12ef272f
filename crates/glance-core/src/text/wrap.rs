use alloc::{string::String, vec::Vec};
use core::fmt;

use super::sentences::sentences;

/// How a [`Line`] relates to the words around it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineKind {
    /// Whole words joined by single spaces.
    Text,
    /// Chunk of a word longer than the line budget. `last` marks the final chunk.
    WordFragment { last: bool },
}

/// One finalized display line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    text: String,
    kind: LineKind,
}

impl Line {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Length in the budget's unit (`char`s).
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Whether the next line continues the same word without a separator.
    pub fn continues_word(&self) -> bool {
        matches!(self.kind, LineKind::WordFragment { last: false })
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Greedy sentence -> word -> character line packer.
///
/// The buffer is flushed only when the next sentence or word does not fit. A word
/// longer than the budget is emitted as standalone fixed-size chunks.
#[derive(Debug)]
pub struct LineWrapper {
    budget: usize,
    current: String,
    current_chars: usize,
    lines: Vec<Line>,
}

impl LineWrapper {
    /// A zero budget is raised to one so the packer always makes progress.
    pub fn new(max_chars_per_line: usize) -> Self {
        Self {
            budget: max_chars_per_line.max(1),
            current: String::new(),
            current_chars: 0,
            lines: Vec::new(),
        }
    }

    pub fn push_paragraph(&mut self, paragraph: &str) {
        for sentence in sentences(paragraph) {
            self.push_sentence(sentence);
        }
    }

    pub fn push_sentence(&mut self, sentence: &str) {
        let sentence_chars = normalized_len(sentence);
        if sentence_chars == 0 {
            return;
        }

        if self.fits(sentence_chars) {
            self.append_words(sentence);
            return;
        }

        self.flush();
        for word in sentence.split_whitespace() {
            self.push_word(word);
        }
    }

    /// Flushes the pending buffer and returns every line produced so far.
    pub fn finish(mut self) -> Vec<Line> {
        self.flush();
        self.lines
    }

    fn push_word(&mut self, word: &str) {
        let word_chars = char_len(word);
        if self.fits(word_chars) {
            self.append_words(word);
            return;
        }

        self.flush();
        if word_chars > self.budget {
            self.hard_split(word);
        } else {
            self.append_words(word);
        }
    }

    fn fits(&self, chars: usize) -> bool {
        if self.current_chars == 0 {
            chars <= self.budget
        } else {
            self.current_chars + 1 + chars <= self.budget
        }
    }

    /// Appends `text` with internal whitespace runs collapsed to one space.
    fn append_words(&mut self, text: &str) {
        for word in text.split_whitespace() {
            if self.current_chars > 0 {
                self.current.push(' ');
                self.current_chars += 1;
            }
            self.current.push_str(word);
            self.current_chars += char_len(word);
        }
    }

    fn hard_split(&mut self, word: &str) {
        let mut rest = word;
        while !rest.is_empty() {
            let split = rest
                .char_indices()
                .nth(self.budget)
                .map_or(rest.len(), |(idx, _)| idx);
            let (chunk, tail) = rest.split_at(split);
            self.lines.push(Line {
                text: String::from(chunk),
                kind: LineKind::WordFragment {
                    last: tail.is_empty(),
                },
            });
            rest = tail;
        }
    }

    fn flush(&mut self) {
        if self.current_chars == 0 {
            return;
        }
        self.lines.push(Line {
            text: core::mem::take(&mut self.current),
            kind: LineKind::Text,
        });
        self.current_chars = 0;
    }
}

/// Wraps one paragraph into lines of at most `max_chars_per_line` chars.
pub fn wrap_paragraph(paragraph: &str, max_chars_per_line: usize) -> Vec<Line> {
    let mut wrapper = LineWrapper::new(max_chars_per_line);
    wrapper.push_paragraph(paragraph);
    wrapper.finish()
}

/// Joins lines back into running text: one space between lines, none between the
/// chunks of a hard-split word.
pub fn reconstruct(lines: &[Line]) -> String {
    let mut out = String::new();
    let mut glue = false;
    for line in lines {
        if !out.is_empty() && !glue {
            out.push(' ');
        }
        out.push_str(line.as_str());
        glue = line.continues_word();
    }
    out
}

fn normalized_len(text: &str) -> usize {
    text.split_whitespace()
        .enumerate()
        .map(|(i, word)| char_len(word) + usize::from(i > 0))
        .sum()
}

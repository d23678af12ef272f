use std::{fmt, fs, io, path::Path};

use glance_core::Chapter;
use log::info;

/// Sample text played when no file is given.
pub(super) const ALICE_PARAGRAPHS: [&str; 3] = [
    "Alice was beginning to get very tired of sitting by her sister on the bank, and of having \
nothing to do: once or twice she had peeped into the book her sister was reading, but it had no \
pictures or conversations in it, and what is the use of a book, thought Alice, without pictures or \
conversations?",
    "So she was considering in her own mind (as well as she could, for the hot day made her feel \
very sleepy and stupid), whether the pleasure of making a daisy-chain would be worth the trouble of \
getting up and picking the daisies, when suddenly a White Rabbit with pink eyes ran close by her.",
    "There was nothing so very remarkable in that; nor did Alice think it so very much out of the \
way to hear the Rabbit say to itself, Oh dear! Oh dear! I shall be late! But when the Rabbit \
actually took a watch out of its waistcoat-pocket, and looked at it, and then hurried on, Alice \
started to her feet. In another moment down went Alice after it, never once considering how in the \
world she was to get out again.",
];

#[derive(Debug)]
pub(super) struct LibraryError {
    path: String,
    source: io::Error,
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot read {}: {}", self.path, self.source)
    }
}

/// One chapter per file, or the built-in sample when `paths` is empty.
pub(super) fn load(paths: &[String]) -> Result<Vec<Chapter>, LibraryError> {
    if paths.is_empty() {
        info!("no input files; playing built-in sample");
        return Ok(vec![sample_chapter()]);
    }

    paths
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path).map_err(|source| LibraryError {
                path: path.clone(),
                source,
            })?;
            let parts = split_paragraphs(&text);
            info!("loaded {} paragraphs={}", path, parts.len());
            Ok(Chapter::new(chapter_title(path), parts))
        })
        .collect()
}

pub(super) fn sample_chapter() -> Chapter {
    Chapter::new(
        "Down the Rabbit-Hole",
        ALICE_PARAGRAPHS.iter().map(|p| p.to_string()).collect(),
    )
}

/// Paragraphs are separated by blank lines; line breaks inside one become spaces.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                parts.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn chapter_title(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

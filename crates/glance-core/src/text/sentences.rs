use core::iter::FusedIterator;

/// Splits `paragraph` into trimmed, non-empty sentences.
///
/// A sentence ends right after `.`, `!` or `?` when whitespace follows. Trailing text
/// without terminal punctuation is still a sentence.
pub fn sentences(paragraph: &str) -> Sentences<'_> {
    Sentences { rest: paragraph }
}

/// Lazy sentence iterator returned by [`sentences`].
#[derive(Clone, Debug)]
pub struct Sentences<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let (raw, rest) = split_at_boundary(self.rest);
            self.rest = rest;

            let sentence = raw.trim();
            if !sentence.is_empty() {
                return Some(sentence);
            }
        }
        None
    }
}

impl FusedIterator for Sentences<'_> {}

fn split_at_boundary(text: &str) -> (&str, &str) {
    let mut chars = text.char_indices().peekable();
    while let Some((_, ch)) = chars.next() {
        if !is_terminal(ch) {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek()
            && next.is_whitespace()
        {
            return text.split_at(next_idx);
        }
    }
    (text, "")
}

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

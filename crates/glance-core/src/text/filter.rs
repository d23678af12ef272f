use alloc::vec::Vec;

use log::debug;

use super::wrap::{Line, char_len};

/// Keeps the parts whose trimmed length reaches `min_fragment_chars`, in order.
pub fn retain_parts<S: AsRef<str>>(parts: &[S], min_fragment_chars: usize) -> Vec<&str> {
    let mut kept = Vec::with_capacity(parts.len());
    for (index, part) in parts.iter().enumerate() {
        let part = part.as_ref();
        let trimmed_len = char_len(part.trim());
        if trimmed_len < min_fragment_chars {
            debug!(
                "dropping short part index={} trimmed_len={} min={}",
                index, trimmed_len, min_fragment_chars
            );
            continue;
        }
        kept.push(part);
    }
    kept
}

/// Removes empty and all-whitespace lines, in place.
pub fn retain_lines(lines: &mut Vec<Line>) {
    lines.retain(|line| !line.as_str().trim().is_empty());
}

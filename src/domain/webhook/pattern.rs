//! Payment identifier extraction from bank transfer content.

/// Finds the identifier that follows `prefix` in transfer content.
///
/// Matches `prefix` followed by one or more `[A-Za-z0-9_-]`. A match is skipped
/// when the prefix is preceded by a letter, or when the prefix ends with a
/// letter and is immediately followed by another letter (`SE` in `SEASON`).
/// Scanning resumes after a skipped match. Returns the identifier without the
/// prefix.
pub fn extract_identifier(content: &str, prefix: &str) -> Option<String> {
    if content.is_empty() || prefix.is_empty() {
        return None;
    }

    let prefix_ends_with_letter = prefix.chars().next_back().is_some_and(char::is_alphabetic);
    let mut cursor = 0;

    while let Some(offset) = content[cursor..].find(prefix) {
        let start = cursor + offset;
        let prefix_end = start + prefix.len();
        let tail = &content[prefix_end..];

        let ident_len: usize = tail
            .chars()
            .take_while(|c| is_identifier_char(*c))
            .map(char::len_utf8)
            .sum();

        if ident_len == 0 {
            // No identifier here; retry one character further on.
            let step = content[start..].chars().next().map_or(1, char::len_utf8);
            cursor = start + step;
            continue;
        }

        let preceded_by_letter = content[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_alphabetic);
        let followed_by_letter =
            prefix_ends_with_letter && tail.chars().next().is_some_and(char::is_alphabetic);

        if !preceded_by_letter && !followed_by_letter {
            return Some(tail[..ident_len].to_string());
        }

        cursor = prefix_end + ident_len;
    }

    None
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

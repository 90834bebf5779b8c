/// Text decoded from raw extractor output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// Number of bytes dropped because they were not valid UTF-8.
    pub invalid_bytes: usize,
}

/// Decode `bytes` as UTF-8, dropping every invalid sequence.
///
/// Unlike [`String::from_utf8_lossy`] nothing is substituted, so the
/// result only contains characters the extractor actually produced.
pub fn decode_lossy(bytes: &[u8]) -> DecodedText {
    let mut text = String::with_capacity(bytes.len());
    let mut invalid_bytes = 0;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        invalid_bytes += chunk.invalid().len();
    }
    DecodedText {
        text,
        invalid_bytes,
    }
}

/// A whitespace-trimmed prefix of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub text: String,
    /// The source text had more than `max_chars` characters.
    pub truncated: bool,
}

/// Take the first `max_chars` characters of `text`, then trim.
///
/// Counting is done on `char`s, so a multi-byte character is never split.
/// Trimming happens after the cut, which can leave fewer than `max_chars`.
pub fn preview(text: &str, max_chars: usize) -> Preview {
    let (head, truncated) = match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    };
    Preview {
        text: head.trim().to_string(),
        truncated,
    }
}

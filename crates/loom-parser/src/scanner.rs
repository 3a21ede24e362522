//! Brace- and string-aware scanning of raw source text.
//!
//! This is the single primitive every collector builds on. Nothing here
//! parses the language; it only answers "is this byte code, string or
//! comment" and "where does this block end", which keeps the escaping rules
//! in one place.
//!
//! Lexical rules:
//! - A `"` toggles string state unless the previous byte is an unescaped
//!   backslash.
//! - Outside strings, `//` starts a comment that runs to the end of the line.
//! - Braces and parentheses only count in code.
//!
//! All scanning is byte based. Every byte with syntactic meaning is ASCII,
//! so matches always fall on character boundaries.

/// Lexical region of a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Code,
    /// Inside a string literal, quotes included.
    String,
    /// Inside a `//` comment, the slashes included.
    Comment,
}

/// Paired delimiters understood by [`find_matching`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Brace,
    Paren,
}

impl Delimiter {
    fn open(self) -> u8 {
        match self {
            Self::Brace => b'{',
            Self::Paren => b'(',
        }
    }

    fn close(self) -> u8 {
        match self {
            Self::Brace => b'}',
            Self::Paren => b')',
        }
    }
}

/// Streaming lexical state. Starts in code.
#[derive(Debug, Default, Clone, Copy)]
struct LexState {
    in_string: bool,
    in_comment: bool,
    escaped: bool,
}

impl LexState {
    fn current(&self) -> Region {
        if self.in_string {
            Region::String
        } else {
            Region::Code
        }
    }

    /// Classify `bytes[pos]` and advance past it.
    fn step(&mut self, bytes: &[u8], pos: usize) -> Region {
        let byte = bytes[pos];

        if self.in_comment {
            if byte == b'\n' {
                self.in_comment = false;
                return Region::Code;
            }
            return Region::Comment;
        }

        if self.escaped {
            self.escaped = false;
            return self.current();
        }

        match byte {
            b'\\' => {
                self.escaped = true;
                self.current()
            }
            b'"' => {
                self.in_string = !self.in_string;
                Region::String
            }
            b'/' if !self.in_string && bytes.get(pos + 1) == Some(&b'/') => {
                self.in_comment = true;
                Region::Comment
            }
            _ => self.current(),
        }
    }
}

/// Classify every byte of `text`, starting in code.
pub fn classify(text: &str) -> Vec<Region> {
    let bytes = text.as_bytes();
    let mut state = LexState::default();
    (0..bytes.len()).map(|pos| state.step(bytes, pos)).collect()
}

/// Find the `}` that closes the `{` at `open`.
///
/// Returns `None` when `open` is not a `{` or the text ends before the block
/// closes. Callers treat `None` as malformed input and skip the construct.
///
/// # Examples
///
/// ```
/// use loom_parser::scanner::find_block_end;
///
/// let text = r#"{ a: "}", b: { c } }"#;
/// assert_eq!(find_block_end(text, 0), Some(text.len() - 1));
/// assert_eq!(find_block_end("{ {", 0), None);
/// ```
pub fn find_block_end(text: &str, open: usize) -> Option<usize> {
    find_matching(text, open, Delimiter::Brace)
}

/// Find the delimiter that closes the one at `open`.
///
/// The byte at `open` is assumed to be code.
pub fn find_matching(text: &str, open: usize, delimiter: Delimiter) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&delimiter.open()) {
        return None;
    }

    let mut state = LexState::default();
    let mut depth = 1usize;
    for pos in open + 1..bytes.len() {
        if state.step(bytes, pos) != Region::Code {
            continue;
        }
        let byte = bytes[pos];
        if byte == delimiter.open() {
            depth += 1;
        } else if byte == delimiter.close() {
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        }
    }
    None
}

/// Find the next whole-word occurrence of `keyword` in code, at or after
/// `from`.
///
/// `from` must be a code position (the start of the text, or just past a
/// previous code match).
pub fn find_keyword(text: &str, keyword: &str, from: usize) -> Option<usize> {
    find_any_keyword(text, &[keyword], from).map(|(pos, _)| pos)
}

/// Find the earliest whole-word occurrence of any of `keywords` in code.
///
/// Returns the position and the keyword that matched.
pub fn find_any_keyword<'k>(
    text: &str,
    keywords: &[&'k str],
    from: usize,
) -> Option<(usize, &'k str)> {
    let bytes = text.as_bytes();
    let mut state = LexState::default();
    for pos in from..bytes.len() {
        if state.step(bytes, pos) != Region::Code {
            continue;
        }
        let keyword = keywords.iter().find(|keyword| {
            bytes[pos..].starts_with(keyword.as_bytes()) && is_word_at(text, pos, keyword.len())
        });
        if let Some(keyword) = keyword {
            return Some((pos, *keyword));
        }
    }
    None
}

/// Returns `true` if `text[pos..pos + len]` is not glued to identifier
/// characters on either side.
///
/// `pos` and `pos + len` must be character boundaries.
pub fn is_word_at(text: &str, pos: usize, len: usize) -> bool {
    let clear_before = text[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !is_ident_char(c));
    let clear_after = text[pos + len..]
        .chars()
        .next()
        .is_none_or(|c| !is_ident_char(c));
    clear_before && clear_after
}

/// Byte offset where code ends on `line`: the start of a `//` comment, or
/// the line length.
pub fn code_end(line: &str) -> usize {
    classify(line)
        .iter()
        .position(|region| *region == Region::Comment)
        .unwrap_or(line.len())
}

/// Count `{` and `}` in code.
pub fn brace_counts(text: &str) -> (usize, usize) {
    let bytes = text.as_bytes();
    classify(text)
        .iter()
        .zip(bytes)
        .filter(|(region, _)| **region == Region::Code)
        .fold((0, 0), |(open, close), (_, byte)| match byte {
            b'{' => (open + 1, close),
            b'}' => (open, close + 1),
            _ => (open, close),
        })
}

/// Characters allowed inside identifiers.
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters allowed to start an identifier.
pub fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

//! Quote-aware splitting of a command line into shell words
//!
//! Follows POSIX word splitting: unquoted whitespace separates words, single
//! quotes are literal, double quotes allow `\` to escape only `$`, `` ` ``,
//! `"`, `\` and newline, and an unquoted backslash escapes any character.
//! Operators such as `|`, `;` and `&` are not special, so a whole pipeline
//! stays inside the token stream. There is no comment handling.
//!
//! Hand-rolled rather than `shlex`: `#` must stay a literal character and a
//! failure has to say which quote or escape was left open.

use crate::error::ParseError;

const SPLIT_CHARS: [char; 3] = [' ', '\t', '\n'];
const DOUBLE_ESCAPABLE: [char; 5] = ['$', '`', '"', '\\', '\n'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between words
    Blank,
    /// Inside an unquoted run of a word
    Word,
    SingleQuoted,
    DoubleQuoted,
}

/// Split `line` into shell words with quotes removed.
///
/// Fails on unbalanced quotes or a trailing backslash; no partial result is
/// ever returned.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = State::Blank;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match state {
            State::Blank | State::Word => match c {
                c if SPLIT_CHARS.contains(&c) => {
                    if state == State::Word {
                        words.push(std::mem::take(&mut current));
                        state = State::Blank;
                    }
                }
                '\\' => {
                    let escaped = chars.next().ok_or(ParseError::UnterminatedEscape)?;
                    // Escaped newline is a line continuation
                    if escaped != '\n' {
                        current.push(escaped);
                    }
                    state = State::Word;
                }
                '\'' => state = State::SingleQuoted,
                '"' => state = State::DoubleQuoted,
                _ => {
                    current.push(c);
                    state = State::Word;
                }
            },
            State::SingleQuoted => match c {
                '\'' => state = State::Word,
                _ => current.push(c),
            },
            State::DoubleQuoted => match c {
                '"' => state = State::Word,
                '\\' => {
                    let escaped = chars.next().ok_or(ParseError::UnterminatedDoubleQuote)?;
                    if DOUBLE_ESCAPABLE.contains(&escaped) {
                        if escaped != '\n' {
                            current.push(escaped);
                        }
                    } else {
                        current.push('\\');
                        current.push(escaped);
                    }
                }
                _ => current.push(c),
            },
        }
    }

    match state {
        State::SingleQuoted => Err(ParseError::UnterminatedSingleQuote),
        State::DoubleQuoted => Err(ParseError::UnterminatedDoubleQuote),
        State::Word => {
            words.push(current);
            Ok(words)
        }
        State::Blank => Ok(words),
    }
}

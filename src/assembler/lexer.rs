//! This lexer reduces Hack assembly source to canonical instruction tokens.
//!
//! Hack only supports a single instruction per line, so a token is simply
//! a line with its comment and all whitespace removed.
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};

use regex::Regex;

use super::error::Error;

/// A canonical instruction and the 1-based line it appears on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new<S: Into<String>>(text: S, line: usize) -> Self {
        Token { text: text.into(), line }
    }
}

pub struct Preprocessor {
    whitespace: Regex,
}

impl Preprocessor {
    pub fn new() -> Self {
        Preprocessor {
            whitespace: Regex::new(r"\s+").expect("whitespace pattern is a valid regex"),
        }
    }

    /// Strips the comment and every whitespace character from a line.
    /// Blank and comment-only lines come back empty.
    pub fn preprocess(&self, line: &str) -> String {
        let code = match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        };
        self.whitespace.replace_all(code, "").into_owned()
    }
}

/// Tokenizes in-memory source lines, skipping lines with no instruction.
pub fn tokenize_lines<I, S>(lines: I) -> VecDeque<Token>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let preprocessor = Preprocessor::new();
    let mut tokens: VecDeque<Token> = VecDeque::with_capacity(256);

    for (index, line) in lines.into_iter().enumerate() {
        if let Some(tok) = tokenize_line(&preprocessor, line.as_ref(), index + 1) {
            tokens.push_back(tok);
        }
    }
    tokens
}

/// Tokenizes a whole source file. Stops at the first unreadable line.
pub fn tokenize<T: Read + ?Sized>(reader: Box<T>) -> Result<VecDeque<Token>, Error> {
    let preprocessor = Preprocessor::new();
    let mut tokens: VecDeque<Token> = VecDeque::with_capacity(256);

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|e| Error::from(e).at_line(index + 1))?;
        if let Some(tok) = tokenize_line(&preprocessor, &line, index + 1) {
            tokens.push_back(tok);
        }
    }
    Ok(tokens)
}

fn tokenize_line(preprocessor: &Preprocessor, line: &str, line_num: usize) -> Option<Token> {
    let text = preprocessor.preprocess(line);
    if text.is_empty() {
        trace!("line {}: skipped", line_num);
        return None;
    }
    trace!("line {}: `{}`", line_num, text);
    Some(Token::new(text, line_num))
}

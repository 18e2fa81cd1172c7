//! Line parsing: quote-aware tokens and parenthesized groups.
//!
//! A raw input line is parsed once into a small expression tree —
//! tokens at the leaves, parenthesized spans as child nodes — which the
//! command processor then evaluates bottom-up. Parsing validates the
//! whole line (balanced parentheses, terminated strings) before any
//! sub-expression executes, so a malformed line has no side effects.

use crate::error::{ShellError, ShellResult};

/// One lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An unquoted word.
    Word(String),
    /// The contents of a double-quoted span, quotes stripped.
    Quoted(String),
}

impl Token {
    /// Render the token back to its source form.
    pub fn render(&self) -> String {
        match self {
            Token::Word(w) => w.clone(),
            Token::Quoted(s) => format!("\"{}\"", s),
        }
    }
}

/// A node of the parsed line: a token, or a parenthesized group.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Atom(Token),
    Group(Vec<Expr>),
}

/// Parse a raw line into an expression tree.
///
/// Fails with [`ShellError::Syntax`] on unbalanced parentheses or an
/// unterminated string, before anything executes.
pub fn parse_line(line: &str) -> ShellResult<Vec<Expr>> {
    let mut stack: Vec<Vec<Expr>> = vec![Vec::new()];
    let mut word = String::new();
    let mut chars = line.chars().peekable();

    let flush = |word: &mut String, stack: &mut Vec<Vec<Expr>>| {
        if !word.is_empty() {
            let token = Token::Word(std::mem::take(word));
            stack.last_mut().expect("stack never empty").push(Expr::Atom(token));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                flush(&mut word, &mut stack);
                let mut text = String::new();
                let mut closed = false;
                for q in chars.by_ref() {
                    if q == '"' {
                        closed = true;
                        break;
                    }
                    text.push(q);
                }
                if !closed {
                    return Err(ShellError::Syntax("unterminated string".into()));
                }
                stack
                    .last_mut()
                    .expect("stack never empty")
                    .push(Expr::Atom(Token::Quoted(text)));
            }
            '(' => {
                flush(&mut word, &mut stack);
                stack.push(Vec::new());
            }
            ')' => {
                flush(&mut word, &mut stack);
                let group = stack
                    .pop()
                    .filter(|_| !stack.is_empty())
                    .ok_or_else(|| ShellError::Syntax("unbalanced parentheses".into()))?;
                stack
                    .last_mut()
                    .expect("checked above")
                    .push(Expr::Group(group));
            }
            '-' if chars.peek() == Some(&'>') => {
                // The assignment arrow is its own token even without
                // surrounding whitespace.
                chars.next();
                flush(&mut word, &mut stack);
                stack
                    .last_mut()
                    .expect("stack never empty")
                    .push(Expr::Atom(Token::Word("->".into())));
            }
            c if c.is_whitespace() => flush(&mut word, &mut stack),
            c => word.push(c),
        }
    }
    flush(&mut word, &mut stack);

    if stack.len() != 1 {
        return Err(ShellError::Syntax("unbalanced parentheses".into()));
    }
    Ok(stack.pop().expect("single frame remains"))
}

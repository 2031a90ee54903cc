use tracing::{instrument, trace};

use crate::MK_TOKEN;

use super::{
    source::Source,
    tokens::{is_decimal_literal, is_notation, is_operator, is_quote, Token, Tokens},
};

/// Splitting state for one pass over a `Source`.
pub struct Lexer<'a> {
    source: &'a Source,
    tokens: Vec<Token>,
    /// Index into `source.lines()` of the line holding the last pushed token.
    line: usize,
    /// Byte offset where the current run of word characters started.
    run: Option<usize>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source) -> Self {
        Lexer {
            source,
            tokens: vec![],
            line: 0,
            run: None,
        }
    }

    pub fn push(&mut self, offset: usize, length: usize) {
        let lines = self.source.lines();
        while self.line + 1 < lines.len() && lines[self.line + 1].offset <= offset {
            self.line += 1;
        }

        let token = MK_TOKEN!(
            self.source.handle(),
            offset,
            lines[self.line].number,
            self.source.column(self.line, offset),
            length
        );
        trace!(value = token.value(), line = token.line(), column = token.column(), "token");
        self.tokens.push(token);
    }

    /// Emits the pending word run, if any, ending right before `end`.
    fn flush(&mut self, end: usize) {
        if let Some(start) = self.run.take() {
            self.push(start, end - start);
        }
    }

    fn split(&mut self) {
        let code = self.source.code();
        let chars: Vec<(usize, char)> = code.char_indices().collect();
        let mut i = 0;

        while i < chars.len() {
            let (offset, symbol) = chars[i];

            if symbol.is_whitespace() {
                self.flush(offset);
                i += 1;
                continue;
            }

            if !is_notation(symbol) {
                if self.run.is_none() {
                    self.run = Some(offset);
                }
                i += 1;
                continue;
            }

            self.flush(offset);
            let next = chars.get(i + 1).map(|(_, c)| *c);

            if is_quote(symbol) {
                let mut j = i + 1;
                while j < chars.len() && !(chars[j].1 == symbol && chars[j - 1].1 != '\\') {
                    j += 1;
                }

                // Unterminated literals run to the end of input.
                let end = chars
                    .get(j)
                    .map(|(at, c)| at + c.len_utf8())
                    .unwrap_or(code.len());
                self.push(offset, end - offset);
                i = j + 1;
                continue;
            }

            if symbol == '/' && next == Some('/') {
                let mut j = i + 2;
                while j < chars.len() && chars[j].1 != '\n' {
                    j += 1;
                }
                i = j;
                continue;
            }

            if symbol == '/' && next == Some('*') {
                let mut j = i + 2;
                while j + 1 < chars.len() && !(chars[j].1 == '*' && chars[j + 1].1 == '/') {
                    j += 1;
                }
                i = if j + 1 < chars.len() { j + 2 } else { chars.len() };
                continue;
            }

            self.push(offset, symbol.len_utf8());
            i += 1;
        }

        self.flush(code.len());
    }
}

fn adjacent(left: &Token, right: &Token) -> bool {
    left.end() == right.offset()
}

/// Joins operator runs into their longest known operator and reassembles
/// decimal literals the split pass cut at the `.`.
fn merge(tokens: Vec<Token>) -> Vec<Token> {
    let mut merged = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let mut token = tokens[i].clone();
        i += 1;

        if is_operator(token.value()) {
            while let Some(next) = tokens.get(i) {
                if !adjacent(&token, next) || !is_operator(next.value()) {
                    break;
                }
                if !is_operator(&format!("{}{}", token.value(), next.value())) {
                    break;
                }
                token.absorb(next);
                i += 1;
            }
        } else if is_decimal_literal(token.value()) {
            if let (Some(dot), Some(fraction)) = (tokens.get(i), tokens.get(i + 1)) {
                let joined = format!("{}{}{}", token.value(), dot.value(), fraction.value());
                if dot.value() == "."
                    && adjacent(&token, dot)
                    && adjacent(dot, fraction)
                    && is_decimal_literal(fraction.value())
                    && is_decimal_literal(&joined)
                {
                    token.absorb(fraction);
                    i += 2;
                }
            }
        }

        merged.push(token);
    }

    merged
}

#[instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn tokenize(source: &Source) -> Tokens {
    let mut lexer = Lexer::new(source);
    lexer.split();

    let tokens = merge(lexer.tokens);
    tracing::debug!(count = tokens.len(), "tokenized");

    Tokens::from_vec(tokens)
}

// ABOUTME: Hand-rolled scanner turning Djerba source text into a token stream

use crate::error::LexError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    String(String),
    Ident(String),

    Arrow,    // <-
    Print,    // :>
    ForLoop,  // @>
    Func,     // @
    Return,   // !>
    If,       // ?
    While,    // ~
    Else,

    True,
    False,
    And,
    Or,
    Not,
    In,
    Break,
    Continue,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dollar,

    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("in", TokenKind::In),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("else", TokenKind::Else),
];

pub struct Lexer<'a> {
    src: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            chars: src.char_indices().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            let Some((offset, c)) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    offset: self.src.len(),
                });
                break;
            };

            if c.is_ascii_digit() {
                tokens.push(self.lex_number());
                continue;
            }
            if c == '"' {
                tokens.push(self.lex_string()?);
                continue;
            }
            if is_ident_start(c) {
                tokens.push(self.lex_ident_or_keyword());
                continue;
            }

            // Ordered so multi-character operators are tried before the
            // single-character prefixes they share: `<-` before none (no
            // bare `<` variant other than comparisons tried below), `:>`
            // before bare `:` (unused), `@>` before `@`, `!>` before `!`
            // (unused bare), `<=`/`>=`/`==`/`!=` before `<`/`>`/`=`/`!`.
            let two: Option<&str> = self.peek2();
            match two {
                Some("<-") => {
                    self.advance_n(2);
                    tokens.push(Token {
                        kind: TokenKind::Arrow,
                        offset,
                    });
                    continue;
                }
                Some(":>") => {
                    self.advance_n(2);
                    tokens.push(Token {
                        kind: TokenKind::Print,
                        offset,
                    });
                    continue;
                }
                Some("@>") => {
                    self.advance_n(2);
                    tokens.push(Token {
                        kind: TokenKind::ForLoop,
                        offset,
                    });
                    continue;
                }
                Some("!>") => {
                    self.advance_n(2);
                    tokens.push(Token {
                        kind: TokenKind::Return,
                        offset,
                    });
                    continue;
                }
                Some("==") => {
                    self.advance_n(2);
                    tokens.push(Token {
                        kind: TokenKind::EqEq,
                        offset,
                    });
                    continue;
                }
                Some("!=") => {
                    self.advance_n(2);
                    tokens.push(Token {
                        kind: TokenKind::NotEq,
                        offset,
                    });
                    continue;
                }
                Some("<=") => {
                    self.advance_n(2);
                    tokens.push(Token {
                        kind: TokenKind::LtEq,
                        offset,
                    });
                    continue;
                }
                Some(">=") => {
                    self.advance_n(2);
                    tokens.push(Token {
                        kind: TokenKind::GtEq,
                        offset,
                    });
                    continue;
                }
                _ => {}
            }

            let kind = match c {
                '@' => TokenKind::Func,
                '?' => TokenKind::If,
                '~' => TokenKind::While,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '%' => TokenKind::Percent,
                '^' => TokenKind::Caret,
                '<' => TokenKind::Lt,
                '>' => TokenKind::Gt,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ',' => TokenKind::Comma,
                '$' => TokenKind::Dollar,
                _ => return Err(LexError { offset, found: c }),
            };
            self.advance_n(1);
            tokens.push(Token { kind, offset });
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<&'a str> {
        let (start, _) = self.chars.get(self.pos)?;
        let (next_idx, next_c) = self.chars.get(self.pos + 1)?;
        let end = next_idx + next_c.len_utf8();
        self.src.get(*start..end)
    }

    fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some((_, c)) if c.is_whitespace() => {
                    self.advance_n(1);
                }
                Some((_, ';')) if self.starts_with(";;") => {
                    while let Some((_, c)) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance_n(1);
                    }
                }
                _ => break,
            }
        }
    }

    fn starts_with(&self, pat: &str) -> bool {
        if let Some((start, _)) = self.peek() {
            self.src[start..].starts_with(pat)
        } else {
            false
        }
    }

    fn lex_number(&mut self) -> Token {
        let (start, _) = self.peek().unwrap();
        let mut end = start;
        while let Some((idx, c)) = self.peek() {
            if c.is_ascii_digit() {
                end = idx + c.len_utf8();
                self.advance_n(1);
            } else {
                break;
            }
        }
        if self.peek().map(|(_, c)| c) == Some('.') {
            let save = self.pos;
            self.advance_n(1);
            if let Some((_, c)) = self.peek() {
                if c.is_ascii_digit() {
                    while let Some((idx, c)) = self.peek() {
                        if c.is_ascii_digit() {
                            end = idx + c.len_utf8();
                            self.advance_n(1);
                        } else {
                            break;
                        }
                    }
                } else {
                    self.pos = save;
                }
            } else {
                self.pos = save;
            }
        }
        let text = &self.src[start..end];
        Token {
            kind: TokenKind::Number(text.parse().unwrap_or(f64::NAN)),
            offset: start,
        }
    }

    fn lex_string(&mut self) -> Result<Token, LexError> {
        let (start, _) = self.peek().unwrap();
        self.advance_n(1); // opening quote
        let mut raw = String::new();
        loop {
            match self.peek() {
                None => return Err(LexError { offset: start, found: '"' }),
                Some((_, '"')) => {
                    self.advance_n(1);
                    break;
                }
                Some((_, '\\')) => {
                    raw.push('\\');
                    self.advance_n(1);
                    if let Some((_, c)) = self.peek() {
                        raw.push(c);
                        self.advance_n(1);
                    }
                }
                Some((_, c)) => {
                    raw.push(c);
                    self.advance_n(1);
                }
            }
        }
        // Escape processing is deferred to the parser, which owns string
        // literal semantics (`\n \t \\ \" \0`, `\xHH`, `\uHHHH`, octal).
        Ok(Token {
            kind: TokenKind::String(raw),
            offset: start,
        })
    }

    fn lex_ident_or_keyword(&mut self) -> Token {
        let (start, _) = self.peek().unwrap();
        let mut end = start;
        while let Some((idx, c)) = self.peek() {
            if is_ident_continue(c) {
                end = idx + c.len_utf8();
                self.advance_n(1);
            } else {
                break;
            }
        }
        let text = &self.src[start..end];
        for (kw, kind) in KEYWORDS {
            if text == *kw {
                return Token {
                    kind: kind.clone(),
                    offset: start,
                };
            }
        }
        Token {
            kind: TokenKind::Ident(text.to_string()),
            offset: start,
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

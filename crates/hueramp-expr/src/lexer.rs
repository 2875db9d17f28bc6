use crate::error::CompileError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f32),
    /// Variable, constant, or function name.
    Ident(String),
    Plus,
    Minus,
    Star,
    /// `**` exponentiation operator.
    StarStar,
    Slash,
    LParen,
    RParen,
    Comma,
    // Sentinel
    Eof,
}

/// A token plus the 1-based column where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithCol {
    pub token: Token,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithCol>, CompileError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = tok.token == Token::Eof;
            tokens.push(tok);
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        self.col += 1;
        Some(ch)
    }

    fn next_token(&mut self) -> Result<TokenWithCol, CompileError> {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }

        let col = self.col;
        let at = |token| TokenWithCol { token, col };

        let ch = match self.peek() {
            None => return Ok(at(Token::Eof)),
            Some(c) => c,
        };

        match ch {
            '+' => { self.advance(); Ok(at(Token::Plus)) }
            '-' => { self.advance(); Ok(at(Token::Minus)) }
            '/' => { self.advance(); Ok(at(Token::Slash)) }
            '(' => { self.advance(); Ok(at(Token::LParen)) }
            ')' => { self.advance(); Ok(at(Token::RParen)) }
            ',' => { self.advance(); Ok(at(Token::Comma)) }
            '*' => {
                self.advance();
                if self.peek() == Some('*') {
                    self.advance();
                    Ok(at(Token::StarStar))
                } else {
                    Ok(at(Token::Star))
                }
            }
            c if c.is_ascii_digit() || c == '.' => Ok(at(self.lex_number(col)?)),
            c if c.is_alphabetic() || c == '_' => Ok(at(self.lex_ident())),
            other => Err(CompileError::new(format!("unexpected character {:?}", other), col)),
        }
    }

    fn lex_number(&mut self, col: usize) -> Result<Token, CompileError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let s = &self.src[start..self.pos];
        s.parse::<f32>()
            .map(Token::Number)
            .map_err(|_| CompileError::new(format!("invalid number {:?}", s), col))
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }
}

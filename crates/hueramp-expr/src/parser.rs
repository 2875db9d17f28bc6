use crate::ast::{BinOp, Expr, Func};
use crate::error::CompileError;
use crate::lexer::{Lexer, Token, TokenWithCol};

// ── Parser ────────────────────────────────────────────────────────────────
//
// Grammar, loosest to tightest binding:
//
//   sum     := product (('+' | '-') product)*
//   product := unary (('*' | '/') unary)*
//   unary   := '-' unary | power
//   power   := atom ('**' unary)?          right-associative
//   atom    := number | 'x' | 'a' | 'e' | 'pi'
//            | func '(' sum ')'
//            | 'pow' '(' sum ',' sum ')'
//            | '(' sum ')'
//
// `**` binds tighter than unary minus on its left, so `-x ** 2` reads as
// `-(x ** 2)`, and its exponent re-enters `unary` so `x ** -2` parses.

pub struct Parser {
    tokens: Vec<TokenWithCol>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithCol>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_col(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.col)
            .or_else(|| self.tokens.last().map(|t| t.col))
            .unwrap_or(1)
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> CompileError {
        CompileError::new(msg, self.current_col())
    }

    fn expect_token(&mut self, expected: &Token) -> Result<(), CompileError> {
        let got = self.advance();
        if &got == expected {
            Ok(())
        } else {
            Err(self.err(format!("expected {:?}, got {:?}", expected, got)))
        }
    }

    // ── Entry ─────────────────────────────────────────────────────────────

    pub fn parse_expression(&mut self) -> Result<Expr, CompileError> {
        let expr = self.parse_sum()?;
        match self.peek() {
            Token::Eof => Ok(expr),
            tok => Err(self.err(format!("unexpected {:?} after expression", tok))),
        }
    }

    // ── Precedence levels ─────────────────────────────────────────────────

    fn parse_sum(&mut self) -> Result<Expr, CompileError> {
        let mut lhs = self.parse_product()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_product()?;
            lhs = Expr::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_product(&mut self) -> Result<Expr, CompileError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, CompileError> {
        if self.peek() == &Token::Minus {
            self.advance();
            let inner = self.parse_unary()?;
            Ok(Expr::Neg(Box::new(inner)))
        } else {
            self.parse_power()
        }
    }

    fn parse_power(&mut self) -> Result<Expr, CompileError> {
        let base = self.parse_atom()?;
        if self.peek() == &Token::StarStar {
            self.advance();
            let exponent = self.parse_unary()?;
            Ok(Expr::Bin(BinOp::Pow, Box::new(base), Box::new(exponent)))
        } else {
            Ok(base)
        }
    }

    // ── Atom ──────────────────────────────────────────────────────────────

    fn parse_atom(&mut self) -> Result<Expr, CompileError> {
        match self.advance() {
            Token::Number(n) => Ok(Expr::Num(n)),
            Token::LParen => {
                let inner = self.parse_sum()?;
                self.expect_token(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => self.parse_name(&name),
            tok => Err(self.err(format!("expected a value, got {:?}", tok))),
        }
    }

    fn parse_name(&mut self, name: &str) -> Result<Expr, CompileError> {
        match name {
            "x" => return Ok(Expr::Var),
            "a" => return Ok(Expr::Param),
            "e" => return Ok(Expr::Num(std::f32::consts::E)),
            "pi" => return Ok(Expr::Num(std::f32::consts::PI)),
            _ => {}
        }

        if name == "pow" {
            self.expect_token(&Token::LParen)?;
            let base = self.parse_sum()?;
            self.expect_token(&Token::Comma)?;
            let exponent = self.parse_sum()?;
            self.expect_token(&Token::RParen)?;
            return Ok(Expr::Bin(BinOp::Pow, Box::new(base), Box::new(exponent)));
        }

        match Func::from_name(name) {
            Some(func) => {
                self.expect_token(&Token::LParen)?;
                let arg = self.parse_sum()?;
                self.expect_token(&Token::RParen)?;
                Ok(Expr::Call(func, Box::new(arg)))
            }
            None => Err(self.err(format!("unknown name {:?}", name))),
        }
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse a remap expression into an [`Expr`].
pub fn parse_str(src: &str) -> Result<Expr, CompileError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_expression()
}

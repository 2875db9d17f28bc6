//! Lexer, parser, and evaluator for **hueramp remap expressions**.
//!
//! A remap expression is a scalar function of one free variable `x` and one
//! bound parameter `a`, used by the gradient engine to rescale the sampling
//! parameter non-linearly at export time. The grammar covers arithmetic
//! (`+ - * / **`), the functions `sin cos tan asin acos atan exp log pow`,
//! and the constants `e` and `pi`. Expressions compile to a small AST that
//! is evaluated numerically; no generated code is ever executed.
//!
//! This crate is intentionally dependency-free so editor and tooling code
//! can embed it without pulling in the engine.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `Expr`, `BinOp`, `Func` |
//! | [`error`] | `CompileError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point |
//! | [`remap`] | `RemapFn` — compiled expression + parameter |
//!
//! # Quick start
//!
//! ```rust
//! use hueramp_expr::RemapFn;
//!
//! let remap = RemapFn::compile("x ** a", 2.0).unwrap();
//! assert_eq!(remap.eval(0.5), 0.25);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod remap;

pub use ast::Expr;
pub use error::CompileError;
pub use parser::parse_str;
pub use remap::RemapFn;

#[cfg(test)]
mod compile_tests {
    use super::*;

    fn ok(src: &str) { parse_str(src).unwrap(); }
    fn err(src: &str) { parse_str(src).unwrap_err(); }

    #[test] fn number() { ok("0.5"); }
    #[test] fn bare_variable() { ok("x"); }
    #[test] fn scaled_by_param() { ok("a * x"); }
    #[test] fn power_operator() { ok("x ** 2"); }
    #[test] fn pow_function() { ok("pow(x, a)"); }
    #[test] fn trig() { ok("sin(pi * x / 2)"); }
    #[test] fn inverse_trig() { ok("asin(2 * x - 1) / pi + 0.5"); }
    #[test] fn exp_log() { ok("log(1 + x * (e - 1))"); }
    #[test] fn nested_parens() { ok("((x))"); }
    #[test] fn unary_minus() { ok("1 - -x"); }
    #[test] fn negative_exponent() { ok("x ** -2"); }
    #[test] fn err_empty() { err(""); }
    #[test] fn err_unknown_name() { err("foo(x)"); }
    #[test] fn err_unclosed_paren() { err("(x"); }
    #[test] fn err_missing_operand() { err("x *"); }
    #[test] fn err_double_operator() { err("x + * 2"); }
    #[test] fn err_pow_arity() { err("pow(x)"); }
    #[test] fn err_trailing_tokens() { err("x 2"); }
    #[test] fn err_stray_char() { err("x $ 2"); }
    #[test] fn err_lone_dot() { err("."); }

    // ── Precedence / associativity ────────────────────────────────────────

    fn eval(src: &str, x: f32) -> f32 {
        parse_str(src).unwrap().eval(x, 0.0)
    }

    #[test]
    fn product_binds_tighter_than_sum() {
        assert_eq!(eval("2 + 3 * 4", 0.0), 14.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(eval("2 ** 3 ** 2", 0.0), 512.0);
    }

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        assert_eq!(eval("-x ** 2", 2.0), -4.0);
    }

    #[test]
    fn division_is_left_associative() {
        assert_eq!(eval("8 / 4 / 2", 0.0), 1.0);
    }

    #[test]
    fn constants() {
        assert_eq!(eval("pi", 0.0), std::f32::consts::PI);
        assert_eq!(eval("e", 0.0), std::f32::consts::E);
    }
}

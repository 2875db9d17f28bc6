use crate::ast::Expr;
use crate::error::CompileError;
use crate::parser::parse_str;

/// A compiled remap function: expression source plus a bound parameter `a`.
///
/// The expression's free variable `x` is the sampling parameter. A
/// well-formed remap maps [0, 1] to [0, 1]; callers clamp the result before
/// using it as a lookup coordinate, so an out-of-range expression degrades
/// gracefully instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct RemapFn {
    source: String,
    param: f32,
    ast: Expr,
}

impl RemapFn {
    /// Compiles `source` with the given parameter value.
    ///
    /// An empty source is a compile error here; "no remap" is the caller's
    /// decision to make before reaching this constructor.
    pub fn compile(source: &str, param: f32) -> Result<Self, CompileError> {
        let ast = parse_str(source)?;
        Ok(Self {
            source: source.trim().to_string(),
            param,
            ast,
        })
    }

    /// Evaluates the remap at `u`, i.e. with `x = u`.
    pub fn eval(&self, u: f32) -> f32 {
        self.ast.eval(u, self.param)
    }

    /// Re-binds the parameter by recompiling the stored source.
    ///
    /// The source compiled once already, so this cannot fail in practice;
    /// the signature stays fallible to match [`RemapFn::compile`].
    pub fn set_param(&mut self, param: f32) -> Result<(), CompileError> {
        self.ast = parse_str(&self.source)?;
        self.param = param;
        Ok(())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn param(&self) -> f32 {
        self.param
    }
}

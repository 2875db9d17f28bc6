/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `**` or `pow(_, _)`.
    Pow,
}

/// One-argument named functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Exp,
    /// Natural logarithm.
    Log,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Func> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "exp" => Func::Exp,
            "log" => Func::Log,
            _ => return None,
        })
    }
}

/// A compiled remap expression.
///
/// `Var` is the free variable `x` (the sampling parameter) and `Param` is the
/// bound parameter `a` supplied alongside the expression source.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f32),
    Var,
    Param,
    Neg(Box<Expr>),
    Bin(BinOp, Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Evaluates the expression with `x` bound to the free variable and `a`
    /// to the parameter.
    pub fn eval(&self, x: f32, a: f32) -> f32 {
        match self {
            Expr::Num(n) => *n,
            Expr::Var => x,
            Expr::Param => a,
            Expr::Neg(e) => -e.eval(x, a),
            Expr::Bin(op, lhs, rhs) => {
                let (l, r) = (lhs.eval(x, a), rhs.eval(x, a));
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Pow => l.powf(r),
                }
            }
            Expr::Call(func, arg) => {
                let v = arg.eval(x, a);
                match func {
                    Func::Sin => v.sin(),
                    Func::Cos => v.cos(),
                    Func::Tan => v.tan(),
                    Func::Asin => v.asin(),
                    Func::Acos => v.acos(),
                    Func::Atan => v.atan(),
                    Func::Exp => v.exp(),
                    Func::Log => v.ln(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f32) -> Box<Expr> {
        Box::new(Expr::Num(n))
    }

    #[test]
    fn eval_literal() {
        assert_eq!(Expr::Num(0.5).eval(0.0, 0.0), 0.5);
    }

    #[test]
    fn eval_var_and_param() {
        assert_eq!(Expr::Var.eval(0.25, 9.0), 0.25);
        assert_eq!(Expr::Param.eval(0.25, 9.0), 9.0);
    }

    #[test]
    fn eval_arithmetic() {
        let e = Expr::Bin(BinOp::Add, num(2.0), Box::new(Expr::Bin(BinOp::Mul, num(3.0), num(4.0))));
        assert_eq!(e.eval(0.0, 0.0), 14.0);
    }

    #[test]
    fn eval_pow() {
        let e = Expr::Bin(BinOp::Pow, num(2.0), num(10.0));
        assert_eq!(e.eval(0.0, 0.0), 1024.0);
    }

    #[test]
    fn eval_log_is_natural() {
        let e = Expr::Call(Func::Log, Box::new(Expr::Num(std::f32::consts::E)));
        assert!((e.eval(0.0, 0.0) - 1.0).abs() < 1e-6);
    }
}

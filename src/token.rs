use std::borrow::Cow;
use std::f64::consts::PI;
use std::fmt::{self, Display, Formatter};

/// Possible tokens to find in a function definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A leaf value: number literal, `x` or `pi`
    Operand(Operand),
    /// An operator or a function
    Operator(Operator),
    /// Parenthesis or argument separator, never present after compilation
    Grouping(Grouping),
}

impl Token {
    /// Literal spelling of the token, in lower case
    pub fn spelling(&self) -> Cow<'static, str> {
        match *self {
            Self::Operand(operand) => operand.spelling(),
            Self::Operator(op) => Cow::Borrowed(op.spelling()),
            Self::Grouping(group) => Cow::Borrowed(group.spelling()),
        }
    }

    /// Get the token precedence. Grouping tokens have the lowest precedence,
    /// so they never force an operator out of the stack.
    pub fn precedence(&self) -> u8 {
        match *self {
            Self::Operator(op) => op.precedence(),
            Self::Operand(_) | Self::Grouping(_) => 0,
        }
    }
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(&self.spelling())
    }
}

/// Leaf values of a function definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// A number literal
    Number(f64),
    /// The independent variable, substituted at evaluation time
    X,
    /// The constant π
    Pi,
}

impl Operand {
    /// Value of the operand for the given `x`
    pub fn value(self, x: f64) -> f64 {
        match self {
            Self::Number(value) => value,
            Self::X => x,
            Self::Pi => PI,
        }
    }

    /// Spelling of the operand. Numbers are shown in normalized form, so the
    /// literals `5.` and `05` are both spelled `5`, and `.5` is spelled `0.5`.
    pub fn spelling(self) -> Cow<'static, str> {
        match self {
            Self::Number(value) => Cow::Owned(value.to_string()),
            Self::X => Cow::Borrowed("x"),
            Self::Pi => Cow::Borrowed("pi"),
        }
    }
}

/// Tokens only used to drive the parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grouping {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,` between function arguments
    Comma,
}

impl Grouping {
    /// Literal spelling of the grouping token
    pub fn spelling(self) -> &'static str {
        match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
        }
    }
}

/// The closed set of operators and functions.
///
/// Binary operators and functions receive their arguments in postfix order:
/// `args[0]` is the right-hand operand and `args[1]` the left-hand one.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Negate,
    Abs,
    Acos,
    Asin,
    Atan,
    Cbrt,
    Ceil,
    Cos,
    Cosh,
    Exp,
    Expm1,
    Floor,
    Log,
    Log10,
    Log1p,
    Round,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
    Atan2,
    Hypot,
    Max,
    Min,
    Pow,
}

impl Operator {
    /// Every operator of the catalog
    pub const ALL: [Operator; 32] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Power,
        Self::Negate,
        Self::Abs,
        Self::Acos,
        Self::Asin,
        Self::Atan,
        Self::Cbrt,
        Self::Ceil,
        Self::Cos,
        Self::Cosh,
        Self::Exp,
        Self::Expm1,
        Self::Floor,
        Self::Log,
        Self::Log10,
        Self::Log1p,
        Self::Round,
        Self::Sin,
        Self::Sinh,
        Self::Sqrt,
        Self::Tan,
        Self::Tanh,
        Self::Atan2,
        Self::Hypot,
        Self::Max,
        Self::Min,
        Self::Pow,
    ];

    /// Literal spelling of the operator. `Negate` shares its spelling with
    /// `Subtract`.
    pub fn spelling(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract | Self::Negate => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
            Self::Abs => "abs",
            Self::Acos => "acos",
            Self::Asin => "asin",
            Self::Atan => "atan",
            Self::Cbrt => "cbrt",
            Self::Ceil => "ceil",
            Self::Cos => "cos",
            Self::Cosh => "cosh",
            Self::Exp => "exp",
            Self::Expm1 => "expm1",
            Self::Floor => "floor",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Log1p => "log1p",
            Self::Round => "round",
            Self::Sin => "sin",
            Self::Sinh => "sinh",
            Self::Sqrt => "sqrt",
            Self::Tan => "tan",
            Self::Tanh => "tanh",
            Self::Atan2 => "atan2",
            Self::Hypot => "hypot",
            Self::Max => "max",
            Self::Min => "min",
            Self::Pow => "pow",
        }
    }

    /// Number of arguments consumed by the operator, always 1 or 2
    pub fn arity(self) -> usize {
        match self {
            Self::Add
            | Self::Subtract
            | Self::Multiply
            | Self::Divide
            | Self::Modulo
            | Self::Power
            | Self::Atan2
            | Self::Hypot
            | Self::Max
            | Self::Min
            | Self::Pow => 2,
            _ => 1,
        }
    }

    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide | Self::Modulo => 2,
            Self::Power => 3,
            Self::Negate => 4,
            _ => 5,
        }
    }

    /// Check if the operator is called with a parenthesized argument list
    pub fn is_function(self) -> bool {
        self.precedence() == 5
    }

    /// Apply the operator to `args`, given in postfix order.
    ///
    /// # Panics
    ///
    /// If `args` holds fewer values than the operator arity.
    pub fn apply(self, args: &[f64]) -> f64 {
        match self {
            Self::Add => args[1] + args[0],
            Self::Subtract => args[1] - args[0],
            Self::Multiply => args[1] * args[0],
            Self::Divide => args[1] / args[0],
            Self::Modulo => libm::fmod(args[1], args[0]),
            Self::Power | Self::Pow => libm::pow(args[1], args[0]),
            Self::Negate => -args[0],
            Self::Abs => args[0].abs(),
            Self::Acos => args[0].acos(),
            Self::Asin => args[0].asin(),
            Self::Atan => args[0].atan(),
            Self::Cbrt => args[0].cbrt(),
            Self::Ceil => args[0].ceil(),
            Self::Cos => args[0].cos(),
            Self::Cosh => args[0].cosh(),
            Self::Exp => args[0].exp(),
            // exp(a - 1), not exp(a) - 1
            Self::Expm1 => (args[0] - 1.0).exp(),
            Self::Floor => args[0].floor(),
            Self::Log => args[0].ln(),
            Self::Log10 => args[0].log10(),
            Self::Log1p => (args[0] + 1.0).ln(),
            Self::Round => args[0].round(),
            Self::Sin => args[0].sin(),
            Self::Sinh => args[0].sinh(),
            Self::Sqrt => args[0].sqrt(),
            Self::Tan => args[0].tan(),
            Self::Tanh => args[0].tanh(),
            Self::Atan2 => libm::atan2(args[1], args[0]),
            Self::Hypot => libm::hypot(args[1], args[0]),
            Self::Max => args[1].max(args[0]),
            Self::Min => args[1].min(args[0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn arity_and_precedence() {
        for op in &Operator::ALL {
            assert!(op.arity() == 1 || op.arity() == 2, "{:?}", op);
            assert!((1..=5).contains(&op.precedence()), "{:?}", op);
        }
        assert!(Operator::Atan2.is_function());
        assert!(!Operator::Negate.is_function());
        assert!(!Operator::Power.is_function());
        assert_eq!(Operator::Negate.arity(), 1);
        assert_eq!(Operator::Subtract.arity(), 2);
    }

    #[test_case(Operator::Subtract, &[2.0, 10.0] => 8.0 ; "subtract takes the left operand second")]
    #[test_case(Operator::Divide, &[4.0, 10.0] => 2.5 ; "divide takes the left operand second")]
    #[test_case(Operator::Power, &[3.0, 2.0] => 8.0 ; "power takes the base second")]
    #[test_case(Operator::Modulo, &[3.0, 10.0] => 1.0 ; "modulo takes the dividend second")]
    #[test_case(Operator::Max, &[3.0, 10.0] => 10.0 ; "max of two arguments")]
    #[test_case(Operator::Expm1, &[1.0] => 1.0 ; "expm1 shifts its argument")]
    #[test_case(Operator::Log1p, &[0.0] => 0.0 ; "log1p of zero")]
    #[test_case(Operator::Negate, &[4.0] => -4.0 ; "negate")]
    fn apply(op: Operator, args: &[f64]) -> f64 {
        op.apply(args)
    }

    #[test]
    fn atan2_argument_order() {
        let expected = f64::atan2(1.0, 2.0);
        assert!((Operator::Atan2.apply(&[2.0, 1.0]) - expected).abs() < 1e-15);
    }

    #[test]
    fn spelling() {
        assert_eq!(Token::Operand(Operand::Number(2.5)).spelling(), "2.5");
        assert_eq!(Token::Operand(Operand::Number(5.0)).spelling(), "5");
        assert_eq!(Token::Operand(Operand::Number(0.5)).spelling(), "0.5");
        assert_eq!(Token::Operand(Operand::Pi).spelling(), "pi");
        assert_eq!(Token::Operator(Operator::Negate).spelling(), "-");
        assert_eq!(Token::Grouping(Grouping::Comma).to_string(), ",");
    }
}

use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::machine;
use crate::postfix::to_postfix;
use crate::token::{Operand, Token};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use tracing::debug;

/// Compile the function of `x` in `definition`.
///
/// This never fails: an invalid definition gives an invalid
/// [`CompiledFunction`](struct.CompiledFunction.html) carrying the error.
///
/// # Example
///
/// ```
/// # use xfunc::{compile, evaluate};
/// let function = compile("x + 2*x*sin(100*pi*x)");
/// assert!(function.is_valid());
/// assert_eq!(evaluate(&function, 0.0), 0.0);
///
/// let function = compile("2 * (x + 1");
/// assert!(!function.is_valid());
/// assert_eq!(function.error_position(), Some(10));
/// ```
pub fn compile(definition: &str) -> CompiledFunction {
    CompiledFunction::compile(definition)
}

/// Evaluate the compiled `function` for the given `x`.
///
/// Returns `NaN` if the function is invalid, if `x` is `NaN`, or if any step
/// of the computation is undefined.
///
/// # Example
///
/// ```
/// # use xfunc::{compile, evaluate};
/// let function = compile("8 - 3 - x");
/// assert_eq!(evaluate(&function, 2.0), 3.0);
/// assert!(evaluate(&function, f64::NAN).is_nan());
/// assert!(evaluate(&compile("8 -"), 2.0).is_nan());
/// ```
pub fn evaluate(function: &CompiledFunction, x: f64) -> f64 {
    function.evaluate(x)
}

/// Compile `definition` and evaluate it once for `x`.
///
/// Returns `Ok(result)` if the definition is valid, or `Err(cause)` if
/// compiling it failed.
///
/// # Example
///
/// ```
/// # use xfunc::eval;
/// assert_eq!(eval("45 - 2^3", 0.0), Ok(37.0));
/// assert_eq!(eval("3 * x", -5.0), Ok(-15.0));
/// assert!(eval("3 * y", -5.0).is_err());
/// ```
pub fn eval(definition: &str, x: f64) -> Result<f64, ParseError> {
    CompiledFunction::parse(definition).map(|function| function.evaluate(x))
}

/// A compiled function of `x`, either valid or holding the reason why its
/// definition was rejected.
///
/// A valid function stores its definition in reverse polish notation, and can
/// be evaluated any number of times, from any number of threads.
///
/// # Examples
/// ```
/// # use xfunc::CompiledFunction;
/// let function = CompiledFunction::compile("2 + 3 * x");
/// assert_eq!(function.evaluate(4.0), 14.0);
/// assert_eq!(function.to_string(), "2 3 x * +");
///
/// let function = CompiledFunction::compile("2 + * x");
/// assert!(!function.is_valid());
/// assert_eq!(function.error_position(), Some(4));
/// assert!(function.evaluate(4.0).is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    definition: String,
    program: Result<Vec<Token>, ParseError>,
}

impl CompiledFunction {
    /// Compile the function of `x` in `definition`, keeping any error in the
    /// returned value.
    pub fn compile(definition: &str) -> Self {
        let program = Lexer::new(definition)
            .tokenize()
            .map(|tokens| to_postfix(&tokens));

        match program {
            Ok(ref postfix) => debug!(definition, instructions = postfix.len(), "compiled function"),
            Err(ref error) => debug!(
                definition,
                kind = %error.kind(),
                position = ?error.position(),
                "rejected function definition"
            ),
        }

        Self {
            definition: definition.to_owned(),
            program,
        }
    }

    /// Compile the function of `x` in `definition`, returning the error if
    /// there is one.
    ///
    /// # Examples
    /// ```
    /// # use xfunc::{CompiledFunction, ErrorKind};
    /// assert!(CompiledFunction::parse("sqrt(x) / 2").is_ok());
    ///
    /// let error = CompiledFunction::parse("sin(1, 2)").unwrap_err();
    /// assert_eq!(error.kind(), ErrorKind::WrongArgumentCount);
    /// ```
    pub fn parse(definition: &str) -> Result<Self, ParseError> {
        let function = Self::compile(definition);
        if let Err(error) = function.program {
            return Err(error);
        }
        Ok(function)
    }

    /// Evaluate the function for the given `x`. Invalid functions and `NaN`
    /// inputs give `NaN`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self.program {
            Ok(ref postfix) => machine::run(postfix, x),
            Err(_) => f64::NAN,
        }
    }

    /// Evaluate the function for every value in `xs`.
    ///
    /// # Examples
    /// ```
    /// # use xfunc::CompiledFunction;
    /// let function = CompiledFunction::compile("x^2");
    /// assert_eq!(function.evaluate_many(&[1.0, 2.0, 3.0]), vec![1.0, 4.0, 9.0]);
    /// ```
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// The definition this function was compiled from
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Check if the definition was compiled successfully
    pub fn is_valid(&self) -> bool {
        self.program.is_ok()
    }

    /// The compilation error, if any
    pub fn error(&self) -> Option<&ParseError> {
        self.program.as_ref().err()
    }

    /// Character index of the compilation error in the definition. `None` if
    /// the function is valid, or if the error has no position.
    pub fn error_position(&self) -> Option<usize> {
        self.error().and_then(ParseError::position)
    }

    /// Human readable compilation error, empty if the function is valid
    pub fn error_reason(&self) -> &str {
        self.error().map_or("", ParseError::reason)
    }

    /// The function in reverse polish notation, empty if the function is
    /// invalid
    pub fn postfix(&self) -> &[Token] {
        match self.program {
            Ok(ref postfix) => postfix.as_slice(),
            Err(_) => &[],
        }
    }

    /// Check if the function uses `x`
    ///
    /// # Examples
    /// ```
    /// # use xfunc::CompiledFunction;
    /// assert!(CompiledFunction::compile("cos(pi * x)").depends_on_x());
    /// assert!(!CompiledFunction::compile("cos(pi)").depends_on_x());
    /// ```
    pub fn depends_on_x(&self) -> bool {
        self.postfix()
            .iter()
            .any(|token| *token == Token::Operand(Operand::X))
    }

    /// Check if the function is valid and gives the same value for every `x`
    pub fn is_constant(&self) -> bool {
        self.is_valid() && !self.depends_on_x()
    }
}

impl FromStr for CompiledFunction {
    type Err = ParseError;

    fn from_str(definition: &str) -> Result<Self, Self::Err> {
        Self::parse(definition)
    }
}

impl Display for CompiledFunction {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self.program {
            Ok(ref postfix) => {
                let mut tokens = postfix.iter();
                if let Some(first) = tokens.next() {
                    write!(fmt, "{}", first)?;
                }
                for token in tokens {
                    write!(fmt, " {}", token)?;
                }
                Ok(())
            }
            Err(ref error) => write!(fmt, "{}", error),
        }
    }
}

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

//! xfunc, a crate for compiling and evaluating functions of one variable.
//!
//! A function is defined by a string like `"x + 2*x*sin(100*pi*x)"`. The
//! definition is checked and compiled once, then evaluated as many times as
//! needed for different values of `x`:
//!
//! ```
//! use xfunc::{compile, evaluate};
//!
//! let function = compile("x + 2*x*sin(100*pi*x)");
//! assert!(function.is_valid());
//! assert_eq!(evaluate(&function, 0.0), 0.0);
//! assert_eq!(evaluate(&function, 1.0), 1.0 + 2.0 * (100.0 * std::f64::consts::PI).sin());
//! ```
//!
//! Compiling never fails. An invalid definition gives an invalid
//! [`CompiledFunction`](struct.CompiledFunction.html), which tells where and
//! why the definition was rejected, and evaluates to `NaN`:
//!
//! ```
//! use xfunc::{compile, ErrorKind};
//!
//! let function = compile("atan2(1, 2, 3)");
//! assert!(!function.is_valid());
//! assert_eq!(function.error().map(|e| e.kind()), Some(ErrorKind::WrongArgumentCount));
//! assert_eq!(function.error_position(), Some(13));
//! assert!(function.evaluate(1.0).is_nan());
//! ```
//!
//! # Language definition
//!
//! A definition can contain the following elements, separated by any amount
//! of whitespace. Letters are case insensitive.
//!
//! - number literals: `12`, `0.5`, `.5`, `5.`. There is no scientific
//!   notation, and numbers are never signed: `-2` is the negation of `2`;
//! - the variable `x` and the constant `pi`;
//! - left and right parenthesis;
//! - binary operators: `+` and `-`, then `*`, `/` and `%` (floating point
//!   remainder), then `^` (power), by increasing precedence. All of them are
//!   left associative, `2^3^2` is `64`;
//! - unary negation `-`, binding tighter than `^`: `-2^2` is `4`;
//! - function calls, binding tighter than anything else. One argument:
//!   `abs`, `acos`, `asin`, `atan`, `cbrt`, `ceil`, `cos`, `cosh`, `exp`,
//!   `expm1`, `floor`, `log` (natural logarithm), `log10`, `log1p`, `round`,
//!   `sin`, `sinh`, `sqrt`, `tan`, `tanh`. Two arguments separated by a
//!   comma: `atan2(y, x)`, `hypot`, `max`, `min`, `pow`.
//!
//! `expm1(a)` computes `exp(a - 1)` and `log1p(a)` computes `log(a + 1)`.
//!
//! Any other symbol is forbidden in the input.
//!
//! # Technical details
//!
//! The definition is split in tokens, checking each token against the
//! previous one. A Shunting-Yard algorithm then reorders the tokens in
//! reverse polish notation, which is evaluated on a stack allocated for each
//! evaluation. A compiled function is immutable, and can be shared between
//! threads.

#[macro_use]
extern crate lazy_static;

mod catalog;
mod error;
mod expr;
mod lexer;
mod machine;
mod postfix;
mod token;

pub use catalog::lookup;
pub use error::{ErrorKind, ParseError};
pub use expr::{compile, eval, evaluate, CompiledFunction};
pub use token::{Grouping, Operand, Operator, Token};

use crate::token::Token;

/// Run the `postfix` sequence on a value stack for the given `x`.
///
/// The first `NaN` produced by an operator stops the evaluation. The stack is
/// local to the call, so the same sequence can be evaluated from several
/// threads at once.
///
/// # Panics
///
/// If `postfix` is not a well-formed postfix sequence. Sequences built by
/// the compiler are always well-formed.
pub fn run(postfix: &[Token], x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());
    let mut args = [0.0; 2];
    for token in postfix {
        match *token {
            Token::Operand(operand) => stack.push(operand.value(x)),
            Token::Operator(op) => {
                let arity = op.arity();
                for arg in args.iter_mut().take(arity) {
                    *arg = stack
                        .pop()
                        .expect("Internal bug: stack underflow in postfix evaluation");
                }
                let result = op.apply(&args[..arity]);
                if result.is_nan() {
                    return f64::NAN;
                }
                stack.push(result);
            }
            Token::Grouping(group) => {
                panic!("Internal bug: found {:?} in postfix sequence", group)
            }
        }
    }

    assert!(
        stack.len() == 1,
        "Internal bug: {} values left after postfix evaluation",
        stack.len()
    );
    stack[0]
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::token::{Grouping, Operand, Operator, Token};

    const X: Token = Token::Operand(Operand::X);

    fn number(value: f64) -> Token {
        Token::Operand(Operand::Number(value))
    }

    #[test]
    fn operands() {
        assert_eq!(run(&[X], 4.5), 4.5);
        assert_eq!(run(&[Token::Operand(Operand::Pi)], 0.0), std::f64::consts::PI);
        assert_eq!(run(&[number(2.0)], 7.0), 2.0);
    }

    #[test]
    fn argument_order() {
        // x 2 -
        let postfix = [X, number(2.0), Token::Operator(Operator::Subtract)];
        assert_eq!(run(&postfix, 10.0), 8.0);
        // 1 x atan2
        let postfix = [number(1.0), X, Token::Operator(Operator::Atan2)];
        assert!((run(&postfix, 2.0) - f64::atan2(1.0, 2.0)).abs() < 1e-15);
    }

    #[test]
    fn nan() {
        assert!(run(&[number(1.0)], f64::NAN).is_nan());
        // sqrt(x) + 5
        let postfix = [
            X,
            Token::Operator(Operator::Sqrt),
            number(5.0),
            Token::Operator(Operator::Add),
        ];
        assert!(run(&postfix, -1.0).is_nan());
        assert_eq!(run(&postfix, 4.0), 7.0);
    }

    #[test]
    fn infinity_is_not_nan() {
        let postfix = [number(1.0), X, Token::Operator(Operator::Divide)];
        assert_eq!(run(&postfix, 0.0), f64::INFINITY);
        assert_eq!(run(&postfix, -0.0), f64::NEG_INFINITY);
    }

    #[test]
    #[should_panic(expected = "stack underflow")]
    fn underflow() {
        run(&[X, Token::Operator(Operator::Add)], 1.0);
    }

    #[test]
    #[should_panic(expected = "values left")]
    fn leftover_values() {
        run(&[X, X], 1.0);
    }

    #[test]
    #[should_panic(expected = "in postfix sequence")]
    fn grouping() {
        run(&[X, Token::Grouping(Grouping::Comma)], 1.0);
    }
}

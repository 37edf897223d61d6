use crate::token::{Grouping, Operator, Token};

/// Reorder validated `tokens` in reverse polish notation with a
/// Shunting-Yard algorithm. Grouping tokens drive the reordering and are
/// dropped from the output.
///
/// Operators of equal precedence are popped before pushing the new one, so
/// every binary operator chain is left associative. Negations are prefix
/// operators: they are pushed without popping anything.
pub fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for &token in tokens {
        match token {
            Token::Operand(_) => output.push(token),
            Token::Grouping(Grouping::LeftParen) => operators.push(token),
            Token::Grouping(group) => {
                'operators: while let Some(top) = operators.pop() {
                    match top {
                        Token::Grouping(Grouping::LeftParen) => {
                            if group == Grouping::Comma {
                                // the matching right parenthesis still needs it
                                operators.push(top);
                            }
                            break 'operators;
                        }
                        Token::Operator(_) => output.push(top),
                        other => panic!("Internal bug: found {:?} in operators stack", other),
                    }
                }
            }
            // prefix negation has no operand in the output yet
            Token::Operator(Operator::Negate) => operators.push(token),
            Token::Operator(op) => {
                while let Some(&top) = operators.last() {
                    if top.precedence() >= op.precedence() {
                        operators.pop();
                        output.push(top);
                    } else {
                        break;
                    }
                }
                operators.push(token);
            }
        }
    }

    while let Some(token) = operators.pop() {
        match token {
            Token::Operator(_) => output.push(token),
            other => panic!("Internal bug: found {:?} in operators stack", other),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::to_postfix;
    use crate::lexer::Lexer;
    use test_case::test_case;

    fn rpn(definition: &str) -> String {
        let tokens = Lexer::new(definition).tokenize().unwrap();
        to_postfix(&tokens)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test_case("2 + 3 * 4" => "2 3 4 * +" ; "multiplication binds tighter")]
    #[test_case("8 - 3 - 2" => "8 3 - 2 -" ; "subtraction is left associative")]
    #[test_case("2 ^ 3 ^ 2" => "2 3 ^ 2 ^" ; "power is left associative")]
    #[test_case("(2 + 3) * 4" => "2 3 + 4 *" ; "parenthesis")]
    #[test_case("-x ^ 2" => "x - 2 ^" ; "negation binds tighter than power")]
    #[test_case("2 ^ -x" => "2 x - ^" ; "negated exponent")]
    #[test_case("2 * -3" => "2 3 - *" ; "negated factor")]
    #[test_case("sin(x) ^ 2" => "x sin 2 ^" ; "function binds tightest")]
    #[test_case("-sin(x)" => "x sin -" ; "negated function")]
    #[test_case("--x" => "x - -" ; "double negation")]
    #[test_case("-(-x)" => "x - -" ; "negation of a negated group")]
    #[test_case("1 + --3" => "1 3 - - +" ; "double negation after addition")]
    #[test_case("2 ^ --2" => "2 2 - - ^" ; "double negation in exponent")]
    #[test_case("-x * -x" => "x - x - *" ; "negations on both sides")]
    #[test_case("atan2(1, x + 2)" => "1 x 2 + atan2" ; "function with two arguments")]
    #[test_case("max(min(x, 1), -pi) * 2" => "x 1 min pi - max 2 *" ; "nested calls")]
    #[test_case("x + 2*x*sin(100*pi*x)" => "x 2 x * 100 pi * x * sin * +" ; "mixed expression")]
    fn postfix(definition: &str) -> String {
        rpn(definition)
    }
}

use crate::catalog::lookup;
use crate::error::{ErrorKind, ParseError};
use crate::token::{Grouping, Operand, Operator, Token};
use tracing::trace;

/// Grammatical category of the last accepted token, driving which token can
/// come next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    None,
    LeftParen,
    RightParen,
    Comma,
    Negate,
    BinaryOperator,
    Function,
    Operand,
}

impl Category {
    fn of(token: Option<&Token>) -> Self {
        match token {
            None => Self::None,
            Some(Token::Operand(_)) => Self::Operand,
            Some(Token::Grouping(Grouping::LeftParen)) => Self::LeftParen,
            Some(Token::Grouping(Grouping::RightParen)) => Self::RightParen,
            Some(Token::Grouping(Grouping::Comma)) => Self::Comma,
            Some(Token::Operator(Operator::Negate)) => Self::Negate,
            Some(Token::Operator(op)) if op.is_function() => Self::Function,
            Some(Token::Operator(_)) => Self::BinaryOperator,
        }
    }

    /// Can an operand or a function come after this category?
    fn accepts_operand(self) -> bool {
        matches!(
            self,
            Self::None | Self::LeftParen | Self::Negate | Self::BinaryOperator | Self::Comma
        )
    }

    /// Can a binary operator, a right parenthesis or a comma come after this
    /// category?
    fn closes_value(self) -> bool {
        matches!(self, Self::Operand | Self::RightParen)
    }

    fn accepts_left_paren(self) -> bool {
        self.accepts_operand() || self == Self::Function
    }
}

/// An helper struct for splitting a function definition into tokens
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(definition: &str) -> Lexer {
        Lexer {
            input: definition.chars().collect(),
            position: 0,
        }
    }

    /// Split the definition into tokens, checking that every token is allowed
    /// after the previous one. The first error stops the tokenization.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        if self.input.is_empty() {
            return Err(ParseError::new(
                ErrorKind::EmptyDefinition,
                None,
                "empty definition".into(),
            ));
        }
        check_parentheses(&self.input)?;

        let mut tokens = Vec::new();
        while let Some((token, start)) = self.next_token()? {
            let token = admit(&tokens, token, start)?;
            trace!(token = %token, position = start, "accepted token");
            tokens.push(token);
        }

        match Category::of(tokens.last()) {
            Category::None => Err(ParseError::new(
                ErrorKind::IncompleteExpression,
                None,
                "no valid tokens".into(),
            )),
            category if category.closes_value() => Ok(tokens),
            _ => {
                let last = self.input.len() - 1;
                Err(ParseError::at(
                    ErrorKind::IncompleteExpression,
                    last,
                    format!("incomplete expression at position {}", last),
                ))
            }
        }
    }

    /// Get the next raw token and its starting position, skipping whitespace
    fn next_token(&mut self) -> Result<Option<(Token, usize)>, ParseError> {
        while self.position < self.input.len() && self.input[self.position].is_whitespace() {
            self.position += 1;
        }
        let start = self.position;
        let c = match self.input.get(start) {
            Some(&c) => c,
            None => return Ok(None),
        };

        if is_number_part(c) {
            return self.number().map(|token| Some((token, start)));
        }

        match lookup(&self.input[start..]) {
            Some((token, length)) => {
                self.position += length;
                Ok(Some((token, start)))
            }
            None => Err(ParseError::at(
                ErrorKind::UnrecognizedToken,
                start,
                format!("unrecognized token '{}' at position {}", c, start),
            )),
        }
    }

    /// Greedily read a number literal. Scientific notation is not supported.
    fn number(&mut self) -> Result<Token, ParseError> {
        let start = self.position;
        while self.position < self.input.len() && is_number_part(self.input[self.position]) {
            self.position += 1;
        }
        let literal: String = self.input[start..self.position].iter().collect();

        let malformed = || {
            ParseError::at(
                ErrorKind::MalformedNumber,
                start,
                format!("malformed number '{}' at position {}", literal, start),
            )
        };
        if literal.matches('.').count() > 1 {
            return Err(malformed());
        }
        let value: f64 = literal.parse().map_err(|_| malformed())?;
        Ok(Token::Operand(Operand::Number(value)))
    }
}

/// Check if `c` can appear in a number literal
fn is_number_part(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// Check that every parenthesis of `input` has a counterpart. An unmatched
/// left parenthesis is reported at the end of the input.
fn check_parentheses(input: &[char]) -> Result<(), ParseError> {
    let mut depth = 0_usize;
    for (position, &c) in input.iter().enumerate() {
        if c == '(' {
            depth += 1;
        } else if c == ')' {
            if depth == 0 {
                return Err(ParseError::at(
                    ErrorKind::UnmatchedParenthesis,
                    position,
                    format!("unmatched right parenthesis at position {}", position),
                ));
            }
            depth -= 1;
        }
    }
    if depth != 0 {
        return Err(ParseError::at(
            ErrorKind::UnmatchedParenthesis,
            input.len(),
            format!("unmatched left parenthesis at position {}", input.len()),
        ));
    }
    Ok(())
}

/// Check that `token` can follow the already accepted `tokens`, turning a
/// subtraction into a negation where a binary operator is not allowed.
fn admit(tokens: &[Token], token: Token, start: usize) -> Result<Token, ParseError> {
    let previous = Category::of(tokens.last());
    let misplaced = || {
        ParseError::at(
            ErrorKind::MisplacedToken,
            start,
            format!(
                "token '{}' is not allowed at position {}",
                token.spelling(),
                start
            ),
        )
    };

    match token {
        Token::Operand(_) => {
            if previous.accepts_operand() {
                return Ok(token);
            }
        }
        Token::Operator(op) if op.is_function() => {
            if previous.accepts_operand() {
                return Ok(token);
            }
        }
        Token::Operator(op) => {
            if previous.closes_value() {
                return Ok(token);
            }
            if op == Operator::Subtract && previous.accepts_operand() {
                return Ok(Token::Operator(Operator::Negate));
            }
        }
        Token::Grouping(Grouping::LeftParen) => {
            if previous.accepts_left_paren() {
                return Ok(token);
            }
        }
        Token::Grouping(Grouping::RightParen) => {
            if previous.closes_value() {
                check_argument_count(tokens, start)?;
                return Ok(token);
            }
        }
        Token::Grouping(Grouping::Comma) => {
            if previous.closes_value() && enclosing_function(tokens).is_some() {
                return Ok(token);
            }
            return Err(ParseError::at(
                ErrorKind::InvalidComma,
                start,
                format!("invalid comma at position {}", start),
            ));
        }
    }
    Err(misplaced())
}

/// Find the function whose argument list is still open at the end of
/// `tokens`, if the innermost open parenthesis belongs to a function call.
fn enclosing_function(tokens: &[Token]) -> Option<Operator> {
    let (paren, _) = innermost_open_paren(tokens)?;
    called_function(tokens, paren)
}

/// Get the function called with the parenthesis at index `paren`
fn called_function(tokens: &[Token], paren: usize) -> Option<Operator> {
    match paren.checked_sub(1).map(|index| tokens[index]) {
        Some(Token::Operator(op)) if op.is_function() => Some(op),
        _ => None,
    }
}

/// Scan `tokens` backward for the innermost unclosed left parenthesis.
/// Returns its index and the number of arguments found after it.
fn innermost_open_paren(tokens: &[Token]) -> Option<(usize, usize)> {
    let mut depth = 0_usize;
    let mut arguments = 0_usize;
    for (index, token) in tokens.iter().enumerate().rev() {
        match *token {
            Token::Grouping(Grouping::LeftParen) if depth == 0 => return Some((index, arguments)),
            Token::Grouping(Grouping::LeftParen) => depth -= 1,
            Token::Grouping(Grouping::RightParen) => {
                depth += 1;
                arguments = arguments.max(1);
            }
            Token::Grouping(Grouping::Comma) if depth == 0 => arguments += 1,
            _ => arguments = arguments.max(1),
        }
    }
    None
}

/// Check the arguments of the call closed by the right parenthesis at
/// `position`, if the parenthesis closes a function call.
fn check_argument_count(tokens: &[Token], position: usize) -> Result<(), ParseError> {
    let (paren, arguments) = match innermost_open_paren(tokens) {
        Some(found) => found,
        None => return Ok(()),
    };
    match called_function(tokens, paren) {
        Some(function) if function.arity() != arguments => Err(ParseError::at(
            ErrorKind::WrongArgumentCount,
            position,
            format!(
                "wrong number of args for '{}' at position {}: expected {}, got {}",
                function.spelling(),
                position,
                function.arity(),
                arguments
            ),
        )),
        _ => Ok(()),
    }
}

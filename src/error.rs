use thiserror::Error;

/// Kinds of errors detected while compiling a function definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// The definition has no content at all
    #[error("empty definition")]
    EmptyDefinition,
    /// A parenthesis without its counterpart
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,
    /// A number literal with more than one decimal point, or unparsable
    #[error("malformed number")]
    MalformedNumber,
    /// Nothing in the catalog matches the input
    #[error("unrecognized token")]
    UnrecognizedToken,
    /// The token can not follow the previous one
    #[error("misplaced token")]
    MisplacedToken,
    /// A function called with the wrong number of arguments
    #[error("wrong number of arguments")]
    WrongArgumentCount,
    /// A comma outside of a function argument list
    #[error("invalid comma")]
    InvalidComma,
    /// No token at all, or a definition ending on an operator
    #[error("incomplete expression")]
    IncompleteExpression,
}

/// Error returned when a function definition can not be compiled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ParseError: {reason}")]
pub struct ParseError {
    kind: ErrorKind,
    position: Option<usize>,
    reason: String,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, position: Option<usize>, reason: String) -> Self {
        Self {
            kind,
            position,
            reason,
        }
    }

    pub(crate) fn at(kind: ErrorKind, position: usize, reason: String) -> Self {
        Self::new(kind, Some(position), reason)
    }

    /// What went wrong
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Character index of the error in the definition, if there is one
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Human readable description of the error
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let error = ParseError::at(
            ErrorKind::InvalidComma,
            3,
            "invalid comma at position 3".into(),
        );
        assert_eq!(error.to_string(), "ParseError: invalid comma at position 3");
        assert_eq!(error.kind().to_string(), "invalid comma");
        assert_eq!(error.position(), Some(3));

        let error = ParseError::new(ErrorKind::EmptyDefinition, None, "empty definition".into());
        assert_eq!(error.position(), None);
        assert_eq!(error.reason(), "empty definition");
    }
}

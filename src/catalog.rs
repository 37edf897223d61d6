use crate::token::{Grouping, Operand, Operator, Token};
use hashbrown::HashMap;

lazy_static! {
    /// Every literal the tokenizer knows about, indexed by lower case
    /// spelling. Number literals are not part of the catalog.
    pub static ref CATALOG: HashMap<&'static str, Token> = {
        let mut map = HashMap::<&'static str, Token>::new();
        map.insert("(", Token::Grouping(Grouping::LeftParen));
        map.insert(")", Token::Grouping(Grouping::RightParen));
        map.insert(",", Token::Grouping(Grouping::Comma));
        map.insert("x", Token::Operand(Operand::X));
        map.insert("pi", Token::Operand(Operand::Pi));
        for &op in &Operator::ALL {
            // negation is only reached by re-interpreting a subtraction
            if op != Operator::Negate {
                map.insert(op.spelling(), Token::Operator(op));
            }
        }
        map.shrink_to_fit();
        map
    };

    /// Length, in characters, of the longest spelling in the catalog
    static ref LONGEST_SPELLING: usize = CATALOG
        .keys()
        .map(|spelling| spelling.chars().count())
        .max()
        .unwrap_or(0);
}

/// Find the longest catalog entry at the start of `candidate`.
///
/// Candidate prefixes are probed from the longest catalog spelling down to a
/// single character, so `atan2` wins over `atan` and `log10` over `log`.
/// Matching ignores ASCII case. Returns the token and the number of characters
/// it spans.
///
/// # Examples
///
/// ```
/// # use xfunc::{lookup, Operator, Token};
/// let input: Vec<char> = "ATAN2(1, 2)".chars().collect();
/// assert_eq!(lookup(&input), Some((Token::Operator(Operator::Atan2), 5)));
/// ```
pub fn lookup(candidate: &[char]) -> Option<(Token, usize)> {
    let longest = (*LONGEST_SPELLING).min(candidate.len());
    let mut spelling = String::with_capacity(longest);
    for length in (1..=longest).rev() {
        spelling.clear();
        spelling.extend(candidate[..length].iter().map(char::to_ascii_lowercase));
        if let Some(&token) = CATALOG.get(spelling.as_str()) {
            return Some((token, length));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn chars(input: &str) -> Vec<char> {
        input.chars().collect()
    }

    #[test_case("atan2(" => Some((Token::Operator(Operator::Atan2), 5)) ; "atan2 before atan")]
    #[test_case("atan(" => Some((Token::Operator(Operator::Atan), 4)) ; "atan alone")]
    #[test_case("expm1(" => Some((Token::Operator(Operator::Expm1), 5)) ; "expm1 before exp")]
    #[test_case("exp(" => Some((Token::Operator(Operator::Exp), 3)) ; "exp alone")]
    #[test_case("log10(" => Some((Token::Operator(Operator::Log10), 5)) ; "log10 before log")]
    #[test_case("log1p(" => Some((Token::Operator(Operator::Log1p), 5)) ; "log1p before log")]
    #[test_case("log(" => Some((Token::Operator(Operator::Log), 3)) ; "log alone")]
    #[test_case("sinh(" => Some((Token::Operator(Operator::Sinh), 4)) ; "sinh before sin")]
    #[test_case("PI*x" => Some((Token::Operand(Operand::Pi), 2)) ; "case insensitive constant")]
    #[test_case("X" => Some((Token::Operand(Operand::X), 1)) ; "case insensitive variable")]
    #[test_case("-3" => Some((Token::Operator(Operator::Subtract), 1)) ; "minus is a subtraction")]
    #[test_case(", 2" => Some((Token::Grouping(Grouping::Comma), 1)) ; "comma")]
    #[test_case("y" => None ; "unknown letter")]
    #[test_case("" => None ; "empty candidate")]
    fn lookup_prefix(input: &str) -> Option<(Token, usize)> {
        lookup(&chars(input))
    }

    #[test]
    fn negate_is_not_in_catalog() {
        assert!(CATALOG
            .values()
            .all(|token| *token != Token::Operator(Operator::Negate)));
        assert_eq!(*LONGEST_SPELLING, 5);
    }
}

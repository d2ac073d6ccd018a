pub mod error;
pub mod expressions;
pub mod statements;

use crate::ast::Statement;
use crate::lexer::{Token, TokenKind};
pub use error::{Expected, ParseError};
use statements::parse_statement;

/// Deepest statement or expression tree a single line may build. Evaluating
/// and dropping the tree both recurse on it.
pub const MAX_NESTING_DEPTH: usize = 256;

pub struct Parser {
    pub iter: std::iter::Peekable<std::vec::IntoIter<Token>>,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let iter = tokens.into_iter().peekable();
        Self { iter, depth: 0 }
    }

    /// Records one more level of nesting in the tree being built.
    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    pub(crate) fn parse_ident(&mut self) -> Result<std::rc::Rc<str>, ParseError> {
        let token = self.iter.next();
        match token {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name),
            _ => Err(ParseError::unexpected_other(Expected::Identifier, token)),
        }
    }

    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<(), ParseError> {
        let token = self.iter.next();
        match token {
            Some(Token { kind, .. }) if kind == token_kind => Ok(()),
            _ => Err(ParseError::unexpected_token(token_kind, token)),
        }
    }

    pub(crate) fn peek_kind(&mut self) -> Option<&TokenKind> {
        self.iter.peek().map(|token| &token.kind)
    }

    /// Parses the tokens of a single line into exactly one statement. A line
    /// without tokens is [`Statement::Empty`]; anything left over after the
    /// statement is an error.
    pub fn parse_line(&mut self) -> Result<Statement, ParseError> {
        let statement = parse_statement(self)?;

        match self.iter.next() {
            None => Ok(statement),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: Expected::EndOfLine,
                got: token,
            }),
        }
    }
}

pub fn parse(tokens: Vec<Token>) -> Result<Statement, ParseError> {
    Parser::new(tokens).parse_line()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn test_parsing(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let statement = parse(tokenize(input).unwrap()).unwrap();

            assert_eq!(statement.to_string(), expected, "input: {}", input)
        }
    }

    fn parse_error(input: &str) -> ParseError {
        parse(tokenize(input).unwrap()).unwrap_err()
    }

    #[test]
    fn test_expression_precedence() {
        let tests = vec![
            ("2 + 3 * 4", "(2 + (3 * 4))"),
            ("-2 + 3", "((-2) + 3)"),
            ("-a * b", "((-a) * b)"),
            ("--5", "(-(-5))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b / c % d", "(((a * b) / c) % d)"),
            ("a + b / c", "(a + (b / c))"),
            ("a - -b", "(a - (-b))"),
            (
                "a + b * c + d / e - f",
                "(((a + (b * c)) + (d / e)) - f)",
            ),
            ("1 + 2 == 3", "((1 + 2) == 3)"),
            ("1 == 2 == 3", "((1 == 2) == 3)"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_assignment() {
        let tests = vec![
            ("x = 5", "x = 5"),
            ("x = 1 + 2 * y", "x = (1 + (2 * y))"),
            (r#"s = "hi""#, r#"s = "hi""#),
            ("b = 1 == 2", "b = (1 == 2)"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_conditional() {
        let tests = vec![
            ("if 3 > 2 do 1 else 0", "if (3 > 2) do 1 else 0"),
            ("if 1 == 2 do 1 else 0", "if (1 == 2) do 1 else 0"),
            ("if a + 1 <= b * 2 do a else b", "if ((a + 1) <= (b * 2)) do a else b"),
            ("if a >= 0 do x = 1 else x = 2", "if (a >= 0) do x = 1 else x = 2"),
            (
                "if a < 1 do if b < 1 do 1 else 2 else 3",
                "if (a < 1) do if (b < 1) do 1 else 2 else 3",
            ),
            ("if a < 1 do else 3", "if (a < 1) do  else 3"),
            ("if a < 1 do 1 else", "if (a < 1) do 1 else "),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_loops_and_functions() {
        let tests = vec![
            ("for i = 0 to 3 do i", "for i = 0 to 3 do i"),
            ("for i = n - 1 to n * 2 do f()", "for i = (n - 1) to (n * 2) do f()"),
            ("for i = 0 to 3 do", "for i = 0 to 3 do "),
            ("func f() -> 10", "func f() -> 10"),
            ("func f() -> x = x + 1", "func f() -> x = (x + 1)"),
            ("func f() -> for i = 0 to 2 do i", "func f() -> for i = 0 to 2 do i"),
            ("f()", "f()"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_statement_forms() {
        let tests = vec![
            ("", ""),
            ("# only a comment", ""),
            (r#""hello""#, r#""hello""#),
            ("display(x)", "display(x)"),
            ("display(x = 2)", "display(x = 2)"),
            ("display(f())", "display(f())"),
            ("display()", "display()"),
            ("x", "x"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_empty_line_is_empty_statement() {
        assert_eq!(parse(vec![]), Ok(Statement::Empty));
    }

    #[test]
    fn test_malformed_lines_are_diagnosed() {
        assert!(matches!(
            parse_error("x ="),
            ParseError::PrematureEndOfInput {
                expected: Expected::Expression
            }
        ));
        assert!(matches!(
            parse_error("1 +"),
            ParseError::PrematureEndOfInput { .. }
        ));
        assert!(matches!(
            parse_error("1 2"),
            ParseError::UnexpectedToken {
                expected: Expected::EndOfLine,
                ..
            }
        ));
        assert!(matches!(
            parse_error(")"),
            ParseError::UnexpectedToken {
                expected: Expected::EndOfLine,
                ..
            }
        ));
        assert!(matches!(
            parse_error("else"),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_error("x = 1;"),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_error("if 1 do 2 else 3"),
            ParseError::MissingComparison(_)
        ));
        assert!(matches!(
            parse_error("if 1 < 2 do 3"),
            ParseError::PrematureEndOfInput {
                expected: Expected::Token(TokenKind::Else)
            }
        ));
        assert!(matches!(
            parse_error("for i to 3 do i"),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_error("func f(x) -> x"),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_error("f(1)"),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse_error("display(x"),
            ParseError::PrematureEndOfInput { .. }
        ));
    }

    #[test]
    fn test_unexpected_token_position() {
        let tests = vec![
            ("x =\n  )", "line 2, column 3: expected an expression, found ')'"),
            (r#"s = "é" 1"#, "line 1, column 9: expected end of line, found '1'"),
            ("func f(x) -> x", "line 1, column 8: expected ')', found 'x'"),
        ];

        for (input, expected) in tests {
            assert_eq!(parse_error(input).to_string(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_nesting_limit() {
        let too_deep = vec![
            format!("{}1", "-".repeat(5000)),
            format!("1{}", " + 1".repeat(5000)),
            format!("x = 2{}", " * 2".repeat(5000)),
            format!("{}x{}", "display(".repeat(300), ")".repeat(300)),
            format!("{}1", "for i = 0 to 1 do ".repeat(300)),
        ];

        for input in too_deep {
            assert_eq!(
                parse_error(&input),
                ParseError::NestingTooDeep(MAX_NESTING_DEPTH),
                "input starts with: {}",
                &input[..20]
            );
        }

        let long_sum = format!("1{}", " + 1".repeat(200));
        assert!(parse(tokenize(&long_sum).unwrap()).is_ok());
        let negations = format!("{}1", "-".repeat(200));
        assert!(parse(tokenize(&negations).unwrap()).is_ok());
    }

    #[test]
    fn test_grouping_and_strings_outside_grammar() {
        // Parentheses are only call and display syntax
        assert!(parse(tokenize("(1 + 2) * 3").unwrap()).is_err());
        // Strings are only statements or right-hand sides
        assert!(parse(tokenize(r#"x = "a" + "b""#).unwrap()).is_err());
        assert!(parse(tokenize(r#"1 + "a""#).unwrap()).is_err());
        // Ordering comparisons only appear as conditions
        assert!(parse(tokenize("x = 1 < 2").unwrap()).is_err());
        assert!(parse(tokenize("1 < 2").unwrap()).is_err());
    }
}

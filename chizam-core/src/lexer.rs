use std::fmt::Display;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    Ident(Rc<str>),
    Int(i64),
    // Keeps the enclosing quotes
    String(Rc<str>),

    // Operators
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,

    Equal,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,

    Comma,
    SemiColon,
    LParen,
    RParen,
    Arrow,

    // Keywords
    If,
    Do,
    Else,
    For,
    Func,
    To,
    Display,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    /// Counted in characters from the start of `line`, starting at 1.
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("line {line}, column {column}: unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, line: usize, column: usize },
    #[error("line {line}, column {column}: unterminated string")]
    UnterminatedString { line: usize, column: usize },
    #[error("line {line}: integer literal {literal} is out of range")]
    IntegerOutOfRange { literal: Rc<str>, line: usize },
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "if" => Some(TokenKind::If),
        "do" => Some(TokenKind::Do),
        "else" => Some(TokenKind::Else),
        "for" => Some(TokenKind::For),
        "func" => Some(TokenKind::Func),
        "to" => Some(TokenKind::To),
        "display" => Some(TokenKind::Display),
        _ => None,
    }
}

/// Lexes `input` to completion, stopping at the first character no token
/// matches.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(input).collect()
}

#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    line_start: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::starting_at(input, 1)
    }

    /// Same as [`Tokenizer::new`], but reports positions as if `input` began
    /// on `line`.
    pub fn starting_at(input: &'a str, line: usize) -> Self {
        let iter = input.char_indices().peekable();
        Self {
            input,
            iter,
            line,
            line_start: 0,
        }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_ident_char(ch: char) -> bool {
        Self::is_letter(ch) || ch.is_ascii_digit()
    }

    fn token(&mut self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            line: self.line,
            column: self.column(start),
            start,
            end: self.next_idx(),
        }
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_ident_char(*ch)).is_some() {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        let kind = keywords(ident).unwrap_or_else(|| TokenKind::Ident(ident.into()));
        self.token(kind, start)
    }

    fn read_number(&mut self, start: usize) -> Result<Token, LexError> {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        let end = self.next_idx();
        let literal = &self.input[start..end];
        let value = literal
            .parse::<i64>()
            .map_err(|_| LexError::IntegerOutOfRange {
                literal: literal.into(),
                line: self.line,
            })?;

        Ok(self.token(TokenKind::Int(value), start))
    }

    fn read_string(&mut self, start: usize) -> Result<Token, LexError> {
        loop {
            match self.iter.peek() {
                Some((_, '"')) => {
                    self.iter.next();
                    break;
                }
                // A string never spans lines
                None | Some((_, '\n')) => {
                    return Err(LexError::UnterminatedString {
                        line: self.line,
                        column: self.column(start),
                    })
                }
                _ => {
                    self.iter.next();
                }
            }
        }

        let end = self.next_idx();
        let string = &self.input[start..end];
        Ok(self.token(TokenKind::String(string.into()), start))
    }

    fn skip_comment(&mut self) {
        while self.iter.next_if(|(_, ch)| *ch != '\n').is_some() {}
    }

    fn column(&self, idx: usize) -> usize {
        self.input[self.line_start..idx].chars().count() + 1
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Result<Token, LexError>> {
        loop {
            let (idx, ch) = self.iter.next()?;

            let tok = match ch {
                ' ' | '\t' | '\r' => continue,
                '\n' => {
                    self.line += 1;
                    self.line_start = idx + 1;
                    continue;
                }
                '#' => {
                    self.skip_comment();
                    continue;
                }
                '=' => {
                    if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                        self.token(TokenKind::Equal, idx)
                    } else {
                        self.token(TokenKind::Assign, idx)
                    }
                }
                '<' => {
                    if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                        self.token(TokenKind::LessEqual, idx)
                    } else {
                        self.token(TokenKind::LessThan, idx)
                    }
                }
                '>' => {
                    if self.iter.next_if(|(_, ch)| *ch == '=').is_some() {
                        self.token(TokenKind::GreaterEqual, idx)
                    } else {
                        self.token(TokenKind::GreaterThan, idx)
                    }
                }
                '-' => {
                    if self.iter.next_if(|(_, ch)| *ch == '>').is_some() {
                        self.token(TokenKind::Arrow, idx)
                    } else {
                        self.token(TokenKind::Minus, idx)
                    }
                }
                '+' => self.token(TokenKind::Plus, idx),
                '*' => self.token(TokenKind::Asterisk, idx),
                '/' => self.token(TokenKind::Slash, idx),
                '%' => self.token(TokenKind::Percent, idx),
                ',' => self.token(TokenKind::Comma, idx),
                ';' => self.token(TokenKind::SemiColon, idx),
                '(' => self.token(TokenKind::LParen, idx),
                ')' => self.token(TokenKind::RParen, idx),
                '"' => return Some(self.read_string(idx)),
                c if Tokenizer::is_letter(c) => self.read_identifier(idx),
                c if c.is_ascii_digit() => return Some(self.read_number(idx)),
                _ => {
                    return Some(Err(LexError::UnexpectedCharacter {
                        ch,
                        line: self.line,
                        column: self.column(idx),
                    }))
                }
            };
            return Some(Ok(tok));
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;
        match self {
            Ident(name) => write!(f, "{}", name),
            Int(value) => write!(f, "{}", value),
            String(value) => write!(f, "{}", value),
            Assign => write!(f, "="),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Asterisk => write!(f, "*"),
            Slash => write!(f, "/"),
            Percent => write!(f, "%"),
            Equal => write!(f, "=="),
            LessThan => write!(f, "<"),
            GreaterThan => write!(f, ">"),
            LessEqual => write!(f, "<="),
            GreaterEqual => write!(f, ">="),
            Comma => write!(f, ","),
            SemiColon => write!(f, ";"),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Arrow => write!(f, "->"),
            If => write!(f, "if"),
            Do => write!(f, "do"),
            Else => write!(f, "else"),
            For => write!(f, "for"),
            Func => write!(f, "func"),
            To => write!(f, "to"),
            Display => write!(f, "display"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_single_characters() {
        let input = "=+-/*(),;%";
        let output = tokenize(input).unwrap();

        assert_eq!(
            output,
            vec![
                Token {
                    kind: TokenKind::Assign,
                    line: 1,
                    column: 1,
                    start: 0,
                    end: 1
                },
                Token {
                    kind: TokenKind::Plus,
                    line: 1,
                    column: 2,
                    start: 1,
                    end: 2
                },
                Token {
                    kind: TokenKind::Minus,
                    line: 1,
                    column: 3,
                    start: 2,
                    end: 3
                },
                Token {
                    kind: TokenKind::Slash,
                    line: 1,
                    column: 4,
                    start: 3,
                    end: 4
                },
                Token {
                    kind: TokenKind::Asterisk,
                    line: 1,
                    column: 5,
                    start: 4,
                    end: 5
                },
                Token {
                    kind: TokenKind::LParen,
                    line: 1,
                    column: 6,
                    start: 5,
                    end: 6
                },
                Token {
                    kind: TokenKind::RParen,
                    line: 1,
                    column: 7,
                    start: 6,
                    end: 7
                },
                Token {
                    kind: TokenKind::Comma,
                    line: 1,
                    column: 8,
                    start: 7,
                    end: 8
                },
                Token {
                    kind: TokenKind::SemiColon,
                    line: 1,
                    column: 9,
                    start: 8,
                    end: 9
                },
                Token {
                    kind: TokenKind::Percent,
                    line: 1,
                    column: 10,
                    start: 9,
                    end: 10
                },
            ]
        );
    }

    #[test]
    fn test_multi_character_operators() {
        assert_eq!(
            kinds("== <= >= < > -> = -"),
            vec![
                TokenKind::Equal,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::LessThan,
                TokenKind::GreaterThan,
                TokenKind::Arrow,
                TokenKind::Assign,
                TokenKind::Minus,
            ]
        );
        assert_eq!(
            kinds("a<=b"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::LessEqual,
                TokenKind::Ident("b".into()),
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("for i = 0 to 3 do i"),
            vec![
                TokenKind::For,
                TokenKind::Ident("i".into()),
                TokenKind::Assign,
                TokenKind::Int(0),
                TokenKind::To,
                TokenKind::Int(3),
                TokenKind::Do,
                TokenKind::Ident("i".into()),
            ]
        );
        assert_eq!(
            kinds("func f() -> display(x)"),
            vec![
                TokenKind::Func,
                TokenKind::Ident("f".into()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Arrow,
                TokenKind::Display,
                TokenKind::LParen,
                TokenKind::Ident("x".into()),
                TokenKind::RParen,
            ]
        );
        assert_eq!(kinds("if else"), vec![TokenKind::If, TokenKind::Else]);
    }

    #[test]
    fn test_keyword_prefixed_identifiers() {
        assert_eq!(
            kinds("iffy done total for_2 displayed _x9"),
            vec![
                TokenKind::Ident("iffy".into()),
                TokenKind::Ident("done".into()),
                TokenKind::Ident("total".into()),
                TokenKind::Ident("for_2".into()),
                TokenKind::Ident("displayed".into()),
                TokenKind::Ident("_x9".into()),
            ]
        );
    }

    #[test]
    fn test_strings_keep_quotes() {
        assert_eq!(
            kinds(r#"s = "hi there""#),
            vec![
                TokenKind::Ident("s".into()),
                TokenKind::Assign,
                TokenKind::String("\"hi there\"".into()),
            ]
        );
        assert_eq!(
            kinds(r#""a" "b""#),
            vec![
                TokenKind::String("\"a\"".into()),
                TokenKind::String("\"b\"".into()),
            ]
        );
        assert_eq!(kinds(r##""# not a comment""##).len(), 1);
    }

    #[test]
    fn test_comments_and_whitespace() {
        assert_eq!(kinds("# comment text"), vec![]);
        assert_eq!(kinds("   \t  "), vec![]);
        assert_eq!(
            kinds("x = 1 # trailing"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::Int(1),
            ]
        );
    }

    #[test]
    fn test_newlines_advance_line() {
        let tokens = tokenize("a\n\nb").unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 3);

        let tokens = Tokenizer::starting_at("x", 7)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(tokens[0].line, 7);
    }

    #[test]
    fn test_columns_count_characters_within_the_line() {
        let tokens = tokenize("ab\n  cd \"é\" e").unwrap();
        let positions: Vec<_> = tokens
            .iter()
            .map(|token| (token.line, token.column))
            .collect();

        assert_eq!(positions, vec![(1, 1), (2, 3), (2, 6), (2, 10)]);
        assert_eq!(
            tokenize("\"é\" $"),
            Err(LexError::UnexpectedCharacter {
                ch: '$',
                line: 1,
                column: 5
            })
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            tokenize("x = 1 $ 2"),
            Err(LexError::UnexpectedCharacter {
                ch: '$',
                line: 1,
                column: 7
            })
        );
        assert_eq!(
            tokenize("s = \"open"),
            Err(LexError::UnterminatedString { line: 1, column: 5 })
        );
        assert_eq!(
            tokenize("99999999999999999999"),
            Err(LexError::IntegerOutOfRange {
                literal: "99999999999999999999".into(),
                line: 1
            })
        );
        assert!(tokenize("a != b").is_err());
    }
}

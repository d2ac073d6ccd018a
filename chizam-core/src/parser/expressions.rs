use super::error::{Expected, ParseError};
use crate::ast::{ComparisonKind, Expression, Identifier, InfixOperationKind};
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;

#[derive(PartialOrd, PartialEq, Debug)]
pub enum Precedence {
    Lowest = 0,
    Equals,
    Sum,
    Product,
    Prefix,
}

pub fn precedence_of(token: &TokenKind) -> Precedence {
    match token {
        TokenKind::Equal => Precedence::Equals,
        TokenKind::Plus => Precedence::Sum,
        TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk => Precedence::Product,
        TokenKind::Slash => Precedence::Product,
        TokenKind::Percent => Precedence::Product,
        _ => Precedence::Lowest,
    }
}

pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    parser.enter()?;
    let Some(token) = parser.iter.next() else {
        return Err(ParseError::premature_end_expected_expression());
    };
    let left_expression = prefix_parsing(token, parser)?;
    let expression = continue_expression(parser, precedence, left_expression)?;
    parser.leave(1);
    Ok(expression)
}

/// Extends an already parsed operand with any infix operations that bind
/// tighter than `precedence`.
pub fn continue_expression(
    parser: &mut Parser,
    precedence: Precedence,
    mut left_expression: Expression,
) -> Result<Expression, ParseError> {
    // Every fold makes the left-hand tree one level deeper
    let mut folds = 0;
    loop {
        let Some(next_token) = parser.iter.peek() else {
            break;
        };

        let next_precedence = precedence_of(&next_token.kind);
        if precedence >= next_precedence {
            break;
        }

        let Some(next_token) = parser.iter.next() else {
            break;
        };
        let Some(infix_parse_function) = infix_parsing_function(next_token.kind) else {
            break;
        };
        parser.enter()?;
        folds += 1;
        left_expression = infix_parse_function(left_expression, parser)?;
    }

    parser.leave(folds);
    Ok(left_expression)
}

/// `expr (== | < | > | <= | >=) expr`. An equality already folded into the
/// left-hand expression counts as the comparison.
pub fn parse_condition(parser: &mut Parser) -> Result<Expression, ParseError> {
    let left = parse_expression(parser, Precedence::Lowest)?;

    let kind = match parser.peek_kind() {
        Some(TokenKind::LessThan) => ComparisonKind::LessThan,
        Some(TokenKind::GreaterThan) => ComparisonKind::GreaterThan,
        Some(TokenKind::LessEqual) => ComparisonKind::LessEqual,
        Some(TokenKind::GreaterEqual) => ComparisonKind::GreaterEqual,
        _ => {
            return match left {
                Expression::Comparison(..) => Ok(left),
                _ => Err(ParseError::MissingComparison(left)),
            }
        }
    };
    parser.iter.next();

    let right = parse_expression(parser, Precedence::Lowest)?;
    Ok(Expression::Comparison(kind, Box::new(left), Box::new(right)))
}

fn parse_negation(parser: &mut Parser) -> Result<Expression, ParseError> {
    Ok(Expression::Negation(Box::new(parse_expression(
        parser,
        Precedence::Prefix,
    )?)))
}

fn prefix_parsing(token: Token, parser: &mut Parser) -> Result<Expression, ParseError> {
    match token.kind {
        TokenKind::Ident(name) => Ok(Expression::Identifier(Identifier { name })),
        TokenKind::Int(value) => Ok(Expression::IntegerLiteral(value)),
        TokenKind::Minus => parse_negation(parser),
        _ => Err(ParseError::UnexpectedToken {
            expected: Expected::Expression,
            got: token,
        }),
    }
}

type InfixFunction = Box<dyn FnOnce(Expression, &mut Parser) -> Result<Expression, ParseError>>;

fn infix_operation(token: TokenKind, kind: InfixOperationKind) -> InfixFunction {
    Box::new(
        move |left: Expression, parser: &mut Parser| -> Result<Expression, ParseError> {
            let new_precedence = precedence_of(&token);

            Ok(Expression::InfixOperation(
                kind,
                Box::new(left),
                Box::new(parse_expression(parser, new_precedence)?),
            ))
        },
    )
}

fn parse_equality(left: Expression, parser: &mut Parser) -> Result<Expression, ParseError> {
    Ok(Expression::Comparison(
        ComparisonKind::Equal,
        Box::new(left),
        Box::new(parse_expression(parser, Precedence::Equals)?),
    ))
}

fn infix_parsing_function(token: TokenKind) -> Option<InfixFunction> {
    use InfixOperationKind as InfixKind;

    match token {
        TokenKind::Plus => Some(infix_operation(TokenKind::Plus, InfixKind::Plus)),
        TokenKind::Minus => Some(infix_operation(TokenKind::Minus, InfixKind::Minus)),
        TokenKind::Asterisk => Some(infix_operation(TokenKind::Asterisk, InfixKind::Multiply)),
        TokenKind::Slash => Some(infix_operation(TokenKind::Slash, InfixKind::Divide)),
        TokenKind::Percent => Some(infix_operation(TokenKind::Percent, InfixKind::Modulo)),
        TokenKind::Equal => Some(Box::new(parse_equality)),
        _ => None,
    }
}

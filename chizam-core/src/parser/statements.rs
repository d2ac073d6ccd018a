use std::rc::Rc;

use crate::ast::{Assignment, Expression, Identifier, Statement};
use crate::lexer::{Token, TokenKind};
use crate::parser::expressions::{
    continue_expression, parse_condition, parse_expression, Precedence,
};
use crate::parser::{ParseError, Parser};

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.enter()?;
    let statement = match parser.peek_kind() {
        // The empty statement is only taken where a statement may end
        None | Some(TokenKind::RParen) | Some(TokenKind::Else) => Statement::Empty,
        Some(TokenKind::For) => parse_for_statement(parser)?,
        Some(TokenKind::If) => parse_if_statement(parser)?,
        Some(TokenKind::Func) => parse_function_definition(parser)?,
        Some(TokenKind::Display) => parse_display_statement(parser)?,
        Some(TokenKind::String(_)) => Statement::Expression(parse_string_literal(parser)?),
        Some(TokenKind::Ident(_)) => parse_identifier_statement(parser)?,
        _ => Statement::Expression(parse_expression(parser, Precedence::Lowest)?),
    };
    parser.leave(1);
    Ok(statement)
}

/// A statement starting with a name: an assignment, a call or a plain
/// expression.
fn parse_identifier_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let identifier = Identifier {
        name: parser.parse_ident()?,
    };

    match parser.peek_kind() {
        Some(TokenKind::Assign) => {
            parser.iter.next();
            let value = parse_assigned_value(parser)?;
            Ok(Statement::Assign(Assignment { identifier, value }))
        }
        Some(TokenKind::LParen) => {
            parser.iter.next();
            parser.expect_token(TokenKind::RParen)?;
            Ok(Statement::Call(identifier))
        }
        _ => Ok(Statement::Expression(continue_expression(
            parser,
            Precedence::Lowest,
            Expression::Identifier(identifier),
        )?)),
    }
}

fn parse_assignment(parser: &mut Parser) -> Result<Assignment, ParseError> {
    let name = parser.parse_ident()?;
    parser.expect_token(TokenKind::Assign)?;
    let value = parse_assigned_value(parser)?;

    Ok(Assignment {
        identifier: Identifier { name },
        value,
    })
}

fn parse_assigned_value(parser: &mut Parser) -> Result<Expression, ParseError> {
    match parser.peek_kind() {
        Some(TokenKind::String(_)) => parse_string_literal(parser),
        _ => parse_expression(parser, Precedence::Lowest),
    }
}

fn parse_string_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    match parser.iter.next() {
        Some(Token {
            kind: TokenKind::String(value),
            ..
        }) => Ok(Expression::StringLiteral(value)),
        next => Err(ParseError::unexpected_other(
            super::Expected::Expression,
            next,
        )),
    }
}

fn parse_for_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect_token(TokenKind::For)?;
    let initializer = parse_assignment(parser)?;
    parser.expect_token(TokenKind::To)?;
    let limit = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_token(TokenKind::Do)?;
    let body = parse_statement(parser)?;

    Ok(Statement::For {
        initializer,
        limit,
        body: Box::new(body),
    })
}

fn parse_if_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect_token(TokenKind::If)?;
    let condition = parse_condition(parser)?;
    parser.expect_token(TokenKind::Do)?;
    let consequence = parse_statement(parser)?;
    parser.expect_token(TokenKind::Else)?;
    let alternative = parse_statement(parser)?;

    Ok(Statement::If {
        condition,
        consequence: Box::new(consequence),
        alternative: Box::new(alternative),
    })
}

fn parse_function_definition(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect_token(TokenKind::Func)?;
    let name = parser.parse_ident()?;
    parser.expect_token(TokenKind::LParen)?;
    parser.expect_token(TokenKind::RParen)?;
    parser.expect_token(TokenKind::Arrow)?;
    let body = parse_statement(parser)?;

    Ok(Statement::FunctionDefinition {
        identifier: Identifier { name },
        body: Rc::new(body),
    })
}

fn parse_display_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.expect_token(TokenKind::Display)?;
    parser.expect_token(TokenKind::LParen)?;
    let inner = parse_statement(parser)?;
    parser.expect_token(TokenKind::RParen)?;

    Ok(Statement::Display(Box::new(inner)))
}

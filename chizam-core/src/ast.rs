use std::fmt::Display;
use std::rc::Rc;

/// One parsed line.
#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Empty,
    Expression(Expression),
    Assign(Assignment),
    If {
        condition: Expression,
        consequence: Box<Statement>,
        alternative: Box<Statement>,
    },
    For {
        initializer: Assignment,
        limit: Expression,
        body: Box<Statement>,
    },
    FunctionDefinition {
        identifier: Identifier,
        body: Rc<Statement>,
    },
    Call(Identifier),
    Display(Box<Statement>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    // Quotes included, exactly as written
    StringLiteral(Rc<str>),
    Negation(Box<Expression>),
    InfixOperation(InfixOperationKind, Box<Expression>, Box<Expression>),
    Comparison(ComparisonKind, Box<Expression>, Box<Expression>),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InfixOperationKind {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ComparisonKind {
    Equal,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Identifier {
    pub name: Rc<str>,
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.identifier.name, self.value)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(ident) => write!(f, "{}", ident.name),
            IntegerLiteral(val) => write!(f, "{}", val),
            StringLiteral(val) => write!(f, "{}", val),
            Negation(expr) => write!(f, "(-{})", expr),
            InfixOperation(kind, left, right) => write!(f, "({} {} {})", left, kind, right),
            Comparison(kind, left, right) => write!(f, "({} {} {})", left, kind, right),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Empty => Ok(()),
            Statement::Expression(expression) => write!(f, "{}", expression),
            Statement::Assign(assignment) => write!(f, "{}", assignment),
            Statement::If {
                condition,
                consequence,
                alternative,
            } => write!(f, "if {} do {} else {}", condition, consequence, alternative),
            Statement::For {
                initializer,
                limit,
                body,
            } => write!(f, "for {} to {} do {}", initializer, limit, body),
            Statement::FunctionDefinition { identifier, body } => {
                write!(f, "func {}() -> {}", identifier.name, body)
            }
            Statement::Call(identifier) => write!(f, "{}()", identifier.name),
            Statement::Display(statement) => write!(f, "display({})", statement),
        }
    }
}

impl InfixOperationKind {
    pub fn to_str(self) -> &'static str {
        use InfixOperationKind::*;
        match self {
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
        }
    }
}

impl ComparisonKind {
    pub fn to_str(self) -> &'static str {
        use ComparisonKind::*;
        match self {
            Equal => "==",
            LessThan => "<",
            GreaterThan => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
        }
    }
}

impl Display for InfixOperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl Display for ComparisonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

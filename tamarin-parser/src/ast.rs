// tamarin-parser - AST for Tamarin
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Abstract syntax tree for Tamarin.
//!
//! The tree is a pair of closed sums (`Statement`, `Expression`);
//! consumers dispatch by matching on the variant. `Display` impls
//! reproduce a normalised source form, with infix and index expressions
//! fully parenthesised.

use std::fmt;

/// A parsed program: the root of every AST.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// A `{ ... }` block of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let { name: String, value: Expression },
    /// `return <value>;`
    Return(Expression),
    /// A bare expression in statement position.
    Expression(Expression),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

/// A prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// `-` arithmetic negation
    Minus,
    /// `!` logical not
    Bang,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Minus => f.write_str("-"),
            PrefixOp::Bang => f.write_str("!"),
        }
    }
}

/// An infix operator.
///
/// The parser accepts the full operator inventory of the lexer; which
/// operators a back end actually supports is the back end's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,
    And,
    Or,
    BitAnd,
    BitOr,
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InfixOp::Plus => "+",
            InfixOp::Minus => "-",
            InfixOp::Asterisk => "*",
            InfixOp::Slash => "/",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
            InfixOp::And => "&&",
            InfixOp::Or => "||",
            InfixOp::BitAnd => "&",
            InfixOp::BitOr => "|",
        };
        f.write_str(s)
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal, e.g. `5`
    Integer(i64),
    /// String literal, e.g. `"hello"`
    Str(String),
    /// Boolean literal
    Boolean(bool),
    /// Variable reference
    Identifier(String),
    /// Prefix operation, e.g. `-x` or `!ok`
    Prefix {
        operator: PrefixOp,
        right: Box<Expression>,
    },
    /// Infix operation, e.g. `a + b`
    Infix {
        left: Box<Expression>,
        operator: InfixOp,
        right: Box<Expression>,
    },
    /// `if (<condition>) { ... } else { ... }`; the alternative is optional
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    /// Function literal, e.g. `fn(x, y) { x + y; }`
    Function {
        parameters: Vec<String>,
        body: BlockStatement,
    },
    /// Call, e.g. `add(1, 2)`
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    /// Array literal, e.g. `[1, 2, 3]`
    Array(Vec<Expression>),
    /// Index operation, e.g. `arr[0]` or `hash["key"]`
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    /// Hash literal, e.g. `{"a": 1, true: 2}`; pairs keep source order
    Hash(Vec<(Expression, Expression)>),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::Str(value) => write!(f, "{}", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::Identifier(name) => f.write_str(name),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, "else {}", alt)?;
                }
                Ok(())
            }
            Expression::Function { parameters, body } => {
                write!(f, "fn({}) {}", parameters.join(", "), body)
            }
            Expression::Call {
                function,
                arguments,
            } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
            Expression::Array(elements) => {
                let elems: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elems.join(", "))
            }
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expression::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_display() {
        let program = Program {
            statements: vec![Statement::Let {
                name: "myVar".to_string(),
                value: Expression::Identifier("anotherVar".to_string()),
            }],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn test_infix_display_parenthesises() {
        let expr = Expression::Infix {
            left: Box::new(Expression::Integer(1)),
            operator: InfixOp::Plus,
            right: Box::new(Expression::Infix {
                left: Box::new(Expression::Integer(2)),
                operator: InfixOp::Asterisk,
                right: Box::new(Expression::Integer(3)),
            }),
        };
        assert_eq!(expr.to_string(), "(1 + (2 * 3))");
    }
}

// tamarin-core - AST-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST-walking evaluator for Tamarin.
//!
//! This is the reference semantics for the language: for every
//! construct the bytecode pipeline also supports, the VM must produce
//! the same observable result. `return` unwinds through the
//! [`Value::Return`] wrapper and is unwrapped at program and function
//! boundaries; errors unwind through `Result`.

use std::rc::Rc;

use im::{OrdMap, Vector};
use tamarin_parser::{BlockStatement, Expression, InfixOp, PrefixOp, Program, Statement};

use crate::builtins;
use crate::env::Env;
use crate::error::{Error, Result};
use crate::value::{Function, Value};

/// Evaluate a program in the given environment and return its final
/// value: the value of the last statement, or the unwrapped value of
/// the first `return` encountered at the top level.
pub fn eval(program: &Program, env: &Env) -> Result<Value> {
    let mut result = Value::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env)?;
        if let Value::Return(value) = result {
            return Ok(*value);
        }
    }
    Ok(result)
}

fn eval_statement(stmt: &Statement, env: &Env) -> Result<Value> {
    match stmt {
        Statement::Let { name, value } => {
            let value = eval_expression(value, env)?;
            env.define(name.as_str(), value);
            Ok(Value::Null)
        }
        Statement::Return(expr) => {
            let value = eval_expression(expr, env)?;
            Ok(Value::Return(Box::new(value)))
        }
        Statement::Expression(expr) => eval_expression(expr, env),
    }
}

/// Evaluate a block. A `Return` value stops the block but stays
/// wrapped, so it keeps unwinding through enclosing blocks until a
/// function or program boundary unwraps it.
fn eval_block(block: &BlockStatement, env: &Env) -> Result<Value> {
    let mut result = Value::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env)?;
        if matches!(result, Value::Return(_)) {
            return Ok(result);
        }
    }
    Ok(result)
}

fn eval_expression(expr: &Expression, env: &Env) -> Result<Value> {
    match expr {
        Expression::Integer(value) => Ok(Value::Int(*value)),
        Expression::Str(value) => Ok(Value::string(value.as_str())),
        Expression::Boolean(value) => Ok(Value::Bool(*value)),
        Expression::Identifier(name) => eval_identifier(name, env),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env)?;
            eval_prefix(*operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
        } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            eval_infix(*operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env)?;
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Ok(Value::Null)
            }
        }
        Expression::Function { parameters, body } => Ok(Value::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        }))),
        Expression::Call {
            function,
            arguments,
        } => {
            let function = eval_expression(function, env)?;
            let mut args = Vec::with_capacity(arguments.len());
            for arg in arguments {
                args.push(eval_expression(arg, env)?);
            }
            apply_function(&function, &args)
        }
        Expression::Array(elements) => {
            let mut values = Vector::new();
            for element in elements {
                values.push_back(eval_expression(element, env)?);
            }
            Ok(Value::Array(values))
        }
        Expression::Index { left, index } => {
            let left = eval_expression(left, env)?;
            let index = eval_expression(index, env)?;
            eval_index(left, index)
        }
        Expression::Hash(entries) => {
            let mut pairs = OrdMap::new();
            for (key_expr, value_expr) in entries {
                let key = eval_expression(key_expr, env)?;
                let hash_key = key
                    .hash_key()
                    .ok_or_else(|| Error::UnusableAsHashKey(key.type_name()))?;
                let value = eval_expression(value_expr, env)?;
                pairs.insert(hash_key, (key, value));
            }
            Ok(Value::Hash(pairs))
        }
    }
}

fn eval_identifier(name: &str, env: &Env) -> Result<Value> {
    if let Some(value) = env.lookup(name) {
        return Ok(value);
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Ok(Value::Builtin(builtin));
    }
    Err(Error::IdentifierNotFound(name.to_string()))
}

fn eval_prefix(operator: PrefixOp, right: Value) -> Result<Value> {
    match operator {
        PrefixOp::Bang => Ok(Value::Bool(!right.is_truthy())),
        PrefixOp::Minus => match right {
            Value::Int(value) => Ok(Value::Int(value.wrapping_neg())),
            other => Err(Error::UnknownPrefixOperator {
                operator,
                right: other.type_name(),
            }),
        },
    }
}

fn eval_infix(operator: InfixOp, left: Value, right: Value) -> Result<Value> {
    match (&left, &right) {
        (Value::Int(l), Value::Int(r)) => eval_integer_infix(operator, *l, *r),
        (Value::Bool(l), Value::Bool(r)) => match operator {
            InfixOp::Eq => Ok(Value::Bool(l == r)),
            InfixOp::NotEq => Ok(Value::Bool(l != r)),
            _ => Err(Error::UnknownInfixOperator {
                left: left.type_name(),
                operator,
                right: right.type_name(),
            }),
        },
        (Value::Str(l), Value::Str(r)) => match operator {
            InfixOp::Plus => Ok(Value::string(format!("{}{}", l, r))),
            InfixOp::Eq => Ok(Value::Bool(l == r)),
            InfixOp::NotEq => Ok(Value::Bool(l != r)),
            _ => Err(Error::UnknownInfixOperator {
                left: left.type_name(),
                operator,
                right: right.type_name(),
            }),
        },
        _ => Err(Error::TypeMismatch {
            left: left.type_name(),
            operator,
            right: right.type_name(),
        }),
    }
}

/// Integer arithmetic wraps on overflow (two's complement), matching
/// the virtual machine.
fn eval_integer_infix(operator: InfixOp, left: i64, right: i64) -> Result<Value> {
    match operator {
        InfixOp::Plus => Ok(Value::Int(left.wrapping_add(right))),
        InfixOp::Minus => Ok(Value::Int(left.wrapping_sub(right))),
        InfixOp::Asterisk => Ok(Value::Int(left.wrapping_mul(right))),
        InfixOp::Slash => {
            if right == 0 {
                Err(Error::DivisionByZero)
            } else {
                Ok(Value::Int(left.wrapping_div(right)))
            }
        }
        InfixOp::Lt => Ok(Value::Bool(left < right)),
        InfixOp::Gt => Ok(Value::Bool(left > right)),
        InfixOp::Eq => Ok(Value::Bool(left == right)),
        InfixOp::NotEq => Ok(Value::Bool(left != right)),
        InfixOp::And | InfixOp::Or | InfixOp::BitAnd | InfixOp::BitOr => {
            Err(Error::UnknownInfixOperator {
                left: "INTEGER",
                operator,
                right: "INTEGER",
            })
        }
    }
}

/// Call a function or builtin with already-evaluated arguments.
pub fn apply_function(function: &Value, args: &[Value]) -> Result<Value> {
    match function {
        Value::Function(function) => {
            if args.len() != function.parameters.len() {
                return Err(Error::WrongArgumentCount {
                    expect: function.parameters.len(),
                    found: args.len(),
                });
            }
            let scope = function.env.child();
            for (param, arg) in function.parameters.iter().zip(args) {
                scope.define(param.as_str(), arg.clone());
            }
            let result = eval_block(&function.body, &scope)?;
            Ok(unwrap_return(result))
        }
        Value::Builtin(builtin) => (builtin.func)(args),
        other => Err(Error::NotAFunction(other.type_name())),
    }
}

fn unwrap_return(value: Value) -> Value {
    match value {
        Value::Return(value) => *value,
        value => value,
    }
}

fn eval_index(left: Value, index: Value) -> Result<Value> {
    match (&left, &index) {
        (Value::Array(elements), Value::Int(i)) => {
            let value = usize::try_from(*i)
                .ok()
                .and_then(|i| elements.get(i).cloned());
            Ok(value.unwrap_or(Value::Null))
        }
        (Value::Hash(pairs), key) => {
            let hash_key = key
                .hash_key()
                .ok_or_else(|| Error::UnusableAsHashKey(key.type_name()))?;
            Ok(pairs
                .get(&hash_key)
                .map(|(_, value)| value.clone())
                .unwrap_or(Value::Null))
        }
        _ => Err(Error::IndexNotSupported(left.type_name())),
    }
}

// tamarin-vm - Bytecode compiler
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Bytecode compiler: lowers a Tamarin AST to a flat instruction
//! stream plus a constant pool.
//!
//! Emission is single-pass with back-patched forward jumps: an
//! if-expression first emits its jumps with placeholder operands, then
//! overwrites them once the branch targets are known. A two-descriptor
//! peephole history (`last`, `previous`) supports the one rewrite the
//! pipeline needs: removing the trailing `Pop` of an if-branch so the
//! branch leaves its value on the stack.

use std::fmt;

use tamarin_core::Value;
use tamarin_parser::{BlockStatement, Expression, InfixOp, PrefixOp, Program, Statement};

use crate::code::{self, Instructions, Opcode};
use crate::symbol_table::SymbolTable;

/// Error during compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Operator with no bytecode counterpart.
    UnknownOperator(String),
    /// Identifier that resolves to nothing.
    UndefinedVariable(String),
    /// Construct the bytecode pipeline cannot express yet.
    NotImplemented(&'static str),
    /// Constant pool overflow (indices are 16-bit).
    TooManyConstants,
    /// Global slot overflow (operands are 16-bit).
    TooManyGlobals,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnknownOperator(op) => write!(f, "unknown operator {}", op),
            CompileError::UndefinedVariable(name) => write!(f, "undefined variable: {}", name),
            CompileError::NotImplemented(what) => {
                write!(f, "compiling {} is not yet supported", what)
            }
            CompileError::TooManyConstants => write!(f, "too many constants"),
            CompileError::TooManyGlobals => write!(f, "too many globals"),
        }
    }
}

impl std::error::Error for CompileError {}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

/// The compiler's output: an instruction stream and the constants it
/// references. Handed to the VM by value.
#[derive(Debug, Clone)]
pub struct Bytecode {
    pub instructions: Instructions,
    pub constants: Vec<Value>,
}

/// Opcode and offset of an already-emitted instruction, kept for
/// peephole edits.
#[derive(Debug, Clone, Copy)]
struct EmittedInstruction {
    opcode: Opcode,
    position: usize,
}

/// AST → bytecode compiler.
///
/// A compiler may be reused across programs: each [`Compiler::compile`]
/// call starts a fresh instruction stream but keeps the symbol table
/// and the constant pool, which is what lets a REPL refer to names and
/// constants defined on earlier lines.
#[derive(Debug, Default)]
pub struct Compiler {
    instructions: Instructions,
    constants: Vec<Value>,
    symbol_table: SymbolTable,
    last_instruction: Option<EmittedInstruction>,
    previous_instruction: Option<EmittedInstruction>,
}

impl Compiler {
    /// Create a compiler with an empty symbol table and constant pool.
    pub fn new() -> Self {
        Compiler::default()
    }

    /// Compile a program into [`Bytecode`].
    pub fn compile(&mut self, program: &Program) -> Result<Bytecode> {
        self.instructions = Instructions::new();
        self.last_instruction = None;
        self.previous_instruction = None;

        for stmt in &program.statements {
            self.compile_statement(stmt)?;
        }

        Ok(Bytecode {
            instructions: self.instructions.clone(),
            constants: self.constants.clone(),
        })
    }

    fn compile_statement(&mut self, stmt: &Statement) -> Result<()> {
        match stmt {
            Statement::Expression(expr) => {
                self.compile_expression(expr)?;
                // statement-level expressions have no consumer
                self.emit(Opcode::Pop, &[]);
                Ok(())
            }
            Statement::Let { name, value } => {
                self.compile_expression(value)?;
                let symbol = self.symbol_table.define(name);
                if symbol.index > u16::MAX as usize {
                    return Err(CompileError::TooManyGlobals);
                }
                self.emit(Opcode::SetGlobal, &[symbol.index]);
                Ok(())
            }
            Statement::Return(_) => Err(CompileError::NotImplemented("return statements")),
        }
    }

    fn compile_block(&mut self, block: &BlockStatement) -> Result<()> {
        for stmt in &block.statements {
            self.compile_statement(stmt)?;
        }
        Ok(())
    }

    fn compile_expression(&mut self, expr: &Expression) -> Result<()> {
        match expr {
            Expression::Integer(value) => {
                let index = self.add_constant(Value::Int(*value))?;
                self.emit(Opcode::Const, &[index]);
                Ok(())
            }
            Expression::Str(value) => {
                let index = self.add_constant(Value::string(value.as_str()))?;
                self.emit(Opcode::Const, &[index]);
                Ok(())
            }
            Expression::Boolean(true) => {
                self.emit(Opcode::True, &[]);
                Ok(())
            }
            Expression::Boolean(false) => {
                self.emit(Opcode::False, &[]);
                Ok(())
            }
            Expression::Identifier(name) => match self.symbol_table.resolve(name) {
                Some(symbol) => {
                    let index = symbol.index;
                    self.emit(Opcode::GetGlobal, &[index]);
                    Ok(())
                }
                None => Err(CompileError::UndefinedVariable(name.clone())),
            },
            Expression::Prefix { operator, right } => {
                self.compile_expression(right)?;
                match operator {
                    PrefixOp::Minus => self.emit(Opcode::Minus, &[]),
                    PrefixOp::Bang => self.emit(Opcode::Bang, &[]),
                };
                Ok(())
            }
            Expression::Infix {
                left,
                operator,
                right,
            } => self.compile_infix(left, *operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => self.compile_if(condition, consequence, alternative.as_ref()),
            Expression::Function { .. } => Err(CompileError::NotImplemented("function literals")),
            Expression::Call { .. } => Err(CompileError::NotImplemented("call expressions")),
            Expression::Array(_) => Err(CompileError::NotImplemented("array literals")),
            Expression::Hash(_) => Err(CompileError::NotImplemented("hash literals")),
            Expression::Index { .. } => Err(CompileError::NotImplemented("index expressions")),
        }
    }

    fn compile_infix(
        &mut self,
        left: &Expression,
        operator: InfixOp,
        right: &Expression,
    ) -> Result<()> {
        // `a > b` becomes `b < a`: swap the operand order and emit Less
        if operator == InfixOp::Gt {
            self.compile_expression(right)?;
            self.compile_expression(left)?;
            self.emit(Opcode::Less, &[]);
            return Ok(());
        }

        self.compile_expression(left)?;
        self.compile_expression(right)?;
        let opcode = match operator {
            InfixOp::Plus => Opcode::Add,
            InfixOp::Minus => Opcode::Sub,
            InfixOp::Asterisk => Opcode::Mul,
            InfixOp::Slash => Opcode::Div,
            InfixOp::Lt => Opcode::Less,
            InfixOp::Eq => Opcode::Eq,
            InfixOp::NotEq => Opcode::NotEq,
            InfixOp::Gt
            | InfixOp::And
            | InfixOp::Or
            | InfixOp::BitAnd
            | InfixOp::BitOr => {
                return Err(CompileError::UnknownOperator(operator.to_string()));
            }
        };
        self.emit(opcode, &[]);
        Ok(())
    }

    fn compile_if(
        &mut self,
        condition: &Expression,
        consequence: &BlockStatement,
        alternative: Option<&BlockStatement>,
    ) -> Result<()> {
        self.compile_expression(condition)?;

        // placeholder operand, patched once the else target is known
        let jump_not_truthy = self.emit(Opcode::JumpNotTruthy, &[9999]);

        self.compile_block(consequence)?;
        if self.last_instruction_is(Opcode::Pop) {
            self.remove_last_pop();
        }

        let jump = self.emit(Opcode::Jump, &[9999]);

        let after_consequence = self.instructions.len();
        self.change_operand(jump_not_truthy, after_consequence);

        match alternative {
            None => {
                self.emit(Opcode::Null, &[]);
            }
            Some(alternative) => {
                self.compile_block(alternative)?;
                if self.last_instruction_is(Opcode::Pop) {
                    self.remove_last_pop();
                }
            }
        }

        let after_alternative = self.instructions.len();
        self.change_operand(jump, after_alternative);
        Ok(())
    }

    // =========================================================================
    // Emission
    // =========================================================================

    /// Encode and append an instruction, returning its offset.
    fn emit(&mut self, op: Opcode, operands: &[usize]) -> usize {
        let ins = code::make(op, operands);
        let position = self.instructions.append(&ins);
        self.previous_instruction = self.last_instruction;
        self.last_instruction = Some(EmittedInstruction {
            opcode: op,
            position,
        });
        position
    }

    /// Append a value to the constant pool, returning its index.
    fn add_constant(&mut self, value: Value) -> Result<usize> {
        if self.constants.len() > u16::MAX as usize {
            return Err(CompileError::TooManyConstants);
        }
        self.constants.push(value);
        Ok(self.constants.len() - 1)
    }

    fn last_instruction_is(&self, op: Opcode) -> bool {
        self.last_instruction
            .is_some_and(|emitted| emitted.opcode == op)
    }

    /// Truncate the stream at the last emitted instruction and restore
    /// the previous descriptor. Only ever called right after compiling
    /// an if-branch whose trailing instruction is `Pop`.
    fn remove_last_pop(&mut self) {
        if let Some(last) = self.last_instruction {
            self.instructions.truncate(last.position);
            self.last_instruction = self.previous_instruction;
            self.previous_instruction = None;
        }
    }

    /// Re-encode the instruction at `pos` with a new operand.
    /// Placeholder operands are always overwritten this way before the
    /// VM ever sees the stream.
    fn change_operand(&mut self, pos: usize, operand: usize) {
        let op = Opcode::from_byte(self.instructions[pos])
            .expect("patch position points at an emitted opcode");
        let ins = code::make(op, &[operand]);
        self.instructions.replace_at(pos, &ins);
    }
}

//! This AST describes a parsed Hack assembly file.
//!
//! Execution begins with the first instruction in the file.
//! Comments are prefixed with `//` and are single-line only.
//! Instructions are delimited by newlines.
//!
//! Supported Instructions:
//!
//! ```nasm
//! @value         // A <= value, a 15-bit constant
//! @symbol        // A <= address of a label, predefined symbol or variable
//! dest=comp;jump // dest <= comp, then jump if comp satisfies the condition.
//!                // dest and jump are optional, comp is not.
//! (LABEL)        // binds LABEL to the address of the next instruction
//! ```
//!
//! Example source file:
//!
//! ```nasm
//! @2
//! D=A     // D = 2
//! @3
//! D=D+A   // D = 5
//! @0
//! M=D     // RAM[0] = 5
//! ```
use std::fmt;

/// The operand of an address instruction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Symbol {
    /// A decimal literal. Range is checked when the instruction is encoded.
    Constant(i64),
    /// A label, predefined symbol or variable, resolved during translation.
    Reference(String),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Constant(value) => write!(f, "{}", value),
            Symbol::Reference(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    Address(Symbol),
    Compute {
        comp: String,
        dest: Option<String>,
        jump: Option<String>,
    },
    Label(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::Address(symbol) => write!(f, "@{}", symbol),
            Instruction::Compute { comp, dest, jump } => {
                if let Some(dest) = dest {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
            Instruction::Label(name) => write!(f, "({})", name),
        }
    }
}

/// A parsed instruction and the 1-based line it came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Statement {
    pub line: usize,
    pub instruction: Instruction,
}

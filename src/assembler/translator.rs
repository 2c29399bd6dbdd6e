//! The Translator resolves symbols and assembles statements into
//! 16-bit Hack machine words.
//!
//! Translation runs in two passes over the same statement list:
//! labels are bound to addresses first, then every address and compute
//! instruction is encoded in source order, allocating variables as
//! they are first referenced.
use super::ast::*;
use super::error::{Error, Field};
use super::symbols::{SymbolTable, MAX_ADDRESS};

pub struct Translator {
    symbols: SymbolTable,
}

impl Translator {
    /// Creates a translator with a fresh symbol table.
    pub fn new() -> Self {
        Translator { symbols: SymbolTable::new() }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Runs both passes and renders each word as a 16-character binary string.
    pub fn translate(&mut self, statements: &[Statement]) -> Result<Vec<String>, Error> {
        let program = self.resolve_labels(statements)?;
        let words = self.encode(&program)?;
        Ok(render(&words))
    }

    /// First pass: binds every label to the address of the instruction after it.
    /// Returns the address and compute instructions in emission order.
    pub fn resolve_labels<'a>(&mut self, statements: &'a [Statement]) -> Result<Vec<&'a Statement>, Error> {
        let mut program = Vec::with_capacity(statements.len());
        for stmt in statements {
            match &stmt.instruction {
                Instruction::Label(name) => {
                    let pc = program.len();
                    let addr = address(pc as i64, &pc.to_string()).map_err(|e| e.at_line(stmt.line))?;
                    self.symbols.define(name, addr).map_err(|e| e.at_line(stmt.line))?;
                    debug!("label `{}` => 0x{:04X}", name, addr);
                }
                _ => program.push(stmt),
            }
        }
        Ok(program)
    }

    /// Second pass: assembles instructions into machine words.
    pub fn encode(&mut self, program: &[&Statement]) -> Result<Vec<u16>, Error> {
        let mut words = Vec::with_capacity(program.len());
        for stmt in program {
            if let Some(word) = self.assemble(&stmt.instruction).map_err(|e| e.at_line(stmt.line))? {
                words.push(word);
            }
        }
        Ok(words)
    }

    /// Assembles one instruction to its binary machine word.
    /// Labels assemble to nothing.
    fn assemble(&mut self, instruction: &Instruction) -> Result<Option<u16>, Error> {
        let word = match instruction {
            Instruction::Address(Symbol::Constant(value)) => address(*value, &value.to_string())?,
            Instruction::Address(Symbol::Reference(name)) => match self.symbols.lookup(name) {
                Some(addr) => addr,
                None => {
                    let addr = self.symbols.allocate_variable(name)?;
                    debug!("variable `{}` => 0x{:04X}", name, addr);
                    addr
                }
            },
            Instruction::Compute { comp, dest, jump } => {
                0b111 << 13
                    | comp_code(comp)? << 6
                    | dest_code(dest.as_deref())? << 3
                    | jump_code(jump.as_deref())?
            }
            Instruction::Label(_) => return Ok(None),
        };
        Ok(Some(word))
    }
}

/// Renders machine words as 16-character binary strings.
pub fn render(words: &[u16]) -> Vec<String> {
    words.iter().map(|w| format!("{:016b}", w)).collect()
}

/// Checks that a value fits the 15-bit address field. The leading bit of
/// an address instruction stays zero.
fn address(value: i64, text: &str) -> Result<u16, Error> {
    if value < 0 || value > MAX_ADDRESS as i64 {
        return Err(Error::ValueOutOfRange(text.to_owned()));
    }
    Ok(value as u16)
}

/// The `a` bit followed by the six ALU control bits.
fn comp_code(comp: &str) -> Result<u16, Error> {
    match comp {
        "0"   => Ok(0b0101010),
        "1"   => Ok(0b0111111),
        "-1"  => Ok(0b0111010),
        "D"   => Ok(0b0001100),
        "A"   => Ok(0b0110000),
        "!D"  => Ok(0b0001101),
        "!A"  => Ok(0b0110001),
        "-D"  => Ok(0b0001111),
        "-A"  => Ok(0b0110011),
        "D+1" => Ok(0b0011111),
        "A+1" => Ok(0b0110111),
        "D-1" => Ok(0b0001110),
        "A-1" => Ok(0b0110010),
        "D+A" => Ok(0b0000010),
        "D-A" => Ok(0b0010011),
        "A-D" => Ok(0b0000111),
        "D&A" => Ok(0b0000000),
        "D|A" => Ok(0b0010101),
        "M"   => Ok(0b1110000),
        "!M"  => Ok(0b1110001),
        "-M"  => Ok(0b1110011),
        "M+1" => Ok(0b1110111),
        "M-1" => Ok(0b1110010),
        "D+M" => Ok(0b1000010),
        "D-M" => Ok(0b1010011),
        "M-D" => Ok(0b1000111),
        "D&M" => Ok(0b1000000),
        "D|M" => Ok(0b1010101),
        _ => Err(Error::UnknownMnemonic(Field::Comp, comp.to_owned())),
    }
}

fn dest_code(dest: Option<&str>) -> Result<u16, Error> {
    match dest {
        None               => Ok(0b000),
        Some("M")          => Ok(0b001),
        Some("D")          => Ok(0b010),
        Some("DM" | "MD")  => Ok(0b011),
        Some("A")          => Ok(0b100),
        Some("AM")         => Ok(0b101),
        Some("AD")         => Ok(0b110),
        Some("ADM" | "AMD") => Ok(0b111),
        Some(other) => Err(Error::UnknownMnemonic(Field::Dest, other.to_owned())),
    }
}

fn jump_code(jump: Option<&str>) -> Result<u16, Error> {
    match jump {
        None        => Ok(0b000),
        Some("JGT") => Ok(0b001),
        Some("JEQ") => Ok(0b010),
        Some("JGE") => Ok(0b011),
        Some("JLT") => Ok(0b100),
        Some("JNE") => Ok(0b101),
        Some("JLE") => Ok(0b110),
        Some("JMP") => Ok(0b111),
        Some(other) => Err(Error::UnknownMnemonic(Field::Jump, other.to_owned())),
    }
}

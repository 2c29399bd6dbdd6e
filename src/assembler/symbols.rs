//! The symbol table maps labels, predefined names and variables to addresses.
use std::collections::HashMap;

use super::error::Error;

/// Variables are allocated upwards from here.
pub const VARIABLE_BASE: u16 = 16;
/// Largest value the 15-bit address field can hold.
pub const MAX_ADDRESS: u16 = 0x7FFF;

const PREDEFINED: [(&str, u16); 7] = [
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("SCREEN", 16384),
    ("KBD", 24576),
];

pub struct SymbolTable {
    symbols: HashMap<String, u16>,
    next_variable: u16,
}

impl SymbolTable {
    /// Creates a table holding only the predefined symbols.
    pub fn new() -> Self {
        let mut symbols = HashMap::with_capacity(64);
        for i in 0..=15u16 {
            symbols.insert(format!("R{}", i), i);
        }
        for (name, addr) in PREDEFINED.iter() {
            symbols.insert((*name).to_owned(), *addr);
        }
        SymbolTable { symbols, next_variable: VARIABLE_BASE }
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Binds a label to an address.
    pub fn define(&mut self, name: &str, addr: u16) -> Result<(), Error> {
        if self.contains(name) {
            return Err(Error::DuplicateSymbol(name.to_owned()));
        }
        self.symbols.insert(name.to_owned(), addr);
        Ok(())
    }

    /// Assigns the next free variable slot to `name`.
    /// Callers check `lookup` first, so a duplicate here is a driver bug.
    pub fn allocate_variable(&mut self, name: &str) -> Result<u16, Error> {
        if self.contains(name) {
            return Err(Error::DuplicateSymbol(name.to_owned()));
        }
        if self.next_variable > MAX_ADDRESS {
            return Err(Error::ValueOutOfRange(self.next_variable.to_string()));
        }
        let addr = self.next_variable;
        self.next_variable += 1;
        self.symbols.insert(name.to_owned(), addr);
        Ok(addr)
    }

    /// All entries ordered by address, then name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        let mut entries: Vec<(&str, u16)> =
            self.symbols.iter().map(|(name, addr)| (name.as_str(), *addr)).collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        entries.into_iter()
    }
}

//! Errors raised while assembling.
//!
//! Parse and translation errors are wrapped in `Error::AtLine` so the
//! caller can point at the offending source line.
use std::fmt;
use std::io;

/// The field of a compute instruction a mnemonic was looked up in.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Field {
    Dest,
    Comp,
    Jump,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::Dest => write!(f, "dest"),
            Field::Comp => write!(f, "comp"),
            Field::Jump => write!(f, "jump"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// More than one `=` or `;` in a compute instruction.
    TooManyOperators(char),
    /// A label or variable collides with an existing symbol.
    DuplicateSymbol(String),
    UnknownMnemonic(Field, String),
    /// A value that does not fit in the 15-bit address field.
    ValueOutOfRange(String),
    EmptySymbol,
    Read(io::Error),
    AtLine(usize, Box<Error>),
}

impl Error {
    /// Attaches a 1-based source line number to the error.
    /// An error that already carries a line keeps it.
    pub fn at_line(self, line: usize) -> Self {
        if let Error::AtLine(..) = self {
            return self;
        }
        Error::AtLine(line, Box::new(self))
    }

    /// The source line the error was raised on, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::AtLine(line, _) => Some(*line),
            _ => None,
        }
    }

    /// The underlying error with any line annotation stripped.
    pub fn root(&self) -> &Error {
        match self {
            Error::AtLine(_, inner) => inner.root(),
            e => e,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TooManyOperators(op) => {
                write!(f, "compute instruction may contain at most one `{}`", op)
            }
            Error::DuplicateSymbol(name) => write!(f, "symbol `{}` is already in use", name),
            Error::UnknownMnemonic(field, mnemonic) => {
                write!(f, "unknown {} mnemonic `{}`", field, mnemonic)
            }
            Error::ValueOutOfRange(value) => {
                write!(f, "value `{}` does not fit in 15 bits (0-32767)", value)
            }
            Error::EmptySymbol => write!(f, "missing symbol"),
            Error::Read(e) => write!(f, "unable to read source: {}", e),
            Error::AtLine(line, e) => write!(f, "line {}: {}", line, e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(e) => Some(e),
            Error::AtLine(_, e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Read(e)
    }
}

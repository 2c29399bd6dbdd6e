//! The Assembler module is in charge of taking a
//! Hack assembly file and producing one 16-bit binary
//! word per address or compute instruction.
//!
//! It does this by implementing a line preprocessor,
//! a single-line instruction parser and a two-pass
//! translator backed by a symbol table.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod translator;

use std::io::Read;

use error::Error;

/// Assembles a whole source file into binary lines.
pub fn assemble<T: Read + ?Sized>(reader: Box<T>) -> Result<Vec<String>, Error> {
    let statements = parser::Parser::new(lexer::tokenize(reader)?).run()?;
    translator::Translator::new().translate(&statements)
}

/// Assembles in-memory source lines into binary lines.
pub fn assemble_lines<I, S>(lines: I) -> Result<Vec<String>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let statements = parser::Parser::new(lexer::tokenize_lines(lines)).run()?;
    translator::Translator::new().translate(&statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    static SUM_CODE: &str = r##"// Adds 1+...+100.
    @i     // i refers to some mem. location.
    M=1    // i=1
    @sum   // sum refers to some mem. location.
    M=0    // sum=0
(LOOP)
    @i
    D=M    // D=i
    @100
    D=D-A  // D=i-100
    @END
    D;JGT  // If (i-100)>0 goto END
    @i
    D=M    // D=i
    @sum
    M=D+M  // sum=sum+i
    @i
    M=M+1  // i=i+1
    @LOOP
    0;JMP  // Goto LOOP
(END)
    @END
    0;JMP  // Infinite loop
"##;

    #[test]
    fn test_assemble_sum() {
        let out = assemble(Box::new(SUM_CODE.as_bytes())).unwrap();
        assert_eq!(
            out,
            vec![
                "0000000000010000", // @i
                "1110111111001000", // M=1
                "0000000000010001", // @sum
                "1110101010001000", // M=0
                "0000000000010000", // @i
                "1111110000010000", // D=M
                "0000000001100100", // @100
                "1110010011010000", // D=D-A
                "0000000000010010", // @END
                "1110001100000001", // D;JGT
                "0000000000010000", // @i
                "1111110000010000", // D=M
                "0000000000010001", // @sum
                "1111000010001000", // M=D+M
                "0000000000010000", // @i
                "1111110111001000", // M=M+1
                "0000000000000100", // @LOOP
                "1110101010000111", // 0;JMP
                "0000000000010010", // @END
                "1110101010000111", // 0;JMP
            ]
        );
    }

    #[test]
    fn test_assemble_lines_matches_reader() {
        let lines: Vec<&str> = SUM_CODE.lines().collect();
        assert_eq!(
            assemble_lines(lines).unwrap(),
            assemble(Box::new(SUM_CODE.as_bytes())).unwrap()
        );
    }

    #[test]
    fn test_assemble_add() {
        let src = "@2\nD=A\n@3\nD=D+A\n@0\nM=D\n";
        assert_eq!(
            assemble(Box::new(src.as_bytes())).unwrap(),
            vec![
                "0000000000000010",
                "1110110000010000",
                "0000000000000011",
                "1110000010010000",
                "0000000000000000",
                "1110001100001000",
            ]
        );
    }

    #[test]
    fn test_assemble_blank_source() {
        assert!(assemble_lines(vec!["", "  // nothing", "\t"]).unwrap().is_empty());
    }

    #[test]
    fn test_assemble_parse_error_line() {
        let src = "// header\n@1\n\n  D ; JGT ; JMP // two jumps\nD=A\n";
        let err = assemble(Box::new(src.as_bytes())).unwrap_err();
        assert_eq!(err.line(), Some(4));
        assert!(matches!(err.root(), Error::TooManyOperators(';')));
    }

    #[test]
    fn test_assemble_duplicate_label() {
        let err = assemble_lines(vec!["(LOOP)", "@LOOP", "(LOOP)", "0;JMP"]).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(matches!(err.root(), Error::DuplicateSymbol(_)));
    }

    #[test]
    fn test_assemble_is_repeatable() {
        let first = assemble(Box::new(SUM_CODE.as_bytes())).unwrap();
        let second = assemble(Box::new(SUM_CODE.as_bytes())).unwrap();
        assert_eq!(first, second);
    }
}

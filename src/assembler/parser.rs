//! The Parser module takes a token stream (VecDeque<Token>) from the lexer
//! and converts it into a list of statements.
use std::collections::VecDeque;

use super::ast::*;
use super::error::Error;
use super::lexer::Token;

pub struct Parser {
    tokens: VecDeque<Token>,
    ast: Vec<Statement>,
}

impl Parser {
    pub fn new(tokens: VecDeque<Token>) -> Self {
        let capacity = tokens.len();
        Parser { tokens, ast: Vec::with_capacity(capacity) }
    }

    /// Run the parser, consuming itself and returning a list of statements.
    /// Stops at the first malformed instruction.
    pub fn run(mut self) -> Result<Vec<Statement>, Error> {
        while let Some(stmt) = self.statement()? {
            self.ast.push(stmt);
        }
        debug!("parsed {} statement(s)", self.ast.len());
        Ok(self.ast)
    }

    fn statement(&mut self) -> Result<Option<Statement>, Error> {
        match self.consume() {
            Some(Token { text, line }) => match parse(&text) {
                Ok(instruction) => Ok(Some(Statement { line, instruction })),
                Err(e) => Err(e.at_line(line)),
            },
            // No tokens left to parse means we're out of instructions.
            None => Ok(None),
        }
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}

/// Parses one canonical (comment and whitespace free) instruction.
pub fn parse(token: &str) -> Result<Instruction, Error> {
    if let Some(rest) = token.strip_prefix('@') {
        return Ok(Instruction::Address(symbol(rest)?));
    }
    if token.len() >= 2 && token.starts_with('(') && token.ends_with(')') {
        let name = &token[1..token.len() - 1];
        if name.is_empty() {
            return Err(Error::EmptySymbol);
        }
        return Ok(Instruction::Label(name.to_owned()));
    }
    compute(token)
}

fn symbol(text: &str) -> Result<Symbol, Error> {
    if text.is_empty() {
        return Err(Error::EmptySymbol);
    }
    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.bytes().all(|c| c.is_ascii_digit()) {
        return text
            .parse::<i64>()
            .map(Symbol::Constant)
            .map_err(|_| Error::ValueOutOfRange(text.to_owned()));
    }
    Ok(Symbol::Reference(text.to_owned()))
}

fn compute(token: &str) -> Result<Instruction, Error> {
    if token.matches(';').count() > 1 {
        return Err(Error::TooManyOperators(';'));
    }
    if token.matches('=').count() > 1 {
        return Err(Error::TooManyOperators('='));
    }

    let (rest, jump) = match token.split_once(';') {
        Some((rest, jump)) => (rest, Some(jump.to_owned())),
        None => (token, None),
    };
    let (dest, comp) = match rest.split_once('=') {
        Some((dest, comp)) => (Some(dest.to_owned()), comp),
        None => (None, rest),
    };

    Ok(Instruction::Compute { comp: comp.to_owned(), dest, jump })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(comp: &str, dest: Option<&str>, jump: Option<&str>) -> Instruction {
        Instruction::Compute {
            comp: comp.to_owned(),
            dest: dest.map(str::to_owned),
            jump: jump.map(str::to_owned),
        }
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse("@i").ok(), Some(Instruction::Address(Symbol::Reference("i".to_owned()))));
        assert_eq!(parse("@3").ok(), Some(Instruction::Address(Symbol::Constant(3))));
        assert_eq!(parse("@0").ok(), Some(Instruction::Address(Symbol::Constant(0))));
        assert_eq!(parse("@-1").ok(), Some(Instruction::Address(Symbol::Constant(-1))));
        assert_eq!(
            parse("@sys.init$ret.0").ok(),
            Some(Instruction::Address(Symbol::Reference("sys.init$ret.0".to_owned())))
        );
        // A leading digit alone does not make a constant.
        assert_eq!(parse("@1x").ok(), Some(Instruction::Address(Symbol::Reference("1x".to_owned()))));
        assert_eq!(parse("@-").ok(), Some(Instruction::Address(Symbol::Reference("-".to_owned()))));
    }

    #[test]
    fn test_parse_address_invalid() {
        assert!(matches!(parse("@"), Err(Error::EmptySymbol)));
        assert!(matches!(
            parse("@99999999999999999999999"),
            Err(Error::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse("(LOOP)").ok(), Some(Instruction::Label("LOOP".to_owned())));
        assert_eq!(parse("(a.b$c)").ok(), Some(Instruction::Label("a.b$c".to_owned())));
        assert!(matches!(parse("()"), Err(Error::EmptySymbol)));
    }

    #[test]
    fn test_parse_compute() {
        assert_eq!(parse("M=M+1").ok(), Some(c("M+1", Some("M"), None)));
        assert_eq!(parse("D;JGT").ok(), Some(c("D", None, Some("JGT"))));
        assert_eq!(parse("M=M+1;JGT").ok(), Some(c("M+1", Some("M"), Some("JGT"))));
        assert_eq!(parse("0;JMP").ok(), Some(c("0", None, Some("JMP"))));
        assert_eq!(parse("D-A").ok(), Some(c("D-A", None, None)));
        // Mnemonics are validated by the translator, not here.
        assert_eq!(parse("X=Y;Z").ok(), Some(c("Y", Some("X"), Some("Z"))));
        assert_eq!(parse("(LOOP").ok(), Some(c("(LOOP", None, None)));
    }

    #[test]
    fn test_parse_too_many_operators() {
        assert!(matches!(parse("D;JGT;JMP"), Err(Error::TooManyOperators(';'))));
        assert!(matches!(parse("A=M=D"), Err(Error::TooManyOperators('='))));
        // `;` is checked first when both operators repeat.
        assert!(matches!(parse("A=M=D;;"), Err(Error::TooManyOperators(';'))));
        assert!(matches!(parse("A=M=D;JMP"), Err(Error::TooManyOperators('='))));
    }

    #[test]
    fn test_run() {
        let tokens: VecDeque<Token> = VecDeque::from(vec![
            Token::new("@i", 2),
            Token::new("(LOOP)", 4),
            Token::new("M=M+1", 5),
        ]);
        let stmts = Parser::new(tokens).run().unwrap();

        assert_eq!(
            stmts,
            vec![
                Statement { line: 2, instruction: Instruction::Address(Symbol::Reference("i".to_owned())) },
                Statement { line: 4, instruction: Instruction::Label("LOOP".to_owned()) },
                Statement { line: 5, instruction: c("M+1", Some("M"), None) },
            ]
        );
    }

    #[test]
    fn test_run_reports_line() {
        let tokens: VecDeque<Token> = VecDeque::from(vec![
            Token::new("@1", 1),
            Token::new("D;JGT;JMP", 3),
            Token::new("A=M=D", 4),
        ]);
        let err = Parser::new(tokens).run().unwrap_err();

        assert_eq!(err.line(), Some(3));
        assert!(matches!(err.root(), Error::TooManyOperators(';')));
    }

    #[test]
    fn test_run_empty() {
        assert_eq!(Parser::new(VecDeque::new()).run().ok(), Some(vec![]));
    }
}

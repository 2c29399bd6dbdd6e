//! An assembler for the Hack 16-bit instruction set.
//!
//! The `hackasm` binary is a thin command line wrapper around
//! the `assembler` module.
#[macro_use] extern crate log;
extern crate regex;

pub mod assembler;

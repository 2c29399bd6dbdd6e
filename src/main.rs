extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate hackasm;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use hackasm::assembler;
use hackasm::assembler::error::Error;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tPreprocess Only: {}\n\tBinary: {}\n\tOutfile: {}\n\tInfile: {}",
        verbosity(args.occurrences_of("verbose")),
        args.is_present("preprocess"),
        args.is_present("binary"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap()
    );

    let ifile = args.value_of("INPUT").unwrap();
    let ipath = Path::new(ifile);

    // Open the path in read-only mode, returns `io::Result<File>`
    let ifile = match File::open(&ipath) {
        Err(err) => {
            error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    let tokens = match assembler::lexer::tokenize(Box::new(ifile)) {
        Err(err) => fatal(ipath, err),
        Ok(tokens) => tokens,
    };
    info!("read {} instruction line(s) from `{}`", tokens.len(), ipath.display());

    let opath = output_path(&args, ipath);

    // Every line has been read, but nothing is translated yet.
    if args.is_present("preprocess") {
        let text: String = tokens.iter().map(|tok| format!("{}\n", tok.text)).collect();
        write_output(&opath, text.as_bytes());
        return;
    }

    let statements = match assembler::parser::Parser::new(tokens).run() {
        Err(err) => fatal(ipath, err),
        Ok(statements) => statements,
    };

    let mut translator = assembler::translator::Translator::new();
    let program = match translator.resolve_labels(&statements) {
        Err(err) => fatal(ipath, err),
        Ok(program) => program,
    };
    let words = match translator.encode(&program) {
        Err(err) => fatal(ipath, err),
        Ok(words) => words,
    };

    if args.is_present("print-debug") {
        print_listing(&program, &words);
    }

    for (name, addr) in translator.symbols().iter() {
        trace!("symbol `{}` = {}", name, addr);
    }

    let bytes: Vec<u8> = if args.is_present("binary") {
        words.iter().flat_map(|w| w.to_be_bytes().to_vec()).collect()
    } else {
        assembler::translator::render(&words)
            .into_iter()
            .map(|line| line + "\n")
            .collect::<String>()
            .into_bytes()
    };
    write_output(&opath, &bytes);
    info!("wrote {} word(s) to `{}`", words.len(), opath.display());
}

fn fatal(ipath: &Path, err: Error) -> ! {
    error!("fatal: {}: {}", ipath.display(), err);
    std::process::exit(1);
}

fn print_listing(program: &[&assembler::ast::Statement], words: &[u16]) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, (stmt, word)) in program.iter().zip(words.iter()).enumerate() {
        grid.add(Cell::from(format!("0x{:04X}:", idx)));
        grid.add(Cell::from(format!("{}", stmt.instruction)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(format!("{:016b}", word)));
    }

    println!("{}", grid.fit_into_columns(4));
}

fn output_path(args: &ArgMatches, ipath: &Path) -> PathBuf {
    if let Some(filename) = args.value_of("output") {
        return PathBuf::from(filename);
    }
    let ext = if args.is_present("preprocess") {
        "pre"
    } else if args.is_present("binary") {
        "bin"
    } else {
        "hack"
    };
    ipath.with_extension(ext)
}

fn write_output(opath: &Path, bytes: &[u8]) {
    let mut ofile = match File::create(&opath) {
        Err(err) => {
            error!("fatal: unable to open output file `{}`: {}", opath.display(), err);
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    if let Err(err) = ofile.write_all(bytes) {
        error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
        std::process::exit(1);
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap())
        .version(option_env!("CARGO_PKG_VERSION").unwrap())
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap())
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile"))
        .arg(Arg::with_name("preprocess")
            .short("e")
            .takes_value(false)
            .conflicts_with("binary")
            .help("preprocess only"))
        .arg(Arg::with_name("binary")
            .short("b")
            .takes_value(false)
            .help("write raw big-endian words instead of text lines"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the debug information alongside the assembly to STDOUT"))
        .get_matches()
}

fn verbosity(occurrences: u64) -> log::LevelFilter {
    match occurrences {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn initialize_logging(occurrences: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity(occurrences))
        .chain(std::io::stderr())
        .apply().ok();
}

#[macro_use]
extern crate log;
extern crate env_logger;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use interpol::source;
use interpol::{Error, Interpreter, Result};

const STARTED: &str = "======== INTERPOL INTERPRETER STARTED ========\n";
const OUTPUT_TITLE: &str = "\n================ INTERPOL OUTPUT ================\n";
const OUTPUT_START: &str = "---------------- OUTPUT START ---------------->";
const OUTPUT_END: &str = "\n<----------------- OUTPUT END -------------------";
const TOKEN_TITLE: &str = "\n========= INTERPOL LEXEMES/TOKENS TABLE =========\n";
const SYMBOL_TITLE: &str = "\n================= SYMBOLS TABLE =================\n";
const TERMINATED: &str = "\n======== INTERPOL INTERPRETER TERMINATED ========";

#[derive(Parser, Debug)]
#[command(version, about = "Runs an INTERPOL (.ipol) program")]
struct Args {
    /// Program file; asked for on standard input when omitted
    file: Option<PathBuf>,

    /// Do not print the token and symbol tables after the run
    #[arg(long)]
    no_tables: bool,
}

fn read_program(args: &Args) -> Result<String> {
    let path = match &args.file {
        Some(path) => path.clone(),
        None => {
            let stdin = io::stdin();
            source::prompt(stdin.lock(), io::stdout())?
        }
    };
    source::load(&path)
}

fn report(err: &Error) {
    match (err.kind(), err) {
        (Some(kind), _) => debug!("Run stopped: {:?}", kind),
        (None, Error::Io(cause)) => error!("{}", cause),
        (None, _) => {}
    }
    println!("{}", err);
}

fn run(args: &Args) -> bool {
    let text = match read_program(args) {
        Ok(text) => text,
        Err(err) => {
            println!("{}", OUTPUT_TITLE);
            println!("{}", OUTPUT_START);
            report(&err);
            return false;
        }
    };

    println!("{}", OUTPUT_TITLE);
    println!("{}", OUTPUT_START);

    let stdin = io::stdin();
    let mut interpreter = match Interpreter::new(&text, stdin.lock(), io::stdout()) {
        Ok(interpreter) => interpreter,
        Err(err) => {
            report(&err);
            return false;
        }
    };

    let outcome = interpreter.process();
    match &outcome {
        Ok(()) => println!("{}", OUTPUT_END),
        Err(err) => report(err),
    }

    if !args.no_tables {
        println!("{}", TOKEN_TITLE);
        print!("{}", interpreter.tokens());
        println!("{}", SYMBOL_TITLE);
        print!("{}", interpreter.variables());
    }
    outcome.is_ok()
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    debug!("{:?}", args);

    println!("{}", STARTED);
    if !run(&args) {
        process::exit(1);
    }
    println!("{}", TERMINATED);
}

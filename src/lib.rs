//! Flint is a small dynamically typed, class-based scripting language written
//! in Rust. It has lexical scoping, first-class functions with closures,
//! classes with single inheritance, and a hand-written recursive descent
//! parser. Flint is a tree-walk interpreter: the interpreter walks the
//! abstract syntax tree (AST) and evaluates each node directly, without
//! compiling to bytecode or machine code first.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of
//! converting a string of characters into a list of tokens. A token is a
//! single unit of the language. For example, the string `1 + 2` would be
//! converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as a cursor
//! over the characters in the source code, producing one token at a time and
//! ending with a synthetic `EOF` token.
//!
//! The scanner reports syntax errors in the source code as a
//! [`ScanError`](error::ScanError). These errors are trivial problems like an
//! unterminated string literal or an unexpected character. Scan errors are
//! reported as soon as they are encountered and the scanner keeps going, so
//! the user can fix multiple syntax errors at once.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of
//! converting the list of tokens into an abstract syntax tree. The parser is
//! implemented in the [`parser`](parser) module as a recursive descent parser
//! over the operator precedence ladder. The parser transforms the list of
//! tokens into expressions and statements. [`Expressions`](expr::Expr) are
//! pieces of code that produce a value, specifically an
//! [`Object`](object::Object). Objects are an umbrella term for all types of
//! values in Flint including literals, functions, classes and instances.
//! [`Statements`](stmt::Stmt) are pieces of code that do not produce a value
//! but instead perform some action, like a variable declaration or an if
//! clause.
//!
//! The parser reports syntax errors in the source code as a
//! [`ParseError`](error::ParseError). Unlike the scanner, the parser catches
//! errors that span multiple tokens. When it hits one, it discards tokens
//! until the next statement boundary and continues from there, a technique
//! called synchronization, so a single run can surface several errors.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process
//! of statically analyzing the AST to determine the scope of each variable.
//! The resolver is implemented in the [`resolver`](resolver) module as a
//! separate walk over the AST that counts, for every variable reference, how
//! many environments lie between the reference and the definition it binds
//! to. The interpreter later honors exactly that hop count, which is what
//! makes closures behave correctly under shadowing. The resolver reports a
//! [`ResolveError`](error::ResolveError) for code that is syntactically valid
//! but semantically wrong, like `this` outside of a class, `return` at the
//! top level, or a variable that is declared twice in the same scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step is interpreting, implemented in the
//! [`interpreter`](interpreter) module as a tree-walk evaluator. Most errors
//! can only be caught here, at runtime, and are reported as a
//! [`RuntimeError`](error::RuntimeError). For example, the following program
//! is valid Flint syntax but fails because it tries to add a string and a
//! number:
//! ```text
//! var a = "123";
//! var b = a + 123;
//! ```
//! The interpreter manages the environment: a mapping of variable names to
//! their values, implemented in the [`environment`](environment) module as a
//! chain of maps, one per scope. A statically erroneous program is never
//! executed; a runtime error abandons the current batch of statements but
//! leaves the interpreter usable for the next prompt line.

use std::io::Write;
use std::{fs, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

const HISTORY_FILE: &str = ".flint_history";

#[allow(non_camel_case_types)]
pub struct flint<'a> {
    interpreter: interpreter::Interpreter<'a>,
}

impl<'a> flint<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        flint {
            interpreter: interpreter::Interpreter::new(output),
        }
    }

    /// Runs a script file. A static error exits with code 65, a runtime
    /// error with code 70.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(&contents);

        if error::did_runtime_error() {
            process::exit(70);
        }
        if error::did_error() {
            process::exit(65);
        }
    }

    /// Runs an interactive prompt, one line at a time, until end of input.
    /// Errors are reported and the session continues; the interpreter state
    /// persists across lines.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("prompt to be available");

        let history = home::home_dir().map(|dir| dir.join(HISTORY_FILE));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());

                    self.run(&line);
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    /// Runs a source string through the whole pipeline.
    /// Each stage only runs if the previous ones were clean.
    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}

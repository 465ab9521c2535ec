//! File opener example.
//!
//! A classic flag set with fused short flags, an optional-argument flag, a
//! short-only flag with one argument, and 1 to 100 file names.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p flagtrie-demos --example file_opener -- -rwv --save a.bak notes.txt
//! cargo run -p flagtrie-demos --example file_opener -- -E utf8 --verb -v notes.txt
//! cargo run -p flagtrie-demos --example file_opener -- --help
//! ```
//!
//! `--help` and `--version` are directives, so they work without any file
//! names. Set `RUST_LOG=debug` to watch the scanner.

use std::cell::{Cell, RefCell};

use flagtrie_core::{Param, Parser, UNBOUNDED};
use flagtrie_help::{HelpLayout, render_help, render_usage};

const PROGRAM: &str = "test";
const VERSION: &str = "1.3.14";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Early {
    Help,
    Version,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let verbose_level = Cell::new(0);
    let early = Cell::new(None);
    let opened = RefCell::new(Vec::new());

    let mut parser = Parser::new();
    parser.set_error_handler(|msg| println!("error: {msg}"));
    register_all(&mut parser, &verbose_level, &early);
    parser.set_positional_bounds(1, 100);
    parser.add_positional("FILES", Some("List of files to open"));
    parser.set_positional_callback(|index, file| {
        println!("opening file #{index}:  {file}");
        opened.borrow_mut().push(file.to_string());
    });

    let program = args.first().map_or(PROGRAM, String::as_str);
    let outcome = parser.parse(&args);

    match early.get() {
        Some(Early::Help) => {
            println!("{}\n", render_usage(PROGRAM, &parser));
            print!("{}", render_help(&parser, &HelpLayout::default()));
            return;
        }
        Some(Early::Version) => {
            println!("version {VERSION}");
            return;
        }
        None => {}
    }

    if outcome.is_err() {
        println!("{}", render_usage(PROGRAM, &parser));
        println!("type `{program} --help` for more information");
        std::process::exit(1);
    }

    drop(parser);
    if verbose_level.get() != 0 {
        println!("set verbose level finally to {}", verbose_level.get());
    }
    println!("{} file(s) opened", opened.into_inner().len());
}

fn register_all<'a>(
    parser: &mut Parser<'a>,
    verbose_level: &'a Cell<u32>,
    early: &'a Cell<Option<Early>>,
) {
    let params = [
        Param::new(Some("read"), Some('r'))
            .description("Read")
            .on_match(|_| println!("open as read (--read)")),
        Param::new(Some("write"), Some('w'))
            .description("Write")
            .on_match(|_| println!("open as writable (--write)")),
        Param::new(Some("binary"), Some('b'))
            .description("Binary")
            .on_match(|_| println!("open as binary (--binary)")),
        Param::new(Some("save"), Some('s'))
            .arity(0, UNBOUNDED)
            .arg_name("FILE...")
            .description("Save, or save to another file(s)")
            .on_match(|files| {
                println!("save to this file (--save)");
                for (index, file) in files.iter().enumerate() {
                    println!("   [{index}] {file}");
                }
            }),
        Param::new(Some("help"), Some('h'))
            .description("Show help message")
            .directive()
            .on_match(move |_| early.set(Some(Early::Help))),
        Param::new(Some("verbose"), Some('v'))
            .description(
                "Use this flag to set verbose level, use different times to set different \
                 verbose levels",
            )
            .on_match(move |_| {
                println!("set to higher verbose level (--verbose)");
                verbose_level.set(verbose_level.get() + 1);
            }),
        Param::long("version")
            .description("Show version info")
            .directive()
            .on_match(move |_| early.set(Some(Early::Version))),
        Param::short('E')
            .arity(1, 1)
            .arg_name("ENCODING")
            .description("Set file encoding")
            .on_match(|encoding| {
                if let Some(encoding) = encoding.first() {
                    println!("set encoding to {encoding} (-E)");
                }
            }),
    ];

    for param in params {
        parser
            .register(param)
            .expect("file opener parameters are well formed");
    }
}

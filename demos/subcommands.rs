//! Sub-command example.
//!
//! The top-level parser accepts global flags and hands the command line to a
//! nested parser as soon as it sees a known sub-command name.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p flagtrie-demos --example subcommands -- -v commit -m "first" --amend
//! cargo run -p flagtrie-demos --example subcommands -- push --force origin main
//! cargo run -p flagtrie-demos --example subcommands -- status
//! ```

use std::cell::Cell;

use flagtrie_core::{Param, Parser};
use flagtrie_help::render_usage;

const PROGRAM: &str = "vcs";
const COMMANDS: [&str; 2] = ["commit", "push"];

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = Cell::new(false);
    let outcome = Cell::new(None);

    let mut parser = Parser::new();
    parser.set_error_handler(|msg| eprintln!("{PROGRAM}: {msg}"));
    parser
        .register(
            Param::new(Some("verbose"), Some('v'))
                .description("Print what happens")
                .on_match(|_| verbose.set(true)),
        )
        .expect("--verbose is well formed");
    parser.set_positional_bounds(1, 1);
    parser.add_positional("COMMAND", Some("One of: commit, push"));
    parser.set_directive_positional_callback(|_, rest| {
        let Some(&name) = rest.first() else {
            return false;
        };
        if !COMMANDS.contains(&name) {
            return false;
        }
        outcome.set(Some(run_subcommand(name, rest, verbose.get())));
        true
    });

    let top = parser.parse(&args);
    match (top, outcome.get()) {
        (Ok(()), Some(true)) => {}
        (Ok(()), _) => {
            eprintln!("{}", render_usage(PROGRAM, &parser));
            std::process::exit(1);
        }
        (Err(_), _) => {
            eprintln!("{}", render_usage(PROGRAM, &parser));
            std::process::exit(2);
        }
    }
}

/// Parses the sub-command's own flags; `rest[0]` is the sub-command name.
fn run_subcommand(name: &str, rest: &[&str], verbose: bool) -> bool {
    let mut parser = Parser::new();
    parser.set_error_handler(|msg| eprintln!("{PROGRAM} {name}: {msg}"));

    let registered = match name {
        "commit" => parser
            .register(
                Param::new(Some("message"), Some('m'))
                    .arity(1, 1)
                    .arg_name("MSG")
                    .required(true),
            )
            .and_then(|_| parser.register(Param::long("amend"))),
        _ => {
            parser.set_positional_bounds(0, 2);
            parser.add_positional("REMOTE", None);
            parser.add_positional("BRANCH", None);
            parser.register(Param::new(Some("force"), Some('f')))
        }
    };
    if registered.is_err() {
        return false;
    }

    if parser.parse(rest).is_err() {
        eprintln!("{}", render_usage(&format!("{PROGRAM} {name}"), &parser));
        return false;
    }

    let Some(result) = parser.take_last_result() else {
        return false;
    };
    if verbose {
        for entry in result.present() {
            println!("{name}: {:?} x{} {:?}", entry.long, entry.count, entry.values);
        }
    }
    match name {
        "commit" => {
            let message = result.values("message").join(" ");
            let verb = if result.contains("amend") { "amending" } else { "committing" };
            println!("{verb} with message {message:?}");
        }
        _ => {
            let force = if result.contains("force") { " (forced)" } else { "" };
            println!("pushing{force}");
        }
    }
    true
}

//! Declaration example.
//!
//! Builds a parser from an embedded YAML declaration instead of registering
//! parameters by hand, then prints the parse result.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p flagtrie-demos --example declaration -- -Dprofile=release --jobs 4 build
//! cargo run -p flagtrie-demos --example declaration -- --help
//! ```

use flagtrie_core::Declaration;
use flagtrie_help::{HelpLayout, render_help, render_usage};

const DECLARATION: &str = r#"
program: builder
description: Runs build targets.
positional:
  min: 1
  max: 8
  args:
    - name: TARGETS
      description: Targets to build, in order
parameters:
  - long: jobs
    short: j
    min: 1
    arg_name: N
    description: Number of parallel jobs
  - long: keep-going
    short: k
    description: Continue after the first failing target
  - short: D
    kind: leading
    arg_name: KEY=VALUE
    description: Define a build property
  - long: help
    short: h
    kind: directive
    description: Show this help
"#;

fn main() {
    let declaration = match Declaration::from_yaml_str(DECLARATION) {
        Ok(declaration) => declaration,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    let program = declaration.program_or("builder");

    let mut parser = match declaration.build() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let args: Vec<String> = std::env::args().collect();
    let outcome = parser.parse(&args);
    let asked_for_help = parser
        .last_result()
        .is_some_and(|result| result.contains("help"));

    if asked_for_help {
        println!("{}\n", render_usage(program, &parser));
        if let Some(description) = &declaration.description {
            println!("{description}\n");
        }
        print!("{}", render_help(&parser, &HelpLayout::default()));
        return;
    }

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        eprintln!("{}", render_usage(program, &parser));
        std::process::exit(1);
    }

    if let Some(result) = parser.last_result() {
        for entry in result.present() {
            let name = entry
                .long
                .clone()
                .or_else(|| entry.short.map(String::from))
                .unwrap_or_default();
            println!("{name}: count={} values={:?}", entry.count, entry.values);
        }
    }
}

//! Trie-backed command-line argument registry and streaming parser.
//!
//! This crate turns a token vector into classified flags, flag arguments, and
//! positional arguments in a single left-to-right scan:
//!
//! - [`Parser`]: the registry. Parameters are described with [`Param`] and
//!   registered once; every spelling lands in a prefix tree so that long flags
//!   can be abbreviated (`--fil` for `--files`) as long as the prefix is
//!   unambiguous.
//! - [`ParameterSpec`]: immutable metadata for one registered parameter:
//!   spellings, arity, requiredness, and the directive / leading behaviors.
//! - [`ParseResult`]: per-parse snapshot of occurrence counts and captured
//!   values, queryable by either spelling.
//! - [`Declaration`]: YAML/JSON description of a registry, buildable into a
//!   parser without callbacks.
//!
//! Supported token forms: `--flag`, `--flag=value`, `--fla` (unique prefix),
//! `-f`, `-abc` (fused short flags), `-Dkey=value` (leading parameters), a
//! bare `--` terminator, and bare positionals. Directive flags and the
//! positional directive hook hand the rest of the command line to a
//! sub-command parser.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//!
//! use flagtrie_core::*;
//!
//! let verbose = Cell::new(0);
//! let mut parser = Parser::new();
//! parser
//!     .register(
//!         Param::new(Some("verbose"), Some('v'))
//!             .description("Raise the verbosity level")
//!             .on_match(|_| verbose.set(verbose.get() + 1)),
//!     )
//!     .unwrap();
//! parser
//!     .register(Param::new(Some("files"), Some('f')).arity(1, 2).arg_name("FILE"))
//!     .unwrap();
//! parser.register_leading('D', "Define a property", false, |_| {}).unwrap();
//!
//! parser
//!     .parse(&["tool", "-vv", "--fil", "a.txt", "b.txt", "-Dmode=fast"])
//!     .unwrap();
//!
//! let result = parser.take_last_result().unwrap();
//! assert_eq!(result.count("verbose"), 2);
//! assert_eq!(result.values("f"), ["a.txt", "b.txt"]);
//! assert_eq!(result.values("D"), ["mode=fast"]);
//! drop(parser);
//! assert_eq!(verbose.get(), 2);
//! ```

mod declare;
mod error;
mod parser;
mod result;
mod session;
mod spec;
mod trie;
mod validate;

pub use declare::{Declaration, ParameterDeclaration, ParameterKind};
pub use error::{DeclarationError, ParseError, RegistrationError};
pub use parser::{
    DirectivePositionalCallback, ErrorHandler, Parser, PositionalArg, PositionalCallback,
    Positionals,
};
pub use result::{Occurrence, ParseResult};
pub use spec::{Callback, Param, ParameterSpec, SpecId, UNBOUNDED};

//! Parameter registry and parse entry point.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::Session;
use crate::spec::{Callback, NameQuery};
use crate::trie::{Lookup, Trie};
use crate::validate::validate_spec;
use crate::{Param, ParameterSpec, ParseError, ParseResult, RegistrationError, SpecId};

/// Callback invoked with `(index, token)` for every positional argument.
pub type PositionalCallback<'a> = Box<dyn FnMut(usize, &str) + 'a>;

/// Hook offered `(index, remaining_tokens)` before a positional argument is
/// accepted. Returning `true` hands the rest of the command line to the hook
/// and ends the parse.
pub type DirectivePositionalCallback<'a> = Box<dyn FnMut(usize, &[&str]) -> bool + 'a>;

/// Receives the formatted message of every registration or parse failure.
pub type ErrorHandler<'a> = Box<dyn FnMut(&str) + 'a>;

/// Display name and description of a positional argument, used for help only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalArg {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Positional argument bounds and help metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Positionals {
    /// Minimum number of positional arguments.
    pub min: usize,
    /// Maximum number of positional arguments.
    pub max: usize,
    /// Declared names, in order.
    pub args: Vec<PositionalArg>,
}

pub(crate) struct Registered<'a> {
    pub(crate) spec: ParameterSpec,
    pub(crate) callback: Option<Callback<'a>>,
    pub(crate) occurrences: usize,
    pub(crate) satisfied: bool,
}

/// Registry of parameters and the parser driving them.
///
/// Register every parameter first, then call [`parse`](Parser::parse) once per
/// token vector. Callbacks may borrow from the caller's scope for `'a`.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
///
/// use flagtrie_core::{Param, ParseError, Parser};
///
/// let opened = RefCell::new(Vec::new());
/// let mut parser = Parser::new();
/// parser.register(Param::new(Some("read"), Some('r'))).unwrap();
/// parser.register(Param::new(Some("write"), Some('w'))).unwrap();
/// parser.set_positional_bounds(1, 100);
/// parser.set_positional_callback(|_, file| opened.borrow_mut().push(file.to_string()));
///
/// parser.parse(&["test", "-rw", "notes.txt"]).unwrap();
/// assert_eq!(*opened.borrow(), ["notes.txt"]);
///
/// let err = parser.parse(&["test", "-x"]).unwrap_err();
/// assert_eq!(err, ParseError::UnknownFlag("-x".to_string()));
/// ```
pub struct Parser<'a> {
    pub(crate) long_names: Trie,
    pub(crate) short_names: Trie,
    pub(crate) params: Vec<Registered<'a>>,
    pub(crate) positional: Positionals,
    pub(crate) positional_callback: Option<PositionalCallback<'a>>,
    pub(crate) directive_positional: Option<DirectivePositionalCallback<'a>>,
    pub(crate) error_handler: Option<ErrorHandler<'a>>,
    pub(crate) terminator: bool,
    last_result: Option<ParseResult>,
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self {
            long_names: Trie::new(),
            short_names: Trie::new(),
            params: Vec::new(),
            positional: Positionals::default(),
            positional_callback: None,
            directive_positional: None,
            error_handler: None,
            terminator: false,
            last_result: None,
        }
    }
}

impl<'a> Parser<'a> {
    /// Creates an empty registry. Positional bounds default to `0..=0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::DuplicateRegistration`] if either spelling
    /// is already bound, or a validation error for malformed specs. The
    /// registry is left unchanged on error.
    pub fn register(&mut self, param: Param<'a>) -> Result<SpecId, RegistrationError> {
        let outcome = self.insert(param);
        if let Err(err) = &outcome {
            self.report(&err.to_string());
        }
        outcome
    }

    fn insert(&mut self, param: Param<'a>) -> Result<SpecId, RegistrationError> {
        let Param { spec, callback } = param;
        validate_spec(&spec)?;

        let short = spec.short().map(String::from);
        if let Some(long) = spec.long() {
            if self.long_names.get(long).is_some() {
                return Err(RegistrationError::DuplicateRegistration(format!("--{long}")));
            }
        }
        if let Some(short) = &short {
            if self.short_names.get(short).is_some() {
                return Err(RegistrationError::DuplicateRegistration(format!("-{short}")));
            }
        }

        let id = SpecId(self.params.len());
        if let Some(long) = spec.long() {
            self.long_names
                .insert(long, id)
                .map_err(|_| RegistrationError::DuplicateRegistration(format!("--{long}")))?;
        }
        if let Some(short) = &short {
            self.short_names
                .insert(short, id)
                .map_err(|_| RegistrationError::DuplicateRegistration(format!("-{short}")))?;
        }

        debug!(
            parameter = %spec.display_name(),
            min = spec.min_arity(),
            max = spec.max_arity(),
            required = spec.is_required(),
            "Registered parameter"
        );
        self.params.push(Registered {
            spec,
            callback,
            occurrences: 0,
            satisfied: false,
        });
        Ok(id)
    }

    /// Registers a directive: once matched, its callback receives every
    /// remaining token (itself included) and parsing ends.
    pub fn register_directive(
        &mut self,
        long: Option<&str>,
        short: Option<char>,
        description: &str,
        required: bool,
        callback: impl FnMut(&[&str]) + 'a,
    ) -> Result<SpecId, RegistrationError> {
        self.register(
            Param::new(long, short)
                .description(description)
                .required(required)
                .directive()
                .on_match(callback),
        )
    }

    /// Registers a leading parameter whose single value is fused into the same
    /// token, as in `-Dkey=value`.
    pub fn register_leading(
        &mut self,
        short: char,
        description: &str,
        required: bool,
        callback: impl FnMut(&[&str]) + 'a,
    ) -> Result<SpecId, RegistrationError> {
        self.register(
            Param::short(short)
                .description(description)
                .required(required)
                .leading()
                .on_match(callback),
        )
    }

    pub fn set_positional_bounds(&mut self, min: usize, max: usize) {
        self.positional.min = min;
        self.positional.max = max;
    }

    /// Declares a positional argument name for help output.
    pub fn add_positional(&mut self, name: &str, description: Option<&str>) {
        self.positional.args.push(PositionalArg {
            name: name.to_string(),
            description: description.map(String::from),
        });
    }

    pub fn set_positional_callback(&mut self, callback: impl FnMut(usize, &str) + 'a) {
        self.positional_callback = Some(Box::new(callback));
    }

    /// Installs the hook used for sub-command hand-off on positional tokens.
    pub fn set_directive_positional_callback(
        &mut self,
        callback: impl FnMut(usize, &[&str]) -> bool + 'a,
    ) {
        self.directive_positional = Some(Box::new(callback));
    }

    /// Installs the side channel that receives formatted failure messages.
    ///
    /// Failures are always returned as errors; the handler only controls
    /// whether a message is delivered as well.
    pub fn set_error_handler(&mut self, handler: impl FnMut(&str) + 'a) {
        self.error_handler = Some(Box::new(handler));
    }

    /// Makes a bare `--` end flag parsing for the rest of the token vector.
    pub fn enable_terminator(&mut self) {
        self.terminator = true;
    }

    pub fn terminator_enabled(&self) -> bool {
        self.terminator
    }

    pub fn spec(&self, id: SpecId) -> Option<&ParameterSpec> {
        self.params.get(id.0).map(|param| &param.spec)
    }

    /// Iterates over registered specs in registration order.
    pub fn specs(&self) -> impl Iterator<Item = (SpecId, &ParameterSpec)> {
        self.params
            .iter()
            .enumerate()
            .map(|(index, param)| (SpecId(index), &param.spec))
    }

    pub fn positional(&self) -> &Positionals {
        &self.positional
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Finds a parameter by exact bare or dashed name, without prefix
    /// expansion.
    pub fn find(&self, name: &str) -> Option<SpecId> {
        match NameQuery::from(name) {
            NameQuery::Long(long) => self.long_names.get(long),
            NameQuery::Short(short) => self.short_names.get(short.encode_utf8(&mut [0; 4])),
        }
    }

    /// Resolves a flag token the way [`parse`](Parser::parse) would.
    ///
    /// Long tokens (`--fil`, `--files=a`) get unambiguous-prefix expansion;
    /// short tokens (`-f`) must match exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtrie_core::{Param, ParseError, Parser};
    ///
    /// let mut parser = Parser::new();
    /// let list = parser.register(Param::long("list")).unwrap();
    /// parser.register(Param::long("license")).unwrap();
    ///
    /// assert_eq!(parser.lookup("--lis"), Ok(list));
    /// assert!(matches!(parser.lookup("--li"), Err(ParseError::AmbiguousFlag { .. })));
    /// assert_eq!(parser.lookup("-l"), Err(ParseError::UnknownFlag("-l".to_string())));
    /// ```
    pub fn lookup(&self, token: &str) -> Result<SpecId, ParseError> {
        if let Some(body) = token.strip_prefix("--") {
            let name = body.split_once('=').map_or(body, |(name, _)| name);
            return self.resolve_long(name);
        }
        let mut chars = token.strip_prefix('-').unwrap_or_default().chars();
        match (chars.next(), chars.next()) {
            (Some(short), None) => self.resolve_short(short),
            _ => Err(ParseError::UnknownFlag(token.to_string())),
        }
    }

    pub(crate) fn resolve_long(&self, name: &str) -> Result<SpecId, ParseError> {
        let token = format!("--{name}");
        let allow_prefix = name.chars().count() > 1;
        match self.long_names.resolve(name, allow_prefix) {
            Lookup::Exact(id) => Ok(id),
            Lookup::Prefix(id) => {
                debug!(token = %token, resolved = %self.params[id.0].spec, "Expanded abbreviated flag");
                Ok(id)
            }
            Lookup::Ambiguous(ids) => Err(ParseError::AmbiguousFlag {
                token,
                candidates: ids
                    .into_iter()
                    .map(|id| self.params[id.0].spec.display_name())
                    .collect(),
            }),
            Lookup::Missing => Err(ParseError::UnknownFlag(token)),
        }
    }

    pub(crate) fn resolve_short(&self, short: char) -> Result<SpecId, ParseError> {
        match self
            .short_names
            .resolve(short.encode_utf8(&mut [0; 4]), false)
        {
            Lookup::Exact(id) | Lookup::Prefix(id) => Ok(id),
            Lookup::Ambiguous(_) | Lookup::Missing => {
                Err(ParseError::UnknownFlag(format!("-{short}")))
            }
        }
    }

    /// Number of times the parameter matched during the last parse.
    pub fn occurrences(&self, id: SpecId) -> usize {
        self.params.get(id.0).map_or(0, |param| param.occurrences)
    }

    /// Returns `true` if the parameter matched during the last parse.
    pub fn is_satisfied(&self, id: SpecId) -> bool {
        self.params.get(id.0).is_some_and(|param| param.satisfied)
    }

    /// Parses a token vector. Index 0 is the program name and is skipped.
    ///
    /// Callbacks run inline as tokens are classified. The previous result is
    /// replaced by a fresh one, which stays available through
    /// [`last_result`](Parser::last_result) even when parsing fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered; the formatted message is
    /// also sent to the error handler, if one is installed.
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<(), ParseError> {
        for param in &mut self.params {
            param.occurrences = 0;
            param.satisfied = false;
        }
        self.last_result = None;

        let (result, outcome) = Session::new(self, tokens).run();
        self.last_result = Some(result);

        if let Err(err) = &outcome {
            debug!(error = %err, "Parse failed");
            self.report(&err.to_string());
        }
        outcome
    }

    /// Result of the last parse, still owned by the parser.
    pub fn last_result(&self) -> Option<&ParseResult> {
        self.last_result.as_ref()
    }

    /// Hands the last result over to the caller.
    pub fn take_last_result(&mut self) -> Option<ParseResult> {
        self.last_result.take()
    }

    fn report(&mut self, message: &str) {
        if let Some(handler) = self.error_handler.as_mut() {
            handler(message);
        }
    }
}

impl fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("specs", &self.specs().map(|(_, spec)| spec).collect::<Vec<_>>())
            .field("positional", &self.positional)
            .field("terminator", &self.terminator)
            .field("last_result", &self.last_result)
            .finish_non_exhaustive()
    }
}

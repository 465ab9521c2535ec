//! Parameter metadata and the registration builder.
//!
//! A [`ParameterSpec`] describes one logical parameter: its spellings, how many
//! arguments it consumes, and whether it behaves as a directive or a leading
//! parameter. Specs are built with [`Param`] and handed to
//! [`Parser::register`](crate::Parser::register), after which they never change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper arity bound meaning "no limit".
pub const UNBOUNDED: usize = usize::MAX;

/// Callback invoked with the arguments captured for one occurrence of a
/// parameter.
pub type Callback<'a> = Box<dyn FnMut(&[&str]) + 'a>;

/// Identifier of a registered parameter.
///
/// Ids are handed out in registration order and stay valid for the lifetime of
/// the [`Parser`](crate::Parser) that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecId(pub(crate) usize);

impl SpecId {
    /// Position of the parameter in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Metadata for one registered parameter.
///
/// Both the short and the long spelling resolve to the same spec.
///
/// # Examples
///
/// ```
/// use flagtrie_core::{Param, Parser};
///
/// let mut parser = Parser::new();
/// let id = parser
///     .register(Param::new(Some("files"), Some('f')).arity(1, 2).arg_name("FILE"))
///     .unwrap();
///
/// let spec = parser.spec(id).unwrap();
/// assert_eq!(spec.display_name(), "--files");
/// assert_eq!(spec.short(), Some('f'));
/// assert!(spec.takes_args());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    long: Option<String>,
    short: Option<char>,
    description: Option<String>,
    min_arity: usize,
    max_arity: usize,
    required: bool,
    directive: bool,
    leading: bool,
    arg_name: Option<String>,
}

impl ParameterSpec {
    fn named(long: Option<&str>, short: Option<char>) -> Self {
        Self {
            long: long.map(String::from),
            short,
            description: None,
            min_arity: 0,
            max_arity: 0,
            required: false,
            directive: false,
            leading: false,
            arg_name: None,
        }
    }

    /// Long spelling without the leading `--`.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Short spelling without the leading `-`.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// Help text.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn min_arity(&self) -> usize {
        self.min_arity
    }

    /// Maximum number of arguments, [`UNBOUNDED`] for no limit.
    pub fn max_arity(&self) -> usize {
        self.max_arity
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// A directive consumes every remaining token once it is matched.
    pub fn is_directive(&self) -> bool {
        self.directive
    }

    /// A leading parameter takes its value fused into the same token
    /// (`-Dkey=value`).
    pub fn is_leading(&self) -> bool {
        self.leading
    }

    /// Advisory label for the argument in help output.
    pub fn arg_name(&self) -> Option<&str> {
        self.arg_name.as_deref()
    }

    /// Returns `true` if the parameter consumes at least one argument.
    pub fn takes_args(&self) -> bool {
        self.max_arity > 0
    }

    /// Returns the spelling used in messages, long form preferred.
    ///
    /// # Examples
    ///
    /// ```
    /// use flagtrie_core::{Param, Parser};
    ///
    /// let mut parser = Parser::new();
    /// let both = parser.register(Param::new(Some("verbose"), Some('v'))).unwrap();
    /// let short = parser.register(Param::short('E').arity(1, 1)).unwrap();
    ///
    /// assert_eq!(parser.spec(both).unwrap().display_name(), "--verbose");
    /// assert_eq!(parser.spec(short).unwrap().display_name(), "-E");
    /// ```
    pub fn display_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => "<unnamed>".to_string(),
        }
    }

    /// Checks a bare or dashed name against this spec's spellings.
    ///
    /// One-character names only match the short spelling, longer names only
    /// match the long spelling.
    pub fn matches(&self, name: &str) -> bool {
        match NameQuery::from(name) {
            NameQuery::Long(long) => self.long.as_deref() == Some(long),
            NameQuery::Short(short) => self.short == Some(short),
        }
    }
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// A name as typed by a caller of the lookup APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NameQuery<'n> {
    Long(&'n str),
    Short(char),
}

impl<'n> From<&'n str> for NameQuery<'n> {
    fn from(name: &'n str) -> Self {
        if let Some(long) = name.strip_prefix("--") {
            return NameQuery::Long(long);
        }
        let bare = name.strip_prefix('-').unwrap_or(name);
        let mut chars = bare.chars();
        match (chars.next(), chars.next()) {
            (Some(short), None) => NameQuery::Short(short),
            _ => NameQuery::Long(bare),
        }
    }
}

/// Builder for a parameter registration.
///
/// # Examples
///
/// ```
/// use flagtrie_core::{Param, Parser};
///
/// let mut parser = Parser::new();
/// parser
///     .register(
///         Param::new(Some("save"), Some('s'))
///             .description("Save, or save to another file(s)")
///             .arity(0, 100)
///             .arg_name("FILE"),
///     )
///     .unwrap();
///
/// parser.parse(&["prog", "-s", "a.txt"]).unwrap();
/// assert_eq!(parser.last_result().unwrap().values("save"), ["a.txt"]);
/// ```
pub struct Param<'a> {
    pub(crate) spec: ParameterSpec,
    pub(crate) callback: Option<Callback<'a>>,
}

impl<'a> Param<'a> {
    /// Creates a no-argument parameter with the given spellings.
    pub fn new(long: Option<&str>, short: Option<char>) -> Self {
        Self {
            spec: ParameterSpec::named(long, short),
            callback: None,
        }
    }

    /// Creates a parameter with only a long spelling.
    pub fn long(name: &str) -> Self {
        Self::new(Some(name), None)
    }

    /// Creates a parameter with only a short spelling.
    pub fn short(name: char) -> Self {
        Self::new(None, Some(name))
    }

    pub fn description(mut self, text: &str) -> Self {
        self.spec.description = Some(text.to_string());
        self
    }

    /// Sets the argument count bounds. Use [`UNBOUNDED`] for no upper limit.
    pub fn arity(mut self, min: usize, max: usize) -> Self {
        self.spec.min_arity = min;
        self.spec.max_arity = max;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.spec.required = required;
        self
    }

    pub fn arg_name(mut self, name: &str) -> Self {
        self.spec.arg_name = Some(name.to_string());
        self
    }

    /// Turns the parameter into a directive that swallows the rest of the
    /// command line.
    pub fn directive(mut self) -> Self {
        self.spec.directive = true;
        self.spec.leading = false;
        self.spec.min_arity = 0;
        self.spec.max_arity = UNBOUNDED;
        self
    }

    /// Turns the parameter into a leading parameter with exactly one fused
    /// argument.
    pub fn leading(mut self) -> Self {
        self.spec.leading = true;
        self.spec.directive = false;
        self.spec.min_arity = 1;
        self.spec.max_arity = 1;
        self
    }

    /// Sets the callback invoked with the captured arguments of every
    /// occurrence.
    pub fn on_match(mut self, callback: impl FnMut(&[&str]) + 'a) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// The spec this builder will register.
    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }
}

impl fmt::Debug for Param<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("spec", &self.spec)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

//! Declarative parser descriptions.
//!
//! A [`Declaration`] describes a registry (parameters, positional bounds, and
//! the terminator switch) in YAML or JSON, so that a parser can be built
//! without writing callbacks. It never supplies argument values.
//!
//! # Example YAML
//!
//! ```yaml
//! program: test
//! terminator: true
//! positional:
//!   min: 1
//!   max: 100
//!   args:
//!     - name: FILES
//!       description: List of files to open
//! parameters:
//!   - long: read
//!     short: r
//!     description: Read
//!   - long: save
//!     short: s
//!     min: 0
//!     variadic: true
//!     arg_name: FILE
//!   - short: E
//!     min: 1
//!     arg_name: ENCODING
//!   - short: D
//!     kind: leading
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DeclarationError, Param, Parser, Positionals, UNBOUNDED};

/// How a declared parameter behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Ordinary flag with the declared arity.
    #[default]
    Flag,
    /// Swallows the rest of the command line.
    Directive,
    /// Short flag with one fused value (`-Dkey=value`).
    Leading,
}

/// One declared parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterDeclaration {
    /// Long spelling without `--`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Short spelling without `-`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minimum argument count.
    pub min: usize,
    /// Maximum argument count; defaults to `min`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    /// Accept any number of arguments above `min`.
    pub variadic: bool,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    pub kind: ParameterKind,
}

impl ParameterDeclaration {
    /// Effective upper arity bound.
    pub fn max_arity(&self) -> usize {
        if self.variadic {
            UNBOUNDED
        } else {
            self.max.unwrap_or(self.min)
        }
    }

    fn to_param<'a>(&self) -> Param<'a> {
        let mut param = Param::new(self.long.as_deref(), self.short)
            .arity(self.min, self.max_arity())
            .required(self.required);
        if let Some(description) = &self.description {
            param = param.description(description);
        }
        if let Some(arg_name) = &self.arg_name {
            param = param.arg_name(arg_name);
        }
        match self.kind {
            ParameterKind::Flag => param,
            ParameterKind::Directive => param.directive(),
            ParameterKind::Leading => param.leading(),
        }
    }
}

/// Serializable description of a whole registry.
///
/// # Examples
///
/// ```
/// use flagtrie_core::Declaration;
///
/// let declaration = Declaration::from_yaml_str(
///     r#"
/// parameters:
///   - long: verbose
///     short: v
///   - long: files
///     min: 1
///     max: 2
/// "#,
/// )
/// .unwrap();
///
/// let mut parser = declaration.build().unwrap();
/// parser.parse(&["prog", "-v", "--fil", "a", "b"]).unwrap();
///
/// let result = parser.last_result().unwrap();
/// assert_eq!(result.count("verbose"), 1);
/// assert_eq!(result.values("files"), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Declaration {
    /// Program name used in usage lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enables the bare `--` terminator.
    pub terminator: bool,
    pub positional: Positionals,
    pub parameters: Vec<ParameterDeclaration>,
}

impl Declaration {
    /// Loads a declaration from a file, as JSON when the extension is `json`
    /// and as YAML otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](DeclarationError::Io) if the file cannot be read, or a
    /// [`Yaml`](DeclarationError::Yaml) / [`Json`](DeclarationError::Json)
    /// error if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeclarationError> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let declaration: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        Ok(declaration)
    }

    /// Saves the declaration, as JSON when the extension is `json` and as
    /// YAML otherwise.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DeclarationError> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, DeclarationError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DeclarationError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Program name, falling back to `fallback`.
    pub fn program_or<'s>(&'s self, fallback: &'s str) -> &'s str {
        self.program.as_deref().unwrap_or(fallback)
    }

    /// Builds a parser holding every declared parameter, without callbacks.
    ///
    /// # Errors
    ///
    /// Returns [`Registration`](DeclarationError::Registration) for the first
    /// parameter the registry rejects.
    pub fn build<'a>(&self) -> Result<Parser<'a>, DeclarationError> {
        let mut parser = Parser::new();
        for parameter in &self.parameters {
            parser.register(parameter.to_param())?;
        }
        parser.set_positional_bounds(self.positional.min, self.positional.max);
        for arg in &self.positional.args {
            parser.add_positional(&arg.name, arg.description.as_deref());
        }
        if self.terminator {
            parser.enable_terminator();
        }
        Ok(parser)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

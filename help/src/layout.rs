//! Column layout for help entries.

use flagtrie_core::{ParameterSpec, PositionalArg};

/// Default wrap width for descriptions.
pub const DEFAULT_WIDTH: usize = 50;
/// Default column at which descriptions start.
pub const DEFAULT_INDENT: usize = 25;

/// Help text geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// Maximum description width per line, indent excluded.
    pub width: usize,
    /// Column where descriptions start.
    pub indent: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            indent: DEFAULT_INDENT,
        }
    }
}

impl HelpLayout {
    pub fn new(width: usize, indent: usize) -> Self {
        Self { width, indent }
    }
}

/// Placeholder shown for a parameter's arguments, or `None` when it takes
/// none. Optional arguments are bracketed. Directives only show a label when
/// one was named.
pub fn arg_label(spec: &ParameterSpec) -> Option<String> {
    if !spec.takes_args() || (spec.is_directive() && spec.arg_name().is_none()) {
        return None;
    }
    let name = match spec.arg_name() {
        Some(name) => name.to_string(),
        None if spec.max_arity() > 1 => "ARG...".to_string(),
        None => "ARG".to_string(),
    };
    if spec.min_arity() == 0 {
        Some(format!("[{name}]"))
    } else {
        Some(name)
    }
}

/// Left-hand column of a parameter entry, e.g. `  -f, --files ARG...`.
pub fn flag_column(spec: &ParameterSpec) -> String {
    let label = arg_label(spec);
    let mut column = String::from("  ");

    match (spec.short(), spec.long()) {
        (Some(short), _) if spec.is_leading() => {
            column.push('-');
            column.push(short);
            if let Some(label) = &label {
                column.push_str(label);
            }
        }
        (Some(short), Some(long)) => {
            column.push_str(&format!("-{short}, --{long}"));
            push_label(&mut column, label.as_deref());
        }
        (Some(short), None) => {
            column.push_str(&format!("-{short}"));
            push_label(&mut column, label.as_deref());
        }
        (None, Some(long)) => {
            column.push_str(&format!("    --{long}"));
            push_label(&mut column, label.as_deref());
        }
        (None, None) => column.push_str(&spec.display_name()),
    }
    column
}

/// Left-hand column of a positional entry.
pub fn positional_column(arg: &PositionalArg) -> String {
    format!("  {}", arg.name)
}

fn push_label(column: &mut String, label: Option<&str>) {
    if let Some(label) = label {
        column.push(' ');
        column.push_str(label);
    }
}

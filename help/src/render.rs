//! Help and usage text.

use flagtrie_core::Parser;
use unicode_width::UnicodeWidthStr;

use crate::layout::{HelpLayout, flag_column, positional_column};
use crate::wrap::wrap_words;

/// Renders one entry per positional argument and per parameter, in
/// registration order.
///
/// Each entry is the flag column padded to `layout.indent`, followed by the
/// wrapped description. When the column reaches the indent, the description
/// moves to the next line.
///
/// # Examples
///
/// ```
/// use flagtrie_core::{Param, Parser};
/// use flagtrie_help::{HelpLayout, render_help};
///
/// let mut parser = Parser::new();
/// parser
///     .register(Param::new(Some("help"), Some('h')).description("Show help info"))
///     .unwrap();
///
/// let help = render_help(&parser, &HelpLayout::default());
/// assert_eq!(help, "Options:\n  -h, --help             Show help info\n");
/// ```
pub fn render_help(parser: &Parser<'_>, layout: &HelpLayout) -> String {
    let mut out = String::new();

    let positional = &parser.positional().args;
    if !positional.is_empty() {
        out.push_str("Positional:\n");
        for arg in positional {
            push_entry(
                &mut out,
                &positional_column(arg),
                arg.description.as_deref(),
                layout,
            );
        }
    }

    if !parser.is_empty() {
        out.push_str("Options:\n");
        for (_, spec) in parser.specs() {
            push_entry(&mut out, &flag_column(spec), spec.description(), layout);
        }
    }
    out
}

/// Renders the one-line usage summary, e.g.
/// `usage: test [OPTIONS...] FILES...`.
///
/// Declared positional names within the minimum are shown plain and the rest
/// bracketed. The last name gets `...` when more positionals are accepted
/// than names are declared.
pub fn render_usage(program: &str, parser: &Parser<'_>) -> String {
    let mut usage = format!("usage: {program}");
    if !parser.is_empty() {
        usage.push_str(" [OPTIONS...]");
    }

    let bounds = parser.positional();
    let names: Vec<&str> = if bounds.args.is_empty() && bounds.max > 0 {
        vec!["ARG"]
    } else {
        bounds.args.iter().map(|arg| arg.name.as_str()).collect()
    };

    for (index, name) in names.iter().enumerate() {
        let repeats = index + 1 == names.len() && bounds.max > names.len();
        let name = if repeats {
            format!("{name}...")
        } else {
            name.to_string()
        };
        if index < bounds.min {
            usage.push_str(&format!(" {name}"));
        } else {
            usage.push_str(&format!(" [{name}]"));
        }
    }
    usage
}

fn push_entry(out: &mut String, column: &str, description: Option<&str>, layout: &HelpLayout) {
    out.push_str(column);
    if let Some(description) = description.filter(|text| !text.trim().is_empty()) {
        let width = column.width();
        if width + 1 >= layout.indent {
            out.push('\n');
            out.extend(std::iter::repeat_n(' ', layout.indent));
        } else {
            out.extend(std::iter::repeat_n(' ', layout.indent - width));
        }
        out.push_str(&wrap_words(description, layout.width, layout.indent));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use flagtrie_core::{Param, UNBOUNDED};

    use super::*;

    #[test]
    fn test_description_moves_below_wide_column() {
        let mut parser = Parser::new();
        parser
            .register(
                Param::new(Some("configuration"), Some('c'))
                    .arity(1, 1)
                    .arg_name("PATH")
                    .description("Config file"),
            )
            .unwrap();

        let help = render_help(&parser, &HelpLayout::default());
        assert_eq!(
            help,
            format!(
                "Options:\n  -c, --configuration PATH\n{}Config file\n",
                " ".repeat(25)
            )
        );
    }

    #[test]
    fn test_entry_without_description() {
        let mut parser = Parser::new();
        parser.register(Param::long("quiet")).unwrap();

        assert_eq!(
            render_help(&parser, &HelpLayout::default()),
            "Options:\n      --quiet\n"
        );
    }

    #[test]
    fn test_empty_parser_renders_nothing() {
        assert_eq!(render_help(&Parser::new(), &HelpLayout::default()), "");
    }

    #[test]
    fn test_wide_characters_align_by_display_width() {
        let mut parser = Parser::new();
        parser
            .register(
                Param::short('a')
                    .arity(1, 1)
                    .arg_name("ファイル")
                    .description("Wide"),
            )
            .unwrap();
        parser
            .register(
                Param::short('b')
                    .arity(1, 1)
                    .arg_name("FILE")
                    .description("Narrow"),
            )
            .unwrap();

        let help = render_help(&parser, &HelpLayout::default());
        let columns: Vec<usize> = help
            .lines()
            .skip(1)
            .map(|line| {
                let start = line.rfind("  ").map_or(0, |index| index + 2);
                line[..start].width()
            })
            .collect();
        assert_eq!(columns, vec![25, 25]);
    }

    #[test]
    fn test_usage_with_repeating_positional() {
        let mut parser = Parser::new();
        parser.register(Param::short('v')).unwrap();
        parser.set_positional_bounds(1, 100);
        parser.add_positional("FILES", Some("List of files to open"));

        assert_eq!(render_usage("test", &parser), "usage: test [OPTIONS...] FILES...");
    }

    #[test]
    fn test_usage_brackets_optional_positionals() {
        let mut parser = Parser::new();
        parser.set_positional_bounds(1, 2);
        parser.add_positional("SRC", None);
        parser.add_positional("DEST", None);

        assert_eq!(render_usage("cp", &parser), "usage: cp SRC [DEST]");
    }

    #[test]
    fn test_usage_without_declared_names() {
        let mut parser = Parser::new();
        parser.register(Param::long("all").arity(0, UNBOUNDED)).unwrap();
        parser.set_positional_bounds(0, 3);

        assert_eq!(render_usage("ls", &parser), "usage: ls [OPTIONS...] [ARG...]");
    }

    #[test]
    fn test_usage_without_positionals() {
        assert_eq!(render_usage("true", &Parser::new()), "usage: true");
    }
}

use flagtrie_core::{Declaration, Param, Parser, UNBOUNDED};
use flagtrie_help::{HelpLayout, render_help, render_usage};

fn file_opener<'a>() -> Parser<'a> {
    let mut parser = Parser::new();
    parser
        .register(Param::new(Some("read"), Some('r')).description("Read"))
        .unwrap();
    parser
        .register(Param::new(Some("write"), Some('w')).description("Write"))
        .unwrap();
    parser
        .register(
            Param::new(Some("save"), Some('s'))
                .arity(0, UNBOUNDED)
                .arg_name("FILE...")
                .description("Save, or save to another file(s)"),
        )
        .unwrap();
    parser
        .register(
            Param::new(Some("verbose"), Some('v'))
                .description("Use this flag to set the verbose level, repeat it to raise it further"),
        )
        .unwrap();
    parser
        .register(Param::long("version").description("Version"))
        .unwrap();
    parser
        .register(
            Param::short('E')
                .arity(1, 1)
                .arg_name("ENCODING")
                .description("Set encoding"),
        )
        .unwrap();
    parser.set_positional_bounds(1, 100);
    parser.add_positional("FILES", Some("List of files to open"));
    parser
}

#[test]
fn help_lists_positionals_then_options() {
    let help = render_help(&file_opener(), &HelpLayout::default());
    let pad = " ".repeat(25);

    let expected = [
        "Positional:".to_string(),
        format!("  FILES{}List of files to open", " ".repeat(18)),
        "Options:".to_string(),
        format!("  -r, --read{}Read", " ".repeat(13)),
        format!("  -w, --write{}Write", " ".repeat(12)),
        format!("  -s, --save [FILE...]{}Save, or save to another file(s)", " ".repeat(3)),
        format!(
            "  -v, --verbose{}Use this flag to set the verbose level, repeat it",
            " ".repeat(10)
        ),
        format!("{pad}to raise it further"),
        format!("      --version{}Version", " ".repeat(10)),
        format!("  -E ENCODING{}Set encoding", " ".repeat(12)),
    ]
    .join("\n");

    assert_eq!(help, format!("{expected}\n"));
}

#[test]
fn narrow_layout_wraps_sooner() {
    let help = render_help(&file_opener(), &HelpLayout::new(20, 25));

    let verbose: Vec<&str> = help
        .lines()
        .skip_while(|line| !line.contains("--verbose"))
        .take_while(|line| !line.contains("--version"))
        .collect();
    assert_eq!(verbose.len(), 4);
    for line in &verbose[1..] {
        assert!(line.starts_with(&" ".repeat(25)));
        assert!(line.trim_start().chars().count() <= 20);
    }
}

#[test]
fn usage_matches_classic_form() {
    assert_eq!(
        render_usage("test", &file_opener()),
        "usage: test [OPTIONS...] FILES..."
    );
}

#[test]
fn declaration_renders_like_handwritten_registry() {
    let declaration = Declaration::from_yaml_str(
        r#"
program: test
positional:
  min: 1
  max: 100
  args:
    - name: FILES
      description: List of files to open
parameters:
  - long: read
    short: r
    description: Read
  - short: E
    min: 1
    arg_name: ENCODING
    description: Set encoding
"#,
    )
    .unwrap();
    let parser = declaration.build().unwrap();

    let help = render_help(&parser, &HelpLayout::default());
    assert!(help.contains("  -r, --read"));
    assert!(help.contains("  -E ENCODING            Set encoding"));
    assert_eq!(
        render_usage(declaration.program_or("prog"), &parser),
        "usage: test [OPTIONS...] FILES..."
    );
}

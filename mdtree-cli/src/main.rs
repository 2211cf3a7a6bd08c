// Command-line interface for mdtree
//
// This binary renders markdown (or HTML) files into sanitized element trees and prints them as
// JSON, HTML or a tree visualization.
//
// Usage:
//  mdtree <input> [--to <format>] [--from <format>] [--output <file>]  - Render (default)
//  mdtree render <input> [--to <format>] ...                          - Same as above (explicit)
//  mdtree --list-formats                                              - List available formats
//
// Configuration is read from the embedded defaults, then ./mdtree.toml if present, then the file
// passed with --config. Command-line flags override all of them.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the serializer.
// Example:
//  mdtree doc.md --to html --extra-standalone --extra-title "My notes"

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mdtree::{render_tree, FormatRegistry, Options};
use mdtree_config::{Loader, MdtreeConfig};
use std::collections::HashMap;
use std::fs;

const SUBCOMMANDS: &[&str] = &["render", "help"];
const RAW_HTML_POLICIES: &[&str] = &["escape", "skip", "trust"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args
                .get(i + 1)
                .is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("mdtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render markdown into sanitized element trees")
        .long_about(
            "mdtree renders markdown into a tree of elements, with unsafe URLs neutralized,\n\
            attributes mapped to properties and elements filtered by allow- or deny-lists.\n\n\
            Output formats:\n  \
            - json:     the element tree as JSON (default)\n  \
            - html:     the element tree serialized as HTML\n  \
            - treeviz:  an indented tree for inspection\n\n\
            Examples:\n  \
            mdtree README.md                          # JSON to stdout\n  \
            mdtree README.md --to html -o out.html    # HTML file\n  \
            mdtree README.md --deny img --unwrap      # Drop images, keep their text",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdtree.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render a document (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format (defaults to the configured one)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("allow")
                        .long("allow")
                        .value_name("TAGS")
                        .help("Only keep these elements (comma separated)")
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .conflicts_with("deny"),
                )
                .arg(
                    Arg::new("deny")
                        .long("deny")
                        .value_name("TAGS")
                        .help("Remove these elements (comma separated)")
                        .value_delimiter(',')
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("unwrap")
                        .long("unwrap")
                        .help("Keep the children of removed elements")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("class-name")
                        .long("class-name")
                        .value_name("CLASS")
                        .help("Wrap the output in a div with this class"),
                )
                .arg(
                    Arg::new("link-target")
                        .long("link-target")
                        .value_name("TARGET")
                        .help("Target for every link, e.g. _blank"),
                )
                .arg(
                    Arg::new("raw-html")
                        .long("raw-html")
                        .help("What to do with raw HTML in markdown")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            RAW_HTML_POLICIES,
                        )),
                )
                .arg(
                    Arg::new("source-pos")
                        .long("source-pos")
                        .help("Add data-sourcepos to every element")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file argument means the default subcommand.
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "render".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    for deprecation in &config.deprecations {
        eprintln!(
            "Warning: option `{}` is deprecated and ignored: {}",
            deprecation.key, deprecation.guidance
        );
    }

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            apply_render_overrides(&mut config, sub_matches);
            handle_render_command(sub_matches, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn handle_render_command(
    matches: &ArgMatches,
    extra_params: &HashMap<String, String>,
    config: &MdtreeConfig,
) {
    let registry = FormatRegistry::default();
    let Some(input) = matches.get_one::<String>("input") else {
        eprintln!("Error: no input file given");
        std::process::exit(1);
    };

    let from = match matches.get_one::<String>("from") {
        Some(from) => from.clone(),
        None => registry
            .detect_format_from_filename(input)
            .unwrap_or_else(|| {
                eprintln!("Error: Could not detect format from filename '{input}'");
                eprintln!("Please specify --from explicitly");
                std::process::exit(1);
            }),
    };
    let to = matches
        .get_one::<String>("to")
        .cloned()
        .unwrap_or_else(|| config.output.format.clone());

    if let Err(e) = registry.get(&to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let options = Options::try_from(config).unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let root = if from == "markdown" {
        mdtree::parse(&source, &options.markdown)
    } else {
        registry.parse(&source, &from).unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        })
    };

    let nodes = render_tree(root, &options).unwrap_or_else(|e| {
        eprintln!("Render error: {e}");
        std::process::exit(1);
    });

    let mut format_options = config.output.params_for(&to);
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }
    let text = registry
        .serialize_with_options(&nodes, &to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{text}"),
    }
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::default();

    println!("Input formats:");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            if format.supports_parsing() {
                println!("  {:<10} {}", name, format.description());
            }
        }
    }

    println!("\nOutput formats:");
    for (name, description) in registry.list_output_formats() {
        println!("  {name:<10} {description}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MdtreeConfig {
    let loader = Loader::new().with_optional_file("mdtree.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Command-line flags win over every configuration file.
fn apply_render_overrides(config: &mut MdtreeConfig, matches: &ArgMatches) {
    let render = &mut config.render;

    if let Some(tags) = matches.get_many::<String>("allow") {
        render.allowed_elements = Some(tags.cloned().collect());
        render.disallowed_elements = None;
    }
    if let Some(tags) = matches.get_many::<String>("deny") {
        render.disallowed_elements = Some(tags.cloned().collect());
        render.allowed_elements = None;
    }
    if matches.get_flag("unwrap") {
        render.unwrap_disallowed = true;
    }
    if matches.get_flag("source-pos") {
        render.include_source_position = true;
    }
    if let Some(class_name) = matches.get_one::<String>("class-name") {
        render.class_name = Some(class_name.clone());
    }
    if let Some(target) = matches.get_one::<String>("link-target") {
        render.link_target = Some(target.clone());
    }
    if let Some(policy) = matches.get_one::<String>("raw-html") {
        render.raw_html = policy.clone();
    }
}

use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the policies accepted by src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const RAW_HTML_POLICIES: &[&str] = &["escape", "skip", "trust"];
const OUTPUT_FORMATS: &[&str] = &["json", "html", "treeviz"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render markdown into sanitized element trees")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file path")
                .required_unless_present("list-formats")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Output format")
                .value_parser(clap::builder::PossibleValuesParser::new(OUTPUT_FORMATS)),
        )
        .arg(
            Arg::new("from")
                .long("from")
                .help("Source format")
                .value_parser(clap::builder::PossibleValuesParser::new(["markdown", "html"])),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to an mdtree.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("allow").long("allow").help("Only keep these elements"))
        .arg(Arg::new("deny").long("deny").help("Remove these elements"))
        .arg(
            Arg::new("unwrap")
                .long("unwrap")
                .help("Keep the children of removed elements")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("class-name").long("class-name").help("Wrapper class"))
        .arg(Arg::new("link-target").long("link-target").help("Target for every link"))
        .arg(
            Arg::new("raw-html")
                .long("raw-html")
                .help("What to do with raw HTML in markdown")
                .value_parser(clap::builder::PossibleValuesParser::new(RAW_HTML_POLICIES)),
        )
        .arg(
            Arg::new("source-pos")
                .long("source-pos")
                .help("Add data-sourcepos to every element")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdtree", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdtree", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdtree", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}

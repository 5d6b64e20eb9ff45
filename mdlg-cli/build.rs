use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["anchors-json", "blocks-json", "toc-json", "slugs-simple"];

const TOC_LEVELS: [&str; 4] = ["0", "2", "3", "4"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdlg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert markdown-looks-good documents to HTML")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a mdlg.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log conversion details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate representations of a document")
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("toc-levels")
                        .long("toc-levels")
                        .value_parser(TOC_LEVELS),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document to HTML (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("toc-levels")
                        .long("toc-levels")
                        .value_parser(TOC_LEVELS),
                )
                .arg(
                    Arg::new("no-internal-links")
                        .long("no-internal-links")
                        .action(ArgAction::SetTrue),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdlg", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdlg", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdlg", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}

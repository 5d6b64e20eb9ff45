// Command-line interface for mdlg
//
// This binary converts markdown-looks-good documents into HTML fragments, optionally spliced into
// a page template, and offers an inspect command to look at the converter's intermediate views.
//
// The conversion itself lives in the mdlg-convert crate. This crate only deals with the shell:
// arguments, files, stdin/stdout, configuration layering and diagnostics on stderr.
//
// Usage:
//  mdlg <input> [-o <output>] [--template <base.html>]         - Convert to HTML (default)
//  mdlg convert <input> [-o <output>] [--template <base.html>] - Same as above (explicit)
//  mdlg inspect <path> [<transform>]                           - Execute a transform (defaults to "anchors-json")
//  mdlg --list-transforms                                      - List available transforms
//
// Configuration is layered: built-in defaults, then ./mdlg.toml if present, then --config, then
// the conversion flags.

use mdlg_cli::transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mdlg_config::{Loader, MdlgConfig};
use mdlg_convert::{apply_template, markdown_to_html, ConvertOptions};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const STDIO: &str = "-";

fn build_cli() -> Command {
    Command::new("mdlg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert markdown-looks-good documents to HTML")
        .long_about(
            "mdlg converts a strict Markdown dialect into HTML that keeps its markup visible.\n\n\
            Commands:\n  \
            - convert: Produce the HTML fragment (or a full page with --template)\n  \
            - inspect: View the converter's intermediate representations\n\n\
            Every heading and bold term gets an id and a self-link, and any verbatim mention\n\
            of one elsewhere in the document becomes a link to it.\n\n\
            Examples:\n  \
            mdlg README.md                              # Fragment to stdout\n  \
            mdlg README.md -o README.html --template base.html\n  \
            mdlg README.md --toc-levels 0               # No table of contents\n  \
            mdlg inspect README.md toc-json             # View the table of contents"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .value_name("PATH")
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
                .long_about(
                    "View the document as the converter sees it.\n\n\
                    Transforms (stage-format):\n  \
                    - anchors-json: headings and bold terms with their slugs (default)\n  \
                    - blocks-json:  the flat block structure\n  \
                    - toc-json:     table of contents entries\n  \
                    - slugs-simple: defined slugs, one per line\n\n\
                    Examples:\n  \
                    mdlg inspect README.md                    # Anchors as JSON\n  \
                    mdlg inspect README.md toc-json --toc-levels 4"
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'anchors-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(toc_levels_arg()),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document to HTML (default command)")
                .long_about(
                    "Convert a document to an HTML fragment.\n\n\
                    Input and output default to files; give - for stdin/stdout.\n\
                    Broken internal links are reported on stderr as warnings and do not\n\
                    change the exit status. Any other problem aborts without output.\n\n\
                    Examples:\n  \
                    mdlg convert input.md                        # Fragment to stdout\n  \
                    mdlg convert input.md -o out.html            # Fragment to a file\n  \
                    cat input.md | mdlg convert - --no-internal-links\n  \
                    mdlg input.md --template base.html           # 'convert' is optional"
                )
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
                        .value_name("output.html")
                        .help("Output file path, or - for stdout (default)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .value_name("base.html")
                        .help("Page template containing {{GENERATED_HTML_GOES_HERE}} exactly once")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(toc_levels_arg())
                .arg(
                    Arg::new("no-internal-links")
                        .long("no-internal-links")
                        .help("Render cross-references as plain text")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn toc_levels_arg() -> Arg {
    Arg::new("toc-levels")
        .long("toc-levels")
        .value_name("LEVELS")
        .help("Deepest heading level in the table of contents, 0 to disable [default: 3]")
        .value_parser(["0", "2", "3", "4"])
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // Check if this is a "missing subcommand" error by seeing if the first arg looks like a file
            if args.len() > 1
                && (!args[1].starts_with('-') || args[1] == STDIO)
                && args[1] != "inspect"
                && args[1] != "convert"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            apply_config_overrides(&mut config, sub_matches);
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("anchors-json");
            handle_inspect_command(path, transform, &config);
        }
        Some(("convert", sub_matches)) => {
            apply_config_overrides(&mut config, sub_matches);
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("error")
    };

    // A subscriber may already be installed (e.g. in tests); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, config: &MdlgConfig) {
    let source = read_input(path);
    let options = convert_options_or_exit(config);

    let output = transforms::execute_transform(&source, transform, &options).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(input: &str, output: Option<&str>, config: &MdlgConfig) {
    let source = read_input(input);
    let options = convert_options_or_exit(config);

    let result = markdown_to_html(&source, &options).unwrap_or_else(|e| {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    });

    for warning in &result.warnings {
        eprintln!("WARNING: {warning}");
    }

    let html = match &config.convert.template {
        Some(template_path) => {
            let template = fs::read_to_string(template_path).unwrap_or_else(|e| {
                eprintln!("Error reading template '{}': {e}", template_path.display());
                std::process::exit(1);
            });
            apply_template(&template, &result.html).unwrap_or_else(|e| {
                eprintln!("ERROR: {e}: {}", template_path.display());
                std::process::exit(1);
            })
        }
        None => result.html,
    };

    match output {
        Some(path) if path != STDIO => {
            fs::write(path, html).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        _ => print!("{html}"),
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("Stages:");
    println!("  anchors     - Headings and bold terms found by the first pass");
    println!("  blocks      - Flat block structure from the second pass");
    println!("  toc         - Table of contents entries");
    println!("  slugs       - Defined slugs\n");

    println!("Formats:");
    println!("  json        - JSON output");
    println!("  simple      - One item per line\n");

    println!("Available transform combinations:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn read_input(path: &str) -> String {
    if path == STDIO {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        });
        return source;
    }
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn load_cli_config(explicit_path: Option<&str>) -> MdlgConfig {
    let loader = Loader::new().with_optional_file("mdlg.toml");
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

/// Command-line flags take precedence over every configuration file.
fn apply_config_overrides(config: &mut MdlgConfig, matches: &ArgMatches) {
    if let Some(raw) = matches.get_one::<String>("toc-levels") {
        config.convert.toc_levels = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid value '{raw}' for --toc-levels");
            std::process::exit(1);
        });
    }
    if matches.try_get_one::<bool>("no-internal-links").ok().flatten() == Some(&true) {
        config.convert.internal_links = false;
    }
    if let Ok(Some(path)) = matches.try_get_one::<String>("template") {
        config.convert.template = Some(PathBuf::from(path));
    }
}

fn convert_options_or_exit(config: &MdlgConfig) -> ConvertOptions {
    config.convert_options().unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    })
}

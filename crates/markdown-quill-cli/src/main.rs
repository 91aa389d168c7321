use anyhow::{Context, Result, bail};
use markdown_quill_config::Config;
use markdown_quill_engine::{
    BulletPreset, CompileOptions, DocumentBuffer, LocalBuffer, UnsupportedConstruct, compile,
    parse_document,
};
use std::{env, fs, path::PathBuf, process};

enum Output {
    /// One human-readable line per operation, plus the final end offset.
    Listing,
    /// The operation stream as a JSON array.
    Json,
    /// Replay the stream into a local buffer and print the resulting text.
    Preview,
}

struct Args {
    file: PathBuf,
    output: Output,
    offset: Option<usize>,
    unordered_preset: Option<String>,
    ordered_preset: Option<String>,
}

fn parse_args(argv: &[String]) -> Result<Args> {
    let mut file = None;
    let mut output = Output::Listing;
    let mut offset = None;
    let mut unordered_preset = None;
    let mut ordered_preset = None;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--json" => output = Output::Json,
            "--preview" => output = Output::Preview,
            "--offset" => {
                i += 1;
                let value = argv.get(i).context("--offset needs a value")?;
                offset = Some(value.parse().context("--offset must be an integer")?);
            }
            "--unordered-preset" => {
                i += 1;
                unordered_preset =
                    Some(argv.get(i).context("--unordered-preset needs a value")?.clone());
            }
            "--ordered-preset" => {
                i += 1;
                ordered_preset =
                    Some(argv.get(i).context("--ordered-preset needs a value")?.clone());
            }
            other if other.starts_with("--") => bail!("unknown flag: {other}"),
            other => {
                if file.replace(PathBuf::from(other)).is_some() {
                    bail!("only one input file is supported");
                }
            }
        }
        i += 1;
    }

    Ok(Args {
        file: file.context("no input file given")?,
        output,
        offset,
        unordered_preset,
        ordered_preset,
    })
}

fn preset(name: &str) -> Result<BulletPreset> {
    Ok(name.parse::<BulletPreset>()?)
}

fn run(args: Args) -> Result<()> {
    let config = Config::load()
        .with_context(|| format!("loading {}", Config::config_path().display()))?
        .unwrap_or_default();

    let options = CompileOptions {
        unordered_preset: preset(
            args.unordered_preset
                .as_deref()
                .unwrap_or(&config.unordered_preset),
        )?,
        ordered_preset: preset(
            args.ordered_preset
                .as_deref()
                .unwrap_or(&config.ordered_preset),
        )?,
    };
    let start_offset = args.offset.unwrap_or(config.start_offset);

    let markdown = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let compiled = compile(&parse_document(&markdown), start_offset, &options);
    for skipped in &compiled.skipped {
        let UnsupportedConstruct::Table { source } = skipped;
        let first_line = source.lines().next().unwrap_or("");
        eprintln!("warning: table not compiled: {first_line}");
    }

    match args.output {
        Output::Listing => {
            for op in &compiled.ops {
                println!("{op}");
            }
            println!("end offset: {}", compiled.end_offset);
        }
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&compiled.ops)?);
        }
        Output::Preview => {
            let mut buffer = LocalBuffer::with_base(start_offset);
            buffer
                .apply(&compiled.ops)
                .context("replaying operation stream")?;
            print!("{}", buffer.text());
        }
    }

    Ok(())
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Usage: {} [--json | --preview] [--offset N] \
                 [--unordered-preset NAME] [--ordered-preset NAME] <file.md>",
                argv.first().map(String::as_str).unwrap_or("markdown-quill")
            );
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

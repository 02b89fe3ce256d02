use futures::executor::block_on;
use selkie::{CompileOptions, Compiler, SceneConfig};
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Compile(selkie::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Compile(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<selkie::Error> for CliError {
    fn from(value: selkie::Error) -> Self {
        Self::Compile(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Compile,
    Validate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    strict: bool,
    source: Option<String>,
    background: Option<String>,
    jitter_seed: Option<u64>,
    timestamp: Option<i64>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "selkie-cli\n\
\n\
USAGE:\n\
  selkie-cli [compile] [--pretty] [--strict] [--source <tag>] [--background <css-color>] [--jitter-seed <n>] [--timestamp <epoch-ms>] [--out <path>] [<path>|-]\n\
  selkie-cli validate [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', skeleton JSON is read from stdin.\n\
  - compile prints the resolved scene JSON to stdout by default; use --out to write a file.\n\
  - validate recompiles in strict mode and reports duplicate ids or self-referential connectors.\n\
  - --jitter-seed and --timestamp pin the non-semantic fields for reproducible output.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "compile" => args.command = Command::Compile,
            "validate" => args.command = Command::Validate,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--source" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.source = Some(v.clone());
            }
            "--background" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.background = Some(v.clone());
            }
            "--jitter-seed" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let Ok(v) = v.parse::<u64>() else {
                    return Err(CliError::Usage(usage()));
                };
                args.jitter_seed = Some(v);
            }
            "--timestamp" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let Ok(v) = v.parse::<i64>() else {
                    return Err(CliError::Usage(usage()));
                };
                args.timestamp = Some(v);
            }
            "--out" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(v.clone());
            }
            other if !other.starts_with("--") => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn build_compiler(args: &Args) -> Compiler {
    let mut overrides = SceneConfig::empty_object();
    if let Some(source) = &args.source {
        overrides.set_value("source", Value::String(source.clone()));
    }
    if let Some(background) = &args.background {
        overrides.set_value(
            "appState.viewBackgroundColor",
            Value::String(background.clone()),
        );
    }

    Compiler::new()
        .with_scene_config(overrides)
        .with_fixed_jitter_seed(args.jitter_seed)
        .with_fixed_timestamp_millis(args.timestamp)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let compiler = build_compiler(&args);

    match args.command {
        Command::Compile => {
            let options = if args.strict {
                CompileOptions::strict()
            } else {
                CompileOptions::lenient()
            };
            let scene = block_on(compiler.compile_str(&text, options))?;
            let rendered = if args.pretty {
                serde_json::to_string_pretty(&scene)?
            } else {
                serde_json::to_string(&scene)?
            };
            match args.out.as_deref() {
                None | Some("-") => println!("{rendered}"),
                Some(path) => std::fs::write(path, rendered)?,
            }
            Ok(())
        }
        Command::Validate => {
            block_on(compiler.compile_str(&text, CompileOptions::strict()))?;
            eprintln!("OK");
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

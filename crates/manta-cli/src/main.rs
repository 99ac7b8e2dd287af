use manta::{GraphConfig, InputFormat, build_graph_from_text_with, detect_format, xml};
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Manta(manta::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Manta(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<manta::Error> for CliError {
    fn from(value: manta::Error) -> Self {
        Self::Manta(value)
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
    Graph,
    Detect,
    Convert,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    format: Option<InputFormat>,
    to: Option<InputFormat>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "manta-cli\n\
\n\
USAGE:\n\
  manta-cli [graph] [--pretty] [--format json|xml] [--out <path>] [<path>|-]\n\
  manta-cli detect [<path>|-]\n\
  manta-cli convert --to json|xml [--format json|xml] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - graph prints the {nodes, connectors} diagram graph as JSON.\n\
  - The input format is auto-detected unless --format is given.\n\
  - convert translates document text between JSON and XML.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "graph" => args.command = Command::Graph,
            "detect" => args.command = Command::Detect,
            "convert" => args.command = Command::Convert,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(format) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = Some(
                    format
                        .parse::<InputFormat>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--to" => {
                let Some(format) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.to = Some(
                    format
                        .parse::<InputFormat>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Convert) && args.to.is_none() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn parse_value(text: &str, format: InputFormat) -> Result<Value, CliError> {
    match format {
        InputFormat::Json => Ok(serde_json::from_str(text)?),
        InputFormat::Xml => Ok(xml::xml_to_value(text)?),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let format = args.format.unwrap_or_else(|| detect_format(&text));

    match args.command {
        Command::Detect => {
            println!("{}", format.as_str());
            Ok(())
        }
        Command::Graph => {
            let graph = build_graph_from_text_with(&text, format, &GraphConfig::default())?;
            let rendered = if args.pretty {
                serde_json::to_string_pretty(&graph)?
            } else {
                serde_json::to_string(&graph)?
            };
            write_text(&rendered, args.out.as_deref())
        }
        Command::Convert => {
            let value = parse_value(&text, format)?;
            let rendered = match args.to.unwrap_or_default() {
                InputFormat::Json => serde_json::to_string_pretty(&value)?,
                InputFormat::Xml => xml::value_to_xml(&value),
            };
            write_text(&rendered, args.out.as_deref())
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

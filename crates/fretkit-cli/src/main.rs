use fretkit::{Chord, ChordDiagram, ChordSettings, ChordStyle, DiagramSize, RenderOptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Chord(fretkit::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Chord(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<fretkit::Error> for CliError {
    fn from(value: fretkit::Error) -> Self {
        Self::Chord(value)
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
    Render,
    Size,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    settings_path: Option<String>,
    style: Option<ChordStyle>,
    title: Option<String>,
    position: Option<u32>,
    hand_drawn_seed: Option<u64>,
    pretty: bool,
    out: Option<String>,
}

/// Input is either a bare chord or a chord bundled with settings.
#[derive(Debug, Deserialize)]
struct InputDocument {
    chord: Chord,
    #[serde(default)]
    settings: Option<ChordSettings>,
}

#[derive(Serialize)]
struct SizeOut {
    width: f64,
    height: f64,
}

impl From<DiagramSize> for SizeOut {
    fn from(size: DiagramSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

fn usage() -> &'static str {
    "fretkit-cli\n\
\n\
USAGE:\n\
  fretkit-cli [render] [--settings <path>] [--style normal|handdrawn] [--title <text>] [--position <n>] [--hand-drawn-seed <n>] [--out <path>] [<path>|-]\n\
  fretkit-cli size [--pretty] [--settings <path>] [--title <text>] [--position <n>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a chord ({\"fingers\": [...], \"barres\": [...]}) or {\"chord\": ..., \"settings\": ...}.\n\
  - Settings apply in order: input document, --settings file, then flags.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - size prints the diagram size as JSON.\n\
  - Set FRETKIT_LOG (e.g. FRETKIT_LOG=debug) to see layout diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "size" => args.command = Command::Size,
            "--pretty" => args.pretty = true,
            "--settings" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.settings_path = Some(path.clone());
            }
            "--style" => {
                let Some(style) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.style = Some(
                    style
                        .parse::<ChordStyle>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--position" => {
                let Some(position) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.position = Some(
                    position
                        .parse::<u32>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--hand-drawn-seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.hand_drawn_seed =
                    Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
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

fn parse_input(text: &str) -> Result<InputDocument, CliError> {
    let value: Value = serde_json::from_str(text)?;
    if value.get("chord").is_some() {
        return Ok(serde_json::from_value(value)?);
    }
    Ok(InputDocument {
        chord: serde_json::from_value(value)?,
        settings: None,
    })
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

fn flag_settings(args: &Args) -> ChordSettings {
    let mut settings = ChordSettings::new();
    if let Some(style) = args.style {
        settings = settings.with_style(style);
    }
    if let Some(title) = &args.title {
        settings = settings.with_title(title.clone());
    }
    if let Some(position) = args.position {
        settings = settings.with_position(position);
    }
    settings
}

fn run(args: Args) -> Result<(), CliError> {
    let document = parse_input(&read_input(args.input.as_deref())?)?;

    let mut options = RenderOptions::default();
    if let Some(seed) = args.hand_drawn_seed {
        options.hand_drawn_seed = seed;
    }
    let mut diagram = ChordDiagram::with_options(options);

    if let Some(settings) = document.settings {
        diagram.configure(settings)?;
    }
    if let Some(path) = args.settings_path.as_deref() {
        diagram.configure_json(&std::fs::read_to_string(path)?)?;
    }
    diagram.configure(flag_settings(&args))?;
    diagram.chord(document.chord);

    let size = diagram.draw()?;
    tracing::debug!(width = size.width, height = size.height, "chord diagram drawn");

    match args.command {
        Command::Render => write_text(&diagram.svg()?, args.out.as_deref()),
        Command::Size => {
            let out = SizeOut::from(size);
            let json = if args.pretty {
                serde_json::to_string_pretty(&out)?
            } else {
                serde_json::to_string(&out)?
            };
            write_text(&format!("{json}\n"), args.out.as_deref())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("FRETKIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() {
    init_tracing();

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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("fretkit-cli")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn flags_are_parsed() {
        let args = parse_args(&argv(&[
            "size",
            "--style",
            "handdrawn",
            "--position",
            "3",
            "--title",
            "Am",
            "chord.json",
        ]))
        .expect("args");

        assert!(matches!(args.command, Command::Size));
        assert_eq!(args.style, Some(ChordStyle::Handdrawn));
        assert_eq!(args.position, Some(3));
        assert_eq!(args.input.as_deref(), Some("chord.json"));

        let settings = flag_settings(&args);
        assert_eq!(settings.style.as_deref(), Some("handdrawn"));
        assert_eq!(settings.title.as_deref(), Some("Am"));
    }

    #[test]
    fn bad_flags_print_usage() {
        for bad in [
            &["--style", "pastel"][..],
            &["--position", "first"][..],
            &["--bogus"][..],
            &["a.json", "b.json"][..],
        ] {
            assert!(matches!(
                parse_args(&argv(bad)),
                Err(CliError::Usage(_))
            ));
        }
    }

    #[test]
    fn input_may_be_a_bare_chord_or_a_document() {
        let bare = parse_input(r#"{ "fingers": [[2, 1]] }"#).expect("bare chord");
        assert_eq!(bare.chord.fingers.len(), 1);
        assert!(bare.settings.is_none());

        let doc = parse_input(r#"{ "chord": { "fingers": [] }, "settings": { "frets": 4 } }"#)
            .expect("document");
        assert_eq!(doc.settings.and_then(|s| s.frets), Some(4));
    }
}

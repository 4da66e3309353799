use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use survey_core::{QuestionSet, SurveySettings, fragment_of, survey_link};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use ui::{App, FragmentSource, HostMode, UiApp, WINDOW_TITLE, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingFlag { flag: &'static str },
    UnknownArg(String),
    InvalidDelay { raw: String },
    InvalidUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFlag { flag } => write!(f, "{flag} is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --delay-ms value: {raw}"),
            ArgsError::InvalidUrl { raw } => write!(f, "invalid --url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    fragment: Option<String>,
    standalone: bool,
    settings: SurveySettings,
}

impl UiApp for DesktopApp {
    fn fragment_source(&self) -> FragmentSource {
        self.fragment
            .clone()
            .map_or(FragmentSource::Location, FragmentSource::Fixed)
    }

    fn host_mode(&self) -> HostMode {
        if self.standalone {
            HostMode::Standalone
        } else {
            HostMode::Detect
        }
    }

    fn settings(&self) -> SurveySettings {
        self.settings.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--fragment <fragment> | --url <url>] [--delay-ms <ms>] [--standalone]");
    eprintln!("  cargo run -p app -- link --base-url <url> --questions <file.json>");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  fragment read from the web view location; demo survey when empty");
    eprintln!("  --delay-ms 500");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SURVEY_FRAGMENT, SURVEY_URL, SURVEY_DELAY_MS, SURVEY_STANDALONE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Link,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "link" => Some(Self::Link),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct UiArgs {
    fragment: Option<String>,
    delay: Option<Duration>,
    standalone: bool,
}

impl UiArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        Self::parse_with_env(args, |key| std::env::var(key).ok())
    }

    fn parse_with_env(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut fragment = match env("SURVEY_FRAGMENT") {
            Some(value) => Some(value),
            None => env("SURVEY_URL").map(|url| url_fragment(&url)).transpose()?,
        };
        let mut delay = env("SURVEY_DELAY_MS").map(|raw| parse_delay(&raw)).transpose()?;
        let mut standalone = env("SURVEY_STANDALONE").is_some_and(|value| is_truthy(&value));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fragment" => fragment = Some(require_value(args, "--fragment")?),
                "--url" => {
                    let value = require_value(args, "--url")?;
                    fragment = Some(url_fragment(&value)?);
                }
                "--delay-ms" => {
                    let value = require_value(args, "--delay-ms")?;
                    delay = Some(parse_delay(&value)?);
                }
                "--standalone" => standalone = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            fragment,
            delay,
            standalone,
        })
    }

    fn settings(&self) -> SurveySettings {
        match self.delay {
            Some(delay) => SurveySettings::default().with_advance_delay(delay),
            None => SurveySettings::default(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct LinkArgs {
    base_url: String,
    questions: PathBuf,
}

impl LinkArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut base_url = None;
        let mut questions = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => base_url = Some(require_value(args, "--base-url")?),
                "--questions" => questions = Some(PathBuf::from(require_value(args, "--questions")?)),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            base_url: base_url.ok_or(ArgsError::MissingFlag { flag: "--base-url" })?,
            questions: questions.ok_or(ArgsError::MissingFlag { flag: "--questions" })?,
        })
    }
}

fn parse_delay(raw: &str) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ArgsError::InvalidDelay {
            raw: raw.to_string(),
        })
}

fn url_fragment(raw: &str) -> Result<String, ArgsError> {
    fragment_of(raw).map_err(|_| ArgsError::InvalidUrl {
        raw: raw.to_string(),
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the survey window.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let report = |e: ArgsError| {
        eprintln!("{e}");
        print_usage();
        e
    };

    match cmd {
        Command::Ui => {
            let parsed = UiArgs::parse(&mut iter).map_err(report)?;
            let settings = parsed.settings();
            tracing::info!(
                fixed_fragment = parsed.fragment.is_some(),
                standalone = parsed.standalone,
                delay_ms = settings.advance_delay().as_millis() as u64,
                "launching survey window"
            );

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                fragment: parsed.fragment,
                standalone: parsed.standalone,
                settings,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(WINDOW_TITLE)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Link => {
            let parsed = LinkArgs::parse(&mut iter).map_err(report)?;
            let raw = std::fs::read_to_string(&parsed.questions)?;
            let questions: QuestionSet = serde_json::from_str(&raw)?;
            let link = survey_link(&parsed.base_url, &questions)?;
            tracing::debug!(questions = questions.len(), "survey link built");
            println!("{link}");
            Ok(())
        }
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

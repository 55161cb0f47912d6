mod logging;
mod output;
mod settings;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use namechoose_core::{Gender, NameError};
use namechoose_generate::{
    GenerateOptions, GenerationEngine, NameWriter, NationalityRegistry, OutputError, OutputFormat,
    WriterOptions, default_data_root,
};
use thiserror::Error;
use uuid::Uuid;

use logging::init_logging;
use output::OutputTarget;
use settings::{Settings, SettingsError, load_settings};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("output error: {0}")]
    Output(#[from] OutputError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid arguments: {0}")]
    Usage(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "namechoose",
    version,
    about = "Generate random personal names by nationality"
)]
struct Cli {
    /// Settings file (defaults to ./namechoose.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding one subdirectory per nationality.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Show gender and nationality; repeat for more log detail.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Append JSON log lines to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate names (the default).
    Generate(GenerateArgs),
    /// Check every nationality's rule against its tables.
    Validate,
    /// List nationalities with their ISO 639 codes.
    List,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Number of names to generate.
    #[arg(short = 'c', long, value_name = "COUNT")]
    count: Option<usize>,
    /// Nationality name or ISO 639 code; random per name when omitted.
    #[arg(short = 'n', long, value_name = "NAT")]
    nationality: Option<String>,
    /// Gender: m or f; random per name when omitted.
    #[arg(short = 'g', long, value_parser = parse_gender)]
    gender: Option<Gender>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Output format: plain, csv or json.
    #[arg(long, value_name = "FORMAT")]
    format: Option<OutputFormat>,
    /// Write to a file instead of stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Append to the output file instead of truncating it.
    #[arg(long, default_value_t = false, requires = "out")]
    append: bool,
}

impl GenerateArgs {
    fn is_empty(&self) -> bool {
        self.count.is_none()
            && self.nationality.is_none()
            && self.gender.is_none()
            && self.seed.is_none()
            && self.format.is_none()
            && self.out.is_none()
            && !self.append
    }
}

impl Cli {
    /// The chosen command; generate options only go with `generate`.
    fn into_command(self) -> Result<Command, CliError> {
        match self.command {
            None => Ok(Command::Generate(self.generate)),
            Some(Command::Generate(_)) if !self.generate.is_empty() => Err(CliError::Usage(
                "generate options must follow the generate command".to_string(),
            )),
            Some(command @ (Command::Validate | Command::List)) if !self.generate.is_empty() => {
                Err(CliError::Usage(format!(
                    "generate options cannot be combined with {}",
                    command.name()
                )))
            }
            Some(command) => Ok(command),
        }
    }
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Generate(_) => "generate",
            Self::Validate => "validate",
            Self::List => "list",
        }
    }
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::parse(value).ok_or_else(|| format!("unknown gender '{value}' (use m or f)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let settings = load_settings(cli.config.as_deref())?;
    init_logging(cli.verbose, cli.log_file.as_deref()).map_err(CliError::Logging)?;

    let run_id = Uuid::new_v4().to_string();
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| settings.data_dir.clone())
        .unwrap_or_else(default_data_root);
    tracing::info!(run_id = %run_id, data_dir = %data_dir.display(), "run started");

    let verbose = cli.verbose;
    let command = cli.into_command()?;
    let registry = NationalityRegistry::load(&data_dir)?;

    match command {
        Command::Generate(args) => run_generate(&registry, &settings, args, verbose),
        Command::Validate => run_validate(&registry, &mut io::stdout().lock()),
        Command::List => run_list(&registry, &mut io::stdout().lock()),
    }
}

fn resolve_options(args: &GenerateArgs, settings: &Settings) -> Result<GenerateOptions, CliError> {
    let gender = match (args.gender, settings.default_gender.as_deref()) {
        (Some(gender), _) => Some(gender),
        (None, Some(value)) => Some(parse_gender(value).map_err(CliError::InvalidConfig)?),
        (None, None) => None,
    };

    Ok(GenerateOptions {
        nationality: args
            .nationality
            .clone()
            .or_else(|| settings.default_nationality.clone()),
        gender,
        count: args.count.or(settings.default_count).unwrap_or(1),
        seed: args.seed.or(settings.seed),
    })
}

fn resolve_format(args: &GenerateArgs, settings: &Settings) -> Result<OutputFormat, CliError> {
    match (args.format, settings.format.as_deref()) {
        (Some(format), _) => Ok(format),
        (None, Some(value)) => value.parse().map_err(CliError::InvalidConfig),
        (None, None) => Ok(OutputFormat::default()),
    }
}

fn run_generate(
    registry: &NationalityRegistry,
    settings: &Settings,
    args: GenerateArgs,
    verbose: u8,
) -> Result<ExitCode, CliError> {
    let options = resolve_options(&args, settings)?;
    let format = resolve_format(&args, settings)?;

    // Resolve and validate before the output file is touched.
    let engine = GenerationEngine::new(registry);
    let names = engine.generate(&options)?;

    let target = OutputTarget::open(args.out.as_deref(), args.append)?;
    let header = target.wants_header(format);
    let mut writer = NameWriter::new(
        target.writer,
        format,
        WriterOptions {
            verbose: verbose > 0,
            header,
        },
    )?;

    for name in names {
        match name {
            Ok(name) => writer.write(&name)?,
            Err(err) => {
                writer.finish()?;
                return Err(err.into());
            }
        }
    }

    let records = writer.records();
    let bytes = writer.finish()?;
    tracing::info!(names = records, bytes, format = %format, "names written");
    Ok(ExitCode::SUCCESS)
}

fn run_validate(
    registry: &NationalityRegistry,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let mut errors = 0_usize;
    let mut warnings = 0_usize;

    for (nationality, issues) in registry.validate_all() {
        for issue in issues {
            if issue.is_error() {
                errors += 1;
            } else {
                warnings += 1;
            }
            writeln!(out, "{nationality}: {issue}")?;
        }
    }
    writeln!(
        out,
        "{} nationalities checked: {errors} error(s), {warnings} warning(s)",
        registry.len()
    )?;
    out.flush()?;

    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn run_list(registry: &NationalityRegistry, out: &mut impl Write) -> Result<ExitCode, CliError> {
    for descriptor in registry.list_all() {
        let codes: Vec<&str> = descriptor.identifiers().skip(1).collect();
        writeln!(out, "{}\t{}", descriptor.name(), codes.join(", "))?;
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

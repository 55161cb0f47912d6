use std::env;
use std::io;

use namechoose_core::Gender;
use namechoose_generate::{
    GenerateOptions, GenerationEngine, NameWriter, NationalityRegistry, OutputFormat,
    WriterOptions, default_data_root,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--nationality" => options.nationality = args.next(),
            "--gender" => {
                let value = args.next().ok_or("missing --gender value")?;
                options.gender = Some(Gender::parse(&value).ok_or("gender must be m or f")?);
            }
            "--count" => {
                options.count = args.next().ok_or("missing --count value")?.parse()?;
            }
            "--seed" => options.seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let registry = NationalityRegistry::load(&default_data_root())?;
    let engine = GenerationEngine::new(&registry);

    let stdout = io::stdout();
    let mut writer = NameWriter::new(stdout.lock(), OutputFormat::Plain, WriterOptions::default())?;
    for name in engine.generate(&options)? {
        writer.write(&name?)?;
    }
    writer.finish()?;
    Ok(())
}

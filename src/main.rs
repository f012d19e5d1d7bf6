use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use docseed::cli;
use docseed::error::IoError;
use docseed::fixtures::{FixtureRegistry, FixtureSource};
use docseed::loader::{seedable_classes, FixtureLoader};
use docseed::logging::{self, Verbosity};
use docseed::output::{OutputFormatter, SeedReport};
use docseed::schema::Schema;
use docseed::store::MemoryStore;
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let schema = Schema::from_file(&args.schema)
        .with_context(|| format!("Failed to load schema: {}", args.schema.display()))?;
    let fixtures = FixtureRegistry::discover(&FixtureSource::new(&args.fixtures))
        .context("Failed to locate fixtures")?;

    let classes = if args.class.is_empty() {
        seedable_classes(&schema, &fixtures)
    } else {
        args.class.clone()
    };
    if classes.is_empty() {
        warn!("no classes to load");
    }

    let mut store = MemoryStore::new();
    let mut report = SeedReport::new();
    for class in &classes {
        let registry = FixtureLoader::new(&fixtures, &schema, &mut store)
            .load(class)
            .with_context(|| format!("Failed to load fixtures for {class}"))?;
        report.add(&registry, &store);
    }

    let output = OutputFormatter::format(&report, args.format)?;
    match &args.output_file {
        Some(path) => {
            std::fs::write(path, output).map_err(|e| IoError::write_error(path, e))?;
            info!(
                path = %path.display(),
                documents = report.total_documents(),
                format = args.format.as_str(),
                "wrote seed report"
            );
        }
        None => println!("{output}"),
    }

    Ok(())
}

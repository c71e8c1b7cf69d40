//! CLI entry point for `sql2crud`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sql2crud::error::{Error, Result};
use sql2crud::generator::{Emitter, GenerateOptions};
use sql2crud::output::formatter;
use sql2crud::{input, parser::schema_extractor};

#[derive(Parser)]
#[command(
    name = "sql2crud",
    version,
    about = "Generate a NestJS API, PostgreSQL CRUD functions and an Angular UI from a CREATE TABLE file"
)]
struct Cli {
    /// SQL file with a single CREATE TABLE definition
    input: Option<PathBuf>,

    /// Generate the NestJS API
    #[arg(long)]
    api: bool,

    /// Generate the PostgreSQL list/get/save/delete functions
    #[arg(long)]
    sql: bool,

    /// Generate the Angular CRUD UI
    #[arg(long)]
    web: bool,

    /// Print the extracted table schema as JSON
    #[arg(long)]
    dump_schema: bool,

    /// Output root, cleared before generation
    #[arg(long, default_value = "dist")]
    output_dir: PathBuf,

    /// Placeholder text for date inputs in the generated UI
    #[arg(long, default_value = "YYYY-MM-DD")]
    date_placeholder: String,

    /// Print verbose diagnostics
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn selected_emitters(&self) -> Vec<Emitter> {
        Emitter::ALL
            .into_iter()
            .filter(|emitter| match emitter {
                Emitter::Api => self.api,
                Emitter::Sql => self.sql,
                Emitter::Web => self.web,
            })
            .collect()
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ddl = input::read_ddl(cli.input.as_deref())?;
    let schema = schema_extractor::extract(&ddl)?;

    let emitters = cli.selected_emitters();
    if emitters.is_empty() && !cli.dump_schema {
        return Err(Error::NoEmitterSelected);
    }

    if cli.dump_schema {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    }
    if emitters.is_empty() {
        return Ok(());
    }

    let options = GenerateOptions {
        date_placeholder: cli.date_placeholder.clone(),
    };

    // Every emitter must succeed before the output root is cleared.
    let mut rendered = Vec::with_capacity(emitters.len());
    for emitter in emitters {
        rendered.push((emitter, emitter.generate(&schema, &options)?));
    }

    formatter::clear_output_root(&cli.output_dir);
    for (emitter, files) in rendered {
        let written = formatter::write_files(&cli.output_dir, &files)?;
        println!(
            "{emitter} generated in {} ({} files)",
            cli.output_dir.join(emitter.output_subdir()).display(),
            written.len()
        );
    }

    Ok(())
}

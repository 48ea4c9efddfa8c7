use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;

use notebook::cli::{CliArgs, OutputFormat};
use notebook::messages::Msg;
use notebook::snapshot::NotebookSnapshot;
use notebook::update::{update, Notebook};

fn main() -> Result<()> {
    notebook::tracing::init();

    let args = CliArgs::parse();
    let config = args.notebook_config()?;
    tracing::info!("policies: {:?}", config);

    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };
    let msgs: Vec<Msg> = serde_yaml::from_str(&script).context("Failed to parse script")?;

    let mut notebook = Notebook::new(config);
    for (step, msg) in msgs.into_iter().enumerate() {
        let name = msg.name();
        if let Err(e) = update(&mut notebook, msg) {
            if args.strict {
                anyhow::bail!("step {} ({}): {}", step + 1, name, e);
            }
            eprintln!("step {} ({}): {}", step + 1, name, e);
        }
    }

    let snapshot = NotebookSnapshot::capture(notebook.engine());
    match args.format {
        OutputFormat::Json => println!("{}", snapshot.to_json()?),
        OutputFormat::Table => print!("{}", snapshot.to_table()),
    }
    Ok(())
}

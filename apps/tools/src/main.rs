use std::{collections::BTreeSet, fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use session_core::{catalog, render_report, PredictionWorkflow, Session};
use shared::{domain::LocaleId, protocol::PredictionForm};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Locale {
    English,
    Hindi,
    Spanish,
}

impl From<Locale> for LocaleId {
    fn from(value: Locale) -> Self {
        match value {
            Locale::English => LocaleId::English,
            Locale::Hindi => LocaleId::Hindi,
            Locale::Spanish => LocaleId::Spanish,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a model artifact and report whether it is usable.
    CheckModel {
        #[arg(long, default_value = "heart_model.json")]
        path: PathBuf,
    },
    /// Run one prediction from a JSON form and print its report.
    Predict {
        #[arg(long, default_value = "heart_model.json")]
        model: PathBuf,
        #[arg(long)]
        form: PathBuf,
        #[arg(long, value_enum, default_value = "english")]
        locale: Locale,
        #[arg(long, default_value = "Patient")]
        name: String,
    },
    /// Check that every locale defines the same keys.
    Locales,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::CheckModel { path } => {
            oracle::load_model(&path)
                .with_context(|| format!("model at {} is not usable", path.display()))?;
            println!("model ok: {}", path.display());
        }
        Command::Predict {
            model,
            form,
            locale,
            name,
        } => {
            let raw = fs::read_to_string(&form)
                .with_context(|| format!("failed to read form {}", form.display()))?;
            let form: PredictionForm = serde_json::from_str(&raw).context("invalid form JSON")?;

            let workflow = PredictionWorkflow::from_load_result(oracle::load_oracle(&model));
            let mut session = Session::new();
            // The CLI has no credentials to offer; the login check is presence-only.
            session.log_in(&name, "cli@localhost", "cli")?;
            let record = workflow.submit(&mut session, &form)?;

            let table = catalog::locale(locale.into())?;
            print!("{}", render_report(&record, table));
        }
        Command::Locales => {
            let english: BTreeSet<&str> = catalog::locale(LocaleId::English)?.keys().collect();
            let mut mismatched = false;
            for id in LocaleId::ALL {
                let keys: BTreeSet<&str> = catalog::locale(id)?.keys().collect();
                let missing: Vec<_> = english.difference(&keys).collect();
                let extra: Vec<_> = keys.difference(&english).collect();
                println!("{id:?}: {} keys", keys.len());
                if !missing.is_empty() || !extra.is_empty() {
                    mismatched = true;
                    println!("  missing: {missing:?}");
                    println!("  extra: {extra:?}");
                }
            }
            if mismatched {
                bail!("locale catalogs disagree on keys");
            }
        }
    }

    Ok(())
}

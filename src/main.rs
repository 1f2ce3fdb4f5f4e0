use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use txnorm::data;
use txnorm::normalizing::FieldMapping;
use txnorm::persistence::TransactionStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize bank transaction CSV files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize an input CSV and write the standardized CSV
    Process {
        input_file: PathBuf,
        output_file: PathBuf,
        #[arg(long)]
        config: PathBuf,
    },
    /// Normalize an input CSV and load it into a SQLite database
    Load {
        input_file: PathBuf,
        #[arg(long)]
        config: PathBuf,
        #[arg(long, env = "TXNORM_DATABASE")]
        database: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    match cli.command {
        Command::Process {
            input_file,
            output_file,
            config,
        } => {
            let mapping = FieldMapping::load(&config).context("error loading config")?;
            let batch = data::process_csv(&input_file, &mapping).context("error loading transactions")?;
            data::write_csv_file(&batch, &output_file).context("error writing standardized CSV")?;

            println!("Successfully processed {} transactions", batch.len());
        },
        Command::Load {
            input_file,
            config,
            database,
        } => {
            let mapping = FieldMapping::load(&config).context("error loading config")?;
            let batch = data::process_csv(&input_file, &mapping).context("error loading transactions")?;

            let mut store = TransactionStore::open(&database)?;
            store.create_table()?;
            let inserted = store.insert_all(batch.transactions())?;

            println!("Successfully loaded {} transactions into the database", inserted);
        },
    }

    Ok(())
}

//! FIRESIGHT - CLI
//!
//! Command-line front-end for the analysis pipeline and audit log.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use firesight::{
    AeadCipher, AnalysisInput, AnalysisPipeline, AuditLog, BurnSmell, FireError, FireResult,
    KeyStore,
};

#[derive(Parser)]
#[command(name = "firesight")]
#[command(author = "Karen Tonoyan")]
#[command(version = firesight::VERSION)]
#[command(about = "FIRESIGHT - Fire-risk analysis with an encrypted audit trail")]
struct Cli {
    /// Audit database path
    #[arg(long)]
    db: Option<PathBuf>,

    /// Key file path
    #[arg(long)]
    key: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one fire-risk analysis and persist the result
    Analyze {
        /// Property address
        #[arg(long, default_value = "")]
        address: String,

        /// Room or zone
        #[arg(long, default_value = "")]
        room: String,

        /// Appliance or system under suspicion
        #[arg(long, default_value = "")]
        appliance: String,

        /// Burn smell reported (yes/no)
        #[arg(long, default_value = "no")]
        burn_smell: String,

        /// Free-text symptom description
        #[arg(long, default_value = "")]
        symptoms: String,

        /// Comma-separated voltage readings, e.g. "230,228,224"
        #[arg(long, default_value = "")]
        voltages: String,

        /// Appliance photo
        #[arg(long)]
        photo: PathBuf,

        /// Surrounding-area photo
        #[arg(long)]
        area: PathBuf,

        /// Forecast horizon in months
        #[arg(long, default_value_t = 1)]
        months: u32,
    },

    /// Inspect the audit log
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
}

#[derive(Subcommand)]
enum LogCommands {
    /// List stored records
    List,
    /// Decrypt and print one record as JSON
    Show { id: i64 },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> FireResult<()> {
    let base = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".firesight");

    let key_path = cli.key.unwrap_or_else(|| base.join("firesight.key"));
    let db_path = cli.db.unwrap_or_else(|| base.join("logs.db"));

    let key = KeyStore::load_or_create(&key_path)?;
    let cipher = AeadCipher::new(&key)?;
    let audit = AuditLog::open(&db_path, cipher)?;

    match cli.command {
        Commands::Analyze {
            address,
            room,
            appliance,
            burn_smell,
            symptoms,
            voltages,
            photo,
            area,
            months,
        } => {
            let input = AnalysisInput {
                address,
                room,
                appliance,
                burn_smell: parse_burn_smell(&burn_smell)?,
                symptoms,
                voltages: parse_voltages(&voltages)?,
                photo,
                area,
                forecast_months: months,
            };

            let pipeline = AnalysisPipeline::new(audit);
            let outcome = pipeline.run(input)?;

            println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            match outcome.audit {
                Ok(id) => println!("🔐 Audit record #{id} sealed"),
                Err(e) => eprintln!("⚠️  Result NOT persisted: {e}"),
            }
        }

        Commands::Log { command } => match command {
            LogCommands::List => {
                let records = audit.records()?;
                println!("📜 {} audit record(s)", records.len());
                for record in records {
                    let when = chrono::DateTime::from_timestamp(record.ts as i64, 0)
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| format!("{:.3}", record.ts));
                    println!(
                        "  #{:<4} {}  {:<10} score {:+.5}",
                        record.id, when, record.result.tier, record.result.score
                    );
                }
            }
            LogCommands::Show { id } => {
                let record = audit.record(id)?;
                println!("{}", serde_json::to_string_pretty(&record.result)?);
            }
        },
    }

    Ok(())
}

fn parse_burn_smell(raw: &str) -> FireResult<BurnSmell> {
    match raw.to_lowercase().as_str() {
        "yes" | "y" => Ok(BurnSmell::Yes),
        "no" | "n" | "" => Ok(BurnSmell::No),
        other => Err(FireError::InvalidInput(format!(
            "burn smell must be yes or no, got '{other}'"
        ))),
    }
}

fn parse_voltages(raw: &str) -> FireResult<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| FireError::InvalidInput(format!("invalid voltage value '{s}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voltages() {
        assert_eq!(
            parse_voltages("230, 228,  224").unwrap(),
            vec![230.0, 228.0, 224.0]
        );
        assert!(parse_voltages("").unwrap().is_empty());
        assert!(parse_voltages("230,abc").is_err());
    }

    #[test]
    fn test_parse_burn_smell() {
        assert_eq!(parse_burn_smell("YES").unwrap(), BurnSmell::Yes);
        assert_eq!(parse_burn_smell("no").unwrap(), BurnSmell::No);
        assert!(parse_burn_smell("maybe").is_err());
    }
}

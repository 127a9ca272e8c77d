use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "tap-cli")]
#[command(about = "Client for a running TAP CORS relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the relay is up
    Health,
    /// Run an ADQL query through the relay
    Query {
        /// ADQL statement
        adql: String,
        /// Output format requested from the archive
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Run one of the canned exoplanet queries
    Preset {
        #[arg(value_enum)]
        name: PresetName,
        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetName {
    Confirmed,
    Candidates,
    FalsePositives,
}

impl PresetName {
    fn path(self) -> &'static str {
        match self {
            PresetName::Confirmed => "/exoplanets/confirmed",
            PresetName::Candidates => "/exoplanets/candidates",
            PresetName::FalsePositives => "/exoplanets/false-positives",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Query { adql, format } => {
            client
                .get(format!("{}/tap/sync", base))
                .query(&[("query", adql), ("format", format)])
                .send()
                .await?
        }
        Commands::Preset { name, limit } => {
            let mut req = client.get(format!("{}{}", base, name.path()));
            if let Some(limit) = limit {
                req = req.query(&[("limit", limit)]);
            }
            req.send().await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}

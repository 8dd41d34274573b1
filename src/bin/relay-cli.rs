use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Management CLI for the Relay Gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[arg(short, long, default_value = "admin-secret-key")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway status
    Status,
    /// Show the current connection state
    Connection,
    /// Run a connection cycle and show the settled state
    Connect,
    /// Show the relay queue depth
    Depth,
    /// Submit a JSON payload to the relay queue
    Push {
        /// Payload as a JSON document
        payload: String,
    },
    /// Drain the head item from the relay queue
    Next,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client
                .get(format!("{}/admin/status", cli.url))
                .bearer_auth(&cli.key)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Connection => {
            let res = client
                .get(format!("{}/admin/connection", cli.url))
                .bearer_auth(&cli.key)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Connect => {
            let res = client
                .post(format!("{}/admin/connect", cli.url))
                .bearer_auth(&cli.key)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Depth => {
            let res = client
                .get(format!("{}/admin/relay", cli.url))
                .bearer_auth(&cli.key)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Push { payload } => {
            let body: Value = serde_json::from_str(&payload)?;
            let res = client
                .post(format!("{}/admin/relay", cli.url))
                .bearer_auth(&cli.key)
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Next => {
            let res = client
                .post(format!("{}/admin/relay/next", cli.url))
                .bearer_auth(&cli.key)
                .send()
                .await?;
            if res.status() == reqwest::StatusCode::NO_CONTENT {
                println!("queue is empty");
            } else {
                print_response(res).await?;
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

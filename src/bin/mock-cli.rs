use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "mock-cli")]
#[command(about = "Management CLI for the HTTP mock server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Region key to act on (sent as the identity header).
    #[arg(short, long)]
    from: Option<String>,

    #[arg(long, default_value = "/internal")]
    prefix: String,

    #[arg(long, default_value = "Mock-From")]
    identity_header: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register (or replace) a mocked route
    Add {
        #[arg(short, long)]
        method: String,
        #[arg(short, long)]
        path: String,
        /// Base64-encoded script
        #[arg(long, conflicts_with = "script", required_unless_present = "script")]
        cmd: Option<String>,
        /// Plain-text script file, encoded before sending
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Remove a mocked route
    Remove {
        #[arg(short, long)]
        method: String,
        #[arg(short, long)]
        path: String,
    },
    /// Remove every route of the region
    RemoveAll,
    /// Show the requests a route has served
    History {
        #[arg(short, long)]
        method: String,
        #[arg(short, long)]
        path: String,
    },
    /// Forget the requests a route has served
    ClearHistory {
        #[arg(short, long)]
        method: String,
        #[arg(short, long)]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (operation, form): (&str, Vec<(&str, String)>) = match &cli.command {
        Commands::Add {
            method,
            path,
            cmd,
            script,
        } => {
            let cmd = match (cmd, script) {
                (Some(cmd), _) => cmd.clone(),
                (None, Some(file)) => STANDARD.encode(std::fs::read(file)?),
                (None, None) => return Err("either --cmd or --script is required".into()),
            };
            (
                "add",
                vec![("method", method.clone()), ("path", path.clone()), ("cmd", cmd)],
            )
        }
        Commands::Remove { method, path } => (
            "remove",
            vec![("method", method.clone()), ("path", path.clone())],
        ),
        Commands::RemoveAll => ("removeAll", Vec::new()),
        Commands::History { method, path } => (
            "histroy",
            vec![("method", method.clone()), ("path", path.clone())],
        ),
        Commands::ClearHistory { method, path } => (
            "clearHistroy",
            vec![("method", method.clone()), ("path", path.clone())],
        ),
    };

    let mut request = client
        .post(format!(
            "{}{}/{}",
            cli.url.trim_end_matches('/'),
            cli.prefix.trim_end_matches('/'),
            operation
        ))
        .form(&form);
    if let Some(from) = &cli.from {
        request = request.header(cli.identity_header.as_str(), from);
    }

    let res = request.send().await?;
    print_response(res, matches!(cli.command, Commands::History { .. })).await
}

async fn print_response(
    res: reqwest::Response,
    decode_history: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: mock server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let mut json: Value = res.json().await?;
    if decode_history {
        decode_entries(&mut json);
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Replace base64 history fields with their text, where they decode.
fn decode_entries(json: &mut Value) {
    let Some(entries) = json.get_mut("histroy").and_then(Value::as_array_mut) else {
        return;
    };
    for entry in entries {
        for field in ["queryRaw", "bodyRaw"] {
            if let Some(Value::String(encoded)) = entry.get_mut(field) {
                if let Ok(bytes) = STANDARD.decode(encoded.as_bytes()) {
                    *encoded = String::from_utf8_lossy(&bytes).into_owned();
                }
            }
        }
    }
}

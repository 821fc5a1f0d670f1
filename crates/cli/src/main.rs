//! MoveOps CLI - Command-line interface for the move-execution API

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "moveops")]
#[command(about = "MoveOps move-execution CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL
    #[arg(long, env = "MOVEOPS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a move for a deal
    Start {
        /// Deal ID
        deal_id: i64,

        /// Employee IDs, comma separated (e.g. 10,11)
        #[arg(short, long, value_delimiter = ',', required = true)]
        team: Vec<i64>,
    },

    /// Pause a running move (crew break)
    Pause {
        /// Execution ID
        id: i64,
    },

    /// Resume a paused move
    Resume {
        /// Execution ID
        id: i64,
    },

    /// Complete a move and book material consumption
    Complete {
        /// Execution ID
        id: i64,

        /// Consumed material as MATERIAL_ID:QUANTITY (repeatable)
        #[arg(short, long = "material", value_parser = parse_material)]
        materials: Vec<MaterialArg>,

        /// Free-text completion notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List moves that are not completed yet
    Active,

    /// Show time records of a move
    TimeRecords {
        /// Execution ID
        id: i64,
    },

    /// Show a move with records, material usage and worked time
    Show {
        /// Execution ID
        id: i64,
    },

    /// Check server health
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MaterialArg {
    material_id: i64,
    quantity: i64,
}

fn parse_material(raw: &str) -> std::result::Result<MaterialArg, String> {
    let (id, qty) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected MATERIAL_ID:QUANTITY, got '{}'", raw))?;
    let material_id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid material id '{}'", id))?;
    let quantity = qty
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{}'", qty))?;
    Ok(MaterialArg {
        material_id,
        quantity,
    })
}

#[derive(Deserialize, Tabled)]
struct ActiveRow {
    id: i64,
    deal_id: i64,
    status: String,
    #[tabled(rename = "deal")]
    deal_title: String,
    #[tabled(display_with = "display_opt")]
    customer_name: Option<String>,
    #[tabled(display_with = "display_opt")]
    move_date: Option<String>,
}

#[derive(Deserialize, Tabled)]
struct TimeRecordRow {
    id: i64,
    #[tabled(rename = "employee")]
    employee_name: String,
    start_time: i64,
    #[tabled(display_with = "display_opt")]
    end_time: Option<i64>,
    #[tabled(display_with = "display_opt")]
    break_start: Option<i64>,
    #[tabled(display_with = "display_opt")]
    break_end: Option<i64>,
}

#[derive(Deserialize, Tabled)]
struct WorkedRow {
    employee_id: i64,
    segments: usize,
    #[tabled(rename = "worked", display_with = "display_minutes")]
    worked_millis: i64,
}

fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn display_minutes(millis: &i64) -> String {
    format!("{} min", millis / 60_000)
}

struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .context("Failed to connect to server")?;
        Self::read(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .context("Failed to connect to server")?;
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body: Value = response.json().await.context("Failed to parse response")?;

        if !status.is_success() {
            let message = body["error"].as_str().unwrap_or("unknown error");
            bail!("API error ({}): {}", status.as_u16(), message);
        }
        Ok(body)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);

    match cli.command {
        Commands::Start { deal_id, team } => {
            let result = client
                .post(&format!("/api/moves/{}/start", deal_id), json!({ "team": team }))
                .await?;

            println!("{}", "✓ Move started".green().bold());
            println!("  {} {}", "Execution:".bold(), result["id"]);
            println!("  {} {}", "Status:".bold(), result["status"]);
            println!("  {} {}", "Crew:".bold(), team.len());
        }

        Commands::Pause { id } => {
            let result = client
                .post(
                    &format!("/api/moves/{}/toggle-pause", id),
                    json!({ "action": "pause" }),
                )
                .await?;
            println!(
                "{} (status: {})",
                format!("✓ Move {} paused", id).yellow().bold(),
                result["status"]
            );
        }

        Commands::Resume { id } => {
            let result = client
                .post(
                    &format!("/api/moves/{}/toggle-pause", id),
                    json!({ "action": "resume" }),
                )
                .await?;
            println!(
                "{} (status: {})",
                format!("✓ Move {} resumed", id).green().bold(),
                result["status"]
            );
        }

        Commands::Complete {
            id,
            materials,
            notes,
        } => {
            let usage: Vec<Value> = materials
                .iter()
                .map(|m| json!({ "materialId": m.material_id, "quantity": m.quantity }))
                .collect();

            client
                .post(
                    &format!("/api/moves/{}/complete", id),
                    json!({ "materialUsage": usage, "notes": notes }),
                )
                .await?;

            println!("{}", format!("✓ Move {} completed", id).green().bold());
            for m in &materials {
                println!(
                    "  {} material {} x {}",
                    "•".bold(),
                    m.material_id,
                    m.quantity
                );
            }
        }

        Commands::Active => {
            let result = client.get("/api/moves/active").await?;
            let rows: Vec<ActiveRow> = serde_json::from_value(result)?;

            if rows.is_empty() {
                println!("{}", "No active moves".yellow());
            } else {
                println!("{}", "Active Moves".cyan().bold());
                println!("{}", Table::new(rows));
            }
        }

        Commands::TimeRecords { id } => {
            let result = client
                .get(&format!("/api/moves/{}/time-records", id))
                .await?;
            let rows: Vec<TimeRecordRow> = serde_json::from_value(result)?;

            println!("{}", format!("Time records for move {}:", id).cyan().bold());
            println!("{}", Table::new(rows));
        }

        Commands::Show { id } => {
            let detail = client.get(&format!("/api/moves/{}", id)).await?;
            let execution = &detail["execution"];

            println!("{}", format!("Move {}", id).cyan().bold());
            println!("  {} {}", "Deal:".bold(), execution["deal_id"]);
            println!("  {} {}", "Status:".bold(), execution["status"]);
            println!("  {} {}", "Started:".bold(), execution["start_time"]);
            println!("  {} {}", "Ended:".bold(), execution["end_time"]);
            if let Some(notes) = execution["notes"].as_str() {
                println!("  {} {}", "Notes:".bold(), notes);
            }
            println!();

            let records: Vec<TimeRecordRow> =
                serde_json::from_value(detail["time_records"].clone())?;
            println!("{}", Table::new(records));

            let worked: Vec<WorkedRow> = serde_json::from_value(detail["worked_time"].clone())?;
            println!("{}", Table::new(worked));

            if let Some(usage) = detail["material_usage"].as_array() {
                for item in usage {
                    println!(
                        "  {} material {} x {}",
                        "•".bold(),
                        item["material_id"],
                        item["quantity"]
                    );
                }
            }
        }

        Commands::Health => match client.get("/health").await {
            Ok(health) => {
                println!("  {} {}", "API URL:".bold(), cli.api_url);
                println!("  {} {}", "Status:".bold(), "ONLINE".green());
                println!("  {} {}", "Version:".bold(), health["version"]);
            }
            Err(e) => {
                println!("  {} {}", "Status:".bold(), "ERROR".red());
                println!("  {} {}", "Error:".bold(), e);
            }
        },
    }

    Ok(())
}

//! Command-line interface for the financial narrative tools

use agent_core::ToolOutput;
use agent_narrative::{NarrativeConfig, NarrativeToolkit};
use agent_tools::{Tool, ToolDefinition};
use agent_utils::{LogFormat, init_tracing, init_tracing_with};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "agent-cli")]
#[command(about = "Fetch FMP financials and assemble a financial narrative prompt", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Directory holding the cached data (overrides NARRATIVE_WORKSPACE_DIR)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// External report template (overrides NARRATIVE_TEMPLATE_PATH)
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch income statements and cache them
    Income {
        /// Stock ticker symbol
        ticker: String,
    },
    /// Fetch enterprise values and cache them
    Ev {
        /// Stock ticker symbol
        ticker: String,
    },
    /// Assemble the report prompt from cached data
    Narrative,
    /// Fetch both data sets, then assemble the prompt
    Report {
        /// Stock ticker symbol
        ticker: String,
    },
    /// List the available tools
    Tools {
        /// Print the raw tool definitions as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.log_json {
        init_tracing_with("info", LogFormat::Json);
    } else {
        init_tracing();
    }

    let mut builder = NarrativeConfig::builder();
    if let Some(dir) = cli.workspace {
        builder = builder.workspace_dir(dir);
    }
    if let Some(path) = cli.template {
        builder = builder.template_path(path);
    }
    let config = builder.with_env().build()?;

    let toolkit = NarrativeToolkit::from_config(&config).await?;
    info!(
        workspace = %config.workspace_dir.display(),
        template = toolkit.narrative.template().name(),
        template_version = toolkit.narrative.template().version(),
        "Narrative toolkit ready"
    );

    let success = match cli.command {
        Commands::Income { ticker } => run(toolkit.income.as_ref(), json!({ "ticker": ticker })).await,
        Commands::Ev { ticker } => {
            run(toolkit.enterprise_value.as_ref(), json!({ "ticker": ticker })).await
        }
        Commands::Narrative => run(toolkit.narrative.as_ref(), json!({})).await,
        Commands::Report { ticker } => {
            let params = json!({ "ticker": ticker });
            run(toolkit.income.as_ref(), params.clone()).await
                && run(toolkit.enterprise_value.as_ref(), params).await
                && run(toolkit.narrative.as_ref(), json!({})).await
        }
        Commands::Tools { json } => {
            let definitions: Vec<ToolDefinition> =
                toolkit.tools().iter().map(|tool| tool.definition()).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&definitions)?);
            } else {
                println!("{}", tools_table(&definitions));
            }
            true
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Execute one tool and print its observation; returns whether it succeeded
async fn run(tool: &dyn Tool, params: serde_json::Value) -> bool {
    info!(tool = tool.name(), "Running tool");
    let output = tool.execute(params).await;
    print_output(tool.name(), &output);
    output.success
}

fn print_output(name: &str, output: &ToolOutput) {
    if let Some(message) = output.failure_message() {
        eprintln!("{name} failed: {message}");
        return;
    }

    match serde_json::to_string_pretty(&output.observation) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{}", output.observation),
    }
}

fn tools_table(definitions: &[ToolDefinition]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Tool", "Parameters", "Description"]);

    for definition in definitions {
        let parameters = definition.input_schema["properties"]
            .as_object()
            .map(|props| props.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        table.add_row(vec![
            definition.name.clone(),
            if parameters.is_empty() {
                "-".to_string()
            } else {
                parameters
            },
            definition.description.clone(),
        ]);
    }

    table
}

use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rfstim::dispatch::{DispatchStatus, ExecuteOutcome};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct RunOutput<'a> {
    stim: &'a str,
    channel_type: &'a str,
    dispatch: String,
    status: Option<i32>,
    tasks_run: usize,
    request_bytes: usize,
    request_hex: String,
    frequency: Option<f64>,
    power: Option<f64>,
}

fn dispatch_summary(status: &DispatchStatus) -> (String, Option<i32>) {
    match status {
        DispatchStatus::Handled(code) => ("handled".to_string(), Some(*code)),
        DispatchStatus::HandlerAbsent { channel_type } => {
            (format!("no handler for {channel_type}"), None)
        }
        DispatchStatus::NoChannelType => ("no channel type".to_string(), None),
    }
}

fn hex_preview(bytes: &[u8]) -> String {
    const MAX: usize = 64;
    let shown: Vec<String> = bytes.iter().take(MAX).map(|b| format!("{b:02X}")).collect();
    let mut out = shown.join(" ");
    if bytes.len() > MAX {
        out.push_str(&format!(" ... ({} bytes total)", bytes.len()));
    }
    out
}

/// Print the result of one executed command cycle.
pub fn print_run(
    stim: &str,
    channel_type: &str,
    outcome: &ExecuteOutcome,
    frequency: Option<f64>,
    power: Option<f64>,
    format: OutputFormat,
) {
    let (dispatch, status) = dispatch_summary(&outcome.status);
    match format {
        OutputFormat::Json => {
            let out = RunOutput {
                stim,
                channel_type,
                dispatch,
                status,
                tasks_run: outcome.tasks_run,
                request_bytes: outcome.request.len(),
                request_hex: hex_preview(outcome.request.as_bytes()),
                frequency,
                power,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["STIM", "TYPE", "DISPATCH", "TASKS", "FREQ", "POWER"])
                .add_row(vec![
                    stim.to_string(),
                    channel_type.to_string(),
                    dispatch,
                    outcome.tasks_run.to_string(),
                    frequency.map_or_else(|| "-".to_string(), |f| f.to_string()),
                    power.map_or_else(|| "-".to_string(), |p| p.to_string()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "stim={stim} type={channel_type} dispatch={dispatch} tasks={} wire={} freq={:?} power={:?}",
                outcome.tasks_run,
                hex_preview(outcome.request.as_bytes()),
                frequency,
                power
            );
        }
    }
}

#[derive(Serialize)]
struct TableOutput<'a> {
    category: &'a str,
    columns: &'a [String],
    rows: &'a [Vec<String>],
}

/// Print one configuration category's materialized rows.
pub fn print_config_rows(
    category: &str,
    columns: &[String],
    rows: &[Vec<String>],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = TableOutput {
                category,
                columns,
                rows,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(columns.to_vec());
            for row in rows {
                table.add_row(row.clone());
            }
            println!("[{category}]");
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("[{category}] {}", columns.join(","));
            for row in rows {
                println!("{}", row.join(","));
            }
        }
    }
}

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use simstudio_client::WorkflowClient;

use crate::exit_codes;
use crate::output::{describe_client_error, print_error, print_result, OutputFormat};
use crate::{ConnectionArgs, OutputArgs, TimeoutArgs};

use super::config::{build_client, load_document, parse_timeout};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    workflow_id: String,
    #[serde(default)]
    input: Option<JsonValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum EntryStatus {
    Succeeded,
    Failed,
    Skipped,
    Error,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryResult {
    workflow_id: String,
    status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchResult {
    results: Vec<EntryResult>,
    succeeded: usize,
    total: usize,
}

pub async fn batch_cmd(
    path: &Path,
    timeout: TimeoutArgs,
    output: OutputArgs,
    connection: ConnectionArgs,
) -> i32 {
    let Some(timeout) = parse_timeout(&timeout, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };

    let Some(doc) = load_document(path, "manifest", &output) else {
        return exit_codes::RUNTIME_ERROR;
    };
    let entries: Vec<BatchEntry> = match serde_json::from_value(doc) {
        Ok(e) => e,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("invalid manifest (expected a list of {{workflowId, input}}): {e}"),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let Some(client) = build_client(&connection, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };

    let text = output.format == OutputFormat::Text && !output.quiet;
    let mut results = Vec::with_capacity(entries.len());
    for entry in entries {
        let result = run_entry(&client, entry, timeout).await;
        if text {
            match (result.status, result.error.as_deref()) {
                (EntryStatus::Succeeded, _) => println!("succeeded: {}", result.workflow_id),
                (EntryStatus::Skipped, _) => println!("skipped: {} (not deployed)", result.workflow_id),
                (_, Some(err)) => println!("failed: {}: {err}", result.workflow_id),
                (_, None) => println!("failed: {}", result.workflow_id),
            }
        }
        results.push(result);
    }

    let succeeded = results
        .iter()
        .filter(|r| r.status == EntryStatus::Succeeded)
        .count();
    let total = results
        .iter()
        .filter(|r| r.status != EntryStatus::Skipped)
        .count();

    if text {
        println!("summary: {succeeded}/{total} workflows completed successfully");
    } else {
        print_result(
            output.format,
            output.quiet,
            &BatchResult {
                results,
                succeeded,
                total,
            },
        );
    }

    if succeeded == total {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}

async fn run_entry(client: &WorkflowClient, entry: BatchEntry, timeout: Duration) -> EntryResult {
    if !client.validate(&entry.workflow_id).await {
        return EntryResult {
            workflow_id: entry.workflow_id,
            status: EntryStatus::Skipped,
            output: None,
            error: None,
        };
    }

    match client
        .execute_with_timeout(&entry.workflow_id, entry.input.as_ref(), timeout)
        .await
    {
        Ok(r) => EntryResult {
            workflow_id: entry.workflow_id,
            status: if r.success {
                EntryStatus::Succeeded
            } else {
                EntryStatus::Failed
            },
            output: r.output,
            error: r.error,
        },
        Err(e) => EntryResult {
            workflow_id: entry.workflow_id,
            status: EntryStatus::Error,
            output: None,
            error: Some(describe_client_error(&e)),
        },
    }
}

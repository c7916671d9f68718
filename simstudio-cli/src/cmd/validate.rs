use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_client_error, print_result, OutputFormat};
use crate::{ConnectionArgs, OutputArgs};

use super::config::build_client;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResult<'a> {
    workflow_id: &'a str,
    ready: bool,
}

pub async fn validate_cmd(
    workflow_id: &str,
    strict: bool,
    output: OutputArgs,
    connection: ConnectionArgs,
) -> i32 {
    let Some(client) = build_client(&connection, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };

    let ready = if strict {
        match client.validate_strict(workflow_id).await {
            Ok(r) => r,
            Err(e) => {
                print_client_error(output.format, output.quiet, &e);
                return exit_codes::RUNTIME_ERROR;
            }
        }
    } else {
        client.validate(workflow_id).await
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if ready {
            println!("ok: workflow {workflow_id} is deployed");
        } else {
            eprintln!("not ready: workflow {workflow_id} is not deployed");
        }
    } else {
        print_result(output.format, output.quiet, &ValidateResult { workflow_id, ready });
    }

    if ready {
        exit_codes::SUCCESS
    } else {
        exit_codes::NOT_READY
    }
}

use crate::exit_codes;
use crate::output::{print_client_error, print_error, print_result, OutputFormat};
use crate::{ConnectionArgs, InputArgs, OutputArgs, TimeoutArgs};

use super::config::{build_client, load_inputs, merge_set_inputs, parse_timeout};

pub async fn execute_cmd(
    workflow_id: &str,
    input: InputArgs,
    timeout: TimeoutArgs,
    output: OutputArgs,
    connection: ConnectionArgs,
) -> i32 {
    let Some(timeout) = parse_timeout(&timeout, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };

    let mut inputs = load_inputs(&input, &output);
    if inputs.is_none() && input.input.is_some() {
        return exit_codes::RUNTIME_ERROR;
    }
    if let Err(e) = merge_set_inputs(&mut inputs, &input.set_inputs) {
        print_error(output.format, output.quiet, &e);
        return exit_codes::RUNTIME_ERROR;
    }

    let Some(client) = build_client(&connection, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };

    let result = match client
        .execute_with_timeout(workflow_id, inputs.as_ref(), timeout)
        .await
    {
        Ok(r) => r,
        Err(e) => {
            print_client_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if output.format == OutputFormat::Text && !output.quiet && !result.success {
        eprintln!(
            "workflow failed: {}",
            result.error.as_deref().unwrap_or("no error message")
        );
    }
    print_result(output.format, output.quiet, &result);

    if result.success {
        exit_codes::SUCCESS
    } else {
        exit_codes::RUN_FAILED
    }
}

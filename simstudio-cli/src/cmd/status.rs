use crate::exit_codes;
use crate::output::{print_client_error, print_result, OutputFormat};
use crate::{ConnectionArgs, OutputArgs};

use super::config::build_client;

pub async fn status_cmd(workflow_id: &str, output: OutputArgs, connection: ConnectionArgs) -> i32 {
    let Some(client) = build_client(&connection, &output) else {
        return exit_codes::RUNTIME_ERROR;
    };

    let status = match client.get_status(workflow_id).await {
        Ok(s) => s,
        Err(e) => {
            print_client_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("workflow: {workflow_id}");
        println!("deployed: {}", status.is_deployed);
        println!("published: {}", status.is_published);
        println!("needs redeployment: {}", status.needs_redeployment);
        println!(
            "deployed at: {}",
            status.deployed_at.as_deref().unwrap_or("-")
        );
    } else {
        print_result(output.format, output.quiet, &status);
    }
    exit_codes::SUCCESS
}

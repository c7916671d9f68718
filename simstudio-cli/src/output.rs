use serde::Serialize;
use simstudio_client::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{json}");
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(result) {
                println!("{json}");
            }
        }
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}

pub fn print_client_error(format: OutputFormat, quiet: bool, err: &ClientError) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {
            eprintln!("error: {}", describe_client_error(err));
            if let Some(hint) = err.hint() {
                eprintln!("hint: {hint}");
            }
        }
        OutputFormat::Json => {
            let body = serde_json::json!({
                "error": err.message,
                "code": err.code,
                "httpStatus": err.http_status,
            });
            eprintln!("{}", serde_json::to_string(&body).unwrap_or_default());
        }
    }
}

/// `"message (code: X, status: N)"`, omitting whichever parts are absent.
pub fn describe_client_error(err: &ClientError) -> String {
    let mut details = Vec::new();
    if let Some(code) = err.code() {
        details.push(format!("code: {code}"));
    }
    if let Some(status) = err.http_status {
        details.push(format!("status: {status}"));
    }
    if details.is_empty() {
        err.message.clone()
    } else {
        format!("{} ({})", err.message, details.join(", "))
    }
}

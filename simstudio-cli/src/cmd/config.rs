use std::path::Path;
use std::time::Duration;

use simstudio_client::{ClientConfig, WorkflowClient};

use crate::output::print_error;
use crate::{ConnectionArgs, InputArgs, OutputArgs, TimeoutArgs};

pub const API_KEY_ENV: &str = "SIMSTUDIO_API_KEY";
pub const BASE_URL_ENV: &str = "SIMSTUDIO_BASE_URL";

pub fn build_client(connection: &ConnectionArgs, output: &OutputArgs) -> Option<WorkflowClient> {
    let api_key = match connection
        .api_key
        .clone()
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|k| !k.is_empty())
    {
        Some(k) => k,
        None => {
            print_error(
                output.format,
                output.quiet,
                &format!("missing API key: pass --api-key or set {API_KEY_ENV}"),
            );
            return None;
        }
    };

    let mut config = ClientConfig::new(api_key);
    if let Some(url) = connection
        .base_url
        .clone()
        .or_else(|| std::env::var(BASE_URL_ENV).ok())
        .filter(|u| !u.is_empty())
    {
        config.set_base_url(url);
    }

    match WorkflowClient::from_config(config) {
        Ok(c) => Some(c),
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            None
        }
    }
}

pub fn parse_timeout(timeout: &TimeoutArgs, output: &OutputArgs) -> Option<Duration> {
    match Duration::try_from_secs_f64(timeout.timeout) {
        Ok(d) if !d.is_zero() => Some(d),
        _ => {
            print_error(
                output.format,
                output.quiet,
                &format!("invalid timeout: {} (expected a positive number of seconds)", timeout.timeout),
            );
            None
        }
    }
}

/// Reads a JSON or YAML document from `path`.
pub fn load_document(path: &Path, what: &str, output: &OutputArgs) -> Option<serde_json::Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {what} {}: {e}", path.display()),
            );
            return None;
        }
    };
    if let Ok(v) = serde_json::from_str(&content) {
        return Some(v);
    }
    if let Ok(v) = serde_yaml::from_str(&content) {
        return Some(v);
    }
    print_error(
        output.format,
        output.quiet,
        &format!("{what} file is neither valid JSON nor YAML"),
    );
    None
}

pub fn load_inputs(input: &InputArgs, output: &OutputArgs) -> Option<serde_json::Value> {
    let path = input.input.as_deref()?;
    load_document(path, "input", output)
}

/// Applies `--set KEY=VALUE` pairs on top of the loaded inputs as string values.
pub fn merge_set_inputs(
    inputs: &mut Option<serde_json::Value>,
    set_inputs: &[String],
) -> Result<(), String> {
    if set_inputs.is_empty() {
        return Ok(());
    }
    let pairs = set_inputs
        .iter()
        .map(|s| {
            s.split_once('=')
                .ok_or_else(|| format!("invalid --set value {s:?} (expected KEY=VALUE)"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let obj = inputs.get_or_insert_with(|| serde_json::json!({}));
    if obj.is_null() {
        *obj = serde_json::json!({});
    }
    let Some(map) = obj.as_object_mut() else {
        return Err("--set requires the input to be a JSON object".to_string());
    };
    for (k, v) in pairs {
        map.insert(k.to_string(), serde_json::Value::String(v.to_string()));
    }
    Ok(())
}

use std::io::Read;
use std::process::ExitCode;

use condense::core::config::AppConfig;
use condense::core::models::SummarizeRequest;
use condense::features::{Summarizer, error_response};
use condense::SummarizeError;
use serde_json::Value;
use tracing::error;

const USAGE: &str = "usage: condense [--status | --options] < request.json";

fn print(value: &Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn fail(e: &SummarizeError) -> ExitCode {
    error!("{}", e);
    print(&serde_json::json!(error_response(e, false)));
    ExitCode::FAILURE
}

fn read_request() -> Result<SummarizeRequest, SummarizeError> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| SummarizeError::InvalidInput(format!("Failed to read stdin: {e}")))?;
    serde_json::from_str(&input).map_err(|e| SummarizeError::InvalidInput(format!("Invalid request JSON: {e}")))
}

#[tokio::main]
async fn main() -> ExitCode {
    condense::setup_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    let summarizer = match Summarizer::from_config(&config) {
        Ok(summarizer) => summarizer,
        Err(e) => return fail(&e),
    };

    match std::env::args().nth(1).as_deref() {
        Some("--status") => print(&serde_json::json!(summarizer.gateway_status())),
        Some("--options") => print(&serde_json::json!(summarizer.options())),
        Some(_) => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
        None => match read_request() {
            Ok(request) => {
                let envelope = summarizer.respond(&request).await;
                let ok = envelope["status"] == "success";
                let code = print(&envelope);
                if ok { code } else { ExitCode::FAILURE }
            }
            Err(e) => fail(&e),
        },
    }
}

//! Ask command handler.
//!
//! The client half of the protocol, for checking a gateway from any
//! machine: one question out, one reply back.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::commands::AskArgs;
use crate::error::CliError;

/// Execute the ask command.
pub async fn execute(args: AskArgs) -> Result<()> {
    let query = match args.query {
        Some(query) => query,
        None => read_query(&mut io::stdin().lock(), &mut io::stderr())?,
    };
    let query = validate_query(query)?;

    eprintln!("Connecting to {}:{}...", args.host, args.port);
    let reply = gemgate_proxy::ask((args.host.as_str(), args.port), &query)
        .await
        .map_err(|e| {
            CliError::Io(format!(
                "failed to reach gateway at {}:{}: {e}",
                args.host, args.port
            ))
        })?;

    if reply.is_empty() {
        return Err(CliError::Io("gateway closed the connection without a reply".into()).into());
    }

    println!("{reply}");
    Ok(())
}

/// Prompt for a question and read one line, without its line ending.
fn read_query<R: BufRead, W: Write>(input: &mut R, prompt_out: &mut W) -> Result<String, CliError> {
    write!(prompt_out, "Enter your question: ")?;
    prompt_out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

fn validate_query(query: String) -> Result<String, CliError> {
    if query.trim().is_empty() {
        return Err(CliError::Arguments("No query provided".to_string()));
    }
    Ok(query)
}

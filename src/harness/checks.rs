use std::fmt;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::{info, warn};

use super::client::McpClient;
use super::protocol::Response;
use crate::config::{transform, ServerConfig};
use crate::error::{GenError, Result};
use crate::project::{parse_document, read_document, DocumentFormat, ProjectDescriptor, Transport};

/// Load the configuration of a server under test.
///
/// Accepts a project descriptor (converted through the config transformer)
/// or a server configuration document, tried in that order.
pub fn load_server_config(path: &Path) -> Result<ServerConfig> {
    let content = read_document(path)?;
    let format = DocumentFormat::from_path(path);
    if let Ok(descriptor) = parse_document::<ProjectDescriptor>(path, &content, format) {
        return Ok(transform(&descriptor).server_config);
    }
    parse_document(path, &content, format)
}

/// A check `mcpcli test` can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Resources,
    Tools,
}

impl Check {
    pub fn method(self) -> &'static str {
        match self {
            Check::Resources => "resources/list",
            Check::Tools => "tools/list",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Check::Resources => "resources",
            Check::Tools => "tools",
        })
    }
}

/// Which checks to run and against which configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub config: PathBuf,
    pub all: bool,
    pub resources: bool,
    pub tools: bool,
}

impl CheckOptions {
    /// Selected checks in execution order.
    pub fn checks(&self) -> Vec<Check> {
        let mut checks = Vec::new();
        if self.all || self.resources {
            checks.push(Check::Resources);
        }
        if self.all || self.tools {
            checks.push(Check::Tools);
        }
        checks
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub check: Check,
    pub passed: bool,
    /// The server's result on success, its error message otherwise.
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }
}

/// Run the selected checks over an existing client. Request ids start at 1.
pub fn run_with_client<R: BufRead, W: Write>(
    client: &mut McpClient<R, W>,
    checks: &[Check],
) -> Result<CheckReport> {
    let mut report = CheckReport::default();
    for (id, &check) in (1i64..).zip(checks) {
        info!(%check, id, "running check");
        let response = client.call(check.method(), None, id)?;
        report.outcomes.push(outcome(check, response));
    }
    Ok(report)
}

fn outcome(check: Check, response: Response) -> CheckOutcome {
    match (response.error, response.result) {
        (Some(err), _) => CheckOutcome {
            check,
            passed: false,
            detail: format!("MCP error {}: {}", err.code, err.message),
        },
        (None, result) => CheckOutcome {
            check,
            passed: true,
            detail: result.map(|v| v.to_string()).unwrap_or_default(),
        },
    }
}

/// Connect to the server described by `config` and run the checks selected
/// in `options`.
///
/// A stdio server with a `command` option is spawned and spoken to over its
/// pipes; otherwise this process's own stdin/stdout are used.
pub fn run_checks(options: &CheckOptions, config: &ServerConfig) -> Result<CheckReport> {
    let checks = options.checks();
    let command = match config.transport.kind {
        Transport::Stdio => config
            .transport
            .option_str("command")
            .filter(|c| !c.trim().is_empty()),
        _ => None,
    };

    let Some(command) = command else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut client = McpClient::new(stdin.lock(), stdout.lock());
        return run_with_client(&mut client, &checks);
    };

    let mut child = spawn_server(command)?;
    let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
        return Err(GenError::Harness("server pipes unavailable".to_string()));
    };
    let mut client = McpClient::new(BufReader::new(stdout), stdin);
    let report = run_with_client(&mut client, &checks);
    drop(client);
    match child.wait() {
        Ok(status) if !status.success() => warn!(%status, "server exited with failure"),
        Ok(_) => {}
        Err(err) => warn!(error = %err, "failed to wait for server"),
    }
    report
}

fn spawn_server(command: &str) -> Result<Child> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| GenError::Harness(format!("invalid server command: {command:?}")))?;
    info!(command, "starting server");
    Command::new(program)
        .args(parts)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| GenError::Harness(format!("failed to start server {program:?}: {e}")))
}

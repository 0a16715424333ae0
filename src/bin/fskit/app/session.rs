use std::io::{self, BufRead, Write};

use serde::Deserialize;
use serde_json::Value;

use fskit::{FsError, Session, ToolContext, ToolRegistry};

#[derive(Debug, Deserialize)]
struct SessionLine {
    tool: String,
    #[serde(default = "empty_args")]
    args: Value,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Serve one JSON tool call per stdin line until EOF, sharing one session.
pub fn run_session(registry: &ToolRegistry, context: ToolContext) -> anyhow::Result<()> {
    let mut session = Session::new(context);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut served = 0usize;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let output = handle_line(registry, &mut session, &line);
        writeln!(stdout, "{output}")?;
        stdout.flush()?;
        served += 1;
    }
    log::info!("session closed after {served} calls");
    Ok(())
}

fn handle_line(registry: &ToolRegistry, session: &mut Session, line: &str) -> String {
    match serde_json::from_str::<SessionLine>(line) {
        Ok(call) => registry.execute(session, &call.tool, &call.args.to_string()),
        Err(err) => FsError::from(err).to_tool_output(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn todo_state_persists_across_lines() {
        let dir = tempdir().unwrap();
        let registry = ToolRegistry::new();
        let mut session = Session::new(ToolContext::new(dir.path()));

        let out = handle_line(
            &registry,
            &mut session,
            r#"{"tool": "todo", "args": {"operation": "write", "items": [{"id": 1, "content": "a"}]}}"#,
        );
        assert!(out.starts_with("Success"), "{out}");
        let out = handle_line(&registry, &mut session, r#"{"tool": "todo", "args": {"operation": "list"}}"#);
        assert!(out.contains("1. [ ] a (medium)"), "{out}");
    }

    #[test]
    fn malformed_lines_are_reported() {
        let dir = tempdir().unwrap();
        let registry = ToolRegistry::new();
        let mut session = Session::new(ToolContext::new(dir.path()));

        assert_eq!(
            handle_line(&registry, &mut session, r#"{"args": {}}"#),
            "Error: 'tool' parameter is required"
        );
        assert!(handle_line(&registry, &mut session, "nope").starts_with("Error: Invalid argument"));
    }

    #[test]
    fn missing_args_default_to_empty() {
        let dir = tempdir().unwrap();
        let registry = ToolRegistry::new();
        let mut session = Session::new(ToolContext::new(dir.path()));
        assert_eq!(
            handle_line(&registry, &mut session, r#"{"tool": "ls"}"#),
            "Directory '.' is empty"
        );
    }
}

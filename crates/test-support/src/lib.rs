use anyhow::Context as _;
use serde_json::{Value, json};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

pub struct KillOnDrop(pub Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = self.0.start_kill();
    }
}

/// Minimal MCP client speaking newline-delimited JSON-RPC to a child process over stdio.
///
/// This intentionally avoids re-implementing any MCP logic in production code; it exists only
/// for integration tests.
pub struct StdioMcpSession {
    _child: KillOnDrop,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
}

impl StdioMcpSession {
    /// Spawn `bin` with `args` and complete the `initialize` handshake.
    ///
    /// The child's stderr is inherited so server logs show up in test output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or the handshake does not complete
    /// within `timeout_dur`.
    pub async fn spawn(bin: &str, args: &[&str], timeout_dur: Duration) -> anyhow::Result<Self> {
        let mut child = Command::new(bin)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("spawn {bin}"))?;

        let stdin = child.stdin.take().context("child stdin")?;
        let stdout = child.stdout.take().context("child stdout")?;

        let mut session = Self {
            _child: KillOnDrop(child),
            stdin,
            stdout: BufReader::new(stdout).lines(),
            next_id: 0,
        };

        let init = session
            .request(
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "unrelated-integration-tests", "version": "0" }
                }),
                timeout_dur,
            )
            .await?;
        anyhow::ensure!(init.get("result").is_some(), "initialize failed: {init}");

        session.notify("notifications/initialized").await?;
        Ok(session)
    }

    /// Send a request and wait for the response carrying the same id.
    ///
    /// Returns the whole JSON-RPC message so callers can inspect `result` or `error`.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, malformed output, EOF, or timeout.
    pub async fn request(
        &mut self,
        method: &str,
        params: Value,
        timeout_dur: Duration,
    ) -> anyhow::Result<Value> {
        let id = self.next_id;
        self.next_id += 1;

        self.write_message(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        }))
        .await?;

        tokio::time::timeout(timeout_dur, self.read_response(id))
            .await
            .with_context(|| format!("timeout waiting for response to {method}"))?
    }

    /// Send a parameterless notification (no response expected).
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the child's stdin fails.
    pub async fn notify(&mut self, method: &str) -> anyhow::Result<()> {
        self.write_message(&json!({ "jsonrpc": "2.0", "method": method }))
            .await
    }

    async fn write_message(&mut self, msg: &Value) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(msg)?;
        line.push('\n');
        self.stdin
            .write_all(line.as_bytes())
            .await
            .context("write to child stdin")?;
        self.stdin.flush().await.context("flush child stdin")?;
        Ok(())
    }

    async fn read_response(&mut self, id: u64) -> anyhow::Result<Value> {
        while let Some(line) = self.stdout.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let msg: Value = serde_json::from_str(line)
                .with_context(|| format!("child wrote non-JSON line: {line}"))?;
            // Skip server-initiated notifications/requests.
            if msg.get("id") == Some(&json!(id)) && msg.get("method").is_none() {
                return Ok(msg);
            }
        }
        anyhow::bail!("child closed stdout before responding to request {id}")
    }
}

/// Text of the first content block of a successful `tools/call` response.
///
/// # Errors
///
/// Returns an error if the message is a JSON-RPC error or has no text content.
pub fn tool_call_text(msg: &Value) -> anyhow::Result<String> {
    let result = msg
        .get("result")
        .with_context(|| format!("tools/call missing result: {msg}"))?;
    result
        .get("content")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|c| c.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .context("tools/call missing result.content[0].text")
}

/// `(code, message)` of a JSON-RPC error response.
///
/// # Errors
///
/// Returns an error if the message is not an error response.
pub fn jsonrpc_error(msg: &Value) -> anyhow::Result<(i64, String)> {
    let error = msg
        .get("error")
        .with_context(|| format!("expected JSON-RPC error, got: {msg}"))?;
    let code = error
        .get("code")
        .and_then(Value::as_i64)
        .context("error.code")?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .context("error.message")?
        .to_string();
    Ok((code, message))
}

//! Script execution tool
//!
//! Runs a local script with the interpreter matching its extension. The
//! script's own directory is the child's working directory; the host process
//! never changes directory. No time limit is applied.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;

use crate::tools::handler::{required_str, ToolHandler};
use crate::types::{Tool, ToolOutcome};

/// Extensions `find_script` tries, in order
pub const SCRIPT_EXTENSIONS: &[&str] = &[".py", ".js", ".sh", ".bash", ".ps1", ".html"];

/// How a script gets launched
#[derive(Debug, Clone, PartialEq, Eq)]
enum Launch {
    /// Interpreter program and the arguments placed before the script name
    Interpreter(&'static str, &'static [&'static str]),
    /// Hand the file to the platform's default browser
    Browser,
}

fn launch_for(extension: &str) -> Option<Launch> {
    match extension {
        ".py" if cfg!(windows) => Some(Launch::Interpreter("py", &[])),
        ".py" => Some(Launch::Interpreter("python3", &[])),
        ".js" => Some(Launch::Interpreter("node", &[])),
        ".sh" | ".bash" => Some(Launch::Interpreter("bash", &[])),
        ".ps1" if cfg!(windows) => Some(Launch::Interpreter("powershell", &["-File"])),
        ".ps1" => Some(Launch::Interpreter("pwsh", &["-File"])),
        ".html" => Some(Launch::Browser),
        _ => None,
    }
}

/// Lower-cased extension including the dot, or empty
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Resolve a script path, trying the supported extensions when the bare path
/// is not a file
pub fn find_script(script_path: &str) -> Option<PathBuf> {
    let path = PathBuf::from(script_path);
    if path.is_file() {
        return Some(path);
    }
    SCRIPT_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("{}{}", script_path, ext)))
        .find(|candidate| candidate.is_file())
}

/// Run a script and narrate what happened
pub async fn execute_script(path: &Path) -> ToolOutcome {
    let extension = extension_of(path);
    let launch = match launch_for(&extension) {
        Some(launch) => launch,
        None => return ToolOutcome::failed(format!("Unsupported file type: {}", extension)),
    };

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(e) => return ToolOutcome::failed(format!("Error executing the script: {}", e)),
        }
    };
    if !absolute.is_file() {
        return ToolOutcome::failed(format!(
            "Error executing the script: no such file: {}",
            path.display()
        ));
    }

    match launch {
        Launch::Browser => match open_in_browser(&absolute).await {
            Ok(()) => ToolOutcome::ok("HTML file opened in default web browser."),
            Err(e) => ToolOutcome::failed(format!("Error executing the script: {}", e)),
        },
        Launch::Interpreter(program, args) => {
            let (dir, file_name) = match (absolute.parent(), absolute.file_name()) {
                (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_os_string()),
                _ => {
                    return ToolOutcome::failed(format!(
                        "Error executing the script: invalid path: {}",
                        path.display()
                    ))
                }
            };

            let output = Command::new(program)
                .args(args)
                .arg(&file_name)
                .current_dir(&dir)
                .output()
                .await;

            match output {
                Ok(output) if output.status.success() => ToolOutcome::ok(format!(
                    "Script executed successfully: Output:\n{}",
                    String::from_utf8_lossy(&output.stdout)
                )),
                Ok(output) => ToolOutcome::failed(format!(
                    "Script execution failed - Error:\n{}",
                    String::from_utf8_lossy(&output.stderr)
                )),
                Err(e) => ToolOutcome::failed(format!("Error executing the script: {}", e)),
            }
        }
    }
}

async fn open_in_browser(path: &Path) -> std::io::Result<()> {
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    let status = command.arg(path).status().await?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("browser launcher exited with {}", status),
        ))
    }
}

/// `execute_script`: run a Python, JavaScript, Bash or PowerShell script
#[derive(Debug, Default)]
pub struct ExecuteScript;

#[async_trait]
impl ToolHandler for ExecuteScript {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "execute_script",
            "Execute a script at the specified path. Supports Python, JavaScript, Bash, and PowerShell scripts; HTML files are opened in the browser.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path of the script to execute"
                }
            },
            "required": ["path"]
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome {
        match required_str(input, "path", "executing the script") {
            Ok(path) => execute_script(Path::new(path)).await,
            Err(failed) => failed,
        }
    }
}

//! File and folder tools

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::fs;

use crate::tools::handler::{required_str, ToolHandler};
use crate::types::{Tool, ToolOutcome};

/// `create_folder`: create a directory and any missing parents
#[derive(Debug, Default)]
pub struct CreateFolder;

#[async_trait]
impl ToolHandler for CreateFolder {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "create_folder",
            "Create a new folder at the specified path. Use this when you need to create a new directory in the project structure.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path where the folder should be created"
                }
            },
            "required": ["path"]
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome {
        let path = match required_str(input, "path", "creating folder") {
            Ok(path) => path,
            Err(failed) => return failed,
        };
        match fs::create_dir_all(path).await {
            Ok(()) => ToolOutcome::ok(format!("Folder created: {}", path)),
            Err(e) => ToolOutcome::failed(format!("Error creating folder: {}", e)),
        }
    }
}

/// `create_file`: create (or truncate) a file with optional initial content
#[derive(Debug, Default)]
pub struct CreateFile;

#[async_trait]
impl ToolHandler for CreateFile {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "create_file",
            "Create a new file at the specified path with optional content. Use this when you need to create a new file in the project structure.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path where the file should be created"
                },
                "content": {
                    "type": "string",
                    "description": "The initial content of the file (optional)"
                }
            },
            "required": ["path"]
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome {
        let path = match required_str(input, "path", "creating file") {
            Ok(path) => path,
            Err(failed) => return failed,
        };
        let content = input.get("content").and_then(Value::as_str).unwrap_or("");
        match fs::write(path, content).await {
            Ok(()) => ToolOutcome::ok(format!("File created: {}", path)),
            Err(e) => ToolOutcome::failed(format!("Error creating file: {}", e)),
        }
    }
}

/// `write_to_file`: replace a file's content
#[derive(Debug, Default)]
pub struct WriteToFile;

#[async_trait]
impl ToolHandler for WriteToFile {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "write_to_file",
            "Write content to an existing file at the specified path. Use this when you need to add or update content in an existing file.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path of the file to write to"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file"
                }
            },
            "required": ["path", "content"]
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome {
        let path = match required_str(input, "path", "writing to file") {
            Ok(path) => path,
            Err(failed) => return failed,
        };
        // A missing content empties the file
        let content = input.get("content").and_then(Value::as_str).unwrap_or("");
        match fs::write(path, content).await {
            Ok(()) => ToolOutcome::ok(format!("Content written to file: {}", path)),
            Err(e) => ToolOutcome::failed(format!("Error writing to file: {}", e)),
        }
    }
}

/// `read_file`: return a file's content as text
#[derive(Debug, Default)]
pub struct ReadFile;

#[async_trait]
impl ToolHandler for ReadFile {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "read_file",
            "Read the contents of a file at the specified path. Use this when you need to examine the contents of an existing file.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path of the file to read"
                }
            },
            "required": ["path"]
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome {
        let path = match required_str(input, "path", "reading file") {
            Ok(path) => path,
            Err(failed) => return failed,
        };
        match fs::read_to_string(path).await {
            Ok(content) => ToolOutcome::ok(content),
            Err(_) => ToolOutcome::failed(format!("Error reading file: {}", path)),
        }
    }
}

/// `list_files`: newline-separated entry names of a directory
#[derive(Debug, Default)]
pub struct ListFiles;

#[async_trait]
impl ToolHandler for ListFiles {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "list_files",
            "List all files and directories in the specified folder (default: the current directory). Use this when you need to see the contents of a directory.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path of the folder to list (default: current directory)"
                }
            }
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome {
        let path = input.get("path").and_then(Value::as_str).unwrap_or(".");
        match list_dir(path).await {
            Ok(names) => ToolOutcome::ok(names.join("\n")),
            Err(e) => ToolOutcome::failed(format!("Error listing files: {}", e)),
        }
    }
}

async fn list_dir(path: &str) -> std::io::Result<Vec<String>> {
    let mut entries = fs::read_dir(path).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn path_arg(path: &std::path::Path) -> Value {
        json!({ "path": path.to_string_lossy() })
    }

    #[tokio::test]
    async fn test_create_folder_is_idempotent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a").join("b");

        let first = CreateFolder.execute(&path_arg(&target)).await;
        let second = CreateFolder.execute(&path_arg(&target)).await;

        assert!(!first.is_failure());
        assert!(!second.is_failure());
        assert!(second.text().starts_with("Folder created:"));
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_create_file_twice() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("notes.txt");
        let input = json!({ "path": target.to_string_lossy(), "content": "hello" });

        assert!(!CreateFile.execute(&input).await.is_failure());
        let second = CreateFile.execute(&input).await;
        assert_eq!(second, ToolOutcome::ok(format!("File created: {}", target.to_string_lossy())));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_create_file_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("empty.txt");

        assert!(!CreateFile.execute(&path_arg(&target)).await.is_failure());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "");
    }

    #[tokio::test]
    async fn test_create_file_in_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nope").join("file.txt");

        let outcome = CreateFile.execute(&path_arg(&target)).await;
        assert!(outcome.is_failure());
        assert!(outcome.text().starts_with("Error creating file:"));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("data.txt");
        let input = json!({ "path": target.to_string_lossy(), "content": "line 1\nline 2" });

        let written = WriteToFile.execute(&input).await;
        assert!(written.text().starts_with("Content written to file:"));

        let read = ReadFile.execute(&path_arg(&target)).await;
        assert_eq!(read, ToolOutcome::ok("line 1\nline 2"));
    }

    #[tokio::test]
    async fn test_write_without_content_empties_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("x.txt");
        std::fs::write(&target, "old").unwrap();

        let outcome = WriteToFile.execute(&path_arg(&target)).await;
        assert_eq!(
            outcome,
            ToolOutcome::ok(format!("Content written to file: {}", target.to_string_lossy()))
        );
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "");
    }

    #[tokio::test]
    async fn test_write_requires_path() {
        let outcome = WriteToFile.execute(&json!({ "content": "x" })).await;
        assert_eq!(
            outcome,
            ToolOutcome::failed("Error writing to file: missing required argument 'path'")
        );
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("missing.txt");

        let outcome = ReadFile.execute(&path_arg(&target)).await;
        assert_eq!(
            outcome,
            ToolOutcome::failed(format!("Error reading file: {}", target.to_string_lossy()))
        );
    }

    #[tokio::test]
    async fn test_list_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let outcome = ListFiles.execute(&path_arg(dir.path())).await;
        assert_eq!(outcome, ToolOutcome::ok("a.txt\nb.txt\nsub"));
    }

    #[tokio::test]
    async fn test_list_missing_dir() {
        let dir = tempdir().unwrap();
        let outcome = ListFiles.execute(&path_arg(&dir.path().join("ghost"))).await;
        assert!(outcome.is_failure());
        assert!(outcome.text().starts_with("Error listing files:"));
    }

    #[tokio::test]
    async fn test_missing_path_argument() {
        let outcome = CreateFolder.execute(&json!({})).await;
        assert_eq!(
            outcome,
            ToolOutcome::failed("Error creating folder: missing required argument 'path'")
        );
    }
}

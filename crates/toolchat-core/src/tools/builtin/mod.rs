//! Built-in tools: files and folders, script execution, web search

mod fs;
mod script;
mod search;

use std::sync::Arc;

use crate::logging::Logger;
use super::handler::ToolHandler;

pub use fs::{CreateFile, CreateFolder, ListFiles, ReadFile, WriteToFile};
pub use script::{execute_script, find_script, ExecuteScript, SCRIPT_EXTENSIONS};
pub use search::TavilySearch;

/// Every built-in tool, in catalog order
pub fn builtin_tools(search_api_key: Option<String>, logger: Arc<dyn Logger>) -> Vec<Arc<dyn ToolHandler>> {
    vec![
        Arc::new(CreateFolder),
        Arc::new(CreateFile),
        Arc::new(WriteToFile),
        Arc::new(ReadFile),
        Arc::new(ListFiles),
        Arc::new(TavilySearch::new(search_api_key, logger)),
        Arc::new(ExecuteScript),
    ]
}

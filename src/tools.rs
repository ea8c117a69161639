//! Caller-facing operations over chat modes, instructions and memory
//!
//! Every operation reports its outcome as a [`ToolResponse`] carrying a
//! human-readable message. Library errors never escape this layer; they are
//! logged and rendered into the message instead.

use crate::config::Config;
use crate::error::{ErrorSeverity, PromptMatterError};
use crate::io::DocumentSummary;
use crate::prompts::chatmode::tools_of;
use crate::prompts::{onboarding_prompt, ChatModeManager, InstructionManager};
use log::{debug, error, info, warn};
use std::fmt::{self, Write as _};

pub const READ_ONLY_MESSAGE: &str = "Error: Server is running in read-only mode";

/// Outcome of one tool operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    pub message: String,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    /// Render a library error, logging it at a level matching its severity
    fn failed(action: &str, target: &str, err: PromptMatterError) -> Self {
        let severity = err.severity();
        let message = format!("Error {} '{}': {}", action, target, err);
        if severity >= ErrorSeverity::High {
            error!("[{}] {}", severity, message);
        } else {
            warn!("[{}] {}", severity, message);
        }
        Self::error(message)
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for ToolResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Split a comma separated tool list, dropping empty entries
pub fn parse_tools(tools: &str) -> Vec<String> {
    tools
        .split(',')
        .map(str::trim)
        .filter(|tool| !tool.is_empty())
        .map(str::to_string)
        .collect()
}

/// The full tool surface over one prompts directory
#[derive(Debug, Clone)]
pub struct ModeManagerTools {
    chatmodes: ChatModeManager,
    instructions: InstructionManager,
    read_only: bool,
}

impl ModeManagerTools {
    pub fn new(config: &Config) -> Self {
        Self {
            chatmodes: ChatModeManager::new(config),
            instructions: InstructionManager::new(config),
            read_only: config.read_only,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn chatmodes(&self) -> &ChatModeManager {
        &self.chatmodes
    }

    pub fn instructions(&self) -> &InstructionManager {
        &self.instructions
    }

    pub fn list_chatmodes(&self) -> ToolResponse {
        match self.chatmodes.list() {
            Ok(summaries) if summaries.is_empty() => {
                ToolResponse::ok("No VS Code chatmode files found in the prompts directory")
            }
            Ok(summaries) => ToolResponse::ok(render_listing("chatmode", &summaries, true)),
            Err(e) => {
                error!("Error listing chatmodes: {}", e);
                ToolResponse::error(format!("Error listing VS Code chatmodes: {}", e))
            }
        }
    }

    pub fn get_chatmode(&self, filename: &str) -> ToolResponse {
        match self.chatmodes.get_raw(filename) {
            Ok(raw) => ToolResponse::ok(raw),
            Err(e) => ToolResponse::failed("getting VS Code chatmode", filename, e),
        }
    }

    /// Create a chat mode; `tools` is a comma separated list
    pub fn create_chatmode(
        &self,
        filename: &str,
        description: &str,
        content: &str,
        tools: Option<&str>,
    ) -> ToolResponse {
        if self.read_only {
            return ToolResponse::error(READ_ONLY_MESSAGE);
        }
        let tools = tools.map(parse_tools).filter(|tools| !tools.is_empty());

        match self.chatmodes.create(filename, description, content, tools) {
            Ok(_) => ToolResponse::ok(format!("Successfully created VS Code chatmode: {}", filename)),
            Err(e) => ToolResponse::failed("creating VS Code chatmode", filename, e),
        }
    }

    pub fn update_chatmode(
        &self,
        filename: &str,
        description: Option<&str>,
        content: Option<&str>,
        tools: Option<&str>,
    ) -> ToolResponse {
        if self.read_only {
            return ToolResponse::error(READ_ONLY_MESSAGE);
        }

        match self
            .chatmodes
            .update(filename, description, content, tools.map(parse_tools))
        {
            Ok(()) => ToolResponse::ok(format!("Successfully updated VS Code chatmode: {}", filename)),
            Err(e) => ToolResponse::failed("updating VS Code chatmode", filename, e),
        }
    }

    pub fn delete_chatmode(&self, filename: &str) -> ToolResponse {
        if self.read_only {
            return ToolResponse::error(READ_ONLY_MESSAGE);
        }

        match self.chatmodes.delete(filename) {
            Ok(()) => ToolResponse::ok(format!("Successfully deleted VS Code chatmode: {}", filename)),
            Err(e) => ToolResponse::failed("deleting VS Code chatmode", filename, e),
        }
    }

    pub fn list_instructions(&self) -> ToolResponse {
        match self.instructions.list() {
            Ok(summaries) if summaries.is_empty() => {
                ToolResponse::ok("No VS Code instruction files found in the prompts directory")
            }
            Ok(summaries) => ToolResponse::ok(render_listing("instruction", &summaries, false)),
            Err(e) => {
                error!("Error listing instructions: {}", e);
                ToolResponse::error(format!("Error listing VS Code instructions: {}", e))
            }
        }
    }

    pub fn get_instruction(&self, filename: &str) -> ToolResponse {
        match self.instructions.get_raw(filename) {
            Ok(raw) => ToolResponse::ok(raw),
            Err(e) => ToolResponse::failed("getting VS Code instruction", filename, e),
        }
    }

    pub fn create_instruction(&self, filename: &str, description: &str, content: &str) -> ToolResponse {
        if self.read_only {
            return ToolResponse::error(READ_ONLY_MESSAGE);
        }

        match self.instructions.create(filename, description, content) {
            Ok(_) => ToolResponse::ok(format!("Successfully created VS Code instruction: {}", filename)),
            Err(e) => ToolResponse::failed("creating VS Code instruction", filename, e),
        }
    }

    pub fn update_instruction(
        &self,
        filename: &str,
        description: Option<&str>,
        content: Option<&str>,
    ) -> ToolResponse {
        if self.read_only {
            return ToolResponse::error(READ_ONLY_MESSAGE);
        }

        match self.instructions.update(filename, description, content) {
            Ok(()) => ToolResponse::ok(format!("Successfully updated VS Code instruction: {}", filename)),
            Err(e) => ToolResponse::failed("updating VS Code instruction", filename, e),
        }
    }

    pub fn delete_instruction(&self, filename: &str) -> ToolResponse {
        if self.read_only {
            return ToolResponse::error(READ_ONLY_MESSAGE);
        }

        match self.instructions.delete(filename) {
            Ok(()) => ToolResponse::ok(format!("Successfully deleted VS Code instruction: {}", filename)),
            Err(e) => ToolResponse::failed("deleting VS Code instruction", filename, e),
        }
    }

    /// Store a memory item, optionally scoped to one language
    pub fn remember(&self, item: &str, language: Option<&str>) -> ToolResponse {
        if self.read_only {
            return ToolResponse::error(READ_ONLY_MESSAGE);
        }
        if item.trim().is_empty() {
            return ToolResponse::error("Error: No memory item provided.");
        }

        match self.instructions.remember(item, language) {
            Ok(path) => {
                info!("Stored memory in {}", path.display());
                ToolResponse::ok(format!(
                    "Remembered: {}\nThis memory will be available to AI assistants when the memory instruction is active in VS Code.",
                    item
                ))
            }
            Err(e) => ToolResponse::failed("remembering", item, e),
        }
    }

    /// Steps for an assistant to set up the memory file with the user
    pub fn onboarding(&self) -> ToolResponse {
        ToolResponse::ok(onboarding_prompt())
    }

    /// Describe the prompts directory and the files it holds
    pub fn get_prompts_directory(&self) -> ToolResponse {
        let dir = self.chatmodes.prompts_dir();
        let exists = dir.is_dir();
        debug!("Describing prompts directory {}", dir.display());

        let mut out = String::new();
        let _ = writeln!(out, "VS Code Prompts Directory: {}", dir.display());
        let _ = writeln!(out, "Exists: {}", if exists { "Yes" } else { "No" });
        if !exists {
            return ToolResponse::ok(out);
        }

        let listings = self.chatmodes.list().and_then(|chatmodes| {
            self.instructions
                .list()
                .map(|instructions| (chatmodes, instructions))
        });
        let (chatmodes, instructions) = match listings {
            Ok(listings) => listings,
            Err(e) => {
                error!("Error getting prompts directory info: {}", e);
                return ToolResponse::error(format!("Error getting prompts directory info: {}", e));
            }
        };

        let _ = writeln!(out, "Chatmode files: {}", chatmodes.len());
        let _ = writeln!(out, "Instruction files: {}", instructions.len());
        for (title, summaries) in [("Chatmode files:", &chatmodes), ("Instruction files:", &instructions)] {
            if summaries.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{}", title);
            for summary in summaries {
                let _ = writeln!(out, "  - {}", summary.filename);
            }
        }
        ToolResponse::ok(out)
    }
}

fn render_listing(kind: &str, summaries: &[DocumentSummary], show_tools: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} VS Code {}(s):\n", summaries.len(), kind);
    for summary in summaries {
        let _ = writeln!(out, "{}", summary.name);
        let _ = writeln!(out, "   File: {}", summary.filename);
        if let Some(description) = summary.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "   Description: {}", description);
        }
        let tools = tools_of(&summary.metadata);
        if show_tools && !tools.is_empty() {
            let _ = writeln!(out, "   Tools: {} available", tools.len());
        }
        let _ = writeln!(out, "   Size: {} bytes", summary.size);
        if !summary.preview.is_empty() {
            let _ = writeln!(out, "   Preview: {}...", summary.preview);
        }
        out.push('\n');
    }
    out
}

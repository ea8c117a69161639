//! Command-line argument definitions
//!
//! Global options resolve the prompts directory and read-only mode from flags
//! or the environment; subcommands map one-to-one onto tool operations.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser, Debug)]
#[command(
    name = "promptmatter",
    version,
    about = "Manage VS Code chat mode and instruction files",
    long_about = "promptmatter lists, reads, creates, updates and deletes the \
                  .chatmode.md and .instructions.md files in a VS Code prompts \
                  directory, and keeps a personal memory instruction file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the prompt files
    #[arg(long, global = true, env = "MCP_PROMPTS_DIRECTORY", value_name = "DIR")]
    pub prompts_dir: Option<PathBuf>,

    /// Refuse every operation that would modify files
    #[arg(long, global = true, env = "MCP_CHATMODE_READ_ONLY")]
    pub read_only: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage chat mode files
    #[command(subcommand)]
    Chatmode(ChatmodeCommand),
    /// Manage instruction files
    #[command(subcommand)]
    Instruction(InstructionCommand),
    /// Append an item to the personal memory file
    Remember(RememberArgs),
    /// Show the prompts directory and its files
    PromptsDir,
    /// Print the memory onboarding instructions
    Onboarding,
}

#[derive(Subcommand, Debug)]
pub enum ChatmodeCommand {
    /// List chat mode files
    List(ListArgs),
    /// Print a chat mode file
    Get(GetArgs),
    /// Create a new chat mode file
    Create(CreateChatmodeArgs),
    /// Update a chat mode's description, content or tools
    Update(UpdateChatmodeArgs),
    /// Delete a chat mode file
    Delete(FileArg),
}

#[derive(Subcommand, Debug)]
pub enum InstructionCommand {
    /// List instruction files
    List(ListArgs),
    /// Print an instruction file
    Get(GetArgs),
    /// Create a new instruction file
    Create(CreateInstructionArgs),
    /// Update an instruction's description or content
    Update(UpdateInstructionArgs),
    /// Delete an instruction file
    Delete(FileArg),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Print the summaries as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// File name, with or without its extension
    pub filename: String,

    /// Print only the frontmatter, as YAML
    #[arg(long)]
    pub metadata: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FileArg {
    /// File name, with or without its extension
    pub filename: String,
}

#[derive(Args, Debug, Clone)]
pub struct CreateChatmodeArgs {
    pub filename: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub content: String,

    /// Comma separated tool names
    #[arg(long)]
    pub tools: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateChatmodeArgs {
    pub filename: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    /// Comma separated tool names; replaces the existing list
    #[arg(long)]
    pub tools: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CreateInstructionArgs {
    pub filename: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub content: String,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateInstructionArgs {
    pub filename: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RememberArgs {
    /// The information to remember
    pub item: String,

    /// Keep the memory in a language-specific file
    #[arg(long)]
    pub language: Option<String>,
}

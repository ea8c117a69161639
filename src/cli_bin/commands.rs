//! CLI command handlers that bridge CLI arguments to tool operations
//!
//! Each handler returns the [`ToolResponse`] to print; `--json` and
//! `--metadata` render through the typed managers instead.

use crate::cli_bin::args::*;
use log::debug;
use promptmatter::error::Result;
use promptmatter::{DocumentSummary, Metadata, ModeManagerTools, ToolResponse};

/// Dispatch a parsed command
pub fn run(command: Commands, tools: &ModeManagerTools) -> Result<ToolResponse> {
    debug!("Executing command: {:?}", command);

    match command {
        Commands::Chatmode(command) => chatmode_command(command, tools),
        Commands::Instruction(command) => instruction_command(command, tools),
        Commands::Remember(args) => Ok(tools.remember(&args.item, args.language.as_deref())),
        Commands::PromptsDir => Ok(tools.get_prompts_directory()),
        Commands::Onboarding => Ok(tools.onboarding()),
    }
}

fn chatmode_command(command: ChatmodeCommand, tools: &ModeManagerTools) -> Result<ToolResponse> {
    let response = match command {
        ChatmodeCommand::List(args) if args.json => summaries_json(&tools.chatmodes().list()?)?,
        ChatmodeCommand::List(_) => tools.list_chatmodes(),
        ChatmodeCommand::Get(args) if args.metadata => {
            metadata_yaml(tools.chatmodes().get(&args.filename)?.metadata())?
        }
        ChatmodeCommand::Get(args) => tools.get_chatmode(&args.filename),
        ChatmodeCommand::Create(args) => tools.create_chatmode(
            &args.filename,
            &args.description,
            &args.content,
            args.tools.as_deref(),
        ),
        ChatmodeCommand::Update(args) => tools.update_chatmode(
            &args.filename,
            args.description.as_deref(),
            args.content.as_deref(),
            args.tools.as_deref(),
        ),
        ChatmodeCommand::Delete(args) => tools.delete_chatmode(&args.filename),
    };
    Ok(response)
}

fn instruction_command(
    command: InstructionCommand,
    tools: &ModeManagerTools,
) -> Result<ToolResponse> {
    let response = match command {
        InstructionCommand::List(args) if args.json => {
            summaries_json(&tools.instructions().list()?)?
        }
        InstructionCommand::List(_) => tools.list_instructions(),
        InstructionCommand::Get(args) if args.metadata => {
            metadata_yaml(tools.instructions().get(&args.filename)?.metadata())?
        }
        InstructionCommand::Get(args) => tools.get_instruction(&args.filename),
        InstructionCommand::Create(args) => {
            tools.create_instruction(&args.filename, &args.description, &args.content)
        }
        InstructionCommand::Update(args) => tools.update_instruction(
            &args.filename,
            args.description.as_deref(),
            args.content.as_deref(),
        ),
        InstructionCommand::Delete(args) => tools.delete_instruction(&args.filename),
    };
    Ok(response)
}

fn summaries_json(summaries: &[DocumentSummary]) -> Result<ToolResponse> {
    Ok(ToolResponse::ok(serde_json::to_string_pretty(summaries)?))
}

fn metadata_yaml(metadata: &Metadata) -> Result<ToolResponse> {
    let yaml = serde_yaml::to_string(metadata)?;
    Ok(ToolResponse::ok(yaml.trim_end().to_string()))
}

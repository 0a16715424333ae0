use std::io::{self, Read};

use anyhow::Context;

use fskit::tools::{BashArgs, EditCommand, GrepArgs, LsArgs, ToolCall, TreeArgs};
use fskit::{Session, ToolContext, ToolRegistry};

use crate::args::Command;

/// Run a single subcommand and print its result.
pub fn run_one_shot(
    registry: &ToolRegistry,
    context: ToolContext,
    command: Command,
) -> anyhow::Result<()> {
    let mut session = Session::new(context);
    let output = match to_call(command)? {
        Call::Typed(call) => registry.run(&mut session, call),
        Call::Raw { tool, args } => registry.execute(&mut session, &tool, &args),
    };
    println!("{output}");
    Ok(())
}

enum Call {
    Typed(ToolCall),
    Raw { tool: String, args: String },
}

fn to_call(command: Command) -> anyhow::Result<Call> {
    let call = match command {
        Command::Ls {
            path,
            show_hidden,
            long_format,
            recursive,
        } => ToolCall::Ls(LsArgs {
            path,
            show_hidden,
            long_format,
            recursive,
        }),
        Command::Tree {
            path,
            max_depth,
            show_hidden,
            dirs_only,
        } => ToolCall::Tree(TreeArgs {
            path,
            max_depth,
            show_hidden,
            dirs_only,
        }),
        Command::Grep {
            pattern,
            path,
            file_pattern,
            case_insensitive,
            context_lines,
            max_results,
        } => ToolCall::Grep(GrepArgs {
            pattern,
            path,
            file_pattern,
            case_insensitive,
            context_lines,
            max_results,
        }),
        Command::View {
            path,
            start_line,
            end_line,
        } => ToolCall::TextEditor(EditCommand::View {
            file_path: path,
            start_line,
            end_line,
        }),
        Command::Create { path, content } => ToolCall::TextEditor(EditCommand::Create {
            file_path: path,
            content: content_or_stdin(content)?,
        }),
        Command::Insert {
            path,
            line_number,
            content,
        } => ToolCall::TextEditor(EditCommand::Insert {
            file_path: path,
            line_number,
            content: content_or_stdin(content)?,
        }),
        Command::Replace {
            path,
            old_str,
            new_str,
        } => ToolCall::TextEditor(EditCommand::StrReplace {
            file_path: path,
            old_str,
            new_str,
        }),
        Command::Bash {
            command,
            working_dir,
            timeout,
            no_stderr,
        } => ToolCall::Bash(BashArgs {
            command,
            working_dir,
            timeout,
            capture_stderr: !no_stderr,
        }),
        Command::Call { tool, args } => return Ok(Call::Raw { tool, args }),
        Command::Session | Command::Schema => {
            anyhow::bail!("not a one-shot command")
        }
    };
    Ok(Call::Typed(call))
}

fn content_or_stdin(content: Option<String>) -> anyhow::Result<String> {
    match content {
        Some(content) => Ok(content),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading content from stdin")?;
            Ok(buf)
        }
    }
}

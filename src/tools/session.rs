use std::time::Instant;

use crate::command::{self, CommandRequest};
use crate::editor::{create, insert, replace, view};
use crate::error::FsError;
use crate::listing::{list, ListRequest};
use crate::search::{search, SearchRequest};
use crate::todo::TodoList;
use crate::tree::{tree, TreeRequest};

use super::call::{BashArgs, EditCommand, GrepArgs, LsArgs, TodoCommand, ToolCall, TreeArgs};
use super::context::ToolContext;

/// One caller's tool state: its context and its task list.
///
/// Sessions never share state; each owns its `TodoList`.
#[derive(Debug, Clone)]
pub struct Session {
    context: ToolContext,
    todos: TodoList,
}

impl Session {
    pub fn new(context: ToolContext) -> Self {
        Self {
            context,
            todos: TodoList::new(),
        }
    }

    /// Run a call and render the result, turning failures into `Error:` text.
    pub fn run(&mut self, call: ToolCall) -> String {
        let name = call.name();
        let start = Instant::now();
        let result = self.execute(call);
        match result {
            Ok(output) => {
                log::debug!("{name} finished in {:?}", start.elapsed());
                output
            }
            Err(err) => {
                log::info!("{name} failed: {err}");
                err.to_tool_output()
            }
        }
    }

    pub fn execute(&mut self, call: ToolCall) -> Result<String, FsError> {
        match call {
            ToolCall::Ls(args) => self.ls(args),
            ToolCall::Tree(args) => self.tree(args),
            ToolCall::Grep(args) => self.grep(args),
            ToolCall::TextEditor(command) => self.edit(command),
            ToolCall::Bash(args) => self.bash(args),
            ToolCall::Todo(TodoCommand::Write { items }) => {
                Ok(self.todos.write(items)?.to_string())
            }
            ToolCall::Todo(TodoCommand::List) => Ok(self.todos.to_string()),
        }
    }

    fn ls(&self, args: LsArgs) -> Result<String, FsError> {
        let target = self.context.resolve(&args.path)?;
        let request = ListRequest {
            show_hidden: args.show_hidden,
            long_format: args.long_format,
            recursive: args.recursive,
        };
        Ok(list(&target, request, self.context.walk_options())?.to_string())
    }

    fn tree(&self, args: TreeArgs) -> Result<String, FsError> {
        let target = self.context.resolve(&args.path)?;
        let request = TreeRequest {
            max_depth: args.max_depth,
            show_hidden: args.show_hidden,
            dirs_only: args.dirs_only,
        };
        Ok(tree(&target, request, self.context.walk_options())?.to_string())
    }

    fn grep(&self, args: GrepArgs) -> Result<String, FsError> {
        if args.pattern.is_empty() {
            return Err(FsError::MissingArgument("pattern".to_string()));
        }
        let target = self.context.resolve(&args.path)?;
        let request = SearchRequest {
            pattern: args.pattern,
            file_pattern: args.file_pattern,
            case_insensitive: args.case_insensitive,
            context_lines: args.context_lines,
            max_results: args.max_results,
        };
        Ok(search(&request, &target, self.context.walk_options())?.to_string())
    }

    fn edit(&self, command: EditCommand) -> Result<String, FsError> {
        match command {
            EditCommand::View {
                file_path,
                start_line,
                end_line,
            } => {
                let target = self.context.resolve(&file_path)?;
                Ok(view(&target, start_line, end_line)?.to_string())
            }
            EditCommand::Create { file_path, content } => {
                let target = self.context.resolve(&file_path)?;
                self.context.check_write(&target)?;
                Ok(create(&target, &content)?.to_string())
            }
            EditCommand::Insert {
                file_path,
                line_number,
                content,
            } => {
                let target = self.context.resolve(&file_path)?;
                self.context.check_write(&target)?;
                Ok(insert(&target, line_number, &content)?.to_string())
            }
            EditCommand::StrReplace {
                file_path,
                old_str,
                new_str,
            } => {
                let target = self.context.resolve(&file_path)?;
                self.context.check_write(&target)?;
                Ok(replace(&target, &old_str, &new_str)?.to_string())
            }
        }
    }

    fn bash(&self, args: BashArgs) -> Result<String, FsError> {
        if args.command.trim().is_empty() {
            return Err(FsError::MissingArgument("command".to_string()));
        }
        let timeout_secs = args.timeout.unwrap_or(self.context.command_timeout_secs);
        command::validate_timeout(timeout_secs)?;
        let working_dir = self.context.command_dir(args.working_dir.as_deref())?;
        let request = CommandRequest {
            command: args.command,
            working_dir,
            timeout_secs,
            capture_stderr: args.capture_stderr,
        };
        Ok(command::run(&request)?.to_string())
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fskit",
    about = "File-system tools: list, tree, search, edit and run commands"
)]
pub struct CliArgs {
    /// Config file (default: ~/.config/fskit/config.toml).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    /// Working directory relative paths resolve against.
    #[arg(long, short = 'w', global = true)]
    pub workdir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a directory.
    Ls {
        #[arg(default_value = ".")]
        path: String,
        #[arg(long, short = 'a')]
        show_hidden: bool,
        #[arg(long, short = 'l')]
        long_format: bool,
        #[arg(long, short = 'R')]
        recursive: bool,
    },
    /// Render a directory tree.
    Tree {
        #[arg(default_value = ".")]
        path: String,
        #[arg(long, short = 'L')]
        max_depth: Option<usize>,
        #[arg(long, short = 'a')]
        show_hidden: bool,
        #[arg(long, short = 'd')]
        dirs_only: bool,
    },
    /// Search file contents with a regex.
    Grep {
        pattern: String,
        #[arg(default_value = ".")]
        path: String,
        #[arg(long, short = 'g')]
        file_pattern: Option<String>,
        #[arg(long, short = 'i')]
        case_insensitive: bool,
        #[arg(long, default_value_t = 0)]
        context_lines: usize,
        #[arg(long, short = 'm', default_value_t = fskit::search::DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },
    /// Show a range of lines of a file.
    View {
        path: String,
        #[arg(long)]
        start_line: Option<usize>,
        #[arg(long)]
        end_line: Option<usize>,
    },
    /// Create a new file; content is read from stdin when omitted.
    Create { path: String, content: Option<String> },
    /// Insert lines before `line_number`; content is read from stdin when omitted.
    Insert {
        path: String,
        line_number: usize,
        content: Option<String>,
    },
    /// Replace every occurrence of a string in a file.
    Replace {
        path: String,
        old_str: String,
        new_str: String,
    },
    /// Run a shell command.
    Bash {
        command: String,
        #[arg(long)]
        working_dir: Option<String>,
        /// Seconds (1-300).
        #[arg(long, short = 't')]
        timeout: Option<u64>,
        #[arg(long)]
        no_stderr: bool,
    },
    /// Invoke a tool with raw JSON arguments.
    Call {
        tool: String,
        #[arg(default_value = "{}")]
        args: String,
    },
    /// Read `{"tool": ..., "args": {...}}` lines from stdin against one session.
    Session,
    /// Print the JSON schema of every enabled tool.
    Schema,
}

//! `rapid` - check, format and explore ABB RAPID modules from the shell.
//! `rapid` - 在命令行中检查、格式化和浏览 ABB RAPID 模块。

mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "rapid", author, version)]
#[command(about = "Check, format and explore ABB RAPID modules")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log analysis details to stderr. / 在 stderr 输出分析细节。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only exit status, no messages. / 只返回退出码，不输出消息。
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Report lexical, syntax and semantic diagnostics. / 报告词法、语法和语义诊断。
    Check {
        file: String,
        /// Emit the diagnostics as JSON. / 以 JSON 输出诊断。
        #[arg(long)]
        json: bool,
    },
    /// Reprint modules in canonical layout. / 以规范布局重新输出模块。
    Fmt {
        #[command(subcommand)]
        target: FmtTarget,
    },
    /// Print the declaration index of a module. / 打印模块的声明索引。
    Symbols { file: String },
    /// Dump the syntax tree as JSON. / 以 JSON 输出语法树。
    Ast { file: String },
    /// Serve the Language Server Protocol over stdio. / 通过 stdio 提供 LSP 服务。
    Lsp,
}

#[derive(Args)]
struct Layout {
    /// Spaces per indentation level. / 每级缩进的空格数。
    #[arg(long, default_value_t = 4)]
    indent: usize,
}

#[derive(Subcommand)]
enum FmtTarget {
    /// Format one module, printing it unless `--write` is given. / 格式化单个模块。
    File {
        file: String,
        #[arg(short, long)]
        write: bool,
        #[command(flatten)]
        layout: Layout,
    },
    /// Fail if a module is not already formatted. / 模块未格式化时失败。
    Check {
        file: String,
        #[command(flatten)]
        layout: Layout,
    },
    /// Format every .mod/.modx/.sys/.prg file below a directory. / 格式化目录下的所有模块。
    Dir {
        dir: String,
        #[arg(short, long)]
        write: bool,
        #[command(flatten)]
        layout: Layout,
    },
}

impl Command {
    fn run(self, verbose: bool) -> Result<(), String> {
        match self {
            Command::Check { file, json } => commands::check::run(&file, json, verbose),
            Command::Fmt { target } => match target {
                FmtTarget::File {
                    file,
                    write,
                    layout,
                } => commands::fmt::run(&file, write, layout.indent),
                FmtTarget::Check { file, layout } => commands::fmt::check(&file, layout.indent),
                FmtTarget::Dir { dir, write, layout } => {
                    commands::fmt::format_dir(&dir, write, layout.indent)
                }
            },
            Command::Symbols { file } => commands::symbols::run(&file),
            Command::Ast { file } => commands::ast::run(&file),
            Command::Lsp => commands::lsp::run(),
        }
    }
}

/// Logs always go to stderr.
fn init_logging(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => Level::DEBUG,
        (false, true) => Level::ERROR,
        (false, false) => Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(message) = cli.command.run(cli.verbose) {
        if !cli.quiet {
            output::error(&message);
        }
        std::process::exit(1);
    }
}

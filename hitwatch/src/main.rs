use clap::{Parser, Subcommand};
use hitwatch_core::cli::{self, WatchArgs};
use hitwatch_core::logging::init_logging;
use hitwatch_core::server;

#[derive(Parser, Debug)]
#[command(
    name = "hitwatch",
    version,
    about = "hitwatch: live summaries and high traffic alerts for a common log format access log",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    watch: WatchArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved configuration as JSON and exit
    Config {
        #[command(flatten)]
        watch: WatchArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging();

    match cli.command {
        Some(Command::Config { watch }) => cli::config::dump(&watch),

        None => {
            let cfg = cli.watch.resolve()?;
            server::run(cfg)
        }
    }
}

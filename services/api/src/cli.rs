use crate::demo::{run_demo, run_seating_allocation, DemoArgs, SeatingAllocateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use exam_seating::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Exam Seating Allocator",
    about = "Allocate exam seats so that classmates from one department are not neighbours",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with seating plans from the command line
    Seating {
        #[command(subcommand)]
        command: SeatingCommand,
    },
    /// Allocate the built-in sample campus into each of its rooms
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SeatingCommand {
    /// Allocate a roster CSV into a single room and print the seating grid
    Allocate(SeatingAllocateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Seating {
            command: SeatingCommand::Allocate(args),
        } => run_seating_allocation(args),
        Command::Demo(args) => run_demo(args),
    }
}

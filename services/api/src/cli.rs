use crate::commands::{
    run_classify, run_create, run_delete, run_edit, run_preview, run_show, run_stats, run_view,
    ClassifyArgs, CreateArgs, DeleteArgs, PreviewArgs, RecordArgs, StatsArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use risk_register::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "risk-register",
    about = "Score, preview and manage entries in a risk register",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP gateway (default command)
    Serve(ServeArgs),
    /// Classify a probability/impact pair and list recommendations
    Classify(ClassifyArgs),
    /// Render the live preview card for raw form values
    Preview(PreviewArgs),
    /// Show the dashboard counters for the whole register
    Stats(StatsArgs),
    /// Print a single risk
    Show(RecordArgs),
    /// Delete a risk after confirmation
    Delete(DeleteArgs),
    /// Submit a new risk
    Create(CreateArgs),
    /// Open a risk's detail view
    View(RecordArgs),
    /// Edit a risk (redirects to the create flow)
    Edit(RecordArgs),
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
        Command::Classify(args) => run_classify(args),
        Command::Preview(args) => run_preview(args).await,
        Command::Stats(args) => run_stats(args).await,
        Command::Show(args) => run_show(args).await,
        Command::Delete(args) => run_delete(args).await,
        Command::Create(args) => run_create(args).await,
        Command::View(args) => run_view(args).await,
        Command::Edit(args) => run_edit(args).await,
    }
}

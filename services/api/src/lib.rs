mod cli;
mod commands;
mod console;
mod infra;
mod routes;
mod server;

use risk_register::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

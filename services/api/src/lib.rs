mod cli;
mod infra;
mod report;
mod routes;
mod server;
mod sqlite_repository;

use durability::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

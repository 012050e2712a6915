mod cli;
mod estimate;
mod infra;
mod routes;
mod server;

use recruitment_savings::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

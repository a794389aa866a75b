mod cli;
mod routes;
mod search;
mod server;

use job_scout::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

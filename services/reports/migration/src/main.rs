use sea_orm_migration::prelude::*;

use lori_reports_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}

use sea_orm_migration::prelude::*;

use gantry_accounts_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}

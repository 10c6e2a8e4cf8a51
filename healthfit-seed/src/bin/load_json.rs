use std::{env, error::Error};

use healthfit_db::{connection::Connection, food::FoodRepositoryImpl, workout::WorkoutRepositoryImpl};
use healthfit_seed::{Catalog, Seeder};
use log::info;

const DEFAULT_CATALOG: &str = "seed/catalog.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    let path = env::args().nth(1).unwrap_or(DEFAULT_CATALOG.to_owned());
    info!("Loading catalog from {}", path);
    let catalog = Catalog::from_file(&path)?;

    info!("Connecting to database");
    let conn = Connection::establish().await?;
    let seeder = Seeder::new(
        Box::new(FoodRepositoryImpl::new(conn.clone())),
        Box::new(WorkoutRepositoryImpl::new(conn)),
    );

    let report = seeder.run(&catalog).await?;
    info!(
        "Seeding finished: {} foods, {} workouts, {} already present",
        report.foods, report.workouts, report.skipped
    );

    Ok(())
}

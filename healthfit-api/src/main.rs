use std::error::Error;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use healthfit_api::{config::Config, security, state::AppState};
use healthfit_db::connection::Connection;
use log::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;
    let config = Config::from_env()?;

    info!("Connecting to database");
    let conn = Connection::open(&config.database_url).await?;
    let state = web::Data::new(AppState::new(conn, &config));

    let rate_limit = GovernorConfigBuilder::default()
        .period(security::replenish_period(
            config.rate_limit_max,
            config.rate_limit_window,
        ))
        .burst_size(config.rate_limit_max)
        .finish()
        .ok_or("Invalid rate limit settings")?;
    info!(
        "Rate limiting to {} requests per {:?} per client",
        config.rate_limit_max, config.rate_limit_window
    );

    info!("Listening on {}:{}", config.bind_address, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(security::security_headers())
            .wrap(Governor::new(&rate_limit))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(healthfit_api::configure)
            .default_service(web::to(healthfit_api::not_found))
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

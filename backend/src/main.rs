use actix_web::{web, App, HttpServer};
use ecoledger_backend::config::AppConfig;
use ecoledger_backend::configure_app;
use ecoledger_backend::state::AppState;
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let (config, state) = match AppConfig::load().and_then(|config| {
        let state = AppState::from_config(&config)?;
        state.init_database()?;
        Ok((config, state))
    }) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    info!("Database at {}", config.database_path.display());
    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024))
            .app_data(web::Data::new(state.clone()))
            .configure(configure_app)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

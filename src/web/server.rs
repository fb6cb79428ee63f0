use crate::assets::AssetStore;
use crate::assets::local::LocalAssetStore;
use crate::database::DbPool;
use crate::membership::sweep::{SWEEP_INTERVAL, sweep_once};
use crate::tools::env_args::retrieve_arg_value;
use crate::web::api::api_routes;
use chrono::Utc;
use log::error;
use rocket::fairing::AdHoc;
use rocket::fs::FileServer;
use rocket::{Build, Rocket};

const PORT_ENV_ARG: &str = "--port";
const DEFAULT_PORT: i32 = 8000;

pub fn build_server(pool: DbPool, assets: LocalAssetStore) -> Rocket<Build> {
    let assets_folder = assets.folder().to_path_buf();

    rocket::build()
        .configure(rocket::Config::figment().merge(("port", get_api_port())))
        .manage(pool)
        .manage(Box::new(assets) as Box<dyn AssetStore>)
        .mount("/api/", api_routes())
        .mount("/uploads", FileServer::from(assets_folder))
        .attach(expiry_sweep_fairing())
}

fn get_api_port() -> i32 {
    retrieve_arg_value(PORT_ENV_ARG)
        .map(|port| port.parse::<i32>().ok())
        .unwrap_or(None)
        .unwrap_or(DEFAULT_PORT)
}

/// Timer-driven sweep covering idle periods; reads trigger their own sweep
/// on top of it. The first tick fires at liftoff, so statuses are
/// reconciled once at startup as well.
fn expiry_sweep_fairing() -> AdHoc {
    AdHoc::on_liftoff("Expiry sweep", |rocket| {
        Box::pin(async move {
            let Some(pool) = rocket.state::<DbPool>() else {
                error!("No database pool available, the expiry sweep is disabled.");
                return;
            };
            let pool = pool.clone();
            rocket::tokio::spawn(async move {
                let mut timer = rocket::tokio::time::interval(SWEEP_INTERVAL);
                loop {
                    timer.tick().await;
                    sweep_once(&pool, Utc::now().date_naive());
                }
            });
        })
    })
}

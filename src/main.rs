mod assets;
mod database;
mod error;
mod member;
mod membership;
mod notification;
mod tools;
mod web;

#[macro_use]
extern crate rocket;

use crate::assets::local::LocalAssetStore;
use crate::database::DbPool;
use crate::error::Result;
use crate::web::server::build_server;
use log::error;

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let (pool, assets) = match initialize() {
        Ok(initialized) => initialized,
        Err(e) => {
            error!("Initialization failed, aborting...\n{e:#?}");
            panic!();
        }
    };

    build_server(pool, assets)
}

fn initialize() -> Result<(DbPool, LocalAssetStore)> {
    let pool = database::init_db()?;
    let assets = LocalAssetStore::from_env_args()?;

    Ok((pool, assets))
}

//! Permit office admin console built on rat-passage.

mod model;
mod pages;
mod routes;

use std::sync::Arc;

use rat_passage::{AppConfig, Application, logging};

use crate::model::Directory;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let _guard = logging::init_file_logging(config.log_dir.as_deref(), "permit-demo")?;

    let directory = Arc::new(Directory::sample());
    let table = routes::build_table(directory)?;
    tracing::info!(routes = table.len(), "starting permit console");

    Application::new(config).run(table)
}

use color_eyre::{eyre::WrapErr, Result};
use fare_radar::{
    airports::{load_airports_csv, AirportTable},
    api::FareApi,
    collector::{sort_by_distance, Collector},
    config::Config,
    logging, report,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = logging::initialize_logging();
    color_eyre::install()?;

    let config = Config::load();

    let mut airports = AirportTable::builtin().with_entries(config.airports.iter().cloned());
    if let Some(path) = &config.airports_csv {
        airports = airports.with_entries(load_airports_csv(path));
    }
    info!("Airport table has {} entries", airports.len());

    let api = FareApi::new(&config.api).wrap_err("building API client")?;
    let collector = Collector::new(api, airports).with_policy(config.collection.failure_policy);

    let query = &config.query;
    info!("Collecting flights from {} on {}", query.origin, query.date);
    let mut flights = collector.collect(&query.origin, query.date).await;

    sort_by_distance(&mut flights);

    report::write_csv(&flights, &query.output)
        .wrap_err_with(|| format!("writing {}", query.output))?;

    report::print_table(&flights);
    Ok(())
}

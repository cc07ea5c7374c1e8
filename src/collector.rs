//! Fetch-and-reduce over the airline API.
//!
//! One routes request for the origin, then one flights request per
//! destination, strictly in sequence. Each destination with at least one
//! flight becomes a [`FlightQuote`] carrying its cheapest fare and its
//! distance from the origin. Quotes come back in route order; sorting is
//! left to the caller.

use crate::airports::AirportTable;
use crate::api::{ApiError, FareApi};
use crate::config::FailurePolicy;
use crate::models::{FlightOption, FlightQuote};
use chrono::NaiveDate;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("fetching routes from {origin}: {source}")]
    Routes {
        origin: String,
        #[source]
        source: ApiError,
    },
    #[error("fetching flights {origin}->{destination}: {source}")]
    Flights {
        origin: String,
        destination: String,
        #[source]
        source: ApiError,
    },
}

/// A destination whose flights request failed under [`FailurePolicy::Isolate`].
#[derive(Debug)]
pub struct FailedDestination {
    pub destination: String,
    pub error: ApiError,
}

#[derive(Debug, Default)]
pub struct Collection {
    pub quotes: Vec<FlightQuote>,
    pub failed: Vec<FailedDestination>,
    /// Destinations that answered with no flights at all.
    pub without_flights: Vec<String>,
}

pub struct Collector {
    api: FareApi,
    airports: AirportTable,
    policy: FailurePolicy,
}

/// Cheapest fare among `flights`.
///
/// `None` when there are no flights. Options without a fare never win
/// against one that has a fare; if no option has one the result is
/// `f64::INFINITY`.
pub fn lowest_fare(flights: &[FlightOption]) -> Option<f64> {
    if flights.is_empty() {
        return None;
    }
    Some(
        flights
            .iter()
            .map(|f| f.fare().unwrap_or(f64::INFINITY))
            .fold(f64::INFINITY, f64::min),
    )
}

/// Ascending by distance. Ties keep route order.
pub fn sort_by_distance(quotes: &mut [FlightQuote]) {
    quotes.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

impl Collector {
    pub fn new(api: FareApi, airports: AirportTable) -> Self {
        Self {
            api,
            airports,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn airports(&self) -> &AirportTable {
        &self.airports
    }

    /// Quotes for every destination served from `origin` on `date`.
    ///
    /// Errors are logged and turn into an empty result, so an unreachable
    /// API and a day with no flights look the same here. Use
    /// [`collect_report`](Self::collect_report) to tell them apart.
    pub async fn collect(&self, origin: &str, date: NaiveDate) -> Vec<FlightQuote> {
        match self.collect_report(origin, date).await {
            Ok(collection) => collection.quotes,
            Err(e) => {
                error!("Error fetching flight data: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn collect_report(
        &self,
        origin: &str,
        date: NaiveDate,
    ) -> Result<Collection, CollectError> {
        let routes = self
            .api
            .fetch_routes(origin)
            .await
            .map_err(|source| CollectError::Routes {
                origin: origin.to_string(),
                source,
            })?;
        info!("{} routes from {}", routes.len(), origin);

        let mut collection = Collection::default();

        for route in routes {
            let destination = route.destination;

            let flights = match self.api.fetch_flights(origin, &destination, date).await {
                Ok(flights) => flights,
                Err(source) => match self.policy {
                    FailurePolicy::Abort => {
                        return Err(CollectError::Flights {
                            origin: origin.to_string(),
                            destination,
                            source,
                        })
                    }
                    FailurePolicy::Isolate => {
                        warn!("Skipping {}: {}", destination, source);
                        collection.failed.push(FailedDestination {
                            destination,
                            error: source,
                        });
                        continue;
                    }
                },
            };

            let Some(lowest_price) = lowest_fare(&flights) else {
                info!("{}: no flights on {}", destination, date);
                collection.without_flights.push(destination);
                continue;
            };

            let distance_km = match self.airports.distance_km(origin, &destination) {
                Some(d) => d,
                None => {
                    warn!("No coordinates for {} or {}, distance reported as 0", origin, destination);
                    0.0
                }
            };

            info!(
                "{}: {} flights, lowest fare {:.2}, {:.2} km",
                destination,
                flights.len(),
                lowest_price,
                distance_km
            );
            collection
                .quotes
                .push(FlightQuote::new(distance_km, destination, lowest_price));
        }

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pricing;

    fn option(fare: Option<f64>) -> FlightOption {
        FlightOption {
            pricing: Some(Pricing { lowest_fare: fare }),
        }
    }

    #[test]
    fn lowest_fare_of_nothing_is_none() {
        assert_eq!(lowest_fare(&[]), None);
    }

    #[test]
    fn lowest_fare_takes_minimum() {
        let flights = [option(Some(99.0)), option(Some(45.5)), option(Some(60.0))];
        assert_eq!(lowest_fare(&flights), Some(45.5));
    }

    #[test]
    fn missing_fares_do_not_win() {
        let flights = [option(None), FlightOption::default(), option(Some(70.0))];
        assert_eq!(lowest_fare(&flights), Some(70.0));
    }

    #[test]
    fn only_missing_fares_is_infinite() {
        let flights = [option(None), FlightOption::default()];
        assert_eq!(lowest_fare(&flights), Some(f64::INFINITY));
    }

    #[test]
    fn sorts_ascending_and_keeps_ties_stable() {
        let mut quotes = vec![
            FlightQuote::new(1109.59, "BCN", 80.0),
            FlightQuote::new(0.0, "XXX", 10.0),
            FlightQuote::new(307.82, "CDG", 120.0),
            FlightQuote::new(0.0, "YYY", 20.0),
        ];
        sort_by_distance(&mut quotes);
        let order: Vec<_> = quotes.iter().map(|q| q.destination.as_str()).collect();
        assert_eq!(order, ["XXX", "YYY", "CDG", "BCN"]);
    }
}

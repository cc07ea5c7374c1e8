use serde::{Deserialize, Serialize};

/// Body of `GET /routes`.
#[derive(Debug, Default, Deserialize)]
pub struct RoutesResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One route served from the queried origin. Other fields the API returns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub destination: String,
}

/// Body of `GET /flights`.
#[derive(Debug, Default, Deserialize)]
pub struct FlightsResponse {
    #[serde(default)]
    pub flights: Vec<FlightOption>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightOption {
    #[serde(default)]
    pub pricing: Option<Pricing>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pricing {
    #[serde(rename = "lowestFare", default)]
    pub lowest_fare: Option<f64>,
}

impl FlightOption {
    pub fn fare(&self) -> Option<f64> {
        self.pricing.as_ref().and_then(|p| p.lowest_fare)
    }
}

/// A single row of the report: cheapest fare to one destination.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightQuote {
    #[serde(rename = "Distance (km)")]
    pub distance_km: f64,
    #[serde(rename = "Destination")]
    pub destination: String,
    #[serde(rename = "Lowest Price")]
    pub lowest_price: f64,
}

impl FlightQuote {
    pub fn new(distance_km: f64, destination: impl Into<String>, lowest_price: f64) -> Self {
        Self {
            distance_km,
            destination: destination.into(),
            lowest_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_ignore_unknown_fields() {
        let body = r#"{"routes":[{"destination":"BCN","carrier":"U2"},{"destination":"CDG"}]}"#;
        let res: RoutesResponse = serde_json::from_str(body).unwrap();
        let codes: Vec<_> = res.routes.iter().map(|r| r.destination.as_str()).collect();
        assert_eq!(codes, ["BCN", "CDG"]);
    }

    #[test]
    fn missing_lists_decode_as_empty() {
        let routes: RoutesResponse = serde_json::from_str("{}").unwrap();
        let flights: FlightsResponse = serde_json::from_str("{}").unwrap();
        assert!(routes.routes.is_empty());
        assert!(flights.flights.is_empty());
    }

    #[test]
    fn missing_fare_fields_are_none() {
        let body = r#"{"flights":[{},{"pricing":{}},{"pricing":{"lowestFare":42.5}}]}"#;
        let res: FlightsResponse = serde_json::from_str(body).unwrap();
        let fares: Vec<_> = res.flights.iter().map(FlightOption::fare).collect();
        assert_eq!(fares, [None, None, Some(42.5)]);
    }
}

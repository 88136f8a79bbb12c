use crate::adapters::transport::HttpTransport;
use crate::domain::model::{CanonicalOffer, SearchCriteria};
use crate::domain::ports::FlightSupplier;
use crate::utils::error::SupplierError;
use crate::utils::timestamp::deserialize_instant;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

pub const CRAZY_AIR_SUPPLIER: &str = "CrazyAir";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrazyAirSearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub passenger_count: u32,
}

impl CrazyAirSearchRequest {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        Self {
            origin: criteria.origin.clone(),
            destination: criteria.destination.clone(),
            departure_date: criteria.departure_date,
            return_date: criteria.return_date,
            passenger_count: criteria.passengers,
        }
    }

    /// 轉換成 CrazyAir 的查詢參數
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("origin", self.origin.clone()),
            ("destination", self.destination.clone()),
            ("departureDate", self.departure_date.format("%Y-%m-%d").to_string()),
            ("returnDate", self.return_date.format("%Y-%m-%d").to_string()),
            ("passengerCount", self.passenger_count.to_string()),
        ]
    }
}

/// CrazyAir record. Dates are local date-times without zone, which CrazyAir means as UTC.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrazyAirFlight {
    pub airline: String,
    pub price: Decimal,
    pub cabinclass: String,
    pub departure_airport_code: String,
    pub destination_airport_code: String,
    #[serde(deserialize_with = "deserialize_instant")]
    pub departure_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_instant")]
    pub arrival_date: DateTime<Utc>,
}

impl CrazyAirFlight {
    /// CrazyAir 的價格直接作為票價
    pub fn into_offer(self) -> Result<CanonicalOffer, SupplierError> {
        CanonicalOffer::new(
            self.airline,
            CRAZY_AIR_SUPPLIER,
            self.price,
            self.departure_airport_code,
            self.destination_airport_code,
            self.departure_date,
            self.arrival_date,
        )
    }
}

pub struct CrazyAirSupplier {
    url: String,
    transport: HttpTransport,
}

impl CrazyAirSupplier {
    pub fn new(url: impl Into<String>, transport: HttpTransport) -> Self {
        Self {
            url: url.into(),
            transport,
        }
    }
}

#[async_trait]
impl FlightSupplier for CrazyAirSupplier {
    fn name(&self) -> &str {
        CRAZY_AIR_SUPPLIER
    }

    async fn query(&self, criteria: &SearchCriteria) -> Result<Vec<CanonicalOffer>, SupplierError> {
        let request = CrazyAirSearchRequest::from_criteria(criteria);
        let flights: Vec<CrazyAirFlight> = self
            .transport
            .get_json(&self.url, &request.query_params())
            .await?;

        flights.into_iter().map(CrazyAirFlight::into_offer).collect()
    }
}

use crate::utils::error::SupplierError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub passengers: u32,
}

/// Supplier-agnostic flight offer. Never mutated after an adapter builds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalOffer {
    airline: String,
    supplier: String,
    #[serde(with = "rust_decimal::serde::str")]
    fare: Decimal,
    departure_airport_code: String,
    destination_airport_code: String,
    departure_date: DateTime<Utc>,
    arrival_date: DateTime<Utc>,
}

impl CanonicalOffer {
    /// Fails with a format error when the fare is negative.
    pub fn new(
        airline: impl Into<String>,
        supplier: impl Into<String>,
        fare: Decimal,
        departure_airport_code: impl Into<String>,
        destination_airport_code: impl Into<String>,
        departure_date: DateTime<Utc>,
        arrival_date: DateTime<Utc>,
    ) -> Result<Self, SupplierError> {
        if fare < Decimal::ZERO {
            return Err(SupplierError::format(format!("negative fare {}", fare)));
        }

        Ok(Self {
            airline: airline.into(),
            supplier: supplier.into(),
            // 統一票價的小數位數，輸出字串不受供應商格式影響
            fare: fare.normalize(),
            departure_airport_code: departure_airport_code.into(),
            destination_airport_code: destination_airport_code.into(),
            departure_date,
            arrival_date,
        })
    }

    pub fn airline(&self) -> &str {
        &self.airline
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn fare(&self) -> Decimal {
        self.fare
    }

    pub fn departure_airport_code(&self) -> &str {
        &self.departure_airport_code
    }

    pub fn destination_airport_code(&self) -> &str {
        &self.destination_airport_code
    }

    pub fn departure_date(&self) -> DateTime<Utc> {
        self.departure_date
    }

    pub fn arrival_date(&self) -> DateTime<Utc> {
        self.arrival_date
    }
}

/// Wire shape handed back to whoever serializes the search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub flights: Vec<CanonicalOffer>,
}

/// Concatenates per-supplier contributions in registration order, then sorts by fare.
///
/// `sort_by` is stable, so equal fares keep registration order first and
/// each supplier's own order second.
pub fn merge_offers<I>(contributions: I) -> Vec<CanonicalOffer>
where
    I: IntoIterator<Item = Vec<CanonicalOffer>>,
{
    let mut merged: Vec<CanonicalOffer> = contributions.into_iter().flatten().collect();
    merged.sort_by(|a, b| a.fare.cmp(&b.fare));
    merged
}

use crate::adapters::transport::HttpTransport;
use crate::domain::model::{CanonicalOffer, SearchCriteria};
use crate::domain::ports::FlightSupplier;
use crate::utils::error::SupplierError;
use crate::utils::timestamp::deserialize_instant;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

pub const TOUGH_JET_SUPPLIER: &str = "ToughJet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToughJetSearchRequest {
    pub from: String,
    pub to: String,
    pub outbound_date: NaiveDate,
    pub inbound_date: NaiveDate,
    pub number_of_adults: u32,
}

impl ToughJetSearchRequest {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        Self {
            from: criteria.origin.clone(),
            to: criteria.destination.clone(),
            outbound_date: criteria.departure_date,
            inbound_date: criteria.return_date,
            number_of_adults: criteria.passengers,
        }
    }

    /// 轉換成 ToughJet 的查詢參數
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from", self.from.clone()),
            ("to", self.to.clone()),
            ("outboundDate", self.outbound_date.format("%Y-%m-%d").to_string()),
            ("inboundDate", self.inbound_date.format("%Y-%m-%d").to_string()),
            ("numberOfAdults", self.number_of_adults.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToughJetFlight {
    pub carrier: String,
    pub base_price: Decimal,
    pub tax: Decimal,
    /// Percentage, e.g. `10` for 10% off.
    pub discount: Decimal,
    pub departure_airport_name: String,
    pub arrival_airport_name: String,
    #[serde(deserialize_with = "deserialize_instant")]
    pub outbound_date_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_instant")]
    pub inbound_date_time: DateTime<Utc>,
}

impl ToughJetFlight {
    pub fn into_offer(self) -> Result<CanonicalOffer, SupplierError> {
        let fare = calculate_fare(self.base_price, self.tax, self.discount).ok_or_else(|| {
            SupplierError::format(format!(
                "fare overflow for basePrice={} tax={} discount={}",
                self.base_price, self.tax, self.discount
            ))
        })?;

        CanonicalOffer::new(
            self.carrier,
            TOUGH_JET_SUPPLIER,
            fare,
            self.departure_airport_name,
            self.arrival_airport_name,
            self.outbound_date_time,
            self.inbound_date_time,
        )
    }
}

/// `(basePrice + tax) * (1 - discount / 100)`, trailing zeros stripped; `None` on decimal overflow.
pub fn calculate_fare(base_price: Decimal, tax: Decimal, discount: Decimal) -> Option<Decimal> {
    let gross = base_price.checked_add(tax)?;
    let factor = Decimal::ONE.checked_sub(discount.checked_div(Decimal::ONE_HUNDRED)?)?;
    gross.checked_mul(factor).map(|fare| fare.normalize())
}

pub struct ToughJetSupplier {
    url: String,
    transport: HttpTransport,
}

impl ToughJetSupplier {
    pub fn new(url: impl Into<String>, transport: HttpTransport) -> Self {
        Self {
            url: url.into(),
            transport,
        }
    }
}

#[async_trait]
impl FlightSupplier for ToughJetSupplier {
    fn name(&self) -> &str {
        TOUGH_JET_SUPPLIER
    }

    async fn query(&self, criteria: &SearchCriteria) -> Result<Vec<CanonicalOffer>, SupplierError> {
        let request = ToughJetSearchRequest::from_criteria(criteria);
        // 任何一筆記錄無法轉換，整個回應視為格式錯誤
        let flights: Vec<ToughJetFlight> = self
            .transport
            .get_json(&self.url, &request.query_params())
            .await?;

        flights.into_iter().map(ToughJetFlight::into_offer).collect()
    }
}

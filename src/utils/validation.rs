use crate::domain::model::SearchCriteria;
use crate::utils::error::{FlightSearchError, Result};
use url::Url;

pub const MAX_PASSENGERS: u32 = 4;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FlightSearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FlightSearchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FlightSearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FlightSearchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 機場代碼：三個大寫英文字母 (IATA)
pub fn validate_airport_code(field_name: &str, code: &str) -> Result<()> {
    let valid = code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase());
    if !valid {
        return Err(FlightSearchError::ValidationError {
            field: field_name.to_string(),
            message: format!("'{}' is not a 3-letter uppercase IATA code", code),
        });
    }
    Ok(())
}

impl Validate for SearchCriteria {
    fn validate(&self) -> Result<()> {
        validate_airport_code("origin", &self.origin)?;
        validate_airport_code("destination", &self.destination)?;

        if self.origin == self.destination {
            return Err(FlightSearchError::ValidationError {
                field: "destination".to_string(),
                message: "Origin and destination must be different".to_string(),
            });
        }

        if self.departure_date > self.return_date {
            return Err(FlightSearchError::ValidationError {
                field: "return_date".to_string(),
                message: format!(
                    "Return date {} is before departure date {}",
                    self.return_date, self.departure_date
                ),
            });
        }

        // 乘客數與配置錯誤分開，屬於輸入錯誤
        if self.passengers < 1 || self.passengers > MAX_PASSENGERS {
            return Err(FlightSearchError::ValidationError {
                field: "passengers".to_string(),
                message: format!(
                    "Passenger count must be between 1 and {}, got {}",
                    MAX_PASSENGERS, self.passengers
                ),
            });
        }

        Ok(())
    }
}

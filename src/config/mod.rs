pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::SearchCriteria;
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::Parser;

pub use toml_config::SupplierConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "flight-search")]
#[command(about = "Search flights across all configured suppliers")]
pub struct CliConfig {
    #[arg(long, default_value = "flight-search.toml")]
    pub config: String,

    #[arg(long, help = "Origin IATA code, e.g. LHR")]
    pub origin: String,

    #[arg(long, help = "Destination IATA code, e.g. AMS")]
    pub destination: String,

    #[arg(long, help = "Departure date (YYYY-MM-DD)")]
    pub departure_date: NaiveDate,

    #[arg(long, help = "Return date (YYYY-MM-DD)")]
    pub return_date: NaiveDate,

    #[arg(long, default_value = "1")]
    pub passengers: u32,

    #[arg(long, help = "Per-supplier timeout in milliseconds, overrides the config file")]
    pub timeout_ms: Option<u64>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn to_criteria(&self) -> SearchCriteria {
        SearchCriteria {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: self.departure_date,
            return_date: self.return_date,
            passengers: self.passengers,
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_arguments() {
        let cli = CliConfig::try_parse_from([
            "flight-search",
            "--origin",
            "LHR",
            "--destination",
            "AMS",
            "--departure-date",
            "2022-01-01",
            "--return-date",
            "2022-01-10",
            "--passengers",
            "2",
            "--timeout-ms",
            "500",
        ])
        .unwrap();

        assert_eq!(cli.config, "flight-search.toml");
        assert_eq!(cli.timeout_ms, Some(500));
        assert!(!cli.json_logs);

        let criteria = cli.to_criteria();
        assert_eq!(criteria.origin, "LHR");
        assert_eq!(criteria.destination, "AMS");
        assert_eq!(criteria.departure_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(criteria.return_date, NaiveDate::from_ymd_opt(2022, 1, 10).unwrap());
        assert_eq!(criteria.passengers, 2);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = CliConfig::try_parse_from([
            "flight-search",
            "--origin",
            "LHR",
            "--destination",
            "AMS",
            "--departure-date",
            "01/01/2022",
            "--return-date",
            "2022-01-10",
        ]);
        assert!(result.is_err());
    }
}

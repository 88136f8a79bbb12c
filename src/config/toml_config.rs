use crate::adapters::{CrazyAirSupplier, HttpTransport, ToughJetSupplier};
use crate::core::search::FlightSearchService;
use crate::domain::ports::FlightSupplier;
use crate::utils::error::{FlightSearchError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SUPPLIER_TIMEOUT_MS: u64 = 1000;
pub const MAX_SUPPLIER_TIMEOUT_MS: u64 = 60_000;
/// HTTP client 的逾時上限，必須大於任何 supplier deadline，逾時一律由 orchestrator 判定
pub const TRANSPORT_TIMEOUT_MS: u64 = MAX_SUPPLIER_TIMEOUT_MS + 5_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    #[serde(default)]
    pub search: SearchSettings,
    pub suppliers: SuppliersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_supplier_timeout_ms")]
    pub supplier_timeout_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            supplier_timeout_ms: DEFAULT_SUPPLIER_TIMEOUT_MS,
        }
    }
}

fn default_supplier_timeout_ms() -> u64 {
    DEFAULT_SUPPLIER_TIMEOUT_MS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppliersConfig {
    pub crazy_air: Option<SupplierEndpoint>,
    pub tough_jet: Option<SupplierEndpoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierEndpoint {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub url: String,
}

fn default_enabled() -> bool {
    true
}

impl SupplierConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FlightSearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FlightSearchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CRAZY_AIR_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FlightSearchError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列的 --timeout-ms 覆寫檔案設定
    pub fn with_timeout_override(mut self, timeout_ms: Option<u64>) -> Self {
        if let Some(ms) = timeout_ms {
            self.search.supplier_timeout_ms = ms;
        }
        self
    }

    pub fn supplier_timeout(&self) -> Duration {
        Duration::from_millis(self.search.supplier_timeout_ms)
    }

    /// 已啟用的供應商，依 CrazyAir、ToughJet 的順序
    pub fn enabled_suppliers(&self) -> Vec<(&'static str, &SupplierEndpoint)> {
        [
            ("suppliers.crazy_air", self.suppliers.crazy_air.as_ref()),
            ("suppliers.tough_jet", self.suppliers.tough_jet.as_ref()),
        ]
        .into_iter()
        .filter_map(|(key, endpoint)| endpoint.filter(|e| e.enabled).map(|e| (key, e)))
        .collect()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_range(
            "search.supplier_timeout_ms",
            self.search.supplier_timeout_ms,
            1,
            MAX_SUPPLIER_TIMEOUT_MS,
        )?;

        let enabled = self.enabled_suppliers();
        if enabled.is_empty() {
            return Err(FlightSearchError::MissingConfigError {
                field: "suppliers (at least one enabled)".to_string(),
            });
        }

        for (key, endpoint) in enabled {
            validate_url(&format!("{}.url", key), &endpoint.url)?;
        }

        Ok(())
    }

    /// 建立 adapters 與 orchestrator
    pub fn build_service(&self) -> Result<FlightSearchService> {
        let transport = HttpTransport::new(Duration::from_millis(TRANSPORT_TIMEOUT_MS))
            .map_err(|e| FlightSearchError::ConfigError {
                message: e.to_string(),
            })?;

        let mut suppliers: Vec<Arc<dyn FlightSupplier>> = Vec::new();
        if let Some(endpoint) = self.suppliers.crazy_air.as_ref().filter(|e| e.enabled) {
            suppliers.push(Arc::new(CrazyAirSupplier::new(
                endpoint.url.clone(),
                transport.clone(),
            )));
        }
        if let Some(endpoint) = self.suppliers.tough_jet.as_ref().filter(|e| e.enabled) {
            suppliers.push(Arc::new(ToughJetSupplier::new(
                endpoint.url.clone(),
                transport.clone(),
            )));
        }

        tracing::debug!("Registered {} suppliers", suppliers.len());
        FlightSearchService::new(suppliers, self.supplier_timeout())
    }
}

impl Validate for SupplierConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

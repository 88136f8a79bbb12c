use crate::core::observer::TracingObserver;
use crate::domain::model::{merge_offers, CanonicalOffer, SearchCriteria};
use crate::domain::ports::{FlightSupplier, SearchObserver};
use crate::utils::error::{FlightSearchError, Result, SupplierError};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout, Instant};

/// Terminal state of one dispatched supplier call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplierOutcome {
    Completed(Vec<CanonicalOffer>),
    TimedOut { after: Duration },
    Failed(SupplierError),
}

impl SupplierOutcome {
    /// The failure cause, if the call did not complete.
    pub fn failure(&self) -> Option<SupplierError> {
        match self {
            SupplierOutcome::Completed(_) => None,
            SupplierOutcome::TimedOut { after } => Some(SupplierError::Timeout {
                timeout_ms: after.as_millis() as u64,
            }),
            SupplierOutcome::Failed(error) => Some(error.clone()),
        }
    }

    pub fn into_offers(self) -> Vec<CanonicalOffer> {
        match self {
            SupplierOutcome::Completed(offers) => offers,
            SupplierOutcome::TimedOut { .. } | SupplierOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Fans a search out to every registered supplier and merges what comes back.
pub struct FlightSearchService {
    suppliers: Vec<Arc<dyn FlightSupplier>>,
    supplier_timeout: Duration,
    observer: Arc<dyn SearchObserver>,
}

impl FlightSearchService {
    pub fn new(suppliers: Vec<Arc<dyn FlightSupplier>>, supplier_timeout: Duration) -> Result<Self> {
        if suppliers.is_empty() {
            return Err(FlightSearchError::MissingConfigError {
                field: "suppliers".to_string(),
            });
        }
        if supplier_timeout.is_zero() {
            return Err(FlightSearchError::InvalidConfigValueError {
                field: "supplier_timeout".to_string(),
                value: format!("{:?}", supplier_timeout),
                reason: "Timeout must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            suppliers,
            supplier_timeout,
            observer: Arc::new(TracingObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn supplier_timeout(&self) -> Duration {
        self.supplier_timeout
    }

    pub fn supplier_names(&self) -> Vec<&str> {
        self.suppliers.iter().map(|s| s.name()).collect()
    }

    pub async fn search_flights(&self, criteria: &SearchCriteria) -> Vec<CanonicalOffer> {
        self.aggregate(criteria, self.supplier_timeout).await
    }

    /// Queries all suppliers concurrently, each bounded by `per_supplier_timeout`.
    ///
    /// Supplier failures only shrink the result; this never returns an error.
    pub async fn aggregate(
        &self,
        criteria: &SearchCriteria,
        per_supplier_timeout: Duration,
    ) -> Vec<CanonicalOffer> {
        tracing::debug!(
            "Searching {} -> {} across {} suppliers",
            criteria.origin,
            criteria.destination,
            self.suppliers.len()
        );

        let outcomes = self.dispatch_all(criteria, per_supplier_timeout).await;

        // 依註冊順序收集，與完成順序無關
        let mut contributions = Vec::with_capacity(outcomes.len());
        for (supplier, (outcome, elapsed)) in self.suppliers.iter().zip(outcomes) {
            match outcome.failure() {
                None => {
                    let offers = outcome.into_offers();
                    self.observer
                        .on_completed(supplier.name(), offers.len(), elapsed);
                    contributions.push(offers);
                }
                Some(error) => self.observer.on_failed(supplier.name(), &error, elapsed),
            }
        }

        let merged = merge_offers(contributions);
        self.observer.on_merged(merged.len(), self.suppliers.len());
        merged
    }

    async fn dispatch_all(
        &self,
        criteria: &SearchCriteria,
        per_supplier_timeout: Duration,
    ) -> Vec<(SupplierOutcome, Duration)> {
        let dispatched_at = Instant::now();

        let handles: Vec<_> = self
            .suppliers
            .iter()
            .map(|supplier| {
                self.observer.on_dispatch(supplier.name());

                let supplier = Arc::clone(supplier);
                let criteria = criteria.clone();

                // 逾時只是放棄等待；被丟棄的 future 會中斷本地請求，遠端可能仍在處理
                tokio::spawn(async move {
                    let started = Instant::now();
                    let outcome = match timeout(per_supplier_timeout, supplier.query(&criteria)).await {
                        Ok(Ok(offers)) => SupplierOutcome::Completed(offers),
                        Ok(Err(error)) => SupplierOutcome::Failed(error),
                        Err(_) => SupplierOutcome::TimedOut {
                            after: per_supplier_timeout,
                        },
                    };
                    (outcome, started.elapsed())
                })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(join_error) => (
                    SupplierOutcome::Failed(SupplierError::Panicked {
                        message: join_error.to_string(),
                    }),
                    dispatched_at.elapsed(),
                ),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    struct MockSupplier {
        name: String,
        result: std::result::Result<Vec<Decimal>, SupplierError>,
        delay: Duration,
    }

    impl MockSupplier {
        fn successful(name: &str, fares: &[i64]) -> Arc<dyn FlightSupplier> {
            Arc::new(Self {
                name: name.to_string(),
                result: Ok(fares.iter().map(|f| Decimal::new(*f, 0)).collect()),
                delay: Duration::ZERO,
            })
        }

        fn delayed(name: &str, fares: &[i64], delay: Duration) -> Arc<dyn FlightSupplier> {
            Arc::new(Self {
                name: name.to_string(),
                result: Ok(fares.iter().map(|f| Decimal::new(*f, 0)).collect()),
                delay,
            })
        }

        fn failing(name: &str, error: SupplierError) -> Arc<dyn FlightSupplier> {
            Arc::new(Self {
                name: name.to_string(),
                result: Err(error),
                delay: Duration::ZERO,
            })
        }
    }

    #[async_trait]
    impl FlightSupplier for MockSupplier {
        fn name(&self) -> &str {
            &self.name
        }

        async fn query(
            &self,
            _criteria: &SearchCriteria,
        ) -> std::result::Result<Vec<CanonicalOffer>, SupplierError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let fares = self.result.clone()?;
            Ok(fares
                .into_iter()
                .enumerate()
                .map(|(i, fare)| {
                    CanonicalOffer::new(
                        format!("{}-{}", self.name, i),
                        self.name.clone(),
                        fare,
                        "LHR",
                        "AMS",
                        Utc.with_ymd_and_hms(2022, 1, 1, 10, 0, 0).unwrap(),
                        Utc.with_ymd_and_hms(2022, 1, 1, 12, 0, 0).unwrap(),
                    )
                    .unwrap()
                })
                .collect())
        }
    }

    struct PanickingSupplier;

    #[async_trait]
    impl FlightSupplier for PanickingSupplier {
        fn name(&self) -> &str {
            "Panicky"
        }

        async fn query(
            &self,
            _criteria: &SearchCriteria,
        ) -> std::result::Result<Vec<CanonicalOffer>, SupplierError> {
            panic!("supplier adapter bug");
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        completed: Mutex<Vec<(String, usize)>>,
        failed: Mutex<Vec<(String, &'static str)>>,
        merged: Mutex<Option<(usize, usize)>>,
    }

    impl SearchObserver for RecordingObserver {
        fn on_completed(&self, supplier: &str, offers: usize, _elapsed: Duration) {
            self.completed
                .lock()
                .unwrap()
                .push((supplier.to_string(), offers));
        }

        fn on_failed(&self, supplier: &str, error: &SupplierError, _elapsed: Duration) {
            self.failed
                .lock()
                .unwrap()
                .push((supplier.to_string(), error.kind()));
        }

        fn on_merged(&self, total_offers: usize, suppliers: usize) {
            *self.merged.lock().unwrap() = Some((total_offers, suppliers));
        }
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            origin: "LHR".to_string(),
            destination: "AMS".to_string(),
            departure_date: chrono::NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            return_date: chrono::NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
            passengers: 2,
        }
    }

    fn fares(offers: &[CanonicalOffer]) -> Vec<Decimal> {
        offers.iter().map(|o| o.fare()).collect()
    }

    #[test]
    fn test_new_rejects_empty_supplier_list() {
        let result = FlightSearchService::new(vec![], Duration::from_secs(1));
        assert!(matches!(
            result,
            Err(FlightSearchError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        let result = FlightSearchService::new(
            vec![MockSupplier::successful("A", &[100])],
            Duration::ZERO,
        );
        assert!(matches!(
            result,
            Err(FlightSearchError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_aggregate_returns_all_offers_sorted() {
        let service = FlightSearchService::new(
            vec![
                MockSupplier::successful("Supplier1", &[200, 150]),
                MockSupplier::successful("Supplier2", &[180, 220, 90]),
            ],
            Duration::from_secs(5),
        )
        .unwrap();

        let result = service.search_flights(&criteria()).await;

        assert_eq!(result.len(), 5);
        assert_eq!(
            fares(&result),
            vec![
                Decimal::new(90, 0),
                Decimal::new(150, 0),
                Decimal::new(180, 0),
                Decimal::new(200, 0),
                Decimal::new(220, 0),
            ]
        );
    }

    #[tokio::test]
    async fn test_equal_fares_follow_registration_order_not_completion_order() {
        // The first supplier finishes last, but still wins ties.
        let service = FlightSearchService::new(
            vec![
                MockSupplier::delayed("Slow", &[100, 100], Duration::from_millis(150)),
                MockSupplier::successful("Fast", &[100]),
            ],
            Duration::from_secs(5),
        )
        .unwrap();

        let result = service.search_flights(&criteria()).await;

        let airlines: Vec<&str> = result.iter().map(|o| o.airline()).collect();
        assert_eq!(airlines, vec!["Slow-0", "Slow-1", "Fast-0"]);
    }

    #[tokio::test]
    async fn test_failing_supplier_is_isolated() {
        let observer = Arc::new(RecordingObserver::default());
        let service = FlightSearchService::new(
            vec![
                MockSupplier::failing("Broken", SupplierError::status(500, "Internal Server Error")),
                MockSupplier::successful("Healthy", &[120, 80]),
                MockSupplier::failing("Garbled", SupplierError::format("expected array")),
            ],
            Duration::from_secs(5),
        )
        .unwrap()
        .with_observer(observer.clone());

        let result = service.search_flights(&criteria()).await;

        assert_eq!(fares(&result), vec![Decimal::new(80, 0), Decimal::new(120, 0)]);
        assert_eq!(
            *observer.failed.lock().unwrap(),
            vec![
                ("Broken".to_string(), "transport"),
                ("Garbled".to_string(), "format")
            ]
        );
        assert_eq!(
            *observer.completed.lock().unwrap(),
            vec![("Healthy".to_string(), 2)]
        );
        assert_eq!(*observer.merged.lock().unwrap(), Some((2, 3)));
    }

    #[tokio::test]
    async fn test_all_suppliers_failing_returns_empty() {
        let service = FlightSearchService::new(
            vec![
                MockSupplier::failing("A", SupplierError::transport("connection refused")),
                MockSupplier::delayed("B", &[100], Duration::from_secs(5)),
            ],
            Duration::from_millis(100),
        )
        .unwrap();

        let result = service.search_flights(&criteria()).await;

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_slow_supplier_is_abandoned_at_timeout() {
        let observer = Arc::new(RecordingObserver::default());
        let service = FlightSearchService::new(
            vec![
                MockSupplier::delayed("A", &[350], Duration::from_millis(50)),
                MockSupplier::delayed("B", &[100], Duration::from_secs(30)),
            ],
            Duration::from_secs(1),
        )
        .unwrap()
        .with_observer(observer.clone());

        let started = std::time::Instant::now();
        let result = service.search_flights(&criteria()).await;
        let elapsed = started.elapsed();

        assert_eq!(fares(&result), vec![Decimal::new(350, 0)]);
        assert!(elapsed >= Duration::from_millis(950), "returned too early: {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(3), "waited on slow supplier: {:?}", elapsed);
        assert_eq!(
            *observer.failed.lock().unwrap(),
            vec![("B".to_string(), "timeout")]
        );
    }

    #[tokio::test]
    async fn test_aggregate_uses_explicit_timeout() {
        let service = FlightSearchService::new(
            vec![MockSupplier::delayed("A", &[100], Duration::from_millis(300))],
            Duration::from_secs(5),
        )
        .unwrap();

        assert!(service
            .aggregate(&criteria(), Duration::from_millis(50))
            .await
            .is_empty());
        assert_eq!(
            service.aggregate(&criteria(), Duration::from_secs(2)).await.len(),
            1
        );
    }

    #[tokio::test]
    async fn test_timeouts_run_in_parallel() {
        let service = FlightSearchService::new(
            vec![
                MockSupplier::delayed("A", &[1], Duration::from_secs(10)),
                MockSupplier::delayed("B", &[2], Duration::from_secs(10)),
                MockSupplier::delayed("C", &[3], Duration::from_secs(10)),
            ],
            Duration::from_millis(300),
        )
        .unwrap();

        let started = std::time::Instant::now();
        let result = service.search_flights(&criteria()).await;

        assert!(result.is_empty());
        assert!(started.elapsed() < Duration::from_millis(900));
    }

    #[tokio::test]
    async fn test_panicking_supplier_is_contained() {
        let observer = Arc::new(RecordingObserver::default());
        let service = FlightSearchService::new(
            vec![
                Arc::new(PanickingSupplier) as Arc<dyn FlightSupplier>,
                MockSupplier::successful("Healthy", &[42]),
            ],
            Duration::from_secs(1),
        )
        .unwrap()
        .with_observer(observer.clone());

        let result = service.search_flights(&criteria()).await;

        assert_eq!(fares(&result), vec![Decimal::new(42, 0)]);
        assert_eq!(
            *observer.failed.lock().unwrap(),
            vec![("Panicky".to_string(), "panicked")]
        );
    }

    #[test]
    fn test_outcome_failure_and_offers() {
        let timed_out = SupplierOutcome::TimedOut {
            after: Duration::from_millis(1000),
        };
        assert_eq!(
            timed_out.failure(),
            Some(SupplierError::Timeout { timeout_ms: 1000 })
        );
        assert!(timed_out.into_offers().is_empty());

        let completed = SupplierOutcome::Completed(vec![]);
        assert!(completed.failure().is_none());
    }

    #[test]
    fn test_supplier_names_keep_registration_order() {
        let service = FlightSearchService::new(
            vec![
                MockSupplier::successful("CrazyAir", &[]),
                MockSupplier::successful("ToughJet", &[]),
            ],
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(service.supplier_names(), vec!["CrazyAir", "ToughJet"]);
        assert_eq!(service.supplier_timeout(), Duration::from_secs(1));
    }
}

//! ConversionService and QueryService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use conversions_types::{
        AppError, ConversionId, ConversionRecord, ConversionRepository, ConvertRequest,
        CurrencyCode, DepartmentId, ExchangeRateProvider, NewConversion, RateLookup,
        RateUnavailable, RepoError,
    };

    use crate::{ConversionService, QueryService};

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        records: Mutex<Vec<ConversionRecord>>,
        next_id: AtomicUsize,
        failing: AtomicBool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                next_id: AtomicUsize::new(1),
                failing: AtomicBool::new(false),
            }
        }

        /// Makes every subsequent call fail with a database error.
        pub fn fail(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        fn check(&self) -> Result<(), RepoError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(RepoError::Database("connection refused".into()));
            }
            Ok(())
        }

        fn sorted(&self, keep: impl Fn(&ConversionRecord) -> bool) -> Vec<ConversionRecord> {
            let mut records: Vec<_> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| keep(r))
                .cloned()
                .collect();
            records.sort_by(|a, b| {
                b.conversion_date
                    .cmp(&a.conversion_date)
                    .then(b.id.cmp(&a.id))
            });
            records
        }
    }

    #[async_trait]
    impl ConversionRepository for MockRepo {
        async fn add(&self, conversion: NewConversion) -> Result<ConversionRecord, RepoError> {
            self.check()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
            let record = conversion.into_record(ConversionId::new(id));
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn get_by_id(
            &self,
            id: ConversionId,
        ) -> Result<Option<ConversionRecord>, RepoError> {
            self.check()?;
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn get_by_department(
            &self,
            department_id: DepartmentId,
        ) -> Result<Vec<ConversionRecord>, RepoError> {
            self.check()?;
            Ok(self.sorted(|r| r.department_id == department_id))
        }

        async fn get_by_target_currency(
            &self,
            code: &CurrencyCode,
        ) -> Result<Vec<ConversionRecord>, RepoError> {
            self.check()?;
            Ok(self.sorted(|r| &r.to_currency == code))
        }

        async fn get_all(&self) -> Result<Vec<ConversionRecord>, RepoError> {
            self.check()?;
            Ok(self.sorted(|_| true))
        }
    }

    /// Rate provider that always answers with the same lookup.
    pub struct MockRates {
        lookup: RateLookup,
        calls: AtomicUsize,
    }

    impl MockRates {
        pub fn new(lookup: RateLookup) -> Self {
            Self {
                lookup,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn resolved(rate: Decimal) -> Self {
            Self::new(RateLookup::Resolved(rate))
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExchangeRateProvider for MockRates {
        async fn get_rate(&self, _from: &CurrencyCode, _to: &CurrencyCode) -> RateLookup {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.lookup.clone()
        }
    }

    type Service = ConversionService<Arc<MockRepo>, Arc<MockRates>>;

    fn setup(rates: MockRates) -> (Service, Arc<MockRepo>, Arc<MockRates>) {
        let repo = Arc::new(MockRepo::new());
        let rates = Arc::new(rates);
        let service = ConversionService::new(repo.clone(), rates.clone());
        (service, repo, rates)
    }

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Convert
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_usd_to_eur() {
        let (service, repo, rates) = setup(MockRates::resolved(dec!(0.857829)));

        let record = service
            .convert(ConvertRequest::new("USD", "EUR", dec!(10), 1))
            .await
            .unwrap();

        assert_eq!(record.from_currency.as_str(), "USD");
        assert_eq!(record.to_currency.as_str(), "EUR");
        assert_eq!(record.amount, dec!(10));
        assert_eq!(record.exchange_rate, dec!(0.857829));
        assert_eq!(record.converted_amount, dec!(8.5783));
        assert_eq!(record.department_id.value(), 1);
        assert_eq!(rates.calls(), 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_convert_returns_stored_record() {
        let (service, repo, _) = setup(MockRates::resolved(dec!(1.25)));

        let record = service
            .convert(ConvertRequest::new("eur", "usd", dec!(4), 3))
            .await
            .unwrap();
        let stored = repo.get_by_id(record.id).await.unwrap().unwrap();

        assert_eq!(stored, record);
        assert_eq!(stored.from_currency.as_str(), "EUR");
    }

    #[tokio::test]
    async fn test_convert_stamps_current_time() {
        let (service, _, _) = setup(MockRates::resolved(dec!(2)));

        let before = Utc::now() - Duration::seconds(1);
        let record = service
            .convert(ConvertRequest::new("USD", "GBP", dec!(1), 1))
            .await
            .unwrap();

        assert!(record.conversion_date >= before);
        assert!(record.conversion_date <= Utc::now());
    }

    #[tokio::test]
    async fn test_convert_midpoint_rounds_away_from_zero() {
        let (service, _, _) = setup(MockRates::resolved(dec!(0.00001)));

        let record = service
            .convert(ConvertRequest::new("JPY", "USD", dec!(5), 1))
            .await
            .unwrap();

        assert_eq!(record.converted_amount, dec!(0.0001));
    }

    #[tokio::test]
    async fn test_convert_same_currency_skips_provider() {
        let (service, repo, rates) = setup(MockRates::resolved(dec!(1)));

        let result = service
            .convert(ConvertRequest::new("usd", "usd", dec!(5), 1))
            .await;

        assert!(matches!(result, Err(AppError::SameCurrencyConversion)));
        assert_eq!(rates.calls(), 0);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_convert_same_currency_regardless_of_amount() {
        let (service, _, _) = setup(MockRates::resolved(dec!(1)));

        let result = service
            .convert(ConvertRequest::new("EUR", "eur", dec!(-3), 0))
            .await;

        assert!(matches!(result, Err(AppError::SameCurrencyConversion)));
    }

    #[tokio::test]
    async fn test_convert_provider_same_currency_outcome() {
        let (service, repo, _) = setup(MockRates::new(RateLookup::SameCurrency));

        let result = service
            .convert(ConvertRequest::new("USD", "EUR", dec!(5), 1))
            .await;

        assert!(matches!(result, Err(AppError::SameCurrencyConversion)));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_convert_empty_rate_is_unsupported() {
        let (service, repo, rates) =
            setup(MockRates::new(RateLookup::Unavailable(RateUnavailable::EmptyRate)));

        let result = service
            .convert(ConvertRequest::new("USD", "XXX", dec!(10), 1))
            .await;

        match result {
            Err(AppError::UnsupportedCurrency(msg)) => {
                assert_eq!(msg, "no exchange rate received from USD to XXX")
            }
            other => panic!("expected UnsupportedCurrency, got {:?}", other),
        }
        assert_eq!(rates.calls(), 1);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_convert_network_failure_is_unsupported() {
        let (service, repo, _) = setup(MockRates::new(RateLookup::Unavailable(
            RateUnavailable::NetworkFailure("timed out".into()),
        )));

        let result = service
            .convert(ConvertRequest::new("USD", "EUR", dec!(10), 1))
            .await;

        assert!(matches!(result, Err(AppError::UnsupportedCurrency(_))));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_convert_missing_currency_is_unsupported() {
        let (service, _, rates) = setup(MockRates::resolved(dec!(1)));

        let mut req = ConvertRequest::new("USD", "EUR", dec!(10), 1);
        req.to_currency = None;
        let result = service.convert(req).await;

        assert!(matches!(result, Err(AppError::UnsupportedCurrency(_))));
        assert_eq!(rates.calls(), 0);
    }

    #[tokio::test]
    async fn test_convert_malformed_code_is_bad_request() {
        let (service, _, rates) = setup(MockRates::resolved(dec!(1)));

        let result = service
            .convert(ConvertRequest::new("DOLLAR", "EUR", dec!(10), 1))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(rates.calls(), 0);
    }

    #[tokio::test]
    async fn test_convert_invalid_amount_is_bad_request() {
        let (service, repo, rates) = setup(MockRates::resolved(dec!(1)));

        for amount in [dec!(0), dec!(-10)] {
            let result = service
                .convert(ConvertRequest::new("USD", "EUR", amount, 1))
                .await;
            assert!(matches!(result, Err(AppError::BadRequest(_))));
        }
        assert_eq!(rates.calls(), 0);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_convert_invalid_department_is_bad_request() {
        let (service, _, rates) = setup(MockRates::resolved(dec!(1)));

        let result = service
            .convert(ConvertRequest::new("USD", "EUR", dec!(10), 0))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(rates.calls(), 0);
    }

    #[tokio::test]
    async fn test_convert_overflow_is_bad_request() {
        let (service, repo, _) = setup(MockRates::resolved(dec!(2)));

        let result = service
            .convert(ConvertRequest::new("USD", "EUR", Decimal::MAX, 1))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_convert_is_not_idempotent() {
        let (service, repo, _) = setup(MockRates::resolved(dec!(0.9)));

        let first = service
            .convert(ConvertRequest::new("USD", "EUR", dec!(10), 1))
            .await
            .unwrap();
        let second = service
            .convert(ConvertRequest::new("USD", "EUR", dec!(10), 1))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_convert_store_failure_is_internal() {
        let (service, repo, _) = setup(MockRates::resolved(dec!(0.9)));
        repo.fail();

        let result = service
            .convert(ConvertRequest::new("USD", "EUR", dec!(10), 1))
            .await;

        match result {
            Err(err @ AppError::Internal(_)) => assert!(!err.is_client_error()),
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    async fn seeded_queries() -> (QueryService<Arc<MockRepo>>, Vec<ConversionRecord>) {
        let repo = Arc::new(MockRepo::new());
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let inputs = [
            ("USD", "EUR", 1, t0),
            ("EUR", "GBP", 2, t0 + Duration::hours(1)),
            ("GBP", "EUR", 1, t0 + Duration::hours(2)),
        ];

        let mut records = Vec::new();
        for (from, to, dept, at) in inputs {
            let conversion = NewConversion::new_at(
                code(from),
                code(to),
                dec!(10),
                dec!(0.5),
                DepartmentId::new(dept).unwrap(),
                at,
            )
            .unwrap();
            records.push(repo.add(conversion).await.unwrap());
        }
        (QueryService::new(repo), records)
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let (queries, records) = seeded_queries().await;

        let found = queries.get_by_id(records[1].id).await.unwrap().unwrap();

        assert_eq!(found.id, records[1].id);
        assert_eq!(found.to_currency.as_str(), "GBP");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let (queries, _) = seeded_queries().await;

        let found = queries.get_by_id(ConversionId::new(999)).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_all_newest_first() {
        let (queries, records) = seeded_queries().await;

        let ids: Vec<_> = queries.get_all().await.unwrap().iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![records[2].id, records[1].id, records[0].id]);
    }

    #[tokio::test]
    async fn test_get_by_department() {
        let (queries, records) = seeded_queries().await;

        let ids: Vec<_> = queries
            .get_by_department(1)
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, vec![records[2].id, records[0].id]);
        assert!(queries.get_by_department(77).await.unwrap().is_empty());
        assert!(queries.get_by_department(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_target_currency() {
        let (queries, records) = seeded_queries().await;

        let ids: Vec<_> = queries
            .get_by_target_currency("eur")
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, vec![records[2].id, records[0].id]);
        assert!(queries.get_by_target_currency("JPY").await.unwrap().is_empty());
        assert!(queries.get_by_target_currency("EURO").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_store_failure_is_internal() {
        let repo = Arc::new(MockRepo::new());
        repo.fail();
        let queries = QueryService::new(repo);

        assert!(matches!(queries.get_all().await, Err(AppError::Internal(_))));
    }
}

//! Short link allocation service.

use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_reserved};
use crate::utils::url_validator::validate_destination;
use serde_json::json;

/// Default ceiling on allocation attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Outcome of trying to claim one candidate code.
///
/// Fatal store failures travel separately as `Err(StoreError)`, so the retry
/// boundary is the `Collision` variant and nothing else.
#[derive(Debug)]
pub enum Claim {
    Created(ShortLink),
    Collision,
}

/// Service allocating unique short codes for destination URLs.
///
/// The `exists` pre-check only saves a wasted insert; uniqueness is guaranteed
/// by the store rejecting duplicate codes on insert. Both paths count against
/// the same attempt budget.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short link for `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    /// No store call is made in that case.
    ///
    /// Returns [`AppError::CollisionExhausted`] if every attempt hit a taken code.
    /// Nothing is written in that case.
    ///
    /// Returns [`AppError::Internal`] on any other store failure, without retrying.
    pub async fn create_short_link(&self, destination: String) -> Result<ShortLink, AppError> {
        validate_destination(&destination).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        self.allocate(destination).await
    }

    /// Runs the bounded generate / check / insert loop.
    async fn allocate(&self, destination: String) -> Result<ShortLink, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            match self.try_claim(&code, &destination).await? {
                Claim::Created(link) => {
                    metrics::counter!("shortlink_allocations_total").increment(1);
                    tracing::info!(code = %link.code, attempt, "Short link created");
                    return Ok(link);
                }
                Claim::Collision => {
                    metrics::counter!("shortlink_collisions_total").increment(1);
                    tracing::warn!(code = %code, attempt, "Short code collision, regenerating");
                }
            }
        }

        metrics::counter!("shortlink_allocation_exhausted_total").increment(1);
        tracing::error!(
            attempts = self.max_attempts,
            "Short code allocation exhausted"
        );

        Err(AppError::CollisionExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Attempts to claim a single candidate code.
    ///
    /// Reserved codes, codes reported by `exists`, and inserts rejected as
    /// duplicates all come back as [`Claim::Collision`].
    pub async fn try_claim(&self, code: &str, destination: &str) -> Result<Claim, StoreError> {
        if is_reserved(code) || self.repository.exists(code).await? {
            return Ok(Claim::Collision);
        }

        let new_link = NewShortLink::now(code.to_string(), destination.to_string());

        match self.repository.insert(new_link).await {
            Ok(link) => Ok(Claim::Created(link)),
            Err(StoreError::DuplicateKey(_)) => Ok(Claim::Collision),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use mockall::Sequence;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Hands out a scripted list of codes, then repeats the last one.
    struct ScriptedGenerator {
        codes: Mutex<VecDeque<&'static str>>,
        last: &'static str,
    }

    impl ScriptedGenerator {
        fn new(codes: &[&'static str]) -> Self {
            Self {
                codes: Mutex::new(codes.iter().copied().collect()),
                last: codes.last().copied().unwrap_or("AAAAAA"),
            }
        }
    }

    impl CodeGenerator for ScriptedGenerator {
        fn generate(&self) -> String {
            self.codes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.last)
                .to_string()
        }
    }

    fn service(repo: MockLinkRepository, codes: &[&'static str], attempts: usize) -> LinkService {
        LinkService::new(
            Arc::new(repo),
            Arc::new(ScriptedGenerator::new(codes)),
            attempts,
        )
    }

    #[tokio::test]
    async fn test_create_short_link_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .withf(|code| code == "aB3xY9")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_insert()
            .withf(|new_link| {
                new_link.code == "aB3xY9" && new_link.destination == "https://example.com/page"
            })
            .times(1)
            .returning(|new_link| Ok(new_link.into_link()));

        let service = service(mock_repo, &["aB3xY9"], DEFAULT_MAX_ATTEMPTS);

        let link = service
            .create_short_link("https://example.com/page".to_string())
            .await
            .unwrap();

        assert_eq!(link.code, "aB3xY9");
        assert_eq!(link.destination, "https://example.com/page");
        assert_eq!(link.visit_count, 0);
    }

    #[tokio::test]
    async fn test_create_short_link_retries_taken_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .withf(|code| code == "taken1")
            .times(2)
            .returning(|_| Ok(true));
        mock_repo
            .expect_exists()
            .withf(|code| code == "fresh1")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "fresh1")
            .times(1)
            .returning(|new_link| Ok(new_link.into_link()));

        let service = service(
            mock_repo,
            &["taken1", "taken1", "fresh1"],
            DEFAULT_MAX_ATTEMPTS,
        );

        let link = service
            .create_short_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.code, "fresh1");
    }

    #[tokio::test]
    async fn test_create_short_link_retries_late_duplicate_on_insert() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock_repo.expect_exists().returning(|_| Ok(false));

        // A concurrent writer claimed "raced1" between the check and the insert.
        mock_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "raced1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Err(StoreError::DuplicateKey(new_link.code)));
        mock_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "won123")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(new_link.into_link()));

        let service = service(mock_repo, &["raced1", "won123"], DEFAULT_MAX_ATTEMPTS);

        let link = service
            .create_short_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.code, "won123");
    }

    #[tokio::test]
    async fn test_create_short_link_skips_reserved_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .withf(|code| code == "Zq81pX")
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|new_link| Ok(new_link.into_link()));

        let service = service(mock_repo, &["health", "Zq81pX"], DEFAULT_MAX_ATTEMPTS);

        let link = service
            .create_short_link("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(link.code, "Zq81pX");
    }

    #[tokio::test]
    async fn test_create_short_link_collision_exhausted_writes_nothing() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|_| Ok(true));
        mock_repo.expect_insert().times(0);

        let service = service(mock_repo, &["AAAAAA"], DEFAULT_MAX_ATTEMPTS);

        let result = service
            .create_short_link("https://example.com".to_string())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::CollisionExhausted { attempts } if attempts == DEFAULT_MAX_ATTEMPTS
        ));
    }

    #[tokio::test]
    async fn test_attempt_budget_shared_across_collision_kinds() {
        let mut mock_repo = MockLinkRepository::new();

        // Pre-check collisions and late insert collisions alternate.
        mock_repo
            .expect_exists()
            .withf(|code| code == "check1")
            .returning(|_| Ok(true));
        mock_repo
            .expect_exists()
            .withf(|code| code == "race01")
            .returning(|_| Ok(false));
        mock_repo
            .expect_insert()
            .times(2)
            .returning(|new_link| Err(StoreError::DuplicateKey(new_link.code)));

        let service = service(mock_repo, &["check1", "race01", "check1", "race01"], 4);

        let result = service
            .create_short_link("https://example.com".to_string())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::CollisionExhausted { attempts: 4 }
        ));
    }

    #[tokio::test]
    async fn test_create_short_link_store_failure_is_not_retried() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(1).returning(|_| Ok(false));
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection reset".to_string())));

        let service = service(mock_repo, &["aaaaaa", "bbbbbb"], DEFAULT_MAX_ATTEMPTS);

        let result = service
            .create_short_link("https://example.com".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_exists_failure_is_fatal() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .times(1)
            .returning(|_| Err(StoreError::Timeout("pool timed out".to_string())));
        mock_repo.expect_insert().times(0);

        let service = service(mock_repo, &["aaaaaa"], DEFAULT_MAX_ATTEMPTS);

        let result = service
            .create_short_link("https://example.com".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_url_never_touches_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_exists().times(0);
        mock_repo.expect_insert().times(0);

        let service = service(mock_repo, &["aaaaaa"], DEFAULT_MAX_ATTEMPTS);

        for input in ["not a url", "google.com", ""] {
            let result = service.create_short_link(input.to_string()).await;
            assert!(
                matches!(result.unwrap_err(), AppError::Validation { .. }),
                "{input}"
            );
        }
    }

    #[tokio::test]
    async fn test_try_claim_reports_tagged_outcomes() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .withf(|code| code == "exists")
            .returning(|_| Ok(true));
        mock_repo
            .expect_exists()
            .withf(|code| code == "broken")
            .returning(|_| Err(StoreError::Query("syntax error".to_string())));

        let service = service(mock_repo, &[], DEFAULT_MAX_ATTEMPTS);

        assert!(matches!(
            service.try_claim("exists", "https://example.com").await,
            Ok(Claim::Collision)
        ));
        assert!(matches!(
            service.try_claim("broken", "https://example.com").await,
            Err(StoreError::Query(_))
        ));
    }

    #[test]
    fn test_zero_attempts_is_clamped_to_one() {
        let service = service(MockLinkRepository::new(), &[], 0);
        assert_eq!(service.max_attempts, 1);
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::Duration;
use uuid::Uuid;

use lori_auth::domain::repository::CredentialStore;
use lori_auth::domain::types::AuthUser;
use lori_auth::error::AuthServiceError;
use lori_auth::infra::ChallengeBackend;
use lori_auth::infra::memory::InMemoryChallengeStore;
use lori_auth::usecase::session::{AuthSessionManager, SessionSettings};
use lori_notify::EmailMessage;
use lori_testing::clock::ManualClock;
use lori_testing::notify::RecordingGateway;

pub const TEST_SESSION_SECRET: &str = "test-session-secret";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

// ── MockCredentialStore ──────────────────────────────────────────────────────

/// Users with plaintext passwords. Counts password checks so tests can tell
/// that unknown emails still go through verification.
#[derive(Clone)]
pub struct MockCredentialStore {
    pub users: Arc<std::sync::Mutex<Vec<(AuthUser, String)>>>,
    pub verify_calls: Arc<AtomicUsize>,
    pub fail_lookups: Arc<AtomicBool>,
}

impl MockCredentialStore {
    pub fn new(users: Vec<AuthUser>) -> Self {
        Self {
            users: Arc::new(std::sync::Mutex::new(
                users
                    .into_iter()
                    .map(|u| (u, TEST_PASSWORD.to_owned()))
                    .collect(),
            )),
            verify_calls: Arc::new(AtomicUsize::new(0)),
            fail_lookups: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn remove(&self, email: &str) {
        self.users.lock().unwrap().retain(|(u, _)| u.email != email);
    }

    /// Make `find_by_email` fail as a dropped database connection would.
    pub fn set_lookups_failing(&self, failing: bool) {
        self.fail_lookups.store(failing, Ordering::SeqCst);
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

impl CredentialStore for MockCredentialStore {
    async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthUser>, AuthServiceError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, p)| u.email == email && p == password)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthServiceError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AuthServiceError::Internal(anyhow::anyhow!(
                "connection reset"
            )));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user() -> AuthUser {
    AuthUser {
        id: Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001),
        email: "dispatcher@lorilogistics.com".to_owned(),
        name: "Dana".to_owned(),
    }
}

pub fn test_settings() -> SessionSettings {
    SessionSettings {
        otp_ttl: Duration::minutes(5),
        session_ttl: Duration::hours(1),
        session_secret: TEST_SESSION_SECRET.into(),
    }
}

pub type TestManager =
    AuthSessionManager<MockCredentialStore, ChallengeBackend, RecordingGateway, ManualClock>;

/// Manager over one user, a real in-memory challenge store and a recording gateway.
pub struct Harness {
    pub manager: TestManager,
    pub store: Arc<InMemoryChallengeStore>,
    pub credentials: MockCredentialStore,
    pub gateway: RecordingGateway,
    pub clock: ManualClock,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(InMemoryChallengeStore::new(100, 5))
    }

    pub fn with_store(store: InMemoryChallengeStore) -> Self {
        let store = Arc::new(store);
        let credentials = MockCredentialStore::new(vec![test_user()]);
        let gateway = RecordingGateway::new();
        let clock = ManualClock::at_date(2024, 5, 1);
        let manager = AuthSessionManager {
            credentials: credentials.clone(),
            challenges: ChallengeBackend::Memory(Arc::clone(&store)),
            notifier: gateway.clone(),
            clock: clock.clone(),
            settings: test_settings(),
        };
        Self {
            manager,
            store,
            credentials,
            gateway,
            clock,
        }
    }

    /// Code from the most recent message sent to `email`.
    pub fn last_code_for(&self, email: &str) -> String {
        let sent = self.gateway.sent_to(email);
        code_from(sent.last().expect("a login email"))
    }
}

pub fn code_from(message: &EmailMessage) -> String {
    let (_, rest) = message
        .text
        .split_once("Your OTP for login is: ")
        .expect("code line");
    rest.chars().take_while(char::is_ascii_digit).collect()
}

//! Core business logic for the authentication system.
//!
//! [`UserDirectory`] owns every registered account for the lifetime of the
//! process. It enforces username uniqueness, issues ids that are never
//! reused, and answers credential checks. Records are only ever appended.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::credentials::{CredentialVerifier, IdGenerator, PlaintextVerifier, RandomIdGenerator};
use super::errors::AuthError;
use super::models::{NewUser, PublicUser, UserId, UserRecord};

const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Default)]
struct Records {
    /// Insertion order.
    users: Vec<UserRecord>,
    by_username: HashMap<String, usize>,
    issued_ids: HashSet<UserId>,
}

impl Records {
    fn find(&self, username: &str) -> Option<&UserRecord> {
        self.by_username.get(username).map(|&idx| &self.users[idx])
    }
}

pub struct UserDirectory {
    records: RwLock<Records>,
    ids: Box<dyn IdGenerator>,
    verifier: Box<dyn CredentialVerifier>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::with_components(RandomIdGenerator, PlaintextVerifier)
    }

    pub fn with_components(
        ids: impl IdGenerator + 'static,
        verifier: impl CredentialVerifier + 'static,
    ) -> Self {
        Self {
            records: RwLock::new(Records::default()),
            ids: Box::new(ids),
            verifier: Box::new(verifier),
        }
    }

    /// Adds a new account. The uniqueness check, id issuance and append all
    /// happen under one write lock, so a failed call leaves nothing behind.
    pub fn register(&self, new_user: NewUser) -> Result<UserRecord, AuthError> {
        if new_user.username.is_empty() || new_user.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let mut records = self.records.write();
        if records.by_username.contains_key(&new_user.username) {
            debug!(username = %new_user.username, "rejected duplicate username");
            return Err(AuthError::DuplicateUsername);
        }

        let id = self.fresh_id(&records.issued_ids)?;
        let record = UserRecord {
            id: id.clone(),
            username: new_user.username,
            password: new_user.password,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
        };

        let idx = records.users.len();
        records.issued_ids.insert(id);
        records.by_username.insert(record.username.clone(), idx);
        records.users.push(record.clone());

        info!(username = %record.username, user_id = %record.id, "registered user");
        Ok(record)
    }

    /// Returns the matching record when `username` exists and `password`
    /// verifies against it. Unknown users and wrong passwords are
    /// indistinguishable to the caller.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserRecord, AuthError> {
        let records = self.records.read();
        self.check(&records, username, password).cloned()
    }

    /// Lists every account in registration order, provided the caller's own
    /// credentials are present and valid. The caller is included.
    pub fn list_if_authorized(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Vec<PublicUser>, AuthError> {
        let (username, password) = match (non_empty(username), non_empty(password)) {
            (Some(u), Some(p)) => (u, p),
            _ => return Err(AuthError::MissingCredentials),
        };

        let records = self.records.read();
        self.check(&records, username, password)?;
        Ok(records.users.iter().map(UserRecord::to_public).collect())
    }

    pub fn len(&self) -> usize {
        self.records.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check<'a>(
        &self,
        records: &'a Records,
        username: &str,
        password: &str,
    ) -> Result<&'a UserRecord, AuthError> {
        match records.find(username) {
            Some(record) if self.verifier.verify(&record.password, password) => Ok(record),
            _ => {
                debug!(username, "credential check failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    fn fresh_id(&self, issued: &HashSet<UserId>) -> Result<UserId, AuthError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.generate();
            if !candidate.as_str().is_empty() && !issued.contains(&candidate) {
                return Ok(candidate);
            }
        }
        warn!(attempts = MAX_ID_ATTEMPTS, "id generator kept colliding");
        Err(AuthError::IdGenerationFailed {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn new_user(username: &str, password: &str, first: &str, last: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: password.to_string(),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
        }
    }

    fn seeded() -> UserDirectory {
        let directory = UserDirectory::new();
        directory.register(new_user("alice", "pw1", "A", "L")).unwrap();
        directory.register(new_user("bob", "pw2", "B", "M")).unwrap();
        directory
    }

    struct ConstantIds;

    impl IdGenerator for ConstantIds {
        fn generate(&self) -> UserId {
            UserId::new("same")
        }
    }

    /// Repeats each id once before moving on, forcing a retry per registration.
    struct StutteringIds(AtomicUsize);

    impl IdGenerator for StutteringIds {
        fn generate(&self) -> UserId {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            UserId::new(format!("id-{}", n / 2))
        }
    }

    #[test]
    fn distinct_usernames_get_distinct_ids() {
        let directory = UserDirectory::new();
        let ids: HashSet<UserId> = (0..50)
            .map(|i| {
                directory
                    .register(new_user(&format!("user{i}"), "pw", "F", "L"))
                    .unwrap()
                    .id
            })
            .collect();
        assert_eq!(ids.len(), 50);
        assert!(ids.iter().all(|id| !id.as_str().is_empty()));
        assert_eq!(directory.len(), 50);
    }

    #[test]
    fn duplicate_username_is_rejected_once() {
        let directory = UserDirectory::new();
        directory.register(new_user("alice", "pw1", "A", "L")).unwrap();
        let err = directory
            .register(new_user("alice", "other", "X", "Y"))
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateUsername);
        assert_eq!(directory.len(), 1);
        assert!(directory.authenticate("alice", "pw1").is_ok());
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let directory = seeded();
        assert!(directory.register(new_user("Alice", "pw", "A", "L")).is_ok());
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn register_requires_username_and_password() {
        let directory = UserDirectory::new();
        assert_eq!(
            directory.register(new_user("", "pw", "A", "L")).unwrap_err(),
            AuthError::MissingCredentials
        );
        assert_eq!(
            directory.register(new_user("alice", "", "A", "L")).unwrap_err(),
            AuthError::MissingCredentials
        );
        assert!(directory.is_empty());
    }

    #[test]
    fn names_may_be_absent() {
        let directory = UserDirectory::new();
        let record = directory
            .register(NewUser {
                username: "anon".to_string(),
                password: "pw".to_string(),
                first_name: None,
                last_name: None,
            })
            .unwrap();
        assert_eq!(record.first_name, None);
        assert_eq!(record.last_name, None);
    }

    #[test]
    fn authenticate_returns_matching_record() {
        let directory = seeded();
        let record = directory.authenticate("alice", "pw1").unwrap();
        assert_eq!(record.username, "alice");
        assert_eq!(record.first_name.as_deref(), Some("A"));
        assert_eq!(record.last_name.as_deref(), Some("L"));
    }

    #[rstest]
    #[case("alice", "wrong")]
    #[case("alice", "")]
    #[case("carol", "pw1")]
    #[case("ALICE", "pw1")]
    #[case("bob", "pw1")]
    fn authenticate_rejects_bad_credentials(#[case] username: &str, #[case] password: &str) {
        let directory = seeded();
        assert_eq!(
            directory.authenticate(username, password).unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn repeated_authentication_does_not_change_state() {
        let directory = seeded();
        let before = directory.list_if_authorized(Some("bob"), Some("pw2")).unwrap();
        let first = directory.authenticate("alice", "pw1").unwrap();
        for _ in 0..10 {
            assert_eq!(directory.authenticate("alice", "pw1").unwrap(), first);
        }
        let after = directory.list_if_authorized(Some("bob"), Some("pw2")).unwrap();
        assert_eq!(before, after);
        assert_eq!(directory.len(), 2);
    }

    #[rstest]
    #[case(None, Some("pw1"))]
    #[case(Some("alice"), None)]
    #[case(None, None)]
    #[case(Some(""), Some("pw1"))]
    #[case(Some("alice"), Some(""))]
    fn listing_without_credentials_is_missing(
        #[case] username: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        let directory = seeded();
        assert_eq!(
            directory.list_if_authorized(username, password).unwrap_err(),
            AuthError::MissingCredentials
        );
    }

    #[test]
    fn listing_with_wrong_password_is_invalid() {
        let directory = seeded();
        assert_eq!(
            directory
                .list_if_authorized(Some("alice"), Some("nope"))
                .unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            directory
                .list_if_authorized(Some("nobody"), Some("pw1"))
                .unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn listing_returns_everyone_in_registration_order() {
        let directory = seeded();
        directory.register(new_user("carol", "pw3", "C", "N")).unwrap();

        let users = directory.list_if_authorized(Some("bob"), Some("pw2")).unwrap();
        let first_names: Vec<_> = users
            .iter()
            .map(|u| u.first_name.as_deref().unwrap())
            .collect();
        assert_eq!(first_names, ["A", "B", "C"]);

        let bob = directory.authenticate("bob", "pw2").unwrap();
        assert!(users.contains(&bob.to_public()));
    }

    #[test]
    fn colliding_ids_are_retried() {
        let directory =
            UserDirectory::with_components(StutteringIds(AtomicUsize::new(0)), PlaintextVerifier);
        let a = directory.register(new_user("a", "pw", "A", "A")).unwrap();
        let b = directory.register(new_user("b", "pw", "B", "B")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn exhausted_id_generator_leaves_directory_unchanged() {
        let directory = UserDirectory::with_components(ConstantIds, PlaintextVerifier);
        directory.register(new_user("a", "pw", "A", "A")).unwrap();
        let err = directory.register(new_user("b", "pw", "B", "B")).unwrap_err();
        assert_eq!(
            err,
            AuthError::IdGenerationFailed {
                attempts: MAX_ID_ATTEMPTS
            }
        );
        assert_eq!(directory.len(), 1);
        assert_eq!(
            directory.authenticate("b", "pw").unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn custom_verifier_is_consulted() {
        struct CaseInsensitive;

        impl CredentialVerifier for CaseInsensitive {
            fn verify(&self, stored: &str, supplied: &str) -> bool {
                stored.eq_ignore_ascii_case(supplied)
            }
        }

        let directory = UserDirectory::with_components(RandomIdGenerator, CaseInsensitive);
        directory.register(new_user("alice", "Secret", "A", "L")).unwrap();
        assert!(directory.authenticate("alice", "SECRET").is_ok());
    }

    #[test]
    fn concurrent_duplicate_registrations_admit_one() {
        let directory = Arc::new(UserDirectory::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let directory = Arc::clone(&directory);
                std::thread::spawn(move || {
                    directory.register(new_user("racer", &format!("pw{i}"), "R", "C"))
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(directory.len(), 1);
    }
}

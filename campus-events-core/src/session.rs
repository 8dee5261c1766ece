//! Session management: signup, login, logout and session restore.
//!
//! The registry of users and the active session both live in the store.
//! A [`SessionManager`] is created once per process with [`SessionManager::restore`]
//! and writes every change through to the store before returning.

use crate::error::CampusResult;
use crate::store::{
    CURRENT_USER_KEY, KeyValueStore, REGISTERED_USERS_KEY, read_json, read_json_lossy, write_json,
};
use crate::user::{Role, SessionUser, User};

pub struct SessionManager<S> {
    store: S,
    current: Option<SessionUser>,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Load the persisted session, if any. A missing or malformed record
    /// leaves the session empty.
    pub fn restore(store: S) -> Self {
        let current: Option<SessionUser> = read_json_lossy(&store, CURRENT_USER_KEY);

        if let Some(user) = &current {
            tracing::debug!(user_id = %user.id, "restored session");
        }

        SessionManager { store, current }
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    /// Every registered user. Malformed or unreadable storage reads as an
    /// empty registry.
    pub fn registered_users(&self) -> Vec<User> {
        read_json_lossy(&self.store, REGISTERED_USERS_KEY).unwrap_or_default()
    }

    /// The registry for a read-modify-write. Only malformed storage reads as
    /// empty; a failing read is returned as an error.
    fn load_registry(&self) -> CampusResult<Vec<User>> {
        Ok(read_json(&self.store, REGISTERED_USERS_KEY)?.unwrap_or_default())
    }

    /// Log in with an exact email and password match.
    ///
    /// Returns `Ok(false)` without touching the current session when no user
    /// matches; unknown email and wrong password are not told apart.
    pub fn login(&mut self, email: &str, password: &str) -> CampusResult<bool> {
        let Some(user) = self
            .load_registry()?
            .into_iter()
            .find(|u| u.email == email && u.password == password)
        else {
            tracing::info!("login rejected");
            return Ok(false);
        };

        self.start_session(user.to_session_user())?;
        tracing::info!(user_id = %user.id, "logged in");
        Ok(true)
    }

    /// Register a new user and log them in.
    ///
    /// Returns `Ok(false)` if the email is already registered; the registry is
    /// left unchanged in that case. If the session cannot be written the
    /// registry is put back the way it was and the error is returned.
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> CampusResult<bool> {
        let previous = self.store.get(REGISTERED_USERS_KEY)?;
        let mut users = self.load_registry()?;

        if users.iter().any(|u| u.email == email) {
            tracing::info!("signup rejected: email already registered");
            return Ok(false);
        }

        let user = User::new(name, email, password, role);
        let session_user = user.to_session_user();
        users.push(user);

        write_json(&mut self.store, REGISTERED_USERS_KEY, &users)?;
        if let Err(e) = self.start_session(session_user) {
            self.rollback_registry(previous.as_deref());
            return Err(e);
        }

        tracing::info!(user_count = users.len(), "signed up new user");
        Ok(true)
    }

    pub fn logout(&mut self) -> CampusResult<()> {
        self.current = None;
        self.store.remove(CURRENT_USER_KEY)?;
        tracing::info!("logged out");
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn start_session(&mut self, user: SessionUser) -> CampusResult<()> {
        write_json(&mut self.store, CURRENT_USER_KEY, &user)?;
        self.current = Some(user);
        Ok(())
    }

    fn rollback_registry(&mut self, previous: Option<&str>) {
        let result = match previous {
            Some(raw) => self.store.set(REGISTERED_USERS_KEY, raw),
            None => self.store.remove(REGISTERED_USERS_KEY),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "could not roll back user registry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CampusError;
    use crate::store::{FlakyStore, MemoryStore};

    fn make_test_manager() -> SessionManager<MemoryStore> {
        SessionManager::restore(MemoryStore::new())
    }

    #[test]
    fn test_signup_on_empty_registry() {
        let mut sessions = make_test_manager();

        assert!(sessions.signup("Ana", "a@x.edu", "pw", Role::Student).unwrap());

        let current = sessions.current_user().unwrap();
        assert_eq!(current.name, "Ana");
        assert_eq!(current.role, Role::Student);

        let users = sessions.registered_users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].password, "pw");
        assert_eq!(users[0].id, current.id);
    }

    #[test]
    fn test_signup_duplicate_email_leaves_registry_unchanged() {
        let mut sessions = make_test_manager();
        sessions.signup("Ana", "a@x.edu", "pw", Role::Student).unwrap();
        let before = sessions.registered_users();

        assert!(!sessions.signup("Other", "a@x.edu", "pw2", Role::Faculty).unwrap());
        assert_eq!(sessions.registered_users(), before);
        assert_eq!(sessions.current_user().unwrap().name, "Ana");
    }

    #[test]
    fn test_signup_email_match_is_case_sensitive() {
        let mut sessions = make_test_manager();
        sessions.signup("Ana", "a@x.edu", "pw", Role::Student).unwrap();

        assert!(sessions.signup("Ana 2", "A@x.edu", "pw", Role::Student).unwrap());
        assert_eq!(sessions.registered_users().len(), 2);
    }

    #[test]
    fn test_login_success_and_persisted_session() {
        let mut sessions = make_test_manager();
        sessions.signup("Ana", "a@x.edu", "pw", Role::Student).unwrap();
        sessions.logout().unwrap();
        assert!(sessions.current_user().is_none());

        assert!(sessions.login("a@x.edu", "pw").unwrap());
        assert_eq!(sessions.current_user().unwrap().email, "a@x.edu");

        let stored = sessions.into_store().get(CURRENT_USER_KEY).unwrap().unwrap();
        assert!(!stored.contains("password"));
    }

    #[test]
    fn test_login_wrong_password_keeps_prior_session() {
        let mut sessions = make_test_manager();
        sessions.signup("Ana", "a@x.edu", "pw", Role::Student).unwrap();
        sessions.signup("Bo", "b@x.edu", "pw", Role::Faculty).unwrap();

        assert!(!sessions.login("a@x.edu", "wrong").unwrap());
        assert_eq!(sessions.current_user().unwrap().name, "Bo");

        assert!(!sessions.login("nobody@x.edu", "pw").unwrap());
        assert_eq!(sessions.current_user().unwrap().name, "Bo");
    }

    #[test]
    fn test_logout_removes_persisted_session() {
        let mut store = MemoryStore::new();
        {
            let mut sessions = SessionManager::restore(&mut store);
            sessions.signup("Ana", "a@x.edu", "pw", Role::Student).unwrap();
            sessions.logout().unwrap();
            assert!(sessions.current_user().is_none());
        }
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);
        assert!(store.get(REGISTERED_USERS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_restore_reads_persisted_session() {
        let mut store = MemoryStore::new();
        SessionManager::restore(&mut store)
            .signup("Ana", "a@x.edu", "pw", Role::Faculty)
            .unwrap();

        let restored = SessionManager::restore(&mut store);
        let user = restored.current_user().unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.role, Role::Faculty);
    }

    #[test]
    fn test_restore_with_malformed_data() {
        let mut store = MemoryStore::new();
        store.set(CURRENT_USER_KEY, "{\"id\": 42").unwrap();
        store.set(REGISTERED_USERS_KEY, "not json").unwrap();

        let mut sessions = SessionManager::restore(store);
        assert!(sessions.current_user().is_none());
        assert!(sessions.registered_users().is_empty());

        // A corrupt registry is replaced on the next signup
        assert!(sessions.signup("Ana", "a@x.edu", "pw", Role::Student).unwrap());
        assert_eq!(sessions.registered_users().len(), 1);
    }

    #[test]
    fn test_unreadable_registry_is_not_overwritten() {
        let mut store = FlakyStore::default();
        SessionManager::restore(&mut store)
            .signup("Ana", "a@x.edu", "pw", Role::Student)
            .unwrap();
        let before = store.inner.get(REGISTERED_USERS_KEY).unwrap();

        store.fail_reads = true;
        let mut sessions = SessionManager::restore(&mut store);
        assert!(sessions.current_user().is_none());

        let result = sessions.signup("Bo", "b@x.edu", "pw", Role::Faculty);
        assert!(matches!(result, Err(CampusError::Io(_))));
        assert!(matches!(sessions.login("a@x.edu", "pw"), Err(CampusError::Io(_))));

        store.fail_reads = false;
        assert_eq!(store.get(REGISTERED_USERS_KEY).unwrap(), before);
        assert_eq!(SessionManager::restore(&mut store).registered_users().len(), 1);
    }

    #[test]
    fn test_signup_rolls_back_registry_when_session_write_fails() {
        let mut store = FlakyStore {
            fail_writes_to: Some(CURRENT_USER_KEY),
            ..FlakyStore::default()
        };

        {
            let mut sessions = SessionManager::restore(&mut store);
            let result = sessions.signup("Ana", "a@x.edu", "pw", Role::Student);
            assert!(matches!(result, Err(CampusError::Io(_))));
            assert!(sessions.current_user().is_none());
            assert!(sessions.registered_users().is_empty());
        }
        assert_eq!(store.get(REGISTERED_USERS_KEY).unwrap(), None);

        // The same email can sign up once the store recovers
        store.fail_writes_to = None;
        let mut sessions = SessionManager::restore(&mut store);
        assert!(sessions.signup("Ana", "a@x.edu", "pw", Role::Student).unwrap());
        assert_eq!(sessions.registered_users().len(), 1);
    }

    #[test]
    fn test_failed_signup_rollback_keeps_existing_users() {
        let mut store = FlakyStore::default();
        SessionManager::restore(&mut store)
            .signup("Ana", "a@x.edu", "pw", Role::Student)
            .unwrap();
        let before = store.get(REGISTERED_USERS_KEY).unwrap();

        store.fail_writes_to = Some(CURRENT_USER_KEY);
        let mut sessions = SessionManager::restore(&mut store);
        assert!(sessions.signup("Bo", "b@x.edu", "pw", Role::Faculty).is_err());
        assert_eq!(sessions.current_user().unwrap().name, "Ana");

        drop(sessions);
        assert_eq!(store.get(REGISTERED_USERS_KEY).unwrap(), before);
    }
}

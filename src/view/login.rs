use crate::api::AuthService;
use crate::session::{Session, SessionStore};

/// State behind the login and OAuth callback screens. A session is only
/// written to the store once the backend has issued one.
#[derive(Debug, Default)]
pub struct LoginScreen {
    loading: bool,
    error: Option<String>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit(
        &mut self,
        api: &impl AuthService,
        store: &SessionStore,
        email: &str,
        password: &str,
    ) -> Option<Session> {
        self.begin();
        let result = api.login(email, password).map_err(|e| e.to_string());
        self.finish(store, result)
    }

    /// Fetches the Google sign-in URL the user should open.
    pub fn start_google(&mut self, api: &impl AuthService) -> Option<String> {
        self.begin();
        let result = api.google_login_url();
        self.loading = false;
        match result {
            Ok(url) => Some(url),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn complete_callback(
        &mut self,
        api: &impl AuthService,
        store: &SessionStore,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Option<Session> {
        self.begin();
        let result = api.google_callback(code, state).map_err(|e| e.to_string());
        self.finish(store, result)
    }

    fn begin(&mut self) {
        self.error = None;
        self.loading = true;
    }

    fn finish(&mut self, store: &SessionStore, result: Result<Session, String>) -> Option<Session> {
        self.loading = false;
        let outcome = result.and_then(|session| {
            store.save(&session).map_err(|e| e.to_string())?;
            Ok(session)
        });

        match outcome {
            Ok(session) => Some(session),
            Err(message) => {
                tracing::warn!(error = %message, "sign-in failed");
                self.error = Some(message);
                None
            }
        }
    }
}

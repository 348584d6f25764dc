//! Login, logout and page gating.

mod claims;
mod store;

pub use claims::TokenClaims;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use tracing::{error, info, warn};

use crate::api::ClientError;
use crate::models::{LoginRequest, LoginResponse, NewUser};
use crate::ui::{Console, View};
use crate::ClientState;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/users/";

/// Result of checking a view against the stored session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// The view may be shown, with the token if one is stored
    Proceed(Option<String>),
    /// The user was sent elsewhere
    Redirected,
}

impl Gate {
    pub fn token(&self) -> Option<&str> {
        match self {
            Gate::Proceed(token) => token.as_deref(),
            Gate::Redirected => None,
        }
    }
}

/// What the navigation login control should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Login,
    Logout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub logged_in: bool,
    /// Unverified payload of the stored token, when it can be read
    pub claims: Option<TokenClaims>,
}

pub struct SessionManager<'a> {
    state: &'a ClientState,
}

impl<'a> SessionManager<'a> {
    pub fn new(state: &'a ClientState) -> Self {
        Self { state }
    }

    pub fn token(&self) -> Option<String> {
        self.state.session.token()
    }

    /// Authenticate and store the returned token.
    ///
    /// On the admin console the token payload must carry `is_admin: true`.
    /// The claim is read without verifying the signature; see [`TokenClaims`].
    pub async fn login(
        &self,
        console: Console,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let ui = &self.state.ui;

        if email.trim().is_empty() || password.is_empty() {
            ui.alert("Please fill in all fields");
            return Err(ClientError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = match self.state.api.post(LOGIN_PATH, &request, None).await {
            Ok(response) => response,
            Err(e @ ClientError::Api { .. }) => {
                ui.alert(&format!("Login failed: {}", e));
                return Err(e);
            }
            Err(e) => {
                error!(error = %e, "Error during login");
                ui.alert("An error occurred. Please try again.");
                return Err(e);
            }
        };

        self.state
            .session
            .set_token(&response.access_token, self.state.session_ttl)?;

        if console == Console::Admin {
            if let Err(e) = Self::ensure_admin(&response.access_token) {
                warn!(error = %e, "Rejected non-admin login on the admin console");
                self.state.session.clear()?;
                ui.alert("Access denied. Admin privileges required.");
                return Err(e);
            }
        }

        info!(?console, "Login successful");
        ui.alert("Login successful!");
        ui.redirect(&console.home_view());
        Ok(())
    }

    fn ensure_admin(token: &str) -> Result<(), ClientError> {
        let claims = TokenClaims::decode_unverified(token)?;
        if claims.is_admin {
            Ok(())
        } else {
            Err(ClientError::NotAdmin)
        }
    }

    /// Public sign-up. The account is always created without admin rights.
    pub async fn register(&self, mut draft: NewUser) -> Result<(), ClientError> {
        let ui = &self.state.ui;
        draft.is_admin = false;

        if [&draft.first_name, &draft.last_name, &draft.email, &draft.password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            ui.alert("Please fill in all fields");
            return Err(ClientError::Validation("all fields are required".to_string()));
        }

        match self
            .state
            .api
            .post::<_, serde_json::Value>(REGISTER_PATH, &draft, None)
            .await
        {
            Ok(_) => {
                info!(email = %draft.email, "Registered");
                ui.alert("Registration successful! You can now login.");
                ui.redirect(&View::Login);
                Ok(())
            }
            Err(e @ ClientError::Api { .. }) => {
                ui.alert(&format!("Registration failed: {}", e));
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "Error during registration");
                ui.alert("An error occurred. Please try again.");
                Err(e)
            }
        }
    }

    pub fn logout(&self, console: Console) -> Result<(), ClientError> {
        self.state.session.clear()?;
        info!(?console, "Logged out");
        self.state.ui.alert("Logged out successfully!");
        self.state.ui.redirect(&console.login_view());
        Ok(())
    }

    /// Decide whether `view` may be shown.
    ///
    /// Login views bounce an already-authenticated user to the console home.
    /// Protected views require a stored token. Public views always proceed.
    pub fn require_auth(&self, view: &View) -> Gate {
        let token = self.state.session.token();
        let console = view.console();

        if view.is_login() {
            if token.is_some() {
                self.state.ui.redirect(&console.home_view());
                return Gate::Redirected;
            }
            return Gate::Proceed(None);
        }

        if view.is_protected() && token.is_none() {
            let message = match console {
                Console::Admin => "Please login as admin to access this page.",
                Console::Public => "Please login to access this page.",
            };
            self.state.ui.alert(message);
            self.state.ui.redirect(&console.login_view());
            return Gate::Redirected;
        }

        Gate::Proceed(token)
    }

    pub fn affordance(&self) -> Affordance {
        if self.state.session.token().is_some() {
            Affordance::Logout
        } else {
            Affordance::Login
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self.state.session.token() {
            Some(token) => SessionStatus {
                logged_in: true,
                claims: TokenClaims::decode_unverified(&token).ok(),
            },
            None => SessionStatus {
                logged_in: false,
                claims: None,
            },
        }
    }
}

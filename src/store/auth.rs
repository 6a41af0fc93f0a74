use super::action::AuthAction;
use crate::models::User;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub error: Option<String>,
}

/// Store 可见的认证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    AuthError,
    Authenticated,
}

impl AuthState {
    pub fn phase(&self) -> AuthPhase {
        match (self.is_authenticated, &self.error) {
            (true, _) => AuthPhase::Authenticated,
            (false, Some(_)) => AuthPhase::AuthError,
            (false, None) => AuthPhase::Anonymous,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated && self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

pub fn reduce(_state: &AuthState, action: &AuthAction) -> AuthState {
    match action {
        AuthAction::LoginSuccess(user) | AuthAction::SignupSuccess(user) => AuthState {
            is_authenticated: true,
            user: Some(user.clone()),
            error: None,
        },
        AuthAction::LoginFailure(message) | AuthAction::SignupFailure(message) => AuthState {
            is_authenticated: false,
            user: None,
            error: Some(message.clone()),
        },
        AuthAction::Logout => AuthState::default(),
    }
}

//! 模拟认证
//!
//! 没有真实后端：固定延迟后按以下规则给出结果
//! - 登录用户名为 `fail`（不区分大小写）时失败
//! - 用户名 `admin` 或注册特殊码 `ADMIN123` 获得管理员权限
//!
//! 延迟在后台线程中执行，结果通过 channel 交回 UI 循环，Store 本身从不阻塞。

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::models::User;
use crate::store::AuthAction;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_CODE: &str = "ADMIN123";
const FAIL_USERNAME: &str = "fail";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// 登录 / 注册表单
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub special_code: String,
}

impl Credentials {
    /// 表单校验，失败时不会发送任何 Action
    pub fn validate(&self, mode: AuthMode) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("Username is required");
        }
        if self.username.trim().chars().count() < 3 {
            return Err("Username must be at least 3 characters");
        }
        if self.password.is_empty() {
            return Err("Password is required");
        }
        if self.password.chars().count() < 6 {
            return Err("Password must be at least 6 characters");
        }
        if mode == AuthMode::Signup && self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        Ok(())
    }
}

/// 一次认证请求的结果
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub request_id: u64,
    pub mode: AuthMode,
    pub result: Result<User, AuthError>,
}

impl AuthOutcome {
    pub fn into_action(self) -> AuthAction {
        match (self.mode, self.result) {
            (AuthMode::Login, Ok(user)) => AuthAction::LoginSuccess(user),
            (AuthMode::Signup, Ok(user)) => AuthAction::SignupSuccess(user),
            (AuthMode::Login, Err(e)) => AuthAction::LoginFailure(e.to_string()),
            (AuthMode::Signup, Err(e)) => AuthAction::SignupFailure(e.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// 不含延迟的判定规则
    pub fn resolve(&self, mode: AuthMode, creds: &Credentials) -> Result<User, AuthError> {
        let username = creds.username.trim();
        if mode == AuthMode::Login && username.eq_ignore_ascii_case(FAIL_USERNAME) {
            return Err(AuthError::InvalidCredentials);
        }

        let is_admin = username.eq_ignore_ascii_case(ADMIN_USERNAME)
            || (mode == AuthMode::Signup && creds.special_code.trim() == ADMIN_CODE);
        Ok(User::new(username, is_admin))
    }

    /// 在后台线程中等待延迟后给出结果
    pub fn spawn(&self, request_id: u64, mode: AuthMode, creds: Credentials) -> Receiver<AuthOutcome> {
        let (tx, rx) = mpsc::channel();
        let authenticator = self.clone();

        thread::spawn(move || {
            thread::sleep(authenticator.delay);
            let result = authenticator.resolve(mode, &creds);
            debug!(request_id, ok = result.is_ok(), "mock auth settled");
            // UI 已退出时接收端可能已丢弃
            let _ = tx.send(AuthOutcome {
                request_id,
                mode,
                result,
            });
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(username: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            special_code: String::new(),
        }
    }

    #[test]
    fn test_admin_rules() {
        let auth = MockAuthenticator::new(Duration::ZERO);

        let user = auth.resolve(AuthMode::Login, &creds("Admin")).unwrap();
        assert!(user.is_admin);
        assert_eq!(user.username, "Admin");

        let user = auth.resolve(AuthMode::Login, &creds("alice")).unwrap();
        assert!(!user.is_admin);

        let mut signup = creds("alice");
        signup.special_code = "ADMIN123".to_string();
        assert!(auth.resolve(AuthMode::Signup, &signup).unwrap().is_admin);
    }

    #[test]
    fn test_fail_username() {
        let auth = MockAuthenticator::new(Duration::ZERO);
        assert_eq!(
            auth.resolve(AuthMode::Login, &creds("FAIL")),
            Err(AuthError::InvalidCredentials)
        );
        // 注册不受影响
        assert!(auth.resolve(AuthMode::Signup, &creds("fail")).is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(creds("bob").validate(AuthMode::Login).is_ok());
        assert_eq!(
            creds("bo").validate(AuthMode::Login),
            Err("Username must be at least 3 characters")
        );

        let mut short = creds("bob");
        short.password = "123".to_string();
        assert_eq!(
            short.validate(AuthMode::Login),
            Err("Password must be at least 6 characters")
        );

        let mut mismatch = creds("bob");
        mismatch.confirm_password = "other12".to_string();
        assert!(mismatch.validate(AuthMode::Login).is_ok());
        assert_eq!(
            mismatch.validate(AuthMode::Signup),
            Err("Passwords do not match")
        );
    }

    #[test]
    fn test_spawn_delivers_outcome() {
        let auth = MockAuthenticator::new(Duration::from_millis(5));
        let rx = auth.spawn(7, AuthMode::Login, creds("fail"));
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(outcome.request_id, 7);
        assert_eq!(
            outcome.into_action(),
            AuthAction::LoginFailure("Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_outcome_to_action() {
        let user = User::new("neo", false);
        let outcome = AuthOutcome {
            request_id: 1,
            mode: AuthMode::Signup,
            result: Ok(user.clone()),
        };
        assert_eq!(outcome.into_action(), AuthAction::SignupSuccess(user));
    }
}

//! Optional password gate for anonymous visitors.
//!
//! A visitor who knows the guest password gets a cookie holding the
//! SHA-256 of that password. The cookie stays valid until the password
//! changes.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::services::SettingService;

pub const GUEST_COOKIE_NAME: &str = "guest_authorized";
pub const GUEST_COOKIE_MAX_AGE_SECS: i64 = 3600 * 24 * 30;

/// Cookie the HTTP layer must set after a successful verification.
/// Readable by scripts and sent over plain HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestCookie {
    pub name: &'static str,
    pub value: String,
    pub max_age_secs: i64,
    pub path: &'static str,
}

impl GuestCookie {
    fn for_secret(secret: &str) -> Self {
        Self {
            name: GUEST_COOKIE_NAME,
            value: hash_secret(secret),
            max_age_secs: GUEST_COOKIE_MAX_AGE_SECS,
            path: "/",
        }
    }

    pub fn to_header_value(&self) -> String {
        format!("{}={}; Max-Age={}; Path={}", self.name, self.value, self.max_age_secs, self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockResult {
    pub granted: bool,
    pub cookie: Option<GuestCookie>,
}

/// Lowercase hex SHA-256
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Lock decision against an already loaded secret
pub fn is_locked_with(secret: &str, cookie: Option<&str>) -> bool {
    if secret.is_empty() {
        return false;
    }
    match cookie {
        Some(value) => value != hash_secret(secret),
        None => true,
    }
}

#[derive(Clone)]
pub struct GuestLock {
    settings: SettingService,
}

impl GuestLock {
    pub fn new(settings: SettingService) -> Self {
        Self { settings }
    }

    pub async fn is_locked(&self, cookie: Option<&str>) -> bool {
        let secret = self.settings.real_secret().await;
        is_locked_with(&secret, cookie)
    }

    pub async fn verify(&self, candidate: &str) -> LockResult {
        let secret = self.settings.real_secret().await;
        if secret.is_empty() {
            return LockResult { granted: true, cookie: None };
        }
        if candidate == secret {
            LockResult {
                granted: true,
                cookie: Some(GuestCookie::for_secret(&secret)),
            }
        } else {
            LockResult { granted: false, cookie: None }
        }
    }
}

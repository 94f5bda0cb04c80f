//! Session record compatible with express-session
//!
//! The record is what gets serialized into the store: a `cookie` object plus
//! arbitrary application fields at the same level, exactly as connect-redis
//! writes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Cookie data structure compatible with express-session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    /// Original max age in milliseconds (as set initially)
    pub original_max_age: Option<i64>,

    /// Expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,

    /// Secure flag
    #[serde(default)]
    pub secure: bool,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Cookie path
    #[serde(default = "default_path")]
    pub path: String,

    /// Cookie domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// SameSite attribute; express-session stores either a string or a boolean
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<Value>,

    /// Cookie attributes not modelled above (`partitioned`, `priority`, ...),
    /// kept so they survive a load and save
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

fn default_http_only() -> bool {
    true
}

fn default_path() -> String {
    "/".to_string()
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self {
            original_max_age: None,
            expires: None,
            secure: false,
            http_only: true,
            path: default_path(),
            domain: None,
            same_site: None,
            extra: HashMap::new(),
        }
    }
}

impl SessionCookie {
    /// Create a new session cookie with the given max age in seconds
    ///
    /// A max age too large to represent yields a cookie without expiry.
    pub fn new(max_age_secs: u64) -> Self {
        match i64::try_from(max_age_secs)
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
        {
            Some(ms) => Self::from_max_age_ms(ms, Utc::now()),
            None => Self::default(),
        }
    }

    /// Create a cookie that expires `max_age_ms` milliseconds after `now`
    ///
    /// Falls back to a cookie without expiry when the expiry date would
    /// overflow.
    pub fn from_max_age_ms(max_age_ms: i64, now: DateTime<Utc>) -> Self {
        let expires = chrono::Duration::try_milliseconds(max_age_ms)
            .and_then(|delta| now.checked_add_signed(delta));

        match expires {
            Some(expires) => Self {
                original_max_age: Some(max_age_ms),
                expires: Some(expires),
                ..Default::default()
            },
            None => Self::default(),
        }
    }

    /// Remaining lifetime in milliseconds as of `now`
    ///
    /// This is express-session's `cookie.maxAge`. It is `None` for browser
    /// session cookies and negative once the cookie has expired.
    pub fn max_age_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires.map(|exp| (exp - now).num_milliseconds())
    }
}

/// Session data structure compatible with express-session/connect-redis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Cookie information
    pub cookie: SessionCookie,

    /// Additional session data (flattened at same level as cookie)
    #[serde(flatten)]
    pub data: HashMap<String, Value>,
}

impl SessionData {
    /// Create a new session data with the given max age in seconds
    pub fn new(max_age_secs: u64) -> Self {
        Self {
            cookie: SessionCookie::new(max_age_secs),
            data: HashMap::new(),
        }
    }

    /// Create session data around an existing cookie
    pub fn with_cookie(cookie: SessionCookie) -> Self {
        Self {
            cookie,
            data: HashMap::new(),
        }
    }

    /// Get a value from session data
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a value in session data
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.data.insert(key.to_string(), v);
        }
    }

    /// Remove a value from session data
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Clear all session data (except cookie)
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Check if session data is empty (no user data)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_max_age_counts_down_from_expires() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let cookie = SessionCookie::from_max_age_ms(5000, now);

        assert_eq!(cookie.original_max_age, Some(5000));
        assert_eq!(cookie.max_age_at(now), Some(5000));
        assert_eq!(
            cookie.max_age_at(now + chrono::Duration::milliseconds(1500)),
            Some(3500)
        );
        assert_eq!(SessionCookie::default().max_age_at(now), None);
    }

    #[test]
    fn test_express_session_json_shape() {
        let json = r#"{"cookie":{"originalMaxAge":86400000,"expires":"2026-03-02T12:00:00.000Z","httpOnly":true,"path":"/"},"user":"bob","views":3}"#;
        let data: SessionData = serde_json::from_str(json).unwrap();

        assert_eq!(data.cookie.original_max_age, Some(86_400_000));
        assert!(data.cookie.http_only);
        assert_eq!(data.get::<String>("user"), Some("bob".to_string()));
        assert_eq!(data.get::<i32>("views"), Some(3));

        let encoded = serde_json::to_value(&data).unwrap();
        assert_eq!(encoded["cookie"]["originalMaxAge"], 86_400_000);
        assert_eq!(encoded["user"], "bob");
        assert!(encoded["cookie"].get("domain").is_none());
    }

    #[test]
    fn test_boolean_same_site_is_accepted() {
        let json = r#"{"cookie":{"originalMaxAge":null,"httpOnly":true,"path":"/","sameSite":true},"user":"bob"}"#;
        let data: SessionData = serde_json::from_str(json).unwrap();
        assert_eq!(data.cookie.same_site, Some(Value::Bool(true)));

        let strict = r#"{"cookie":{"originalMaxAge":null,"sameSite":"strict"}}"#;
        let data: SessionData = serde_json::from_str(strict).unwrap();
        assert_eq!(data.cookie.same_site, Some(Value::from("strict")));
    }

    #[test]
    fn test_unknown_cookie_fields_survive_round_trip() {
        let json = r#"{"cookie":{"originalMaxAge":null,"httpOnly":true,"path":"/","partitioned":true,"priority":"high"},"user":"bob"}"#;
        let data: SessionData = serde_json::from_str(json).unwrap();

        let encoded = serde_json::to_value(&data).unwrap();
        assert_eq!(encoded["cookie"]["partitioned"], true);
        assert_eq!(encoded["cookie"]["priority"], "high");
        assert_eq!(encoded["user"], "bob");
        assert!(encoded.get("partitioned").is_none());

        let decoded: SessionData = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_oversized_max_age_has_no_expiry() {
        let cookie = SessionCookie::new(u64::MAX);
        assert_eq!(cookie.expires, None);
        assert_eq!(cookie.original_max_age, None);

        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let cookie = SessionCookie::from_max_age_ms(i64::MAX, now);
        assert_eq!(cookie.expires, None);
        assert_eq!(cookie.max_age_at(now), None);
    }

    #[test]
    fn test_session_data_helpers() {
        let mut data = SessionData::default();
        assert!(data.is_empty());

        data.set("user", "alice");
        assert!(data.contains("user"));
        assert_eq!(data.remove("user"), Some(Value::from("alice")));

        data.set("a", 1);
        data.set("b", 2);
        data.clear();
        assert!(data.is_empty());
    }
}

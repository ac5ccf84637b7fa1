use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Fields are optional on the wire so a payload missing a claim still decodes
/// and can be classified instead of failing as unparseable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for a subject issued at `now` and expiring `ttl` later.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier
    /// * `now` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, iat and exp set, or None if `now + ttl` is out of range
    pub fn for_subject(subject: impl ToString, now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        let expiration = now.checked_add_signed(ttl)?;

        Some(
            Self::new()
                .with_subject(subject)
                .with_issued_at(now.timestamp())
                .with_expiration(expiration.timestamp()),
        )
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Non-empty subject claim, if any.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|sub| !sub.is_empty())
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already expired. Claims without `exp`
    /// are treated as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new().with_subject("alice@example.com");
        assert_eq!(claims.sub, Some("alice@example.com".to_string()));
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_for_subject() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = Claims::for_subject("alice@example.com", now, Duration::minutes(30)).unwrap();

        assert_eq!(claims.subject(), Some("alice@example.com"));
        assert_eq!(claims.iat, Some(1_700_000_000));
        assert_eq!(claims.exp, Some(1_700_000_000 + 30 * 60));
    }

    #[test]
    fn test_for_subject_out_of_range() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let ttl = Duration::minutes(100_000_000_000_000);

        assert_eq!(Claims::for_subject("alice@example.com", now, ttl), None);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new().with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        let claims = Claims::new();
        assert!(claims.is_expired(0));
    }

    #[test]
    fn test_empty_subject_is_absent() {
        let claims = Claims::new().with_subject("");
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_wire_format() {
        let claims = Claims::new()
            .with_subject("alice@example.com")
            .with_issued_at(10)
            .with_expiration(20);

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sub": "alice@example.com", "iat": 10, "exp": 20})
        );
    }
}

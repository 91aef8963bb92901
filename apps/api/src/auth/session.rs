use redis::AsyncCommands;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

const SESSION_PREFIX: &str = "advisor:session:";

fn session_key(token: &str) -> String {
    format!("{SESSION_PREFIX}{token}")
}

/// Opaque bearer tokens mapped to user ids in Redis, expiring after a fixed TTL.
#[derive(Clone)]
pub struct SessionStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl SessionStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    /// Issues a fresh token for the user.
    pub async fn create(&self, user_id: Uuid) -> Result<String, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(session_key(&token), user_id.to_string(), self.ttl_secs)
            .await?;
        debug!("Session created for user {user_id}");
        Ok(token)
    }

    /// Returns the user id behind a token, or None when unknown or expired.
    pub async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(session_key(token)).await?;
        Ok(value.and_then(|v| Uuid::parse_str(&v).ok()))
    }

    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(session_key(token)).await?;
        Ok(())
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsed() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("bearer   abc123 "), Some("abc123"));
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer   "), None);
    }

    #[test]
    fn test_session_key_is_namespaced() {
        assert_eq!(session_key("t"), "advisor:session:t");
    }
}

//! One-shot notices carried in the session until the next rendered page.

use tower_sessions::Session;

use super::ApiError;

const FLASH_KEY: &str = "_flashes";

/// Queues `message` for the next rendered page.
pub async fn push(session: &Session, message: impl Into<String>) -> Result<(), ApiError> {
    let mut pending: Vec<String> = session.get(FLASH_KEY).await?.unwrap_or_default();
    pending.push(message.into());
    session.insert(FLASH_KEY, pending).await?;
    Ok(())
}

/// Removes and returns every queued message, oldest first.
pub async fn take(session: &Session) -> Result<Vec<String>, ApiError> {
    Ok(session
        .remove::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}

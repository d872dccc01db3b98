use leadline_core::AppResult;
use leadline_domain::Role;
use leadline_infrastructure::InMemoryIdentityStore;
use tracing::info;

use crate::api_config::DevAdminConfig;

/// Seeds the in-memory identity provider with an admin reachable through
/// the configured bearer token.
pub async fn seed_dev_admin(store: &InMemoryIdentityStore, admin: &DevAdminConfig) -> AppResult<()> {
    store
        .upsert_user(&admin.uid, Some(&admin.email), Some(Role::Admin))
        .await?;
    store.issue_token(&admin.token, &admin.uid).await?;

    info!(uid = admin.uid.as_str(), email = admin.email.as_str(), "seeded dev admin");
    Ok(())
}

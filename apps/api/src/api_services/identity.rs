use std::sync::Arc;

use leadline_application::IdentityStore;
use leadline_core::AppError;
use leadline_infrastructure::{HttpIdentityStore, HttpIdentityStoreConfig, InMemoryIdentityStore};
use tracing::{info, warn};

use crate::api_config::{ApiConfig, IdentityProviderConfig};
use crate::dev_seed;

pub(super) async fn build_identity_store(
    config: &ApiConfig,
) -> Result<Arc<dyn IdentityStore>, AppError> {
    match &config.identity_provider {
        IdentityProviderConfig::Http(http) => {
            info!(base_url = %http.base_url, "using http identity provider");
            let store = HttpIdentityStore::new(HttpIdentityStoreConfig {
                base_url: http.base_url.clone(),
                api_key: http.api_key.clone(),
                timeout: http.timeout,
            })?;
            Ok(Arc::new(store))
        }
        IdentityProviderConfig::Memory(dev_admin) => {
            let store = InMemoryIdentityStore::new();
            match dev_admin {
                Some(admin) => dev_seed::seed_dev_admin(&store, admin).await?,
                None => warn!(
                    "in-memory identity provider has no users; set DEV_ADMIN_TOKEN to seed an admin"
                ),
            }
            Ok(Arc::new(store))
        }
    }
}

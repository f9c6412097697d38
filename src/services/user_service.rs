// ============================================================================
// USER SERVICE - Estadísticas derivadas del listado de usuarios
// ============================================================================
// Cada llamada vuelve a pedir el listado y recalcula: no hay caché.
// Los fallos se registran y se devuelven valores en cero.
// ============================================================================

use std::rc::Rc;
use async_trait::async_trait;
use crate::models::{AggregateStats, UserRecord, UsersResponse};
use crate::services::api_client::{decode, ApiClient};
use crate::services::error::ApiError;
use crate::utils::constants::ENDPOINT_USERS;

/// Fuente del listado completo de usuarios
#[async_trait(?Send)]
pub trait UserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;
}

#[async_trait(?Send)]
impl UserDirectory for ApiClient {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let data = self.get(ENDPOINT_USERS, false).await?;
        let response: UsersResponse = decode(data)?;
        Ok(response.into_users())
    }
}

#[derive(Clone)]
pub struct UserService {
    directory: Rc<dyn UserDirectory>,
}

impl UserService {
    pub fn new(directory: Rc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Número de usuarios; 0 si el listado falla
    pub async fn get_total_users(&self) -> usize {
        match self.directory.list_users().await {
            Ok(users) => users.len(),
            Err(e) => {
                log::error!("❌ [STATS] Error obteniendo total de usuarios: {}", e);
                0
            }
        }
    }

    /// Estadísticas completas; todo en cero si el listado falla
    pub async fn get_user_stats(&self) -> AggregateStats {
        match self.directory.list_users().await {
            Ok(users) => {
                let stats = AggregateStats::from_users(&users);
                log::debug!("📊 [STATS] {} usuarios, {}% activos", stats.total, stats.active_percentage);
                stats
            }
            Err(e) => {
                log::error!("❌ [STATS] Error obteniendo estadísticas: {}", e);
                AggregateStats::default()
            }
        }
    }
}

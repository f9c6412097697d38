// ============================================================================
// NOTIFICATION SERVICE - Badge de no leídas (`GET /notifications`)
// ============================================================================

use crate::models::NotificationsResponse;
use crate::services::api_client::{decode, ApiClient};
use crate::services::error::ApiError;
use crate::state::reactivity::ReactiveState;
use crate::utils::constants::ENDPOINT_NOTIFICATIONS;

#[derive(Clone)]
pub struct NotificationService {
    client: ApiClient,
    unread: ReactiveState<usize>,
}

impl NotificationService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            unread: ReactiveState::new(0),
        }
    }

    /// Cuenta las no leídas; 0 si el request falla
    pub async fn unread_count(&self) -> usize {
        match self.fetch_notifications().await {
            Ok(response) => response
                .into_notifications()
                .iter()
                .filter(|n| !n.read)
                .count(),
            Err(e) => {
                log::warn!("⚠️ [NOTIFICATIONS] Error obteniendo notificaciones: {}", e);
                0
            }
        }
    }

    async fn fetch_notifications(&self) -> Result<NotificationsResponse, ApiError> {
        let data = self.client.get(ENDPOINT_NOTIFICATIONS, false).await?;
        decode(data)
    }

    /// Refresca el badge y lo devuelve
    pub async fn refresh_badge(&self) -> usize {
        let count = self.unread_count().await;
        if count != self.unread.get() {
            self.unread.set(count);
        }
        count
    }

    pub fn badge(&self) -> usize {
        self.unread.get()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.unread.subscribe(callback);
    }

    /// Polling periódico del badge. Se detiene al soltar el handle.
    #[cfg(target_arch = "wasm32")]
    pub fn start_polling(&self, every_seconds: u32) -> NotificationPoller {
        use gloo_timers::callback::Interval;

        let service = self.clone();
        wasm_bindgen_futures::spawn_local({
            let service = service.clone();
            async move {
                service.refresh_badge().await;
            }
        });

        let interval = Interval::new(every_seconds.max(1) * 1000, move || {
            let service = service.clone();
            wasm_bindgen_futures::spawn_local(async move {
                service.refresh_badge().await;
            });
        });

        log::info!("🔔 [NOTIFICATIONS] Polling cada {}s", every_seconds);
        NotificationPoller { _interval: interval }
    }
}

#[cfg(target_arch = "wasm32")]
pub struct NotificationPoller {
    _interval: gloo_timers::callback::Interval,
}

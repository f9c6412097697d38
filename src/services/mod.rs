pub mod error;
pub mod http;
pub mod api_client;
pub mod auth_service;
pub mod user_service;
pub mod notification_service;

pub use error::{ApiError, TransportError};
pub use http::{FormPart, HttpRequest, HttpResponse, HttpTransport, Method, MultipartForm, RequestBody};
#[cfg(target_arch = "wasm32")]
pub use http::GlooTransport;
pub use api_client::{ApiClient, Payload, RequestOptions};
pub use auth_service::{AuthService, RegisterRequest};
pub use user_service::{UserDirectory, UserService};
pub use notification_service::NotificationService;
#[cfg(target_arch = "wasm32")]
pub use notification_service::NotificationPoller;

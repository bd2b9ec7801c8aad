pub mod api_client;
pub mod error;
pub mod paging;
pub mod resources;
pub mod session;
pub mod settings;
pub mod storage;
pub mod toggle;
pub mod validation;

pub use api_client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use session::{AuthEvent, Session, SessionStore};

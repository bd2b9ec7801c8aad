//! Typed request/response mappers, one per backend resource.
//!
//! None of them keep state beyond the shared [`ApiClient`], except the
//! notification client which tracks the unread badge count.

use crate::api_client::ApiClient;

pub mod admin;
pub mod auth;
pub mod media;
pub mod notifications;
pub mod posts;
pub mod reports;
pub mod social;
pub mod subscriptions;
pub mod users;

pub use admin::AdminClient;
pub use auth::AuthClient;
pub use media::MediaClient;
pub use notifications::NotificationsClient;
pub use posts::PostsClient;
pub use reports::ReportsClient;
pub use social::SocialClient;
pub use subscriptions::SubscriptionsClient;
pub use users::UsersClient;

/// Every resource client over one pipeline.
#[derive(Clone)]
pub struct Resources {
    pub auth: AuthClient,
    pub users: UsersClient,
    pub posts: PostsClient,
    pub media: MediaClient,
    pub social: SocialClient,
    pub subscriptions: SubscriptionsClient,
    pub notifications: NotificationsClient,
    pub admin: AdminClient,
    pub reports: ReportsClient,
}

impl Resources {
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth: AuthClient::new(api.clone()),
            users: UsersClient::new(api.clone()),
            posts: PostsClient::new(api.clone()),
            media: MediaClient::new(api.clone()),
            social: SocialClient::new(api.clone()),
            subscriptions: SubscriptionsClient::new(api.clone()),
            notifications: NotificationsClient::new(api.clone()),
            admin: AdminClient::new(api.clone()),
            reports: ReportsClient::new(api),
        }
    }
}

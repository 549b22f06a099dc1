pub mod dispatcher;
pub mod model;

pub use dispatcher::NotificationDispatcher;
pub use model::{NewNotification, Notification, NotificationType, ADMIN_RECIPIENT};

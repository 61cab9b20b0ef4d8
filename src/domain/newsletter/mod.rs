pub mod entity;
pub mod repository;

pub use entity::{NewSubscription, Subscription, SubscriptionId};
pub use repository::SubscriptionRepository;

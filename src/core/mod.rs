pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{
    DeliverySummary, Notification, OutboundMessage, PendingDelivery,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, StateStore};
pub use crate::utils::error::Result;

//! Domain layer: value objects, entities and the interfaces the use cases depend on.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod value_object;

pub use entity::ChatMessage;
pub use error::MessagePushError;
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::{DisconnectPolicy, UserRegistry};
pub use value_object::{ConnectionId, Identity};

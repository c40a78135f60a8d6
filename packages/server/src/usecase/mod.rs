//! UseCase layer: the connection lifecycle and client event handlers.

mod broadcaster;
mod connect_client;
mod disconnect_client;
mod dispatcher;
mod error;
mod join_user;
mod send_message;

pub use broadcaster::Broadcaster;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use dispatcher::{EventDispatcher, EventHandler};
pub use error::EventError;
pub use join_user::JoinUserUseCase;
pub use send_message::SendMessageUseCase;

//! Domain layer: value objects, entities, events and the ports the core depends on.

pub mod authenticator;
pub mod entity;
pub mod error;
pub mod event;
pub mod repository;
pub mod value_object;

pub use authenticator::{PasswordHasher, SessionAuthenticator, TokenIssuer};
pub use entity::{ChatMessage, Identity, MessageRecord, NewUserAccount, UserAccount};
pub use error::{AuthError, StoreError, UserStoreError, ValueObjectError};
pub use event::{ClientEvent, Presence, ServerEvent};
pub use repository::{MessageStore, UserRepository};
pub use value_object::{ConnectionId, Email, MessageContent, Password, UserId, Username};

#[cfg(test)]
pub use authenticator::{MockPasswordHasher, MockSessionAuthenticator, MockTokenIssuer};
#[cfg(test)]
pub use repository::{MockMessageStore, MockUserRepository};

mod message;
mod user;

pub use message::InMemoryMessageStore;
pub use user::InMemoryUserRepository;

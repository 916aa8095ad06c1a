pub mod cards;
pub mod chat_messages;
pub mod chats;
pub mod claims;
pub mod games;
pub mod players;

pub use cards::Entity as Cards;
pub use chat_messages::Entity as ChatMessages;
pub use chats::Entity as Chats;
pub use claims::Entity as Claims;
pub use games::Entity as Games;
pub use players::Entity as Players;

//! People and the documents they carry.

mod badge;
mod human;
mod id_card;

pub use crate::types::Uuid;
pub use badge::Badge;
pub use human::Human;
pub use id_card::IdCard;

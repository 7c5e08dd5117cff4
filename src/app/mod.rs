pub mod catalog;
pub mod flags;
pub mod moderation;
pub mod submissions;
pub mod validate;

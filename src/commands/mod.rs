pub mod economy;
pub mod fun;
pub mod help;
pub mod info;
pub mod mcstatus;
pub mod moderation;
pub mod reaction_roles;
pub mod ticket;

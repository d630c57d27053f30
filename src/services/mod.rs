pub mod economy;
pub mod mcstatus;
pub mod moderation;
pub mod presence;
pub mod spam;
pub mod tickets;

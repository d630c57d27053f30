pub mod embeds;
pub mod limits;

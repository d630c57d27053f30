#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReactionRole {
    pub msg_id: i64,
    /// Emoji in its message form: unicode, or `<:name:id>` for custom emoji.
    pub emoji: String,
    pub role_id: i64,
}

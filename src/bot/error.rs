use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Discord API error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No item named `{0}` in the shop")]
    UnknownItem(String),

    #[error("Not enough coins: that costs {price} and you have {balance}")]
    InsufficientFunds { balance: i64, price: i64 },

    #[error("Status query failed: {0}")]
    Protocol(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }
}

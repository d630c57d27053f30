use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::handlers::{member, message, reaction};

/// Central event dispatch. Handler failures are logged and dropped here:
/// no single bad event may take down the event loop.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::Message { new_message } => {
            if let Err(e) = message::handle_message(ctx, data, new_message).await {
                error!("Message handler error: {:?}", e);
            }
        }

        FullEvent::ReactionAdd { add_reaction } => {
            if let Err(e) = reaction::handle_reaction_add(ctx, data, add_reaction).await {
                error!("Reaction-add handler error: {:?}", e);
            }
        }

        FullEvent::ReactionRemove { removed_reaction } => {
            if let Err(e) = reaction::handle_reaction_remove(ctx, data, removed_reaction).await {
                error!("Reaction-remove handler error: {:?}", e);
            }
        }

        FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = member::handle_member_join(ctx, new_member).await {
                error!("Member-join handler error: {:?}", e);
            }
        }

        _ => {}
    }

    Ok(())
}

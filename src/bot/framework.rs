use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::Settings;
use crate::handlers::event_handler::event_handler;
use crate::services::presence;

pub async fn run(settings: Settings, pool: SqlitePool) -> Result<(), Error> {
    let data = Arc::new(Data::new(pool, settings.clone()));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::moderation::ban(),
                commands::moderation::kick(),
                commands::moderation::mute(),
                commands::moderation::warn(),
                commands::moderation::warnings(),
                commands::moderation::unwarn(),
                commands::economy::balance(),
                commands::economy::daily(),
                commands::economy::work(),
                commands::economy::shop(),
                commands::economy::buy(),
                commands::reaction_roles::reaction_role_add(),
                commands::reaction_roles::reaction_role_remove(),
                commands::ticket::ticket(),
                commands::mcstatus::mcstatus(),
                commands::fun::meme(),
                commands::fun::avatar(),
                commands::fun::say(),
                commands::info::serverinfo(),
                commands::info::userinfo(),
                commands::help::help(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(settings.command_prefix.clone()),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            // One readable line per failure class; nothing
                            // here may abort the event loop
                            let message = match &error {
                                Error::Database(_) => {
                                    "Storage error, please try again.".to_string()
                                }
                                Error::Discord(e) => {
                                    format!("Discord refused that action: {}", e)
                                }
                                other => other.to_string(),
                            };
                            let _ = ctx.say(message).await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
                        }
                        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
                            let _ = ctx.say("You don't have permission to do that.").await;
                        }
                        poise::FrameworkError::UnknownCommand { .. } => {
                            // Plain chat that happens to start with the prefix
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                presence::spawn_presence_rotator(
                    ctx.clone(),
                    data.settings.command_prefix.clone(),
                );

                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            guild_id,
                        )
                        .await?;
                        info!(
                            "Registered {} commands in guild {}",
                            framework.options().commands.len(),
                            guild_id
                        );
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        info!(
                            "Registered {} commands globally (may take up to an hour to appear)",
                            framework.options().commands.len()
                        );
                    }
                }

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Discord)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Discord)
}

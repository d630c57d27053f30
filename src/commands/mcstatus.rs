use tracing::debug;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::services::mcstatus;
use crate::utils::formatting::truncate;

const DEFAULT_MINECRAFT_PORT: u16 = 25565;

/// Look up a Minecraft server's status
#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn mcstatus(
    ctx: Context<'_>,
    #[description = "Server host or ip"] host: String,
    #[description = "Server port (default 25565)"] port: Option<u16>,
) -> Result<(), Error> {
    let port = port.unwrap_or(DEFAULT_MINECRAFT_PORT);

    // The ping can take a few seconds; let slash invocations show a spinner
    ctx.defer().await?;

    let embed = match mcstatus::query(&host, port).await {
        Ok(status) => embeds::success_embed()
            .title(format!("Minecraft Server {}:{}", host, port))
            .description(truncate(&status.motd, 200))
            .field("Version", status.version, true)
            .field(
                "Players",
                format!("{}/{}", status.players_online, status.players_max),
                true,
            ),
        Err(e) => {
            debug!("mcstatus query for {}:{} failed: {:?}", host, port, e);
            embeds::error_embed()
                .title(format!("Minecraft Server {}:{}", host, port))
                .description(format!("Could not query server: {}", e))
        }
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

use poise::serenity_prelude as serenity;
use tracing::info;

use crate::CommandMeta;
use crate::crab::embeds::{guild_only_message, manage_guild_required_message};
use crab_core::{Context, Error};
use crab_database::impls::guild_config::disable_spawning;
use crab_utils::embed::notice;
use crab_utils::permissions::author_has_permission;

pub const META: CommandMeta = CommandMeta {
    name: "forget",
    desc: "Stop crab appearances in this server and clear open crabs.",
    category: "crab",
    usage: "!forget",
};

#[poise::command(prefix_command, slash_command, category = "Crab")]
pub async fn forget(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !author_has_permission(ctx, serenity::Permissions::MANAGE_GUILD).await? {
        ctx.send(notice(manage_guild_required_message())).await?;
        return Ok(());
    }

    let db = &ctx.data().db;
    disable_spawning(db, guild_id.get()).await?;
    let closed = db.prompts().close_guild(guild_id.get()).await;
    info!(guild_id = guild_id.get(), closed, "crab appearances disabled");

    ctx.say(
        "\u{1f5d1}\u{fe0f} Crab appearances are now disabled for this server. \
         Use `/setup` to turn them back on.",
    )
    .await?;
    Ok(())
}

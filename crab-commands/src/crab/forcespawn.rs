use poise::serenity_prelude as serenity;
use tracing::info;

use crate::CommandMeta;
use crate::crab::embeds::{
    PromptCard, already_active_message, guild_only_message, manage_guild_required_message,
};
use crab_core::{Context, Error};
use crab_utils::embed::notice;
use crab_utils::permissions::author_has_permission;
use crab_utils::time::now_unix_millis;

pub const META: CommandMeta = CommandMeta {
    name: "forcespawn",
    desc: "Make a crab appear in this channel right now.",
    category: "crab",
    usage: "!forcespawn",
};

#[poise::command(prefix_command, slash_command, category = "Crab")]
pub async fn forcespawn(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !author_has_permission(ctx, serenity::Permissions::MANAGE_GUILD).await? {
        ctx.send(notice(manage_guild_required_message())).await?;
        return Ok(());
    }

    let prompts = ctx.data().db.prompts();

    let prompt = match prompts
        .open_exclusive(guild_id.get(), ctx.channel_id().get(), now_unix_millis())
        .await
    {
        Ok(prompt) => prompt,
        Err(open) => {
            ctx.send(notice(already_active_message(open.channel_id)))
                .await?;
            return Ok(());
        }
    };
    let card = PromptCard::new(&mut rand::thread_rng(), &prompt.id, "Forced appearance");

    if let Err(source) = ctx.send(card.into_reply()).await {
        prompts.discard(&prompt.id).await;
        return Err(source.into());
    }

    info!(
        guild_id = guild_id.get(),
        prompt_id = %prompt.id,
        invoked_by = ctx.author().id.get(),
        "crab force-spawned"
    );
    Ok(())
}

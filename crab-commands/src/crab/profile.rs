use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::crab::embeds::profile_embed;
use crab_core::{Context, Error};
use crab_utils::formatting::display_name;
use crab_database::impls::progress::get_or_create_progress;

pub const META: CommandMeta = CommandMeta {
    name: "profile",
    desc: "Show crab catching stats for you or another user.",
    category: "crab",
    usage: "!profile [@user]",
};

/// Check your crab profile.
#[poise::command(prefix_command, slash_command, category = "Crab")]
pub async fn profile(
    ctx: Context<'_>,
    #[description = "Whose profile to show"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let progress = get_or_create_progress(&ctx.data().db, target.id.get()).await?;

    let embed = profile_embed(display_name(target), target.face(), &progress);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

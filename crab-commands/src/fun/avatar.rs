use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crab_core::{Context, Error};
use crab_utils::embed::DEFAULT_EMBED_COLOR;
use crab_utils::formatting::display_name;

pub const META: CommandMeta = CommandMeta {
    name: "avatar",
    desc: "Show a user's avatar.",
    category: "fun",
    usage: "!avatar [@user]",
};

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn avatar(
    ctx: Context<'_>,
    #[description = "The user to get the avatar of"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());

    let embed = serenity::CreateEmbed::new()
        .title(format!("{}'s Avatar", display_name(target)))
        .color(DEFAULT_EMBED_COLOR)
        .image(target.face())
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Requested by {}",
            display_name(ctx.author())
        )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

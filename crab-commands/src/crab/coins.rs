use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crab_core::{Context, Error};
use crab_utils::formatting::display_name;
use crab_database::impls::progress::peek_progress;
use crab_utils::embed::basic_embed;

pub const META: CommandMeta = CommandMeta {
    name: "coins",
    desc: "Check a crab coin balance.",
    category: "crab",
    usage: "!coins [@user]",
};

#[poise::command(prefix_command, slash_command, category = "Crab")]
pub async fn coins(
    ctx: Context<'_>,
    #[description = "Whose balance to show"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    let progress = peek_progress(&ctx.data().db, target.id.get()).await;

    let embed = basic_embed(
        format!("\u{1f4b0} {}'s Coins", display_name(target)),
        format!("**Balance:** {} Crab Coins", progress.coins),
        None,
    )
    .thumbnail(target.face());

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

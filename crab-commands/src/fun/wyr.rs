use poise::serenity_prelude as serenity;
use rand::Rng;

use crate::CommandMeta;
use crab_core::{Context, Error};
use crab_utils::formatting::sanitize_user_text;

pub const META: CommandMeta = CommandMeta {
    name: "wyr",
    desc: "Would you rather: let the bot pick between two options.",
    category: "fun",
    usage: "!wyr <option1> <option2>",
};

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn wyr(
    ctx: Context<'_>,
    #[description = "First option"] option1: String,
    #[description = "Second option"] option2: String,
) -> Result<(), Error> {
    let option1 = sanitize_user_text(&option1);
    let option2 = sanitize_user_text(&option2);
    let pick = if rand::thread_rng().gen_bool(0.5) {
        &option1
    } else {
        &option2
    };

    let embed = serenity::CreateEmbed::new()
        .title("\u{1f914} Would You Rather")
        .color(0xFF_69_B4)
        .description(format!("I choose: **{}**", pick))
        .field("Option A", option1.as_str(), true)
        .field("Option B", option2.as_str(), true)
        .footer(serenity::CreateEmbedFooter::new("That was a tough choice!"));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

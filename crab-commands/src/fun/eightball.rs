use poise::serenity_prelude as serenity;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::CommandMeta;
use crab_core::{Context, Error};
use crab_utils::formatting::sanitize_user_text;

pub const META: CommandMeta = CommandMeta {
    name: "8ball",
    desc: "Ask the magic 8-ball a question.",
    category: "fun",
    usage: "!8ball <question>",
};

const ANSWERS: &[&str] = &[
    "Yes",
    "No",
    "Maybe",
    "Definitely",
    "Ask again later",
    "Absolutely",
    "Never",
    "Without a doubt",
    "Very doubtful",
    "Signs point to yes",
    "Don't count on it",
    "Outlook good",
    "My sources say no",
];

#[poise::command(prefix_command, slash_command, category = "Fun", rename = "8ball")]
pub async fn eightball(
    ctx: Context<'_>,
    #[description = "Your question for the magic 8-ball"]
    #[rest]
    question: String,
) -> Result<(), Error> {
    let answer = pick_answer(&mut rand::thread_rng());

    let embed = serenity::CreateEmbed::new()
        .title("\u{1f3b1} Magic 8-Ball")
        .color(0x80_00_80)
        .field("Question", sanitize_user_text(&question), false)
        .field("Answer", format!("**{}**", answer), false)
        .footer(serenity::CreateEmbedFooter::new(
            "The magic 8-ball has spoken!",
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn pick_answer<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ANSWERS.choose(rng).copied().unwrap_or("Maybe")
}

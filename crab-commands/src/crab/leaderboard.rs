use crate::CommandMeta;
use crab_core::{Context, Error};
use crab_database::impls::progress::leaderboard as top_catchers;
use crab_database::model::UserProgress;
use crab_utils::embed::basic_embed;

pub const META: CommandMeta = CommandMeta {
    name: "leaderboard",
    desc: "Show the richest crab catchers.",
    category: "crab",
    usage: "!leaderboard",
};

const LEADERBOARD_SIZE: usize = 10;

#[poise::command(prefix_command, slash_command, category = "Crab")]
pub async fn leaderboard(ctx: Context<'_>) -> Result<(), Error> {
    let ranked = top_catchers(&ctx.data().db, LEADERBOARD_SIZE).await;

    let embed = basic_embed(
        "\u{1f3c6} Crab Leaderboard",
        leaderboard_description(&ranked),
        Some("Ranked by Crab Coins"),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn leaderboard_description(ranked: &[(u64, UserProgress)]) -> String {
    if ranked.is_empty() {
        return "Nobody has caught a crab yet.".to_owned();
    }

    ranked
        .iter()
        .enumerate()
        .map(|(idx, (user_id, progress))| {
            format!(
                "`#{}` <@{}> \u{2022} {} coins ({} crabs, level {})",
                idx + 1,
                user_id,
                progress.coins,
                progress.catches,
                progress.level
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

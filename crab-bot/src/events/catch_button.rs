use poise::serenity_prelude as serenity;
use tracing::debug;

use crab_commands::crab::embeds::{
    already_caught_message, catch_button_row, catch_embed, scuttled_away_message,
};
use crab_core::{Data, Error};
use crab_database::impls::catch::{CatchResult, catch_prompt};
use crab_database::model::CatchReward;
use crab_database::prompts::PROMPT_ID_PREFIX;
use crab_utils::formatting::display_name;
use crab_utils::time::now_unix_millis;

/// Handle a press on a crab's catch button.
///
/// The first press wins and the message is edited in place to show the
/// reward with the button disabled. Later presses get an ephemeral notice.
pub async fn handle_catch_button(
    ctx: &serenity::Context,
    data: &Data,
    interaction: &serenity::ComponentInteraction,
) -> Result<(), Error> {
    let prompt_id = interaction.data.custom_id.as_str();
    if !prompt_id.starts_with(PROMPT_ID_PREFIX) {
        return Ok(());
    }

    let reward = CatchReward::roll(&mut rand::thread_rng());
    let user_id = interaction.user.id.get();
    let result = catch_prompt(&data.db, prompt_id, user_id, reward, now_unix_millis()).await?;

    let response = match result {
        CatchResult::Caught(outcome) => {
            let catcher = interaction
                .member
                .as_ref()
                .and_then(|member| member.nick.as_deref())
                .unwrap_or_else(|| display_name(&interaction.user));

            serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .embed(catch_embed(catcher, &outcome))
                    .components(vec![catch_button_row(prompt_id, true)]),
            )
        }
        CatchResult::AlreadyCaught { by } => {
            debug!(prompt_id, user_id, caught_by = by, "late catch rejected");
            ephemeral(already_caught_message())
        }
        CatchResult::Gone => {
            debug!(prompt_id, user_id, "catch on expired crab rejected");
            ephemeral(scuttled_away_message())
        }
    };

    interaction.create_response(&ctx.http, response).await?;
    Ok(())
}

fn ephemeral(content: &str) -> serenity::CreateInteractionResponse {
    serenity::CreateInteractionResponse::Message(
        serenity::CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

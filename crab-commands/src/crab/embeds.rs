use std::time::Duration;

use poise::serenity_prelude as serenity;
use rand::Rng;
use rand::seq::SliceRandom;

use crab_database::impls::catch::CatchOutcome;
use crab_database::model::UserProgress;
use crab_utils::embed::{CRAB_EMBED_COLOR, DEFAULT_EMBED_COLOR, SUCCESS_EMBED_COLOR};

pub const APPEARANCE_MESSAGES: &[&str] = &[
    "\u{1f980} A crab just scuttled into the server! Press the button to catch it!",
    "\u{1f980} Look! A crab appeared! Quick, grab it!",
    "\u{1f980} Crab alert! A crab has been spotted nearby!",
    "\u{1f980} Pinch, pinch! A crab is here! Catch it before it runs away!",
    "\u{1f980} A sideways-walking friend appeared! Who will catch it first?",
];

pub const CRAB_IMAGES: &[&str] = &[
    "https://media.istockphoto.com/id/544453032/photo/crab-close-up-cuba.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a5/Sally_Lightfoot_Crab_2019.jpg/1200px-Sally_Lightfoot_Crab_2019.jpg",
    "https://plus.unsplash.com/premium_photo-1667864262393-b5319164c532",
    "https://images.unsplash.com/photo-1580841129862-bc2a2d113c45",
    "https://images.unsplash.com/photo-1527681192512-bca34fd580bb",
];

/// Embed plus catch button for a freshly opened prompt.
pub struct PromptCard {
    pub embed: serenity::CreateEmbed,
    pub components: Vec<serenity::CreateActionRow>,
}

impl PromptCard {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, prompt_id: &str, footer: &str) -> Self {
        let message = APPEARANCE_MESSAGES
            .choose(rng)
            .copied()
            .unwrap_or(APPEARANCE_MESSAGES[0]);
        let image = CRAB_IMAGES.choose(rng).copied().unwrap_or(CRAB_IMAGES[0]);

        let embed = serenity::CreateEmbed::new()
            .title("\u{1f980} A Crab Appeared!")
            .description(message)
            .color(CRAB_EMBED_COLOR)
            .image(image)
            .footer(serenity::CreateEmbedFooter::new(footer));

        Self {
            embed,
            components: vec![catch_button_row(prompt_id, false)],
        }
    }

    pub fn into_message(self) -> serenity::CreateMessage {
        serenity::CreateMessage::new()
            .embed(self.embed)
            .components(self.components)
    }

    pub fn into_reply(self) -> poise::CreateReply {
        poise::CreateReply::default()
            .embed(self.embed)
            .components(self.components)
    }
}

/// The catch button; once caught it is re-rendered disabled.
pub fn catch_button_row(prompt_id: &str, caught: bool) -> serenity::CreateActionRow {
    let button = if caught {
        serenity::CreateButton::new(prompt_id)
            .label("\u{2705} Caught!")
            .style(serenity::ButtonStyle::Secondary)
            .disabled(true)
    } else {
        serenity::CreateButton::new(prompt_id)
            .label("\u{1f3a3} Catch Crab!")
            .style(serenity::ButtonStyle::Success)
    };

    serenity::CreateActionRow::Buttons(vec![button])
}

pub fn catch_embed(catcher_name: &str, outcome: &CatchOutcome) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("\u{1f980} Crab Caught!")
        .description(format!("**{}** caught the crab!", catcher_name))
        .color(SUCCESS_EMBED_COLOR)
        .field(
            "\u{1fa99} Crab Coins",
            format!("+{}", outcome.reward.coins),
            true,
        )
        .field("\u{2b50} XP", format!("+{}", outcome.reward.xp), true)
        .field(
            "\u{1f4ca} Total Crabs",
            outcome.progress.catches.to_string(),
            true,
        )
        .footer(serenity::CreateEmbedFooter::new(catch_footer(outcome)))
}

pub fn catch_footer(outcome: &CatchOutcome) -> String {
    let mut footer = format!("You now have {} Crab Coins", outcome.progress.coins);
    if outcome.leveled_up {
        footer.push_str(&format!(
            " \u{1f389} Level up! You're now level {}!",
            outcome.progress.level
        ));
    }
    footer
}

pub fn profile_embed(
    display_name: &str,
    avatar_url: String,
    progress: &UserProgress,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(format!("\u{1f980} {}'s Crab Profile", display_name))
        .color(DEFAULT_EMBED_COLOR)
        .thumbnail(avatar_url)
        .field("\u{1f4ca} Level", progress.level.to_string(), true)
        .field("\u{2b50} XP", xp_progress_label(progress), true)
        .field("\u{1f980} Crabs Caught", progress.catches.to_string(), true)
        .field("\u{1fa99} Crab Coins", progress.coins.to_string(), true)
        .field(
            "\u{1f392} Inventory",
            format!("{} items", progress.inventory.len()),
            true,
        )
}

pub fn xp_progress_label(progress: &UserProgress) -> String {
    format!("{}/{}", progress.xp, progress.xp_threshold())
}

/// Human label for the scheduler period, rounded down to whole minutes.
pub fn appearance_period_label(period: Duration) -> String {
    match period.as_secs() / 60 {
        1 => "Every minute".to_owned(),
        minutes => format!("Every {} minutes", minutes),
    }
}

pub fn guild_only_message() -> &'static str {
    "This command can only be used in a server."
}

pub fn manage_guild_required_message() -> &'static str {
    "\u{274c} You need the **Manage Server** permission to use this command."
}

pub fn already_active_message(channel_id: u64) -> String {
    format!(
        "\u{26a0}\u{fe0f} There is already an active crab in <#{}>! Catch it first.",
        channel_id
    )
}

pub fn already_caught_message() -> &'static str {
    "\u{1f980} This crab was already caught!"
}

pub fn scuttled_away_message() -> &'static str {
    "\u{1f980} This crab already scuttled away."
}

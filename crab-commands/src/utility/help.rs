use crate::utility::embeds::{grouped_help_description, unknown_category_message};
use crate::{COMMANDS, CommandMeta};
use crab_core::{Context, Error};
use crab_utils::embed::basic_embed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "List every command, optionally for one category.",
    category: "utility",
    usage: "!help [category]",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Category: crab, fun, or utility"] category: Option<String>,
) -> Result<(), Error> {
    let category = category
        .as_deref()
        .map(|raw| raw.trim().to_ascii_lowercase())
        .filter(|raw| !raw.is_empty());

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted) = category.as_deref()
        && !categories.contains(&wanted)
    {
        ctx.say(unknown_category_message(wanted, &categories))
            .await?;
        return Ok(());
    }

    let commands = sorted_commands(category.as_deref());
    let embed = basic_embed(
        "\u{1f980} Crab Bot Commands",
        grouped_help_description(&commands),
        Some("Every command also works as a slash command."),
    );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| category.is_none_or(|wanted| cmd.category == wanted))
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

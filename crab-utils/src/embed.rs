use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x58_65_F2;
/// Colour of a crab appearance.
pub const CRAB_EMBED_COLOR: u32 = 0xFF_6B_6B;
pub const SUCCESS_EMBED_COLOR: u32 = 0x00_FF_00;
pub const GATEWAY_EMBED_COLOR: u32 = 0x72_89_DA;

/// Build an embed with the default colour and an optional footer.
pub fn basic_embed(
    title: impl Into<String>,
    description: impl Into<String>,
    footer: Option<&str>,
) -> serenity::CreateEmbed {
    let builder = serenity::CreateEmbed::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    match footer {
        Some(text) if !text.is_empty() => builder.footer(serenity::CreateEmbedFooter::new(text)),
        _ => builder,
    }
}

/// Ephemeral plain-text reply used for short notices.
pub fn notice(content: impl Into<String>) -> poise::CreateReply {
    poise::CreateReply::default().content(content).ephemeral(true)
}

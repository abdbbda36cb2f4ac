mod config;
mod events;
mod shutdown;
mod spawner;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use crab_core::{Data, Error};
use crab_database::Database;
use crab_utils::time::now_unix_secs;

use config::BotConfig;
use spawner::{SerenityPromptSink, SpawnerSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;

    let db = Database::open(&config.data_dir).await?;
    info!(data_dir = %config.data_dir.display(), "crab store opened.");

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let data = Data {
        db: db.clone(),
        started_at: now_unix_secs(),
        http_proxy: config.http_proxy.clone(),
        spawn_interval: config.spawn_interval,
    };
    let register_guild = config.guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: crab_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(crab_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                match register_guild {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                        info!(guild_id, "commands registered in guild.");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        info!("commands registered globally.");
                    }
                }

                Ok(data)
            })
        })
        .build();

    let mut http = serenity::HttpBuilder::new(&config.token);
    if let Some(proxy) = config.http_proxy.as_deref() {
        info!(proxy, "routing HTTP requests through proxy.");
        http = http.proxy(proxy);
    }

    info!("Crab bot is connecting...");

    let mut client = serenity::ClientBuilder::new_with_http(http.build(), intents)
        .framework(framework)
        .await?;

    let spawner = spawner::start(
        db.clone(),
        SerenityPromptSink::new(client.http.clone()),
        SpawnerSettings {
            period: config.spawn_interval,
            chance: config.spawn_chance,
        },
    );

    let mut shutdown = shutdown::ShutdownSignal::listen()?;
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match shutdown.recv().await {
            Ok(signal) => info!(signal, "shutdown requested; closing gateway connections."),
            Err(err) => {
                warn!(?err, "failed to listen for shutdown signal");
                return;
            }
        }
        shard_manager.shutdown_all().await;
    });

    let run = client.start().await;

    spawner.stop().await;
    db.flush().await?;

    run?;
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, command = %ctx.command().qualified_name, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(crab_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = crab_commands::COMMANDS
                .iter()
                .find(|meta| meta.name == ctx.command().name)
                .map(|meta| meta.usage.to_owned())
                .unwrap_or_else(|| {
                    format!(
                        "{}{}",
                        crab_utils::COMMAND_PREFIX,
                        ctx.command().qualified_name
                    )
                });
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\nUsage: `{}`", input, usage)
            } else {
                format!("Missing required argument.\nUsage: `{}`", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(?error, event = event.snake_case_name(), "event handler error");
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            events::lifecycle::handle_ready(ctx, data_about_bot);
        }
        serenity::FullEvent::ShardStageUpdate { event } => {
            events::lifecycle::handle_shard_stage(event);
        }
        serenity::FullEvent::Resume { .. } => {
            events::lifecycle::handle_resumed();
        }
        serenity::FullEvent::GuildCreate { guild, is_new } => {
            events::lifecycle::handle_guild_create(guild, *is_new);
        }
        serenity::FullEvent::GuildDelete { incomplete, .. } => {
            events::lifecycle::handle_guild_delete(incomplete);
        }
        serenity::FullEvent::InteractionCreate {
            interaction: serenity::Interaction::Component(component),
        } => {
            events::catch_button::handle_catch_button(ctx, data, component).await?;
        }
        _ => {}
    }

    Ok(())
}

pub mod crab;
pub mod fun;
pub mod utility;

use crab_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    crab::setup::META,
    crab::profile::META,
    crab::coins::META,
    crab::leaderboard::META,
    crab::forcespawn::META,
    crab::forget::META,
    utility::ping::META,
    utility::gateway_status::META,
    utility::help::META,
    fun::avatar::META,
    fun::eightball::META,
    fun::wyr::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crab::setup::setup(),
        crab::profile::profile(),
        crab::coins::coins(),
        crab::leaderboard::leaderboard(),
        crab::forcespawn::forcespawn(),
        crab::forget::forget(),
        utility::ping::ping(),
        utility::gateway_status::gateway_status(),
        utility::help::help(),
        fun::avatar::avatar(),
        fun::eightball::eightball(),
        fun::wyr::wyr(),
    ]
}

#[cfg(test)]
mod tests {
    use super::{COMMANDS, commands};

    #[test]
    fn command_surface_is_stable() {
        let mut names: Vec<_> = commands().into_iter().map(|command| command.name).collect();
        names.sort();

        assert_eq!(
            names,
            [
                "8ball",
                "avatar",
                "coins",
                "forcespawn",
                "forget",
                "gateway_status",
                "help",
                "leaderboard",
                "ping",
                "profile",
                "setup",
                "wyr",
            ]
        );
    }

    #[test]
    fn every_registered_command_has_metadata() {
        let registered = commands();
        assert_eq!(registered.len(), COMMANDS.len());

        for command in &registered {
            assert!(
                COMMANDS.iter().any(|meta| meta.name == command.name),
                "missing metadata for `{}`",
                command.name
            );
        }
    }
}

use poise::serenity_prelude as serenity;

/// Resolve a member's guild-wide permissions from their roles.
///
/// The guild owner implicitly holds every permission.
pub async fn resolve_user_permissions(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<serenity::Permissions> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(serenity::Permissions::all());
    }

    let member = guild_id.member(http, user_id).await?;
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    let resolved = guild
        .roles
        .values()
        .filter(|role| role.id == everyone_role_id || member.roles.contains(&role.id))
        .fold(serenity::Permissions::empty(), |acc, role| {
            acc | role.permissions
        });

    Ok(resolved)
}

fn grants(perms: serenity::Permissions, required: serenity::Permissions) -> bool {
    perms.contains(serenity::Permissions::ADMINISTRATOR) || perms.contains(required)
}

/// Whether the invoking author may change guild-level bot settings.
///
/// Slash invocations carry the member's resolved permissions; prefix
/// invocations fall back to resolving them over HTTP.
pub async fn author_has_permission<U, E>(
    ctx: poise::Context<'_, U, E>,
    required: serenity::Permissions,
) -> anyhow::Result<bool>
where
    U: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(false);
    };

    if let Some(perms) = ctx
        .author_member()
        .await
        .and_then(|member| member.permissions)
    {
        return Ok(grants(perms, required));
    }

    let perms = resolve_user_permissions(ctx.http(), guild_id, ctx.author().id).await?;
    Ok(grants(perms, required))
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::Permissions;

    use super::grants;

    #[test]
    fn administrator_implies_everything() {
        assert!(grants(Permissions::ADMINISTRATOR, Permissions::MANAGE_GUILD));
    }

    #[test]
    fn missing_permission_is_denied() {
        assert!(!grants(Permissions::SEND_MESSAGES, Permissions::MANAGE_GUILD));
        assert!(grants(
            Permissions::SEND_MESSAGES | Permissions::MANAGE_GUILD,
            Permissions::MANAGE_GUILD
        ));
    }
}

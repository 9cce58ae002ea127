use eventable_api::{CreateGroupRequest, EmailRequest, EventableApi, UpdateGroupRequest};
use eventable_core::{transition, Action, GroupId, UserId};

use crate::context::{self, CliError};

fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

pub async fn cmd_group_list(server: Option<&str>) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let groups = ctx.api.list_groups().await?;

    if groups.is_empty() {
        println!("No groups found");
        return Ok(());
    }
    println!("Groups:");
    for group in groups {
        println!("  {} - {} ({} members)", group.id, group.name, group.members.len());
    }
    Ok(())
}

pub async fn cmd_group_mine(server: Option<&str>) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let groups = ctx.api.my_groups().await?;

    if groups.is_empty() {
        println!("You are not in any group yet");
        return Ok(());
    }
    println!("Your groups:");
    for group in groups {
        let tags = if group.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", group.tags.join(", "))
        };
        println!("  {} - {}{}", group.id, group.name, tags);
    }
    Ok(())
}

pub async fn cmd_group_create(
    server: Option<&str>,
    name: String,
    tags: Option<String>,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx
        .api
        .create_group(&CreateGroupRequest {
            name,
            tags: parse_tags(tags),
        })
        .await?;

    println!("Created group: {}", group.name);
    println!("  ID: {}", group.id);
    Ok(())
}

pub async fn cmd_group_update(
    server: Option<&str>,
    group_id: GroupId,
    name: Option<String>,
    tags: Option<String>,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::EditGroup, &group)?;

    let updated = ctx
        .api
        .update_group(
            group_id,
            &UpdateGroupRequest {
                name,
                tags: tags.map(|t| parse_tags(Some(t))),
            },
        )
        .await?;
    println!("Updated group: {}", updated.name);
    Ok(())
}

pub async fn cmd_group_delete(server: Option<&str>, group_id: GroupId) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::DeleteGroup, &group)?;

    ctx.api.delete_group(group_id).await?;
    println!("Deleted group: {}", group.name);
    Ok(())
}

pub async fn cmd_group_invite(server: Option<&str>, group_id: GroupId) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::ManageMembers, &group)?;

    let token = ctx.api.regenerate_invite(group_id).await?;
    println!("New invite link for {}:", group.name);
    println!("  {}/join/{}", ctx.config.server, token);
    println!("(the previous link no longer works)");
    Ok(())
}

pub async fn cmd_group_members(server: Option<&str>, group_id: GroupId) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    // the member list carries emails, so it is a management surface
    ctx.authorize(Action::ManageMembers, &group)?;

    let members = ctx.api.group_members(group_id).await?;
    println!("Members of {} ({}):", group.name, members.len());
    for member in members {
        let role = if member.id == group.main_admin {
            " (main admin)"
        } else if group.group_admins.contains(&member.id) {
            " (group admin)"
        } else {
            ""
        };
        println!("  {} {} <{}>{}", member.first_name, member.last_name, member.email, role);
    }
    Ok(())
}

pub async fn cmd_group_add_member(
    server: Option<&str>,
    group_id: GroupId,
    email: String,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::ManageMembers, &group)?;

    ctx.api.add_group_member(group_id, &email).await?;
    println!("Added {} to {}", email, group.name);
    Ok(())
}

pub async fn cmd_group_remove_member(
    server: Option<&str>,
    group_id: GroupId,
    user: UserId,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let mut group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::ManageMembers, &group)?;

    // enforce the main-admin rule locally before asking the server
    let mut events = Vec::new();
    eventable_core::membership::remove_member(&mut group, &mut events, user)?;

    ctx.api.remove_group_member(group_id, user).await?;
    println!("Removed {} from {}", user, group.name);
    Ok(())
}

pub async fn cmd_group_leave(server: Option<&str>, group_id: GroupId) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let mut group = ctx.find_group(group_id).await?;
    let user = ctx
        .actor
        .user_id()
        .ok_or("no session user")?;
    ctx.authorize(Action::LeaveGroup { user }, &group)?;

    let effect = transition::leave_group(&mut group, &mut [], user)?;
    ctx.perform(effect).await?;
    println!("Left {}. You will need a new invite to rejoin.", group.name);
    Ok(())
}

pub async fn cmd_group_admins(server: Option<&str>, group_id: GroupId) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::ManageAdmins, &group)?;

    let admins = ctx.api.group_admins(group_id).await?;
    println!("Admins of {}:", group.name);
    for admin in admins {
        let main = if admin.id == group.main_admin { " (main)" } else { "" };
        println!("  {} {} <{}>{}", admin.first_name, admin.last_name, admin.email, main);
    }
    Ok(())
}

pub async fn cmd_group_add_admin(
    server: Option<&str>,
    group_id: GroupId,
    email: String,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let mut group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::ManageAdmins, &group)?;

    let user = ctx.api.search_user_by_email(&email).await?;
    eventable_core::membership::promote_to_group_admin(&mut group, user.id)?;

    ctx.api.add_group_admin(group_id, user.id).await?;
    println!("{} is now a group admin of {}", email, group.name);
    Ok(())
}

pub async fn cmd_group_remove_admin(
    server: Option<&str>,
    group_id: GroupId,
    user: UserId,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::ManageAdmins, &group)?;

    ctx.api.remove_group_admin(group_id, user).await?;
    println!("Removed group-admin scope from {}", user);
    Ok(())
}

pub async fn cmd_group_email(
    server: Option<&str>,
    group_id: GroupId,
    subject: String,
    body: String,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::SendEmail, &group)?;

    ctx.api
        .email_group(group_id, &EmailRequest { subject, body })
        .await?;
    println!("Email queued for every member of {}", group.name);
    Ok(())
}

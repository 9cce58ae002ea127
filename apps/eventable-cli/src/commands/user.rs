use eventable_api::{ChangePasswordRequest, EventableApi, UpdateUserRequest};

use crate::context::{self, CliError};

pub async fn cmd_user_show(server: Option<&str>) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let user_id = ctx.actor.user_id().ok_or("no session user")?;
    let user = ctx.api.get_user(user_id).await?;

    println!("{} {} <{}>", user.first_name, user.last_name, user.email);
    println!("  Role: {}", user.role.as_str());
    println!("  Member of {} group(s)", user.groups.len());
    if !user.admin_of.is_empty() {
        println!("  Group admin of {} group(s)", user.admin_of.len());
    }
    Ok(())
}

pub async fn cmd_user_update(
    server: Option<&str>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let user_id = ctx.actor.user_id().ok_or("no session user")?;

    let user = ctx
        .api
        .update_user(
            user_id,
            &UpdateUserRequest {
                first_name,
                last_name,
                email,
            },
        )
        .await?;
    println!("Profile updated: {} {} <{}>", user.first_name, user.last_name, user.email);
    Ok(())
}

pub async fn cmd_user_change_password(
    server: Option<&str>,
    current: String,
    new: String,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let user_id = ctx.actor.user_id().ok_or("no session user")?;

    ctx.api
        .change_password(
            user_id,
            &ChangePasswordRequest {
                current_password: current,
                new_password: new,
            },
        )
        .await?;
    println!("Password changed");
    Ok(())
}

pub async fn cmd_user_search(server: Option<&str>, email: String) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let user = ctx.api.search_user_by_email(&email).await?;
    println!("{} {} <{}> ({})", user.first_name, user.last_name, user.email, user.id);
    Ok(())
}

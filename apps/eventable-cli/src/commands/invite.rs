use eventable_api::EventableApi;

use crate::context::{self, CliError};

/// Preview the inviting group, then join it with the stored session.
pub async fn cmd_join(server: Option<&str>, token: String) -> Result<(), CliError> {
    // the preview is public; joining needs the session
    let (public_api, _) = context::setup_public(server)?;
    let preview = public_api.preview_invite(&token).await?;
    println!("Invite to: {} ({} members)", preview.name, preview.members.len());

    let ctx = context::setup(server)?;
    let group = ctx.api.accept_invite(&token).await?;
    println!("Joined {}", group.name);
    Ok(())
}

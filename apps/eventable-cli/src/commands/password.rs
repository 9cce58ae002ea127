use eventable_api::EventableApi;

use crate::context::{self, CliError};

pub async fn cmd_reset_request(server: Option<&str>, email: String) -> Result<(), CliError> {
    let (api, _) = context::setup_public(server)?;
    api.request_password_reset(&email).await?;
    println!("If an account exists for {email}, a reset email is on its way");
    Ok(())
}

pub async fn cmd_reset_verify(server: Option<&str>, token: String) -> Result<(), CliError> {
    let (api, _) = context::setup_public(server)?;
    api.verify_reset_token(&token).await?;
    println!("Token is valid");
    Ok(())
}

pub async fn cmd_reset_submit(
    server: Option<&str>,
    token: String,
    new_password: String,
) -> Result<(), CliError> {
    let (api, _) = context::setup_public(server)?;
    api.submit_password_reset(&token, &new_password).await?;
    println!("Password reset. Log in with the new password.");
    Ok(())
}

use eventable_api::EventableApi;
use eventable_config::{ClientConfig, StoredSession};
use eventable_core::UserId;
use eventable_http::HttpApi;

use crate::context::{self, CliError};

/// Store a session and fill in role and admin scope from the account.
pub async fn cmd_login(
    server: Option<&str>,
    token: String,
    user_id: UserId,
) -> Result<(), CliError> {
    let (_, mut config) = context::setup_public(server)?;

    let api = HttpApi::new(config.server.clone()).with_token(token.clone());
    let user = api.get_user(user_id).await?;

    config.session = Some(StoredSession {
        token,
        user_id: user.id,
        role: user.role,
        admin_of: user.admin_of.clone(),
    });
    config.save()?;

    println!("Logged in as {} {} ({})", user.first_name, user.last_name, user.email);
    if !user.admin_of.is_empty() {
        println!("  Group admin of {} group(s)", user.admin_of.len());
    }
    Ok(())
}

/// Drop the stored session. The token itself is invalidated server-side.
pub fn cmd_logout(server: Option<&str>) -> Result<(), CliError> {
    let mut config = match ClientConfig::load() {
        Ok(config) => config,
        Err(eventable_config::ConfigError::NotFound) => {
            println!("Not logged in");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(server) = server {
        config.server = server.to_string();
    }

    config.session = None;
    config.save()?;
    println!("Logged out");
    Ok(())
}

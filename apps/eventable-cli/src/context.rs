//! Session setup and shared lookups for CLI commands.

use eventable_api::{ApiError, EventableApi};
use eventable_config::ClientConfig;
use eventable_core::{permission, Action, Actor, Event, EventId, Group, GroupId, Role, SideEffect};
use eventable_http::HttpApi;

pub type CliError = Box<dyn std::error::Error>;

/// Everything a logged-in command needs.
pub struct Ctx {
    pub api: HttpApi,
    pub actor: Actor,
    pub config: ClientConfig,
}

/// Build the API client and actor from the stored session.
pub fn setup(server_override: Option<&str>) -> Result<Ctx, CliError> {
    let config = load_config(server_override)?;
    let session = config.session()?.clone();
    let api = HttpApi::new(config.server.clone()).with_token(session.token.clone());
    let actor = Actor::new(session.user_id, session.role, session.admin_of.clone());
    Ok(Ctx { api, actor, config })
}

/// Build an API client without requiring a session (public endpoints,
/// password reset, login itself).
pub fn setup_public(server_override: Option<&str>) -> Result<(HttpApi, ClientConfig), CliError> {
    let config = load_config(server_override)?;
    let api = HttpApi::new(config.server.clone());
    Ok((api, config))
}

fn load_config(server_override: Option<&str>) -> Result<ClientConfig, CliError> {
    let mut config = match ClientConfig::load() {
        Ok(config) => config,
        Err(eventable_config::ConfigError::NotFound) => ClientConfig::default(),
        Err(e) => return Err(e.into()),
    };
    if let Some(server) = server_override {
        config.server = server.to_string();
    }
    Ok(config)
}

impl Ctx {
    /// Find an event by id in the lists visible to this actor.
    pub async fn find_event(&self, id: EventId) -> Result<Event, CliError> {
        let dtos = if self.actor.role() == Role::Admin {
            self.api.list_events().await?
        } else {
            self.api.my_events().await?
        };
        dtos.into_iter()
            .find(|e| e.id == id)
            .map(Event::from)
            .ok_or_else(|| {
                ApiError::NotFound(format!("event {id} not in your event list; refetch")).into()
            })
    }

    /// Find a group by id in the lists visible to this actor.
    pub async fn find_group(&self, id: GroupId) -> Result<Group, CliError> {
        let dtos = if self.actor.role() == Role::Admin {
            self.api.list_groups().await?
        } else {
            self.api.my_groups().await?
        };
        dtos.into_iter()
            .find(|g| g.id == id)
            .map(Group::from)
            .ok_or_else(|| {
                ApiError::NotFound(format!("group {id} not in your group list; refetch")).into()
            })
    }

    /// Refuse with a stable "not authorized" message unless `can` allows.
    pub fn authorize(&self, action: Action, group: &Group) -> Result<(), CliError> {
        if permission::can(&self.actor, action, group) {
            Ok(())
        } else {
            Err(ApiError::PermissionDenied(format!(
                "you are not allowed to do this in group '{}'",
                group.name
            ))
            .into())
        }
    }

    /// Issue the server call a local transition asked for.
    pub async fn perform(&self, effect: SideEffect) -> Result<(), CliError> {
        match effect {
            SideEffect::JoinEvent { event } => {
                self.api.join_event(event).await?;
            }
            SideEffect::ApproveAttendee { event, user } => {
                self.api.approve_attendee(event, user).await?;
            }
            SideEffect::DeclineAttendee { event, user } => {
                self.api.decline_attendee(event, user).await?;
            }
            SideEffect::MoveToWaitlist { event, user } => {
                self.api.move_attendee_to_waitlist(event, user).await?;
            }
            SideEffect::LeaveGroup { group } => {
                self.api.leave_group(group).await?;
            }
        }
        Ok(())
    }
}

use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{
    ChatCommand, Cli, Command, EventCommand, GroupCommand, PasswordResetCommand, PrefsCommand,
    UserCommand,
};
use commands::{auth, chat, event, group, invite, password, prefs, user};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), context::CliError> {
    let server = cli.server.as_deref();

    match cli.command {
        Command::Login { token, user_id } => auth::cmd_login(server, token, user_id).await,
        Command::Logout => auth::cmd_logout(server),
        Command::Join { token } => invite::cmd_join(server, token).await,

        Command::Group { group_cmd } => match group_cmd {
            GroupCommand::List => group::cmd_group_list(server).await,
            GroupCommand::Mine => group::cmd_group_mine(server).await,
            GroupCommand::Create { name, tags } => {
                group::cmd_group_create(server, name, tags).await
            }
            GroupCommand::Update { group, name, tags } => {
                group::cmd_group_update(server, group, name, tags).await
            }
            GroupCommand::Delete { group } => group::cmd_group_delete(server, group).await,
            GroupCommand::Invite { group } => group::cmd_group_invite(server, group).await,
            GroupCommand::Members { group } => group::cmd_group_members(server, group).await,
            GroupCommand::AddMember { group, email } => {
                group::cmd_group_add_member(server, group, email).await
            }
            GroupCommand::RemoveMember { group, user } => {
                group::cmd_group_remove_member(server, group, user).await
            }
            GroupCommand::Leave { group } => group::cmd_group_leave(server, group).await,
            GroupCommand::Admins { group } => group::cmd_group_admins(server, group).await,
            GroupCommand::AddAdmin { group, email } => {
                group::cmd_group_add_admin(server, group, email).await
            }
            GroupCommand::RemoveAdmin { group, user } => {
                group::cmd_group_remove_admin(server, group, user).await
            }
            GroupCommand::Email {
                group,
                subject,
                body,
            } => group::cmd_group_email(server, group, subject, body).await,
        },

        Command::Event { event_cmd } => match event_cmd {
            EventCommand::List => event::cmd_event_list(server).await,
            EventCommand::Mine => event::cmd_event_mine(server).await,
            EventCommand::Past => event::cmd_event_past(server).await,
            EventCommand::Create {
                group,
                title,
                description,
                date,
                time,
                location,
                map_url,
                max_attendees,
                guests,
                notify,
            } => {
                event::cmd_event_create(
                    server,
                    group,
                    title,
                    description,
                    date,
                    time,
                    location,
                    map_url,
                    max_attendees,
                    guests,
                    notify,
                )
                .await
            }
            EventCommand::Update {
                event,
                title,
                description,
                date,
                time,
                location,
                map_url,
                max_attendees,
                unlimited,
                guests,
            } => {
                event::cmd_event_update(
                    server,
                    event,
                    title,
                    description,
                    date,
                    time,
                    location,
                    map_url,
                    max_attendees,
                    unlimited,
                    guests,
                )
                .await
            }
            EventCommand::Delete { event } => event::cmd_event_delete(server, event).await,
            EventCommand::Attendees { event } => event::cmd_event_attendees(server, event).await,
            EventCommand::Join { event } => event::cmd_event_join(server, event).await,
            EventCommand::Approve { event, user } => {
                event::cmd_event_approve(server, event, user).await
            }
            EventCommand::Deny { event, user } => event::cmd_event_deny(server, event, user).await,
            EventCommand::MoveToWaitlist { event, user } => {
                event::cmd_event_move_to_waitlist(server, event, user).await
            }
            EventCommand::NotGoing { event, user } => {
                event::cmd_event_not_going(server, event, user).await
            }
            EventCommand::Email {
                event,
                subject,
                body,
            } => event::cmd_event_email(server, event, subject, body).await,
        },

        Command::Chat { chat_cmd } => match chat_cmd {
            ChatCommand::Show { event, limit } => chat::cmd_chat_show(server, event, limit).await,
            ChatCommand::Send { event, content } => {
                chat::cmd_chat_send(server, event, content).await
            }
            ChatCommand::Watch { event, interval } => {
                chat::cmd_chat_watch(server, event, interval).await
            }
            ChatCommand::Unread => chat::cmd_chat_unread(server).await,
        },

        Command::User { user_cmd } => match user_cmd {
            UserCommand::Show => user::cmd_user_show(server).await,
            UserCommand::Update {
                first_name,
                last_name,
                email,
            } => user::cmd_user_update(server, first_name, last_name, email).await,
            UserCommand::ChangePassword { current, new } => {
                user::cmd_user_change_password(server, current, new).await
            }
            UserCommand::Search { email } => user::cmd_user_search(server, email).await,
        },

        Command::PasswordReset { reset_cmd } => match reset_cmd {
            PasswordResetCommand::Request { email } => {
                password::cmd_reset_request(server, email).await
            }
            PasswordResetCommand::Verify { token } => {
                password::cmd_reset_verify(server, token).await
            }
            PasswordResetCommand::Reset {
                token,
                new_password,
            } => password::cmd_reset_submit(server, token, new_password).await,
        },

        Command::Prefs { prefs_cmd } => match prefs_cmd {
            PrefsCommand::Show => prefs::cmd_prefs_show(),
            PrefsCommand::SetAdminTab { tab } => prefs::cmd_prefs_set_admin_tab(tab),
            PrefsCommand::SetUserTab { tab } => prefs::cmd_prefs_set_user_tab(tab),
        },
    }
}

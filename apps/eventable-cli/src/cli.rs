use clap::{Parser, Subcommand};

use eventable_core::{EventId, GroupId, UserId};

#[derive(Parser)]
#[command(name = "eventable")]
#[command(about = "Eventable group and event coordination CLI")]
pub struct Cli {
    /// Server address (overrides the configured one)
    #[arg(long, env = "EVENTABLE_SERVER")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store a session (token + user id) for subsequent commands
    Login {
        /// Bearer token issued by the backend
        #[arg(long)]
        token: String,

        /// Your user id
        #[arg(long)]
        user_id: UserId,
    },
    /// Drop the stored session
    Logout,
    /// Join a group using an invite token
    Join {
        /// Invite token from the shared link
        token: String,
    },
    /// Group commands
    Group {
        #[command(subcommand)]
        group_cmd: GroupCommand,
    },
    /// Event commands
    Event {
        #[command(subcommand)]
        event_cmd: EventCommand,
    },
    /// Event chat commands
    Chat {
        #[command(subcommand)]
        chat_cmd: ChatCommand,
    },
    /// Account commands
    User {
        #[command(subcommand)]
        user_cmd: UserCommand,
    },
    /// Password reset commands
    PasswordReset {
        #[command(subcommand)]
        reset_cmd: PasswordResetCommand,
    },
    /// Dashboard preferences
    Prefs {
        #[command(subcommand)]
        prefs_cmd: PrefsCommand,
    },
}

#[derive(Subcommand)]
pub enum GroupCommand {
    /// List every group (admin only)
    List,
    /// List groups you belong to
    Mine,
    /// Create a new group
    Create {
        /// Group name
        name: String,
        /// Tags, comma separated
        #[arg(long)]
        tags: Option<String>,
    },
    /// Update a group's name or tags
    Update {
        group: GroupId,
        #[arg(long)]
        name: Option<String>,
        /// Tags, comma separated
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a group (cascades to its events)
    Delete { group: GroupId },
    /// Regenerate the group's invite link
    Invite { group: GroupId },
    /// List group members
    Members { group: GroupId },
    /// Add an existing user to the group by email
    AddMember {
        group: GroupId,
        email: String,
    },
    /// Remove a member from the group
    RemoveMember {
        group: GroupId,
        user: UserId,
    },
    /// Leave the group
    Leave { group: GroupId },
    /// List group admins
    Admins { group: GroupId },
    /// Promote a member to group admin (looked up by email)
    AddAdmin {
        group: GroupId,
        email: String,
    },
    /// Demote a group admin
    RemoveAdmin {
        group: GroupId,
        user: UserId,
    },
    /// Email every group member
    Email {
        group: GroupId,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
    },
}

#[derive(Subcommand)]
pub enum EventCommand {
    /// List every upcoming event (admin only)
    List,
    /// List upcoming events in your groups
    Mine,
    /// List past events
    Past,
    /// Create an event in a group
    Create {
        group: GroupId,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Event date, YYYY-MM-DD
        #[arg(long)]
        date: chrono::NaiveDate,
        /// Event time, HH:MM
        #[arg(long)]
        time: chrono::NaiveTime,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        map_url: Option<String>,
        /// Cap on the going list; omit for unlimited
        #[arg(long)]
        max_attendees: Option<u32>,
        #[arg(long, default_value_t = 0)]
        guests: u32,
        /// Email the group about the new event
        #[arg(long)]
        notify: bool,
    },
    /// Update an event
    Update {
        event: EventId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
        #[arg(long)]
        time: Option<chrono::NaiveTime>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        map_url: Option<String>,
        #[arg(long)]
        max_attendees: Option<u32>,
        /// Remove the attendee cap
        #[arg(long, conflicts_with = "max_attendees")]
        unlimited: bool,
        #[arg(long)]
        guests: Option<u32>,
    },
    /// Delete an event
    Delete { event: EventId },
    /// Show the confirmed attendees
    Attendees { event: EventId },
    /// Join the event's waitlist
    Join { event: EventId },
    /// Approve a waitlisted user (group admin)
    Approve {
        event: EventId,
        user: UserId,
    },
    /// Deny a going or waitlisted user (group admin)
    Deny {
        event: EventId,
        user: UserId,
    },
    /// Move a denied user back to the waitlist (group admin)
    MoveToWaitlist {
        event: EventId,
        user: UserId,
    },
    /// Mark yourself (or, as group admin, another user) as not going
    NotGoing {
        event: EventId,
        #[arg(long)]
        user: Option<UserId>,
    },
    /// Email the going list
    Email {
        event: EventId,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
    },
}

#[derive(Subcommand)]
pub enum ChatCommand {
    /// Print the event's messages
    Show {
        event: EventId,
        /// Page size for the fetch
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Send a message to the event chat
    Send {
        event: EventId,
        content: String,
    },
    /// Follow the chat, polling while the terminal is open
    Watch {
        event: EventId,
        /// Poll interval in seconds
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
    /// Show unread message counts for your events
    Unread,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Show your profile
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change your password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// Look up a user by email
    Search { email: String },
}

#[derive(Subcommand)]
pub enum PasswordResetCommand {
    /// Request a reset email
    Request { email: String },
    /// Check whether a reset token is still valid
    Verify { token: String },
    /// Set a new password using a reset token
    Reset {
        token: String,
        #[arg(long)]
        new_password: String,
    },
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Show the stored dashboard tabs
    Show,
    /// Remember the last-active admin dashboard tab
    SetAdminTab { tab: u32 },
    /// Remember the last-active user dashboard tab
    SetUserTab { tab: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}

use chrono::{NaiveDate, NaiveTime};

use eventable_api::{CreateEventRequest, EmailRequest, EventableApi, EventDto, UpdateEventRequest};
use eventable_core::{transition, Action, EventId, GroupId, UserId};

use crate::context::{self, CliError, Ctx};

fn print_events(heading: &str, events: &[EventDto]) {
    if events.is_empty() {
        println!("No events");
        return;
    }
    println!("{heading}:");
    for event in events {
        let capacity = match event.max_attendees {
            Some(max) => format!("{}/{}", event.going_list.len(), max),
            None => format!("{}", event.going_list.len()),
        };
        println!(
            "  {} - {} on {} at {} ({} going, {} waitlisted)",
            event.id,
            event.title,
            event.date,
            event.time.format("%H:%M"),
            capacity,
            event.waitlist.len(),
        );
    }
}

pub async fn cmd_event_list(server: Option<&str>) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let events = ctx.api.list_events().await?;
    print_events("Events", &events);
    Ok(())
}

pub async fn cmd_event_mine(server: Option<&str>) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let events = ctx.api.my_events().await?;
    print_events("Your events", &events);
    Ok(())
}

pub async fn cmd_event_past(server: Option<&str>) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let events = ctx.api.past_events().await?;
    print_events("Past events", &events);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_event_create(
    server: Option<&str>,
    group_id: GroupId,
    title: String,
    description: String,
    date: NaiveDate,
    time: NaiveTime,
    location: Option<String>,
    map_url: Option<String>,
    max_attendees: Option<u32>,
    guests: u32,
    notify: bool,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let group = ctx.find_group(group_id).await?;
    ctx.authorize(Action::CreateEvent, &group)?;

    let event = ctx
        .api
        .create_event(
            group_id,
            &CreateEventRequest {
                title,
                description,
                date,
                time,
                location,
                map_url,
                max_attendees,
                guests,
                notify_group: notify,
            },
        )
        .await?;

    println!("Created event: {}", event.title);
    println!("  ID: {}", event.id);
    println!("  When: {} {}", event.date, event.time.format("%H:%M"));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_event_update(
    server: Option<&str>,
    event_id: EventId,
    title: Option<String>,
    description: Option<String>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    location: Option<String>,
    map_url: Option<String>,
    max_attendees: Option<u32>,
    unlimited: bool,
    guests: Option<u32>,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let event = ctx.find_event(event_id).await?;
    let group = ctx.find_group(event.group_id).await?;
    ctx.authorize(Action::EditEvent, &group)?;

    let max_attendees = if unlimited {
        Some(None)
    } else {
        max_attendees.map(Some)
    };
    let updated = ctx
        .api
        .update_event(
            event_id,
            &UpdateEventRequest {
                title,
                description,
                date,
                time,
                location,
                map_url,
                max_attendees,
                guests,
            },
        )
        .await?;
    println!("Updated event: {}", updated.title);
    Ok(())
}

pub async fn cmd_event_delete(server: Option<&str>, event_id: EventId) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let event = ctx.find_event(event_id).await?;
    let group = ctx.find_group(event.group_id).await?;
    ctx.authorize(Action::DeleteEvent, &group)?;

    ctx.api.delete_event(event_id).await?;
    println!("Deleted event: {}", event.title);
    Ok(())
}

pub async fn cmd_event_attendees(server: Option<&str>, event_id: EventId) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let event = ctx.find_event(event_id).await?;
    let group = ctx.find_group(event.group_id).await?;
    ctx.authorize(Action::ViewRoster, &group)?;

    let attendees = ctx.api.event_attendees(event_id).await?;
    println!(
        "{}: {} attending ({} confirmed + {} guests)",
        event.title,
        event.attending_count(),
        event.going.len(),
        event.guests,
    );
    for user in attendees {
        println!("  {} {}", user.first_name, user.last_name);
    }
    if !event.waitlist.is_empty() {
        println!("Waitlisted: {}", event.waitlist.len());
    }
    Ok(())
}

async fn rsvp_context(ctx: &Ctx, event_id: EventId) -> Result<(eventable_core::Event, eventable_core::Group), CliError> {
    let event = ctx.find_event(event_id).await?;
    let group = ctx.find_group(event.group_id).await?;
    Ok((event, group))
}

pub async fn cmd_event_join(server: Option<&str>, event_id: EventId) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let (mut event, group) = rsvp_context(&ctx, event_id).await?;
    let user = ctx.actor.user_id().ok_or("no session user")?;
    ctx.authorize(Action::JoinWaitlist, &group)?;

    let applied = transition::join_waitlist(&group, &mut event, user)?;
    ctx.perform(applied.effect).await?;
    println!("You are {} for {}", applied.status.as_str(), event.title);
    Ok(())
}

pub async fn cmd_event_approve(
    server: Option<&str>,
    event_id: EventId,
    user: UserId,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let (mut event, group) = rsvp_context(&ctx, event_id).await?;
    ctx.authorize(Action::Approve, &group)?;

    let applied = transition::approve(&mut event, user)?;
    ctx.perform(applied.effect).await?;
    println!(
        "Approved {} for {} ({} attending)",
        user,
        event.title,
        event.attending_count()
    );
    Ok(())
}

pub async fn cmd_event_deny(
    server: Option<&str>,
    event_id: EventId,
    user: UserId,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let (mut event, group) = rsvp_context(&ctx, event_id).await?;
    ctx.authorize(Action::Deny, &group)?;

    let applied = transition::deny(&mut event, user)?;
    ctx.perform(applied.effect).await?;
    println!("{} is now {} for {}", user, applied.status.as_str(), event.title);
    Ok(())
}

pub async fn cmd_event_move_to_waitlist(
    server: Option<&str>,
    event_id: EventId,
    user: UserId,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let (mut event, group) = rsvp_context(&ctx, event_id).await?;
    ctx.authorize(Action::MoveToWaitlist, &group)?;

    let applied = transition::move_to_waitlist(&mut event, user)?;
    ctx.perform(applied.effect).await?;
    println!("{} moved back to the waitlist of {}", user, event.title);
    Ok(())
}

pub async fn cmd_event_not_going(
    server: Option<&str>,
    event_id: EventId,
    target: Option<UserId>,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let (mut event, group) = rsvp_context(&ctx, event_id).await?;
    let this_user = ctx.actor.user_id().ok_or("no session user")?;
    let target = target.unwrap_or(this_user);
    ctx.authorize(Action::MarkNotGoing { user: target }, &group)?;

    let applied = transition::mark_not_going(&mut event, target)?;
    ctx.perform(applied.effect).await?;
    println!("{} marked as not going to {}", target, event.title);
    Ok(())
}

pub async fn cmd_event_email(
    server: Option<&str>,
    event_id: EventId,
    subject: String,
    body: String,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let event = ctx.find_event(event_id).await?;
    let group = ctx.find_group(event.group_id).await?;
    ctx.authorize(Action::SendEmail, &group)?;

    ctx.api
        .email_event(event_id, &EmailRequest { subject, body })
        .await?;
    println!("Email queued for everyone going to {}", event.title);
    Ok(())
}

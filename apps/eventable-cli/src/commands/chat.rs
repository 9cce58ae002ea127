use std::sync::Arc;
use std::time::Duration;

use eventable_api::EventableApi;
use eventable_chat::ChatPoller;
use eventable_core::{EventId, Message};

use crate::context::{self, CliError};

fn print_message(message: &Message) {
    println!(
        "[{}] {}: {}",
        message.created_at.format("%H:%M"),
        message.sender_id,
        message.content
    );
}

pub async fn cmd_chat_show(
    server: Option<&str>,
    event_id: EventId,
    limit: u32,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let messages = ctx.api.event_messages(event_id, None, Some(limit)).await?;

    if messages.is_empty() {
        println!("No messages yet");
        return Ok(());
    }
    for message in messages {
        print_message(&Message::from(message));
    }
    Ok(())
}

pub async fn cmd_chat_send(
    server: Option<&str>,
    event_id: EventId,
    content: String,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let message = ctx.api.post_message(event_id, &content).await?;
    println!("Sent at {}", message.created_at.format("%H:%M:%S"));
    Ok(())
}

/// Follow the chat until interrupted, printing messages as they arrive.
pub async fn cmd_chat_watch(
    server: Option<&str>,
    event_id: EventId,
    interval_secs: u64,
) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let api: Arc<dyn EventableApi> = Arc::new(ctx.api.clone());

    let poller = ChatPoller::spawn(api, event_id, Duration::from_secs(interval_secs));
    let mut rx = poller.messages();
    let mut printed = std::collections::HashSet::new();

    println!("Watching chat (ctrl-c to stop)");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let messages = rx.borrow().clone();
                for message in &messages {
                    if printed.insert(message.id) {
                        print_message(message);
                    }
                }
            }
        }
    }
    poller.stop().await;
    Ok(())
}

pub async fn cmd_chat_unread(server: Option<&str>) -> Result<(), CliError> {
    let ctx = context::setup(server)?;
    let events = ctx.api.my_events().await?;
    if events.is_empty() {
        println!("No events");
        return Ok(());
    }

    let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
    let counts = ctx.api.unread_counts(&ids).await?;
    for event in events {
        let unread = counts.get(&event.id).copied().unwrap_or(0);
        if unread > 0 {
            println!("  {} - {} unread", event.title, unread);
        }
    }
    Ok(())
}

//! Log event command handlers

use anyhow::Result;
use fleetguard_core::{LogEvent, Store};

use crate::commands::now_timestamp;
use crate::output::Output;

/// Append an event to the audit log
pub fn append(
    store: &Store,
    mac: String,
    serial: String,
    description: String,
    at: Option<String>,
    output: &Output,
) -> Result<()> {
    let at = at.unwrap_or_else(now_timestamp);
    let event = LogEvent::new(mac, serial, at, description);
    store.log_events().append(&event)?;
    output.success(&format!(
        "Logged event for {}/{} at {}",
        event.edge_node_mac_address, event.device_serial_number, event.log_time
    ));
    Ok(())
}

/// Show a single logged event
pub fn show(
    store: &Store,
    mac: String,
    serial: String,
    at: String,
    output: &Output,
) -> Result<()> {
    let event = store.log_events().get(&mac, &serial, &at)?;
    output.print_events(std::slice::from_ref(&event));
    Ok(())
}

/// List all logged events, oldest first
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let mut events = store.log_events().list_all()?;
    // Store order is unspecified; sort for display
    events.sort_by(|a, b| a.log_time.cmp(&b.log_time));
    output.print_events(&events);
    Ok(())
}

//! Edge node command handlers

use anyhow::Result;
use fleetguard_core::{EdgeNode, Store};

use crate::commands::now_timestamp;
use crate::output::Output;

/// Register a new edge node
pub fn register(
    store: &Store,
    mac: String,
    offline: bool,
    heartbeat: Option<String>,
    output: &Output,
) -> Result<()> {
    let heartbeat = heartbeat.unwrap_or_else(now_timestamp);
    let node = EdgeNode::new(mac, !offline, heartbeat);
    store.edge_nodes().register(&node)?;
    output.success(&format!("Registered edge node {}", node.mac_address));
    Ok(())
}

/// List edge nodes, optionally only the online ones
pub fn list(store: &Store, online_only: bool, output: &Output) -> Result<()> {
    if online_only {
        let nodes = store.edge_nodes().list_online()?;
        for mac in &nodes {
            println!("{}", mac);
        }
        if !output.is_quiet() && !output.is_json() {
            println!("\n{} online node(s)", nodes.len());
        }
        return Ok(());
    }

    let nodes = store.edge_nodes().list_all()?;
    output.print_nodes(&nodes);
    Ok(())
}

/// Show a single edge node
pub fn show(store: &Store, mac: String, output: &Output) -> Result<()> {
    let node = store.edge_nodes().get(&mac)?;
    output.print_node(&node);
    Ok(())
}

/// Record a heartbeat, updating the node's online flag
pub fn heartbeat(
    store: &Store,
    mac: String,
    offline: bool,
    at: Option<String>,
    output: &Output,
) -> Result<()> {
    let at = at.unwrap_or_else(now_timestamp);
    store.edge_nodes().set_online_status(&mac, !offline, &at)?;
    output.success(&format!(
        "Edge node {} is now {}",
        mac,
        if offline { "offline" } else { "online" }
    ));
    Ok(())
}

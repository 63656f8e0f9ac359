//! Status command handler

use anyhow::Result;
use fleetguard_core::Store;

use crate::output::{Output, OutputFormat};

/// Show store contents summary
pub fn show(store: &Store, db_path: &str, output: &Output) -> Result<()> {
    let stats = store.stats()?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "database": db_path,
                    "counts": {
                        "edge_nodes": stats.edge_nodes,
                        "vendors": stats.vendors,
                        "products": stats.products,
                        "devices": stats.devices,
                        "virus_hashes": stats.virus_hashes,
                        "log_events": stats.log_events,
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!(
                "{} {} {} {} {} {}",
                stats.edge_nodes,
                stats.vendors,
                stats.products,
                stats.devices,
                stats.virus_hashes,
                stats.log_events
            );
        }
        OutputFormat::Human => {
            println!("Fleetguard Status");
            println!("=================");
            println!();
            println!("Database: {}", db_path);
            println!();
            println!("Contents:");
            println!("  Edge nodes:   {}", stats.edge_nodes);
            println!("  Vendors:      {}", stats.vendors);
            println!("  Products:     {}", stats.products);
            println!("  Devices:      {}", stats.devices);
            println!("  Virus hashes: {}", stats.virus_hashes);
            println!("  Log events:   {}", stats.log_events);
        }
    }

    Ok(())
}

//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use fleetguard_core::{Device, EdgeNode, LogEvent, VirusHash};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single edge node
    pub fn print_node(&self, node: &EdgeNode) {
        match self.format {
            OutputFormat::Human => {
                println!("MAC:        {}", node.mac_address);
                println!(
                    "Online:     {}",
                    if node.is_online { "yes" } else { "no" }
                );
                println!("Heartbeat:  {}", node.last_heartbeat);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(node).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", node.mac_address);
            }
        }
    }

    /// Print a list of edge nodes
    pub fn print_nodes(&self, nodes: &[EdgeNode]) {
        match self.format {
            OutputFormat::Human => {
                if nodes.is_empty() {
                    println!("No edge nodes found.");
                    return;
                }
                for node in nodes {
                    println!(
                        "{} | {} | {}",
                        node.mac_address,
                        if node.is_online { "online " } else { "offline" },
                        node.last_heartbeat
                    );
                }
                println!("\n{} node(s)", nodes.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(nodes).unwrap());
            }
            OutputFormat::Quiet => {
                for node in nodes {
                    println!("{}", node.mac_address);
                }
            }
        }
    }

    /// Print a list of (id, name) pairs (vendors or products)
    pub fn print_catalog_entries(&self, label: &str, entries: &[(String, String)]) {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No {}s found.", label);
                    return;
                }
                for (id, name) in entries {
                    println!("{} | {}", id, name);
                }
                println!("\n{} {}(s)", entries.len(), label);
            }
            OutputFormat::Json => {
                let json: Vec<_> = entries
                    .iter()
                    .map(|(id, name)| serde_json::json!({"id": id, "name": name}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Quiet => {
                for (id, _) in entries {
                    println!("{}", id);
                }
            }
        }
    }

    /// Print a single device
    pub fn print_device(&self, device: &Device) {
        match self.format {
            OutputFormat::Human => {
                println!("Serial:   {}", device.serial_number);
                println!("Product:  {}", device.product_id);
                println!("Vendor:   {}", device.vendor_id);
                println!("Status:   {}", device.status);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(device).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", device.serial_number);
            }
        }
    }

    /// Print a list of devices
    pub fn print_devices(&self, devices: &[Device]) {
        match self.format {
            OutputFormat::Human => {
                if devices.is_empty() {
                    println!("No devices found.");
                    return;
                }
                for device in devices {
                    println!(
                        "{} | {}/{} | {}",
                        device.serial_number, device.product_id, device.vendor_id, device.status
                    );
                }
                println!("\n{} device(s)", devices.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(devices).unwrap());
            }
            OutputFormat::Quiet => {
                for device in devices {
                    println!("{}", device.serial_number);
                }
            }
        }
    }

    /// Print a list of virus hashes
    pub fn print_hashes(&self, hashes: &[VirusHash]) {
        match self.format {
            OutputFormat::Human => {
                if hashes.is_empty() {
                    println!("No virus hashes found.");
                    return;
                }
                for hash in hashes {
                    println!("{} | {}", hash.hash_key, hash.description);
                }
                println!("\n{} hash(es)", hashes.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(hashes).unwrap());
            }
            OutputFormat::Quiet => {
                for hash in hashes {
                    println!("{}", hash.hash_key);
                }
            }
        }
    }

    /// Print a list of log events
    pub fn print_events(&self, events: &[LogEvent]) {
        match self.format {
            OutputFormat::Human => {
                if events.is_empty() {
                    println!("No log events found.");
                    return;
                }
                for event in events {
                    println!(
                        "[{}] {} / {} - {}",
                        event.log_time,
                        event.edge_node_mac_address,
                        event.device_serial_number,
                        event.description
                    );
                }
                println!("\n{} event(s)", events.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(events).unwrap());
            }
            OutputFormat::Quiet => {
                for event in events {
                    println!(
                        "{} {} {}",
                        event.edge_node_mac_address,
                        event.device_serial_number,
                        event.log_time
                    );
                }
            }
        }
    }

    /// Print a yes/no answer (hash checks, trust queries)
    pub fn print_bool(&self, question: &str, answer: bool) {
        match self.format {
            OutputFormat::Human => {
                println!("{}: {}", question, if answer { "yes" } else { "no" });
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"result": answer}));
            }
            OutputFormat::Quiet => {
                println!("{}", answer);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_mode_queries() {
        assert!(Output::new(OutputFormat::Quiet).is_quiet());
        assert!(Output::new(OutputFormat::Json).is_json());
        assert!(!Output::new(OutputFormat::Human).is_quiet());
        assert!(!Output::new(OutputFormat::Human).is_json());
    }
}

//! Fleetguard CLI
//!
//! Thin command-line shell over the fleet store. Every subcommand maps
//! onto exactly one store operation; the interesting behavior lives in
//! `fleetguard-core`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fleetguard_core::Store;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "fleetguard")]
#[command(about = "Fleetguard - fleet device registry and trust store")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the store database (created on first use)
    #[arg(long, default_value = "fleetguard.db", global = true)]
    db: String,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage edge nodes (gateways)
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },
    /// Manage vendors
    Vendor {
        #[command(subcommand)]
        command: VendorCommands,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Manage product/vendor links
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Manage devices and their trust classification
    Device {
        #[command(subcommand)]
        command: DeviceCommands,
    },
    /// Manage the virus hash denylist
    Hash {
        #[command(subcommand)]
        command: HashCommands,
    },
    /// Manage the device event log
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
    /// Show store contents summary
    Status,
}

#[derive(Subcommand)]
enum NodeCommands {
    /// Register a new edge node
    #[command(alias = "add")]
    Register {
        /// MAC address (at most 8 characters)
        mac: String,
        /// Register the node as offline
        #[arg(long)]
        offline: bool,
        /// Heartbeat timestamp (defaults to now)
        #[arg(long)]
        heartbeat: Option<String>,
    },
    /// List edge nodes
    #[command(alias = "ls")]
    List {
        /// Only nodes currently online
        #[arg(long)]
        online: bool,
    },
    /// Show a single edge node
    Show {
        /// MAC address
        mac: String,
    },
    /// Record a heartbeat for a node
    Heartbeat {
        /// MAC address
        mac: String,
        /// Mark the node offline
        #[arg(long)]
        offline: bool,
        /// Heartbeat timestamp (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Subcommand)]
enum VendorCommands {
    /// Register a new vendor
    #[command(alias = "add")]
    Register {
        /// Vendor ID (at most 4 characters)
        id: String,
        /// Vendor name
        name: String,
    },
    /// List all vendors
    #[command(alias = "ls")]
    List,
    /// Show a single vendor
    Show {
        /// Vendor ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// Register a new product
    #[command(alias = "add")]
    Register {
        /// Product ID (at most 4 characters)
        id: String,
        /// Product name
        name: String,
    },
    /// List all products
    #[command(alias = "ls")]
    List,
    /// Show a single product
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// Link a product to a vendor
    Link {
        /// Product ID
        product: String,
        /// Vendor ID
        vendor: String,
    },
    /// List all linked pairs
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
enum DeviceCommands {
    /// Register a new device (pair must be linked first)
    #[command(alias = "add")]
    Register {
        /// Serial number (at most 8 characters)
        serial: String,
        /// Product ID
        product: String,
        /// Vendor ID
        vendor: String,
    },
    /// List all devices
    #[command(alias = "ls")]
    List,
    /// Show a single device
    Show {
        /// Serial number
        serial: String,
    },
    /// Mark a device as trusted
    Whitelist {
        /// Serial number
        serial: String,
    },
    /// Mark a device as distrusted
    Blacklist {
        /// Serial number
        serial: String,
    },
    /// Check whether a device is blacklisted
    Check {
        /// Serial number
        serial: String,
    },
}

#[derive(Subcommand)]
enum HashCommands {
    /// Register a new virus hash
    #[command(alias = "add")]
    Register {
        /// Hash key (at most 32 characters)
        key: String,
        /// Description
        description: String,
    },
    /// Check whether a fingerprint is known
    Check {
        /// Hash key
        key: String,
    },
    /// List all virus hashes
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand)]
enum LogCommands {
    /// Append an event to the audit log
    #[command(alias = "add")]
    Append {
        /// Edge node MAC address
        mac: String,
        /// Device serial number
        serial: String,
        /// Event description
        description: String,
        /// Event timestamp (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Show a single logged event
    Show {
        /// Edge node MAC address
        mac: String,
        /// Device serial number
        serial: String,
        /// Event timestamp
        at: String,
    },
    /// List all logged events
    #[command(alias = "ls")]
    List,
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let store = Store::open(&cli.db)?;

    match cli.command {
        Commands::Node { command } => handle_node_command(command, &store, &output),
        Commands::Vendor { command } => handle_vendor_command(command, &store, &output),
        Commands::Product { command } => handle_product_command(command, &store, &output),
        Commands::Catalog { command } => handle_catalog_command(command, &store, &output),
        Commands::Device { command } => handle_device_command(command, &store, &output),
        Commands::Hash { command } => handle_hash_command(command, &store, &output),
        Commands::Log { command } => handle_log_command(command, &store, &output),
        Commands::Status => commands::status::show(&store, &cli.db, &output),
    }
}

fn handle_node_command(command: NodeCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        NodeCommands::Register {
            mac,
            offline,
            heartbeat,
        } => commands::node::register(store, mac, offline, heartbeat, output),
        NodeCommands::List { online } => commands::node::list(store, online, output),
        NodeCommands::Show { mac } => commands::node::show(store, mac, output),
        NodeCommands::Heartbeat { mac, offline, at } => {
            commands::node::heartbeat(store, mac, offline, at, output)
        }
    }
}

fn handle_vendor_command(command: VendorCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        VendorCommands::Register { id, name } => commands::vendor::register(store, id, name, output),
        VendorCommands::List => commands::vendor::list(store, output),
        VendorCommands::Show { id } => commands::vendor::show(store, id, output),
    }
}

fn handle_product_command(command: ProductCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        ProductCommands::Register { id, name } => {
            commands::product::register(store, id, name, output)
        }
        ProductCommands::List => commands::product::list(store, output),
        ProductCommands::Show { id } => commands::product::show(store, id, output),
    }
}

fn handle_catalog_command(command: CatalogCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        CatalogCommands::Link { product, vendor } => {
            commands::catalog::link(store, product, vendor, output)
        }
        CatalogCommands::List => commands::catalog::list(store, output),
    }
}

fn handle_device_command(command: DeviceCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        DeviceCommands::Register {
            serial,
            product,
            vendor,
        } => commands::device::register(store, serial, product, vendor, output),
        DeviceCommands::List => commands::device::list(store, output),
        DeviceCommands::Show { serial } => commands::device::show(store, serial, output),
        DeviceCommands::Whitelist { serial } => commands::device::whitelist(store, serial, output),
        DeviceCommands::Blacklist { serial } => commands::device::blacklist(store, serial, output),
        DeviceCommands::Check { serial } => commands::device::check(store, serial, output),
    }
}

fn handle_hash_command(command: HashCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        HashCommands::Register { key, description } => {
            commands::hash::register(store, key, description, output)
        }
        HashCommands::Check { key } => commands::hash::check(store, key, output),
        HashCommands::List => commands::hash::list(store, output),
    }
}

fn handle_log_command(command: LogCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        LogCommands::Append {
            mac,
            serial,
            description,
            at,
        } => commands::log::append(store, mac, serial, description, at, output),
        LogCommands::Show { mac, serial, at } => commands::log::show(store, mac, serial, at, output),
        LogCommands::List => commands::log::list(store, output),
    }
}

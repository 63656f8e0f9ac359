//! Device command handlers

use anyhow::Result;
use fleetguard_core::Store;

use crate::output::Output;

/// Register a new device for a linked product/vendor pair
pub fn register(
    store: &Store,
    serial: String,
    product_id: String,
    vendor_id: String,
    output: &Output,
) -> Result<()> {
    store.devices().register(&serial, &product_id, &vendor_id)?;
    output.success(&format!("Registered device {}", serial));
    Ok(())
}

/// List all devices
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let devices = store.devices().list_all()?;
    output.print_devices(&devices);
    Ok(())
}

/// Show a single device
pub fn show(store: &Store, serial: String, output: &Output) -> Result<()> {
    let device = store.devices().get(&serial)?;
    output.print_device(&device);
    Ok(())
}

/// Mark a device as trusted
pub fn whitelist(store: &Store, serial: String, output: &Output) -> Result<()> {
    store.devices().set_whitelisted(&serial)?;
    output.success(&format!("Whitelisted device {}", serial));
    Ok(())
}

/// Mark a device as distrusted
pub fn blacklist(store: &Store, serial: String, output: &Output) -> Result<()> {
    store.devices().set_blacklisted(&serial)?;
    output.success(&format!("Blacklisted device {}", serial));
    Ok(())
}

/// Report whether a device is blacklisted
///
/// Advisory query: an unregistered serial reports `no`, it does not
/// error.
pub fn check(store: &Store, serial: String, output: &Output) -> Result<()> {
    let blacklisted = store.devices().is_blacklisted(&serial)?;
    output.print_bool(&format!("Device {} blacklisted", serial), blacklisted);
    Ok(())
}

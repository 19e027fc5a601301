//! Offline vendor identification.

use std::sync::OnceLock;

use mac_oui::Oui;
use pnet::util::MacAddr;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Retrieves or initializes the **Organizationally Unique Identifier**
/// database embedded in the binary. A database that fails to load stays
/// `None`; vendor lookups then degrade instead of aborting the scan.
fn oui_db() -> Option<&'static Oui> {
    OUI_DB.get_or_init(|| Oui::default().ok()).as_ref()
}

/// Identify the vendor of a MAC address by its OUI prefix.
pub fn get_vendor(mac: MacAddr) -> Option<String> {
    let db = oui_db()?;
    match db.lookup_by_mac(&mac.to_string()) {
        Ok(Some(entry)) => Some(entry.company_name.clone()),
        _ => None,
    }
}

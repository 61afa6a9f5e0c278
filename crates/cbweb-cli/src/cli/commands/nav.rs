//! `cbweb nav` – print a navigation menu.

use anyhow::Result;
use cbweb_core::api::{ContentClient, Transport};
use cbweb_core::pages::{navigation, MountToken};

pub async fn run_nav<T: Transport>(client: &ContentClient<T>, menu_key: &str) -> Result<()> {
    let header = navigation::load(client, menu_key, &MountToken::new()).await;
    if header.items.is_failed() {
        eprintln!("menu '{}' unavailable; showing built-in routes", menu_key);
    }
    for item in &header.items.value {
        println!("{:<20} {}", item.label, item.route);
        for child in &item.children {
            println!("  {:<18} {}", child.label, child.route);
        }
    }
    Ok(())
}

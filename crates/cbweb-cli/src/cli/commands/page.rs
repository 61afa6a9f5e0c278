//! `cbweb page` – mount a page and print its view model.

use anyhow::Result;
use cbweb_core::api::{ContentClient, Transport};
use cbweb_core::pages::{about, contact, device, home, news, product_details, MountToken};
use serde_json::Value;

use crate::cli::PageKind;

pub async fn run_page<T: Transport>(client: &ContentClient<T>, page: PageKind) -> Result<()> {
    let mount = MountToken::new();
    let view: Value = match page {
        PageKind::Home => serde_json::to_value(home::load(client, &mount).await)?,
        PageKind::About => serde_json::to_value(about::load(client, &mount).await)?,
        PageKind::Contact => serde_json::to_value(contact::load(client, &mount).await)?,
        PageKind::Device => serde_json::to_value(device::load(client, &mount).await)?,
        PageKind::News => serde_json::to_value(news::load(client, &mount).await)?,
        PageKind::ProductDetails => {
            serde_json::to_value(product_details::load(client, &mount).await)?
        }
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

//! Device catalog page (`/products`, grouped by category).

use serde::Serialize;
use serde_json::Value;

use super::{MountToken, Slice};
use crate::api::{ContentClient, Transport};
use crate::normalize::{parse_gallery, GalleryOptions, UrlNormalizer};
use crate::reconcile::{select_payload, FieldReader};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub tagline: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub gallery: Vec<String>,
    pub features: Vec<String>,
}

impl Product {
    pub fn from_value(item: &Value, gallery: &GalleryOptions, urls: &UrlNormalizer) -> Self {
        let r = FieldReader::from_value(Some(item));
        let images = r.get(&["images", "gallery"]).unwrap_or(&Value::Null);
        Self {
            id: r.i64(&["id"]),
            name: r.text(&["name", "title"], ""),
            tagline: r.opt_text(&["tagline", "subtitle"]),
            description: r.text(&["description"], ""),
            image: r.asset(&["image", "image_url", "thumbnail"], urls),
            gallery: parse_gallery(images, gallery, urls),
            features: r.list(&["features"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceCategory {
    pub key: String,
    pub products: Vec<Product>,
}

/// Reads `productsByCategory` (or a bare category map) from a `/products` response.
pub fn map_catalog(
    response: &Value,
    gallery: &GalleryOptions,
    urls: &UrlNormalizer,
) -> Vec<DeviceCategory> {
    let payload = select_payload(response);
    let grouped = FieldReader::from_value(Some(payload))
        .get(&["products_by_category"])
        .unwrap_or(payload);
    let Some(groups) = grouped.as_object() else {
        return Vec::new();
    };
    groups
        .iter()
        .filter_map(|(key, items)| {
            let items = items.as_array()?;
            Some(DeviceCategory {
                key: key.clone(),
                products: items
                    .iter()
                    .map(|p| Product::from_value(p, gallery, urls))
                    .collect(),
            })
        })
        .collect()
}

fn fallback_device(id: i64, name: &str, description: &str, image: &str) -> Product {
    Product {
        id: Some(id),
        name: name.to_string(),
        tagline: None,
        description: description.to_string(),
        image: Some(image.to_string()),
        gallery: vec![image.to_string(); 4],
        features: Vec::new(),
    }
}

pub fn fallback_catalog() -> Vec<DeviceCategory> {
    vec![DeviceCategory {
        key: "Devices".to_string(),
        products: vec![
            fallback_device(
                1,
                "Health Kiosk",
                "All-in-one vitals station for clinics and community health camps.",
                "/images/device-1.png",
            ),
            fallback_device(
                2,
                "Portable Health Kit",
                "Carry-anywhere diagnostics for home care and field visits.",
                "/images/device-2.png",
            ),
        ],
    }]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePage {
    pub active_tab: String,
    pub catalog: Slice<Vec<DeviceCategory>>,
}

impl Default for DevicePage {
    fn default() -> Self {
        Self {
            active_tab: "Devices".to_string(),
            catalog: Slice::default(),
        }
    }
}

impl DevicePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&mut self, tab: &str) {
        self.active_tab = tab.to_string();
    }

    /// Products of the category matching the active tab (case-insensitive).
    pub fn active_products(&self) -> &[Product] {
        self.catalog
            .value
            .iter()
            .find(|c| c.key.eq_ignore_ascii_case(&self.active_tab))
            .map(|c| c.products.as_slice())
            .unwrap_or_default()
    }

    pub async fn mount<T: Transport>(&mut self, client: &ContentClient<T>, mount: &MountToken) {
        let outcome = client
            .products(None)
            .await
            .map(|resp| map_catalog(&resp, client.gallery(), client.urls()));
        self.catalog
            .resolve(mount, "device catalog", outcome, fallback_catalog);
    }
}

pub async fn load<T: Transport>(client: &ContentClient<T>, mount: &MountToken) -> DevicePage {
    let mut page = DevicePage::new();
    page.mount(client, mount).await;
    page
}

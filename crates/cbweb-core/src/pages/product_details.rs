//! Product details page: platform tabs, achievements and target audience.
//!
//! Achievements and target audience are independent of the platform data and
//! load concurrently with it; each resolves its own slice.

use serde::Serialize;
use serde_json::Value;

use super::{MountToken, Slice};
use crate::api::{ContentClient, FetchError, Transport};
use crate::normalize::{parse_gallery, GalleryOptions, UrlNormalizer};
use crate::reconcile::{select_payload, FieldReader};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub key: String,
    pub name: String,
    pub tagline: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub gallery: Vec<String>,
    pub features: Vec<String>,
}

impl Platform {
    pub fn from_value(item: &Value, gallery: &GalleryOptions, urls: &UrlNormalizer) -> Self {
        let r = FieldReader::from_value(Some(item));
        let name = r.text(&["name", "title"], "");
        let images = r.get(&["images", "gallery"]).unwrap_or(&Value::Null);
        Self {
            key: r
                .opt_text(&["platform_key", "key", "id"])
                .unwrap_or_else(|| name.to_lowercase()),
            tagline: r.opt_text(&["tagline", "subtitle"]),
            description: r.text(&["description"], ""),
            image: r.asset(&["image", "image_url", "logo"], urls),
            gallery: parse_gallery(images, gallery, urls),
            features: r.list(&["features"]),
            name,
        }
    }
}

pub fn fallback_platforms() -> Vec<Platform> {
    vec![Platform {
        key: "consensus".to_string(),
        name: "Consensus".to_string(),
        tagline: None,
        description: "Connected care platform for clinics, hospitals and community health programs.".to_string(),
        image: Some("/images/consensus.png".to_string()),
        gallery: Vec::new(),
        features: Vec::new(),
    }]
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub title: String,
    pub value: Option<String>,
    pub description: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AudienceEntry {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// List payload of a `{success, data}` response: `data` itself when it is an
/// array, else the array under one of `keys`.
fn payload_list<'a>(response: &'a Value, keys: &[&str]) -> &'a [Value] {
    let payload = select_payload(response);
    if let Value::Array(items) = payload {
        return items;
    }
    FieldReader::from_value(Some(payload))
        .get(keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn map_achievements(response: &Value, urls: &UrlNormalizer) -> Vec<Achievement> {
    payload_list(response, &["achievements", "items"])
        .iter()
        .map(|item| {
            let r = FieldReader::from_value(Some(item));
            Achievement {
                title: r.text(&["title", "label"], ""),
                value: r.opt_text(&["value", "number", "count"]),
                description: r.text(&["description"], ""),
                icon: r.asset(&["icon", "image"], urls),
            }
        })
        .collect()
}

fn map_audience(response: &Value, urls: &UrlNormalizer) -> Vec<AudienceEntry> {
    payload_list(response, &["target_audience", "audiences", "items"])
        .iter()
        .map(|item| {
            let r = FieldReader::from_value(Some(item));
            AudienceEntry {
                title: r.text(&["title", "name"], ""),
                description: r.text(&["description", "desc"], ""),
                image: r.asset(&["image", "img", "icon"], urls),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailsPage {
    pub active_tab: String,
    pub platforms: Slice<Vec<Platform>>,
    pub achievements: Slice<Vec<Achievement>>,
    pub target_audience: Slice<Vec<AudienceEntry>>,
}

impl Default for ProductDetailsPage {
    fn default() -> Self {
        Self {
            active_tab: "Consensus".to_string(),
            platforms: Slice::default(),
            achievements: Slice::default(),
            target_audience: Slice::default(),
        }
    }
}

async fn load_platforms<T: Transport>(
    slice: &mut Slice<Vec<Platform>>,
    client: &ContentClient<T>,
    mount: &MountToken,
) {
    let (gallery, urls) = (client.gallery(), client.urls());
    let to_platforms = |items: &[Value]| -> Vec<Platform> {
        items
            .iter()
            .map(|p| Platform::from_value(p, gallery, urls))
            .collect()
    };

    match client.product_details().await {
        Ok(resp) => {
            let embedded = payload_list(&resp, &["platforms"]);
            if !embedded.is_empty() {
                slice.resolve(
                    mount,
                    "platforms",
                    Ok::<_, FetchError>(to_platforms(embedded)),
                    fallback_platforms,
                );
                return;
            }
        }
        Err(e) => tracing::warn!("error loading product details: {}", e),
    }
    if !mount.is_mounted() {
        return;
    }
    let outcome = client
        .product_details_platforms()
        .await
        .map(|resp| to_platforms(payload_list(&resp, &["platforms"])));
    slice.resolve(mount, "platforms", outcome, fallback_platforms);
}

impl ProductDetailsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&mut self, tab: &str) {
        self.active_tab = tab.to_string();
    }

    /// Platform whose name or key matches the active tab.
    pub fn active_platform(&self) -> Option<&Platform> {
        self.platforms.value.iter().find(|p| {
            p.name.eq_ignore_ascii_case(&self.active_tab)
                || p.key.eq_ignore_ascii_case(&self.active_tab)
        })
    }

    pub async fn mount<T: Transport>(&mut self, client: &ContentClient<T>, mount: &MountToken) {
        let urls = client.urls();
        let Self {
            platforms,
            achievements,
            target_audience,
            ..
        } = self;

        tokio::join!(
            load_platforms(platforms, client, mount),
            async {
                let outcome = client
                    .product_details_achievements()
                    .await
                    .map(|resp| map_achievements(&resp, urls));
                achievements.resolve(mount, "achievements", outcome, Vec::new);
            },
            async {
                let outcome = client
                    .product_details_target_audience()
                    .await
                    .map(|resp| map_audience(&resp, urls));
                target_audience.resolve(mount, "target audience", outcome, Vec::new);
            },
        );
    }
}

pub async fn load<T: Transport>(
    client: &ContentClient<T>,
    mount: &MountToken,
) -> ProductDetailsPage {
    let mut page = ProductDetailsPage::new();
    page.mount(client, mount).await;
    page
}

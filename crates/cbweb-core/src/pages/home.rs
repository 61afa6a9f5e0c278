//! Home page.
//!
//! Content comes from `/pages/home` (`{success, data}` envelope). Company logos
//! are their own slice: embedded in the page payload when the API provides
//! them, otherwise loaded from `/logos`.

use serde::Serialize;
use serde_json::Value;

use super::{MountToken, Slice};
use crate::api::{ContentClient, FetchError, Transport};
use crate::normalize::UrlNormalizer;
use crate::reconcile::{reconcile, ContentSection, FieldReader};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub main_title: Option<String>,
    pub highlight_title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub image: Option<String>,
}

impl ContentItem {
    fn from_value(item: &Value, urls: &UrlNormalizer) -> Self {
        let r = FieldReader::from_value(Some(item));
        Self {
            title: r.text(&["title", "name"], ""),
            description: r.text(&["description", "desc", "text"], ""),
            icon: r.asset(&["icon", "icon_url"], urls),
            image: r.asset(&["image", "image_url", "img"], urls),
        }
    }
}

/// A titled section with a list of items (features, challenges, ecosystem).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemSection {
    pub section_title: Option<String>,
    pub section_subtitle: Option<String>,
    pub description: Option<String>,
    pub items: Vec<ContentItem>,
}

impl ItemSection {
    /// Accepts either a bare item array or a section object with `items`.
    fn from_value(raw: Option<&Value>, urls: &UrlNormalizer) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let items_of = |list: &Vec<Value>| -> Vec<ContentItem> {
            list.iter()
                .map(|item| ContentItem::from_value(item, urls))
                .collect()
        };
        if let Value::Array(list) = raw {
            return Self {
                items: items_of(list),
                ..Self::default()
            };
        }
        let r = FieldReader::from_value(Some(raw));
        Self {
            section_title: r.opt_text(&["section_title", "title"]),
            section_subtitle: r.opt_text(&["section_subtitle", "subtitle"]),
            description: r.opt_text(&["description"]),
            items: r.collection(&["items", "cards"]).map(items_of).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudienceTab {
    pub id: String,
    pub title: String,
    pub img: String,
    pub desc: String,
}

fn tab(id: &str, title: &str, desc: &str) -> AudienceTab {
    AudienceTab {
        id: id.to_string(),
        title: title.to_string(),
        img: "/images/benyamin.png".to_string(),
        desc: desc.to_string(),
    }
}

pub fn fallback_tabs() -> Vec<AudienceTab> {
    vec![
        tab(
            "clinics",
            "Clinics",
            "Improved patient management to grow patient capacity and virtual visits",
        ),
        tab(
            "hospitals",
            "Hospitals",
            "Better hospital workflows, patient record integration, and digital OPD.",
        ),
        tab(
            "phc",
            "PHC",
            "Streamlined PHC management and rural health support with telemedicine.",
        ),
        tab(
            "ngo",
            "NGO & Health Camps",
            "NGOs can manage health camps, patient registration, and follow-ups.",
        ),
        tab(
            "home",
            "Home Care",
            "Enable home care visits, track vitals, and connect patients to doctors virtually.",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetAudience {
    pub section_title: Option<String>,
    pub section_subtitle: Option<String>,
    pub tabs: Vec<AudienceTab>,
}

impl Default for TargetAudience {
    fn default() -> Self {
        Self {
            section_title: None,
            section_subtitle: None,
            tabs: fallback_tabs(),
        }
    }
}

impl TargetAudience {
    fn apply(&mut self, r: &FieldReader<'_>, urls: &UrlNormalizer) {
        if let Some(v) = r.opt_text(&["section_title", "title"]) {
            self.section_title = Some(v);
        }
        if let Some(v) = r.opt_text(&["section_subtitle", "subtitle"]) {
            self.section_subtitle = Some(v);
        }
        if let Some(tabs) = r.collection(&["tabs", "items"]) {
            self.tabs = tabs
                .iter()
                .map(|t| {
                    let t = FieldReader::from_value(Some(t));
                    let title = t.text(&["title", "name"], "");
                    AudienceTab {
                        id: t
                            .opt_text(&["id", "key"])
                            .unwrap_or_else(|| title.to_lowercase()),
                        img: t.asset(&["img", "image"], urls).unwrap_or_default(),
                        desc: t.text(&["desc", "description"], ""),
                        title,
                    }
                })
                .collect();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub position: Option<String>,
    pub company: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Testimonials {
    pub section_title: Option<String>,
    pub items: Vec<Testimonial>,
}

impl Testimonials {
    fn from_value(raw: Option<&Value>, urls: &UrlNormalizer) -> Self {
        let (section_title, list) = match raw {
            Some(Value::Array(list)) => (None, Some(list)),
            Some(other) => {
                let r = FieldReader::from_value(Some(other));
                (
                    r.opt_text(&["section_title", "title"]),
                    r.collection(&["items", "testimonials"]),
                )
            }
            None => (None, None),
        };
        let items = list
            .map(|list| {
                list.iter()
                    .map(|t| {
                        let r = FieldReader::from_value(Some(t));
                        Testimonial {
                            quote: r.text(&["quote", "text", "content"], ""),
                            author: r.text(&["author", "name"], ""),
                            position: r.opt_text(&["position", "role"]),
                            company: r.opt_text(&["company"]),
                            image: r.asset(&["image", "avatar", "photo"], urls),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            section_title,
            items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLogo {
    pub name: String,
    pub logo_url: String,
    pub website: Option<String>,
}

impl CompanyLogo {
    pub fn from_value(item: &Value, urls: &UrlNormalizer) -> Self {
        let r = FieldReader::from_value(Some(item));
        Self {
            name: r.text(&["name", "title"], ""),
            logo_url: r
                .asset(&["logo_url", "logo", "image"], urls)
                .unwrap_or_default(),
            website: r.opt_text(&["website", "url", "link"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub hero: Hero,
    pub features: ItemSection,
    pub challenges: ItemSection,
    pub ecosystem: ItemSection,
    pub target_audience: TargetAudience,
    pub testimonials: Testimonials,
    pub cta: CallToAction,
}

impl HomeContent {
    /// Fallback: empty sections plus the built-in target audience tabs.
    pub fn fallback() -> Self {
        Self::default()
    }
}

/// Maps the reconciled home payload. Fields absent from the payload stay unset.
pub fn map_home(content: &ContentSection, urls: &UrlNormalizer) -> HomeContent {
    let r = FieldReader::new(content);
    let mut home = HomeContent::default();

    let hero = r.section(&["hero"]);
    home.hero = Hero {
        main_title: hero.opt_text(&["main_title", "title"]),
        highlight_title: hero.opt_text(&["highlight_title", "highlight"]),
        subtitle: hero.opt_text(&["subtitle"]),
        description: hero.opt_text(&["description"]),
        button_text: hero.opt_text(&["button_text", "primary_button_text"]),
        button_link: hero.opt_text(&["button_link", "primary_button_link"]),
        image: hero.asset(&["image", "hero_image", "background_image"], urls),
    };

    home.features = ItemSection::from_value(r.get(&["features"]), urls);
    home.challenges = ItemSection::from_value(r.get(&["challenges"]), urls);
    home.ecosystem = ItemSection::from_value(r.get(&["ecosystem"]), urls);
    home.target_audience
        .apply(&r.section(&["target_audience"]), urls);
    home.testimonials = Testimonials::from_value(r.get(&["testimonials"]), urls);

    let cta = r.section(&["cta", "call_to_action"]);
    home.cta = CallToAction {
        title: cta.opt_text(&["title"]),
        subtitle: cta.opt_text(&["subtitle", "description"]),
        button_text: cta.opt_text(&["button_text"]),
        button_link: cta.opt_text(&["button_link", "link"]),
    };
    home
}

fn embedded_logos(content: &ContentSection, urls: &UrlNormalizer) -> Option<Vec<CompanyLogo>> {
    let items = FieldReader::new(content).collection(&["company_logos", "logos"])?;
    Some(items.iter().map(|l| CompanyLogo::from_value(l, urls)).collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub active_tab: String,
    pub content: Slice<HomeContent>,
    pub company_logos: Slice<Vec<CompanyLogo>>,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            active_tab: "clinics".to_string(),
            content: Slice::default(),
            company_logos: Slice::default(),
        }
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active_tab(&mut self, id: &str) {
        self.active_tab = id.to_string();
    }

    pub fn active_tab_content(&self) -> Option<&AudienceTab> {
        self.content
            .value
            .target_audience
            .tabs
            .iter()
            .find(|t| t.id == self.active_tab)
    }

    pub async fn mount<T: Transport>(&mut self, client: &ContentClient<T>, mount: &MountToken) {
        let urls = client.urls();
        let outcome = client.page_envelope("home").await.map(|resp| reconcile(&resp));
        let embedded = outcome
            .as_ref()
            .ok()
            .and_then(|content| embedded_logos(content, urls));
        let mapped = outcome.map(|content| map_home(&content, urls));
        self.content
            .resolve(mount, "home content", mapped, HomeContent::fallback);

        if let Some(logos) = embedded {
            self.company_logos
                .resolve(mount, "company logos", Ok::<_, FetchError>(logos), Vec::new);
            return;
        }
        if !mount.is_mounted() {
            return;
        }
        let logos = client.company_logos().await.map(|items| {
            items
                .iter()
                .map(|l| CompanyLogo::from_value(l, urls))
                .collect()
        });
        self.company_logos
            .resolve(mount, "company logos", logos, Vec::new);
    }
}

pub async fn load<T: Transport>(client: &ContentClient<T>, mount: &MountToken) -> HomePage {
    let mut page = HomePage::new();
    page.mount(client, mount).await;
    page
}

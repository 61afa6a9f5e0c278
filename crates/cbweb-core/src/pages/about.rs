//! About page: six copy sections, team members and the about lead form.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{MountToken, Section, Slice};
use crate::api::{ContentClient, FetchError, Transport};
use crate::forms::{FormKind, LeadFormState};
use crate::normalize::UrlNormalizer;
use crate::reconcile::{reconcile, ContentSection, FieldReader};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderCopy {
    pub main_title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(flatten)]
    pub extra: ContentSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyCopy {
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: ContentSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionCopy {
    pub section_title: Option<String>,
    pub section_subtitle: Option<String>,
    pub world_map: Option<String>,
    pub mission_title: Option<String>,
    pub mission_subtitle: Option<String>,
    pub mission_description: Option<String>,
    /// Numbered `featureN_*` fields live here.
    #[serde(flatten)]
    pub extra: ContentSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MissionFeature {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
}

impl MissionCopy {
    /// `feature1_*`, `feature2_*`, ... up to the first number with no title.
    pub fn features(&self) -> Vec<MissionFeature> {
        let r = FieldReader::new(&self.extra);
        (1..)
            .map_while(|n| {
                let title = r.opt_text(&[format!("feature{n}_title").as_str()])?;
                Some(MissionFeature {
                    title,
                    description: r.text(&[format!("feature{n}_description").as_str()], ""),
                    icon: r.opt_text(&[format!("feature{n}_icon").as_str()]),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsCopy {
    pub section_title: Option<String>,
    pub section_subtitle: Option<String>,
    /// Numbered `statN_*` fields live here.
    #[serde(flatten)]
    pub extra: ContentSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatCard {
    pub number: String,
    pub symbol: String,
    pub title: String,
    pub description: String,
}

impl StatisticsCopy {
    pub fn stats(&self) -> Vec<StatCard> {
        let r = FieldReader::new(&self.extra);
        (1..)
            .map_while(|n| {
                let number = r.opt_text(&[format!("stat{n}_number").as_str()])?;
                Some(StatCard {
                    number,
                    symbol: r.text(&[format!("stat{n}_symbol").as_str()], ""),
                    title: r.text(&[format!("stat{n}_title").as_str()], ""),
                    description: r.text(&[format!("stat{n}_description").as_str()], ""),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSectionCopy {
    pub section_title: Option<String>,
    pub section_subtitle: Option<String>,
    pub section_description: Option<String>,
    #[serde(flatten)]
    pub extra: ContentSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSectionCopy {
    pub section_label: Option<String>,
    pub section_title: Option<String>,
    pub section_subtitle: Option<String>,
    pub section_description: Option<String>,
    #[serde(flatten)]
    pub extra: ContentSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub header: Section<HeaderCopy>,
    pub company: Section<CompanyCopy>,
    pub mission: Section<MissionCopy>,
    pub statistics: Section<StatisticsCopy>,
    pub team_section: Section<TeamSectionCopy>,
    pub contact_section: Section<ContactSectionCopy>,
}

impl AboutContent {
    pub fn from_section(content: &ContentSection, urls: &UrlNormalizer) -> Self {
        Self {
            header: Section::from_value(content.get("header"), urls),
            company: Section::from_value(content.get("company"), urls),
            mission: Section::from_value(content.get("mission"), urls),
            statistics: Section::from_value(content.get("statistics"), urls),
            team_section: Section::from_value(content.get("team"), urls),
            contact_section: Section::from_value(content.get("contact"), urls),
        }
    }

    pub fn fallback() -> Self {
        let content = json!({
            "header": {
                "main_title": "We're here to",
                "subtitle": "guarantee your success"
            },
            "company": {
                "description": "At Carebridge Technologies, a subsidiary of Maestros Electronics, we're driven by one goal: to connect people to care\u{2014}anywhere, anytime.",
                "image": "/images/untitled.png"
            },
            "mission": {
                "section_title": "We're here for you",
                "section_subtitle": "no matter where you are",
                "world_map": "/images/WorldMap.png",
                "mission_title": "Our",
                "mission_subtitle": "Mission",
                "mission_description": "Build a wellness ecosystem that empowers individuals, eases the burden on healthcare systems, and catches risks before they become crises.",
                "feature1_title": "Early Detection of Disease",
                "feature1_description": "Lorem ipsum dolor sit amet consecte tur adipiscing elit semper dalar cons elementum tempus hac.",
                "feature1_icon": "/images/ImagePlaceholder.png",
                "feature2_title": "Remote Patient Management",
                "feature2_description": "Lorem ipsum dolor sit amet consecte turole adipiscing elit semper dalaracc lacus velolte facilisis volutpat est velitolm.",
                "feature2_icon": "/images/ImagePlaceholder.png",
                "feature3_title": "Community-Driven Wellness",
                "feature3_description": "Lorem ipsum dolor sit amet consecte turole adipiscing elit semper dalaracc lacus velolte facilisis volutpat est velitolm.",
                "feature3_icon": "/images/ImagePlaceholder.png"
            },
            "statistics": {
                "section_title": "Our",
                "section_subtitle": "Commitment",
                "stat1_number": "99",
                "stat1_symbol": "%",
                "stat1_title": "Customer satisfaction",
                "stat1_description": "Ensuring uninterrupted access for every user.",
                "stat2_number": "32",
                "stat2_symbol": "M",
                "stat2_title": "Active users",
                "stat2_description": "Powering millions of health measurements daily.",
                "stat3_number": "240",
                "stat3_symbol": "%",
                "stat3_title": "Company growth",
                "stat3_description": "Accelerating adoption across clinics and enterprises."
            },
            "team": {
                "section_title": "Meet our",
                "section_subtitle": "team members",
                "section_description": "Lorem ipsum dolor sit amet consectetur adipiscing elit volutpat gravida malesuada quam commodo id integer nam."
            },
            "contact": {
                "section_label": "Contact us",
                "section_title": "Get in",
                "section_subtitle": "touch today",
                "section_description": "Lorem ipsum dolor sit amet consectetur adipiscing elit semper dalar elementum tempus hac tellus libero accumsan."
            }
        });
        Self::from_section(&reconcile(&content), &UrlNormalizer::new(None))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub bio: String,
    pub profile_image: String,
    pub social_links: SocialLinks,
}

impl TeamMember {
    pub fn from_value(item: &Value, urls: &UrlNormalizer) -> Self {
        let r = FieldReader::from_value(Some(item));
        let social = r.section(&["socialLinks", "social"]);
        Self {
            id: r.i64(&["id"]).unwrap_or_default(),
            name: r.text(&["name"], ""),
            position: r.text(&["position", "role", "title"], ""),
            bio: r.text(&["bio", "description"], ""),
            profile_image: r
                .asset(&["profileImage", "image", "photo"], urls)
                .unwrap_or_default(),
            social_links: SocialLinks {
                facebook: social.text(&["facebook"], ""),
                twitter: social.text(&["twitter"], ""),
                instagram: social.text(&["instagram"], ""),
                linkedin: social.text(&["linkedin"], ""),
            },
        }
    }
}

pub fn fallback_team() -> Vec<TeamMember> {
    vec![TeamMember {
        id: 1,
        name: "John Carter".to_string(),
        position: "CEO & Co-Founder".to_string(),
        bio: "Lorem ipsum dolor sit amet consecte adipiscing elit amet hendrerit pretium nulla sed enim iaculis mi.".to_string(),
        profile_image: "/images/profile.svg".to_string(),
        social_links: SocialLinks::default(),
    }]
}

/// Team members embedded in the page payload, either top-level or inside the
/// team section.
fn embedded_team(content: &ContentSection, urls: &UrlNormalizer) -> Option<Vec<TeamMember>> {
    let r = FieldReader::new(content);
    let items = r
        .collection(&["team_members"])
        .or_else(|| r.section(&["team"]).collection(&["members", "team_members"]))?;
    Some(items.iter().map(|m| TeamMember::from_value(m, urls)).collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub content: Slice<AboutContent>,
    pub team: Slice<Vec<TeamMember>>,
    pub form: LeadFormState,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self {
            content: Slice::default(),
            team: Slice::default(),
            form: LeadFormState::new(FormKind::About),
        }
    }
}

impl AboutPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the page copy, then the team list unless the copy already
    /// carried one.
    pub async fn mount<T: Transport>(&mut self, client: &ContentClient<T>, mount: &MountToken) {
        let urls = client.urls();
        let outcome = client.page_content("about").await.map(|resp| reconcile(&resp));
        let embedded = outcome
            .as_ref()
            .ok()
            .and_then(|content| embedded_team(content, urls));
        let mapped = outcome.map(|content| AboutContent::from_section(&content, urls));
        self.content
            .resolve(mount, "about content", mapped, AboutContent::fallback);

        if let Some(members) = embedded {
            tracing::debug!("about payload embeds {} team members", members.len());
            self.team
                .resolve(mount, "team members", Ok::<_, FetchError>(members), fallback_team);
            return;
        }
        if !mount.is_mounted() {
            return;
        }
        let members = client.team_members().await.map(|items| {
            items
                .iter()
                .map(|m| TeamMember::from_value(m, urls))
                .collect()
        });
        self.team
            .resolve(mount, "team members", members, fallback_team);
    }
}

pub async fn load<T: Transport>(client: &ContentClient<T>, mount: &MountToken) -> AboutPage {
    let mut page = AboutPage::new();
    page.mount(client, mount).await;
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::cache::ContentCache;
    use crate::pages::SliceState;
    use std::sync::Arc;

    fn client(t: ScriptedTransport) -> ContentClient<ScriptedTransport> {
        ContentClient::new(t, Arc::new(ContentCache::new()))
    }

    #[tokio::test]
    async fn maps_sections_and_fetches_team() {
        let t = ScriptedTransport::new()
            .ok(
                "/content/about",
                json!({
                    "pageKey": "about",
                    "content": {
                        "header": {"mainTitle": "Hello"},
                        "company": {"image": "&quot;http://127.0.0.1:5001/uploads/c.png&quot;"},
                        "mission": {"feature1_title": "One", "feature2Title": "Two"}
                    }
                }),
            )
            .ok(
                "/team",
                json!({"teamMembers": [{"id": 7, "name": "Ada", "profileImage": "\"/p.png\""}]}),
            );
        let c = client(t);
        let page = load(&c, &MountToken::new()).await;

        assert_eq!(page.content.state, SliceState::Ready);
        let header = page.content.value.header.typed().unwrap();
        assert_eq!(header.main_title.as_deref(), Some("Hello"));
        assert_eq!(header.subtitle, None);
        let company = page.content.value.company.typed().unwrap();
        assert_eq!(company.image.as_deref(), Some("http://localhost:5001/uploads/c.png"));
        let features = page.content.value.mission.typed().unwrap().features();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].title, "Two");

        assert_eq!(page.team.state, SliceState::Ready);
        assert_eq!(page.team.value[0].name, "Ada");
        assert_eq!(page.team.value[0].profile_image, "/p.png");
        assert_eq!(c.transport().count("/team"), 1);
    }

    #[tokio::test]
    async fn embedded_team_skips_secondary_fetch() {
        let t = ScriptedTransport::new().ok(
            "/content/about",
            json!({"content": {"team": {"members": [{"name": "Grace"}]}}}),
        );
        let c = client(t);
        let page = load(&c, &MountToken::new()).await;
        assert_eq!(page.team.state, SliceState::Ready);
        assert_eq!(page.team.value[0].name, "Grace");
        assert_eq!(c.transport().count("/team"), 0);
    }

    #[tokio::test]
    async fn failures_apply_fallbacks_per_slice() {
        let t = ScriptedTransport::new()
            .status("/content/about", 500)
            .ok("/team", json!({"teamMembers": []}));
        let page = load(&client(t), &MountToken::new()).await;
        assert!(page.content.is_failed());
        assert_eq!(page.content.value, AboutContent::fallback());
        assert_eq!(page.team.state, SliceState::Ready);
        assert!(page.team.value.is_empty());

        let t = ScriptedTransport::new().ok("/content/about", json!({"content": {}}));
        let page = load(&client(t), &MountToken::new()).await;
        assert!(page.team.is_failed());
        assert_eq!(page.team.value, fallback_team());
    }

    #[test]
    fn fallback_copy_is_typed() {
        let content = AboutContent::fallback();
        let stats = content.statistics.typed().unwrap().stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[1].number, "32");
        assert_eq!(stats[1].symbol, "M");
        let mission = content.mission.typed().unwrap();
        assert_eq!(mission.world_map.as_deref(), Some("/images/WorldMap.png"));
        assert_eq!(mission.features().len(), 3);
        let contact = content.contact_section.typed().unwrap();
        assert_eq!(contact.section_label.as_deref(), Some("Contact us"));
    }

    #[test]
    fn documented_key_wins_when_both_spellings_are_sent() {
        let section = reconcile(&json!({
            "content": {
                "header": {"main_title": "Documented", "mainTitle": "Variant"},
                "mission": {"section_title": "S", "sectionTitle": "S2", "worldMap": "\"/w.png\""}
            }
        }));
        let content = AboutContent::from_section(&section, &UrlNormalizer::new(None));
        assert!(!content.header.is_legacy());
        assert!(!content.mission.is_legacy());
        let header = content.header.typed().unwrap();
        assert_eq!(header.main_title.as_deref(), Some("Documented"));
        let mission = content.mission.typed().unwrap();
        assert_eq!(mission.section_title.as_deref(), Some("S"));
        assert_eq!(mission.world_map.as_deref(), Some("/w.png"));
    }

    #[test]
    fn mistyped_section_is_kept_as_legacy() {
        let section = reconcile(&json!({"content": {"header": {"main_title": ["a", "b"]}}}));
        let content = AboutContent::from_section(&section, &UrlNormalizer::new(None));
        assert!(content.header.is_legacy());
        assert!(content.company.typed().is_some());
    }

    #[tokio::test]
    async fn unmount_during_content_fetch_skips_team() {
        let mount = MountToken::new();
        let t = ScriptedTransport::new()
            .ok("/content/about", json!({"content": {}}))
            .unmount_on("/content/about", mount.clone());
        let c = client(t);
        let page = load(&c, &mount).await;
        assert!(page.content.is_loading());
        assert!(page.team.is_loading());
        assert_eq!(c.transport().count("/team"), 0);
    }
}

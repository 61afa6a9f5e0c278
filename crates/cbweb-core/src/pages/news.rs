//! News page: main section, featured article, social section, article list.

use serde::Serialize;
use serde_json::Value;

use super::{MountToken, Slice};
use crate::api::{ContentClient, Transport};
use crate::normalize::UrlNormalizer;
use crate::reconcile::{select_payload, FieldReader};

const LOREM_FEATURED: &str = "Lorem ipsum dolor sit amet consectetur adipiscing elit Vel mauris turpis vel eget nec orci nec ipsum Elementum felis eu pellentesque velit vulputate. Blandit consequat facilisi sagittis ut quis Integer et faucibus elemen.";
const LOREM_ARTICLE: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Vestibulum at lacinia ex, in mollis lectus.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image_url: String,
    pub author: String,
    pub author_position: Option<String>,
    pub author_company: Option<String>,
    pub featured: bool,
    pub category: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedArticle {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub author: String,
    pub author_position: Option<String>,
    pub author_company: Option<String>,
    pub company_logo_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsContent {
    pub heading: String,
    pub heading_highlight: String,
    pub description: String,
    pub linkedin_heading: String,
    pub linkedin_heading_highlight: String,
    pub linkedin_description: String,
    pub follow_button_text: String,
    pub social_media_link: String,
    pub featured_article: FeaturedArticle,
    pub news_articles: Vec<NewsArticle>,
}

fn fallback_article(id: i64, title: &str, summary: &str, image: &str, author: &str) -> NewsArticle {
    NewsArticle {
        id,
        title: title.to_string(),
        summary: summary.to_string(),
        content: LOREM_ARTICLE.to_string(),
        image_url: image.to_string(),
        author: author.to_string(),
        ..NewsArticle::default()
    }
}

impl NewsContent {
    /// Copy shown before the news payload arrives (no article list yet).
    pub fn initial() -> Self {
        Self {
            heading: "Latest".to_string(),
            heading_highlight: "News & Updates".to_string(),
            description: "Stay updated with the latest healthcare technology innovations, research breakthroughs, and company announcements.".to_string(),
            linkedin_heading: "Follow us on".to_string(),
            linkedin_heading_highlight: "Linkedin".to_string(),
            linkedin_description: "Explore our collection of healthcare technology articles, research papers, and industry updates.".to_string(),
            follow_button_text: "Follow Us".to_string(),
            social_media_link: "https://www.linkedin.com/company/carebridge-health".to_string(),
            featured_article: FeaturedArticle {
                id: 1,
                title: "Facebook Partners with Carebridge for Healthcare Innovation".to_string(),
                content: LOREM_FEATURED.to_string(),
                image_url: "/images/news-img.svg".to_string(),
                author: "John Carter".to_string(),
                author_position: Some("Creative Director".to_string()),
                author_company: Some("Facebook".to_string()),
                company_logo_url: None,
                video_url: Some("https://example.com/video".to_string()),
            },
            news_articles: Vec::new(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            news_articles: vec![
                fallback_article(
                    2,
                    "New Healthcare Device Launch",
                    "Carebridge announces revolutionary monitoring system",
                    "/images/img-1.png",
                    "Sarah Johnson",
                ),
                fallback_article(
                    3,
                    "Annual Healthcare Conference",
                    "Join us for the biggest healthcare event of the year",
                    "/images/img-2.png",
                    "Michael Brown",
                ),
                fallback_article(
                    4,
                    "Research Breakthrough in Patient Care",
                    "New study shows promising results for remote patient monitoring",
                    "/images/img-3.png",
                    "Dr. Emily Chen",
                ),
                fallback_article(
                    5,
                    "Technology Integration Partnership",
                    "Carebridge partners with leading tech companies",
                    "/images/img-4.png",
                    "David Wilson",
                ),
            ],
            ..Self::initial()
        }
    }
}

fn overwrite(target: &mut String, r: &FieldReader<'_>, keys: &[&str]) {
    if let Some(v) = r.opt_text(keys) {
        *target = v;
    }
}

fn overwrite_opt(target: &mut Option<String>, r: &FieldReader<'_>, keys: &[&str]) {
    if let Some(v) = r.opt_text(keys) {
        *target = Some(v);
    }
}

fn map_featured(mut featured: FeaturedArticle, r: &FieldReader<'_>, urls: &UrlNormalizer) -> FeaturedArticle {
    if let Some(id) = r.i64(&["id"]) {
        featured.id = id;
    }
    overwrite(&mut featured.title, r, &["title"]);
    overwrite(&mut featured.content, r, &["content"]);
    overwrite(&mut featured.author, r, &["author"]);
    overwrite_opt(&mut featured.author_position, r, &["authorPosition"]);
    overwrite_opt(&mut featured.author_company, r, &["authorCompany"]);
    overwrite_opt(&mut featured.video_url, r, &["videoUrl"]);
    if let Some(image) = r.asset(&["imageUrl", "image"], urls) {
        featured.image_url = image;
    }
    if let Some(logo) = r.asset(&["companyLogoUrl"], urls) {
        featured.company_logo_url = Some(logo);
    }
    featured
}

fn map_article(item: &Value, urls: &UrlNormalizer) -> NewsArticle {
    let r = FieldReader::from_value(Some(item));
    NewsArticle {
        id: r.i64(&["id"]).unwrap_or_default(),
        title: r.text(&["title"], ""),
        summary: r.text(&["summary"], ""),
        content: r.text(&["content"], ""),
        image_url: r.asset(&["imageUrl", "image"], urls).unwrap_or_default(),
        author: r.text(&["author"], ""),
        author_position: r.opt_text(&["authorPosition"]),
        author_company: r.opt_text(&["authorCompany"]),
        featured: r.flag(&["featured"]),
        category: r.opt_text(&["category"]),
        video_url: r.opt_text(&["videoUrl"]),
    }
}

/// Maps a `/news/pages` response onto the news view model. Only fields the
/// response supplies replace the initial copy.
pub fn map_news(response: &Value, urls: &UrlNormalizer) -> NewsContent {
    let payload = FieldReader::from_value(Some(select_payload(response)));
    let mut content = NewsContent::initial();

    let main = payload.section(&["mainSection"]);
    overwrite(&mut content.heading, &main, &["heading"]);
    overwrite(&mut content.heading_highlight, &main, &["headingHighlight"]);
    overwrite(&mut content.description, &main, &["description"]);

    let featured = payload.section(&["featuredArticle"]);
    if !featured.is_empty() {
        content.featured_article = map_featured(content.featured_article, &featured, urls);
    }

    let social = payload.section(&["socialSection"]);
    overwrite(&mut content.linkedin_heading, &social, &["heading"]);
    overwrite(&mut content.linkedin_heading_highlight, &social, &["headingHighlight"]);
    overwrite(&mut content.linkedin_description, &social, &["description"]);
    overwrite(&mut content.follow_button_text, &social, &["buttonText"]);
    overwrite(&mut content.social_media_link, &social, &["socialMediaLink"]);

    if let Some(articles) = payload.collection(&["newsArticles"]) {
        content.news_articles = articles.iter().map(|a| map_article(a, urls)).collect();
    }
    content
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    pub selected_category: String,
    pub content: Slice<NewsContent>,
    pub loading_error: bool,
}

impl Default for NewsPage {
    fn default() -> Self {
        Self {
            selected_category: "All".to_string(),
            content: Slice::loading(NewsContent::initial()),
            loading_error: false,
        }
    }
}

impl NewsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount<T: Transport>(&mut self, client: &ContentClient<T>, mount: &MountToken) {
        let outcome = client
            .news_page_content()
            .await
            .map(|resp| map_news(&resp, client.urls()));
        let failed = outcome.is_err();
        if self
            .content
            .resolve(mount, "news page content", outcome, NewsContent::fallback)
            && failed
        {
            self.loading_error = true;
        }
    }

    /// Articles whose `category` matches the selected one (`All` shows everything).
    pub fn visible_articles(&self) -> Vec<&NewsArticle> {
        let articles = &self.content.value.news_articles;
        if self.selected_category.eq_ignore_ascii_case("all") {
            return articles.iter().collect();
        }
        articles
            .iter()
            .filter(|a| {
                a.category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(&self.selected_category))
            })
            .collect()
    }
}

pub async fn load<T: Transport>(client: &ContentClient<T>, mount: &MountToken) -> NewsPage {
    let mut page = NewsPage::new();
    page.mount(client, mount).await;
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::cache::ContentCache;
    use serde_json::json;
    use std::sync::Arc;

    fn client(t: ScriptedTransport) -> ContentClient<ScriptedTransport> {
        ContentClient::new(t, Arc::new(ContentCache::new()))
    }

    #[tokio::test]
    async fn maps_full_payload() {
        let t = ScriptedTransport::new().ok(
            "/news/pages",
            json!({
                "mainSection": {"heading": "Fresh", "headingHighlight": "Stories", "description": "d"},
                "featuredArticle": {
                    "id": 9,
                    "title": "Big news",
                    "imageUrl": "\"/uploads/featured.png\"",
                    "companyLogoUrl": "xxhttp://127.0.0.1:5001/logo.svg"
                },
                "socialSection": {"heading": "Find us", "buttonText": "Join"},
                "newsArticles": [
                    {"id": 1, "title": "A", "imageUrl": ["&quot;/a.png&quot;"], "featured": true},
                    {"id": "2", "title": "B"}
                ]
            }),
        );
        let page = load(&client(t), &MountToken::new()).await;
        let c = &page.content.value;
        assert!(!page.loading_error);
        assert_eq!(page.content.state, crate::pages::SliceState::Ready);
        assert_eq!(c.heading, "Fresh");
        assert_eq!(c.heading_highlight, "Stories");
        assert_eq!(c.featured_article.id, 9);
        assert_eq!(c.featured_article.title, "Big news");
        assert_eq!(c.featured_article.image_url, "/uploads/featured.png");
        assert_eq!(
            c.featured_article.company_logo_url.as_deref(),
            Some("http://localhost:5001/logo.svg")
        );
        assert_eq!(c.featured_article.author, "John Carter");
        assert_eq!(c.linkedin_heading, "Find us");
        assert_eq!(c.linkedin_heading_highlight, "Linkedin");
        assert_eq!(c.follow_button_text, "Join");
        assert_eq!(c.news_articles.len(), 2);
        assert_eq!(c.news_articles[0].image_url, "/a.png");
        assert_eq!(c.news_articles[1].id, 2);
    }

    #[tokio::test]
    async fn failure_applies_fallback_and_flags_error() {
        let t = ScriptedTransport::new().status("/news/pages", 502);
        let page = load(&client(t), &MountToken::new()).await;
        assert!(page.loading_error);
        assert!(page.content.is_failed());
        assert_eq!(page.content.value, NewsContent::fallback());
        assert_eq!(page.content.value.news_articles.len(), 4);
    }

    #[tokio::test]
    async fn empty_article_list_keeps_initial() {
        let t = ScriptedTransport::new().ok("/news/pages", json!({"newsArticles": []}));
        let page = load(&client(t), &MountToken::new()).await;
        assert_eq!(page.content.value, NewsContent::initial());
    }

    #[tokio::test]
    async fn second_mount_uses_cache() {
        let t = ScriptedTransport::new().ok("/news/pages", json!({"mainSection": {"heading": "H"}}));
        let c = client(t);
        load(&c, &MountToken::new()).await;
        let again = load(&c, &MountToken::new()).await;
        assert_eq!(again.content.value.heading, "H");
        assert_eq!(c.transport().count("/news/pages"), 1);
    }

    #[tokio::test]
    async fn unmount_discards_late_result() {
        let mount = MountToken::new();
        let t = ScriptedTransport::new()
            .status("/news/pages", 500)
            .unmount_on("/news/pages", mount.clone());
        let page = load(&client(t), &mount).await;
        assert!(page.content.is_loading());
        assert!(!page.loading_error);
        assert_eq!(page.content.value, NewsContent::initial());
    }

    #[test]
    fn category_filter_matches_article_category() {
        let payload = json!({"newsArticles": [
            {"id": 1, "title": "A", "category": "Research"},
            {"id": 2, "title": "B", "category": "events"},
            {"id": 3, "title": "C", "featured": true},
            {"id": 4, "title": "D", "category": "research"}
        ]});
        let mut page = NewsPage::new();
        page.content.value = map_news(&payload, &UrlNormalizer::new(None));
        assert_eq!(page.visible_articles().len(), 4);

        page.selected_category = "research".to_string();
        let ids: Vec<i64> = page.visible_articles().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 4]);

        page.selected_category = "Featured".to_string();
        assert!(page.visible_articles().is_empty());
    }
}

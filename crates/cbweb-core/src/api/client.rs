//! Endpoint methods of the content API.

use std::sync::Arc;

use serde_json::Value;

use super::{CurlTransport, FetchError, Transport};
use crate::cache::{ContentCache, NEWS_PAGE_KEY};
use crate::config::SiteConfig;
use crate::forms::{FormKind, LeadForm};
use crate::normalize::{GalleryOptions, UrlNormalizer};

/// Default navigation menu key.
pub const MAIN_NAVIGATION: &str = "main_navigation";

/// Client for the content API.
///
/// Cheap to clone: the transport and cache are shared. The cache is injected
/// so one session cache can serve every page mapper.
pub struct ContentClient<T: Transport> {
    transport: Arc<T>,
    cache: Arc<ContentCache>,
    urls: UrlNormalizer,
    gallery: GalleryOptions,
}

impl<T: Transport> Clone for ContentClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cache: Arc::clone(&self.cache),
            urls: self.urls.clone(),
            gallery: self.gallery,
        }
    }
}

impl ContentClient<CurlTransport> {
    /// Client for the configured API with the configured normalizers.
    pub fn from_config(cfg: &SiteConfig, cache: Arc<ContentCache>) -> Self {
        ContentClient::new(CurlTransport::from_config(cfg), cache)
            .with_normalizer(UrlNormalizer::new(cfg.dev_host_rewrite.clone()))
            .with_gallery(GalleryOptions::from_config(cfg))
    }
}

fn take_field(mut v: Value, key: &str) -> Value {
    v.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}

fn take_list(v: Value, key: &str) -> Vec<Value> {
    match take_field(v, key) {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

impl<T: Transport> ContentClient<T> {
    pub fn new(transport: T, cache: Arc<ContentCache>) -> Self {
        Self {
            transport: Arc::new(transport),
            cache,
            urls: UrlNormalizer::default(),
            gallery: GalleryOptions::default(),
        }
    }

    pub fn with_normalizer(mut self, urls: UrlNormalizer) -> Self {
        self.urls = urls;
        self
    }

    pub fn with_gallery(mut self, gallery: GalleryOptions) -> Self {
        self.gallery = gallery;
        self
    }

    pub fn urls(&self) -> &UrlNormalizer {
        &self.urls
    }

    pub fn gallery(&self) -> &GalleryOptions {
        &self.gallery
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn get(&self, path: String) -> Result<Value, FetchError> {
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || transport.get_json(&path))
            .await
            .map_err(|e| FetchError::Worker(e.to_string()))?
    }

    async fn post(&self, path: &'static str, body: Value) -> Result<Value, FetchError> {
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || transport.post_json(path, &body))
            .await
            .map_err(|e| FetchError::Worker(e.to_string()))?
    }

    async fn get_cached(&self, key: &str, path: String) -> Result<Value, FetchError> {
        if let Some(hit) = self.cache.get(key) {
            tracing::debug!("content cache hit for {}", key);
            return Ok(hit);
        }
        match self.get(path).await {
            Ok(data) => {
                self.cache.put(key, data.clone());
                Ok(data)
            }
            Err(e) => {
                tracing::error!("error loading content for {}: {}", key, e);
                Err(e)
            }
        }
    }

    /// GET `/content/{page_key}`, cached per page key.
    pub async fn page_content(&self, page_key: &str) -> Result<Value, FetchError> {
        self.get_cached(page_key, format!("/content/{page_key}")).await
    }

    /// GET `/content/{page_key}/{section_key}` and unwrap its `content` field.
    pub async fn section_content(
        &self,
        page_key: &str,
        section_key: &str,
    ) -> Result<Value, FetchError> {
        let resp = self
            .get(format!("/content/{page_key}/{section_key}"))
            .await?;
        Ok(take_field(resp, "content"))
    }

    /// GET `/pages/{page}` (`{success, data}` envelope).
    pub async fn page_envelope(&self, page: &str) -> Result<Value, FetchError> {
        self.get(format!("/pages/{page}")).await
    }

    pub async fn team_members(&self) -> Result<Vec<Value>, FetchError> {
        let resp = self.get("/team".to_string()).await?;
        Ok(take_list(resp, "teamMembers"))
    }

    /// GET `/products` or `/products/{category}`.
    pub async fn products(&self, category: Option<&str>) -> Result<Value, FetchError> {
        let path = match category {
            Some(c) => format!("/products/{c}"),
            None => "/products".to_string(),
        };
        self.get(path).await
    }

    pub async fn company_logos(&self) -> Result<Vec<Value>, FetchError> {
        let resp = self.get("/logos".to_string()).await?;
        Ok(take_list(resp, "companyLogos"))
    }

    pub async fn navigation_menu(&self, menu_key: &str) -> Result<Vec<Value>, FetchError> {
        let resp = self.get(format!("/navigation/{menu_key}")).await?;
        Ok(take_list(resp, "items"))
    }

    pub async fn all_navigation_menus(&self) -> Result<Value, FetchError> {
        self.get("/navigation".to_string()).await
    }

    /// GET `/news` with optional `category` (ignored when `all`) and `limit`.
    pub async fn news_articles(
        &self,
        category: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Value, FetchError> {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(c) = category.filter(|c| *c != "all") {
            query.append_pair("category", c);
        }
        if let Some(n) = limit.filter(|n| *n > 0) {
            query.append_pair("limit", &n.to_string());
        }
        let query = query.finish();
        let path = if query.is_empty() {
            "/news".to_string()
        } else {
            format!("/news?{query}")
        };
        self.get(path).await
    }

    pub async fn news_article(&self, id: i64) -> Result<Value, FetchError> {
        self.get(format!("/news/{id}")).await
    }

    /// GET `/news/pages`, cached under [`NEWS_PAGE_KEY`].
    pub async fn news_page_content(&self) -> Result<Value, FetchError> {
        self.get_cached(NEWS_PAGE_KEY, "/news/pages".to_string())
            .await
    }

    pub async fn platforms(&self) -> Result<Vec<Value>, FetchError> {
        let resp = self.get("/platforms".to_string()).await?;
        Ok(take_list(resp, "platforms"))
    }

    pub async fn platform(&self, platform_key: &str) -> Result<Value, FetchError> {
        self.get(format!("/platforms/{platform_key}")).await
    }

    pub async fn product_details(&self) -> Result<Value, FetchError> {
        self.get("/product-details".to_string()).await
    }

    pub async fn product_details_platforms(&self) -> Result<Value, FetchError> {
        self.get("/product-details/platforms".to_string()).await
    }

    pub async fn product_details_platform(&self, platform_key: &str) -> Result<Value, FetchError> {
        self.get(format!("/product-details/platform/{platform_key}"))
            .await
    }

    pub async fn product_details_achievements(&self) -> Result<Value, FetchError> {
        self.get("/product-details/achievements".to_string()).await
    }

    pub async fn product_details_target_audience(&self) -> Result<Value, FetchError> {
        self.get("/product-details/target-audience".to_string())
            .await
    }

    pub async fn product_details_deployment(
        &self,
        platform_key: &str,
    ) -> Result<Value, FetchError> {
        self.get(format!("/product-details/deployment/{platform_key}"))
            .await
    }

    pub async fn product_details_cta(&self, platform_key: &str) -> Result<Value, FetchError> {
        self.get(format!("/product-details/cta/{platform_key}"))
            .await
    }

    pub async fn all_product_details(&self) -> Result<Value, FetchError> {
        self.get("/product-details/all".to_string()).await
    }

    /// GET `/contact`: a list of contact-detail records.
    pub async fn contact_details(&self) -> Result<Value, FetchError> {
        self.get("/contact".to_string()).await
    }

    pub async fn submit_form(&self, kind: FormKind, form: &LeadForm) -> Result<Value, FetchError> {
        self.post(kind.path(), form.to_body()).await
    }

    pub async fn submit_contact_form(&self, form: &LeadForm) -> Result<Value, FetchError> {
        self.submit_form(FormKind::Contact, form).await
    }

    pub async fn submit_about_form(&self, form: &LeadForm) -> Result<Value, FetchError> {
        self.submit_form(FormKind::About, form).await
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use serde_json::json;

    fn client(t: ScriptedTransport) -> ContentClient<ScriptedTransport> {
        ContentClient::new(t, Arc::new(ContentCache::new()))
    }

    #[tokio::test]
    async fn page_content_is_cached_per_key() {
        let t = ScriptedTransport::new()
            .ok("/content/about", json!({"pageKey": "about", "content": {}}));
        let c = client(t);
        let first = c.page_content("about").await.unwrap();
        let second = c.page_content("about").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(c.transport().count("/content/about"), 1);
        assert!(c.cache().contains("about"));
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let t = ScriptedTransport::new().status("/content/home", 500);
        let c = client(t);
        let err = c.page_content("home").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!c.cache().contains("home"));
    }

    #[tokio::test]
    async fn clear_cache_forces_refetch() {
        let t = ScriptedTransport::new().ok("/news/pages", json!({"newsArticles": []}));
        let c = client(t);
        c.news_page_content().await.unwrap();
        c.clear_cache();
        c.news_page_content().await.unwrap();
        assert_eq!(c.transport().count("/news/pages"), 2);
    }

    #[tokio::test]
    async fn collection_envelopes_are_unwrapped() {
        let t = ScriptedTransport::new()
            .ok("/team", json!({"teamMembers": [{"name": "A"}]}))
            .ok("/logos", json!({"unexpected": true}))
            .ok("/navigation/main_navigation", json!({"items": [{"label": "Home"}]}));
        let c = client(t);
        assert_eq!(c.team_members().await.unwrap().len(), 1);
        assert!(c.company_logos().await.unwrap().is_empty());
        assert_eq!(c.navigation_menu(MAIN_NAVIGATION).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn section_content_unwraps_content() {
        let t = ScriptedTransport::new()
            .ok("/content/about/header", json!({"content": {"main_title": "Hi"}}));
        let c = client(t);
        assert_eq!(
            c.section_content("about", "header").await.unwrap(),
            json!({"main_title": "Hi"})
        );
    }

    #[tokio::test]
    async fn news_query_string() {
        let t = ScriptedTransport::new()
            .ok("/news", json!([]))
            .ok("/news?category=research&limit=3", json!([]))
            .ok("/news?limit=2", json!([]));
        let c = client(t);
        c.news_articles(None, None).await.unwrap();
        c.news_articles(Some("research"), Some(3)).await.unwrap();
        c.news_articles(Some("all"), Some(2)).await.unwrap();
        assert_eq!(
            c.transport().calls(),
            vec!["GET /news", "GET /news?category=research&limit=3", "GET /news?limit=2"]
        );
    }

    #[tokio::test]
    async fn products_path_with_category() {
        let t = ScriptedTransport::new()
            .ok("/products", json!({}))
            .ok("/products/wearables", json!({}));
        let c = client(t);
        c.products(None).await.unwrap();
        c.products(Some("wearables")).await.unwrap();
        assert_eq!(c.transport().count("/products/wearables"), 1);
    }

    #[tokio::test]
    async fn submit_posts_body() {
        let t = ScriptedTransport::new().ok("/forms/contact", json!({"success": true}));
        let c = client(t);
        let form = LeadForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
            ..LeadForm::default()
        };
        let ack = c.submit_contact_form(&form).await.unwrap();
        assert_eq!(ack, json!({"success": true}));
        assert_eq!(
            c.transport().posted("/forms/contact"),
            vec![json!({"name": "Ada", "email": "ada@example.com", "message": "Hello"})]
        );
    }
}

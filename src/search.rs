//! Recipe search through a web search engine.
//!
//! The query is restricted to the recipe host with `site:` and a language tag,
//! the result page is scraped for links, and links that point at a recipe
//! (`/recipes/<id>-<slug>/`) become lookup entries.

use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::http;
use crate::lookup::{LookupCache, RecipeId};
use scraper::{Html, Selector};
use url::Url;

/// Builds search queries and turns result pages into a [`LookupCache`].
pub struct SearchProvider {
    agent: ureq::Agent,
    search_url: String,
    site: String,
    language: String,
    selector: String,
    max_results: usize,
}

impl SearchProvider {
    pub fn new(config: &Config) -> Self {
        Self::with_agent(http::agent(config), config)
    }

    pub fn with_agent(agent: ureq::Agent, config: &Config) -> Self {
        Self {
            agent,
            search_url: config.search_url.clone(),
            site: config.site.clone(),
            language: config.language.clone(),
            selector: config.result_selector.clone(),
            max_results: config.max_results,
        }
    }

    /// Free-text terms plus the fixed language and site qualifiers.
    pub fn provider_query(&self, terms: &str) -> String {
        format!("{} {} site:{}", terms.trim(), self.language, self.site)
    }

    /// Run a search and collect up to `max_results` recipe references.
    pub fn search(&self, terms: &str) -> Result<LookupCache> {
        let query = self.provider_query(terms);
        let body = http::get_text(&self.agent, &self.search_url, &[("q", query.as_str())])?;
        parse_results(&body, &self.search_url, &self.selector, self.max_results)
    }
}

/// Extract recipe references from a search result page.
///
/// `base` resolves relative links. Links that do not name a numeric recipe id
/// are skipped; collection stops once `limit` entries are accepted.
pub fn parse_results(html: &str, base: &str, selector: &str, limit: usize) -> Result<LookupCache> {
    let selector = Selector::parse(selector)
        .map_err(|e| LookupError::Parse(format!("invalid result selector '{selector}': {e}")))?;
    let base = Url::parse(base)
        .map_err(|e| LookupError::Parse(format!("invalid search URL '{base}': {e}")))?;

    let document = Html::parse_document(html);
    let mut cache = LookupCache::new(limit);

    for href in document.select(&selector).filter_map(|a| a.value().attr("href")) {
        if cache.is_full() {
            break;
        }
        match parse_recipe_href(&base, href) {
            Some((id, title)) => {
                tracing::debug!(%id, %title, "accepted result");
                cache.push(id, title);
            }
            None => tracing::debug!(href, "skipped non-recipe link"),
        }
    }

    Ok(cache)
}

/// Split a recipe link into its id and title.
///
/// The slug is the path segment after `recipes`, or the first segment when
/// there is none. `577478-binary-tree` gives id `577478`, title `binary tree`.
pub fn parse_recipe_href(base: &Url, href: &str) -> Option<(RecipeId, String)> {
    let url = base.join(href).ok()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    let slug = match segments.iter().position(|s| *s == "recipes") {
        Some(pos) => segments.get(pos + 1)?,
        None => segments.first()?,
    };

    let mut parts = slug.split('-');
    let id = RecipeId::parse(parts.next()?)?;
    let title = parts.filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ");
    Some((id, title))
}

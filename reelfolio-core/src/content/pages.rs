use std::collections::BTreeMap;
use std::sync::Arc;

use reelfolio_model::{Locale, Page};

use crate::database::ports::pages::PagesRepository;
use crate::error::Result;

/// Static pages with per-slug fallback to the default locale.
#[derive(Clone)]
pub struct PageCatalog {
    pages: Arc<dyn PagesRepository>,
}

impl std::fmt::Debug for PageCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageCatalog").finish_non_exhaustive()
    }
}

impl PageCatalog {
    pub fn new(pages: Arc<dyn PagesRepository>) -> Self {
        Self { pages }
    }

    /// Every page slug known in the default locale or in `locale`, each in
    /// `locale` when translated.
    pub async fn pages(&self, locale: Locale) -> Result<Vec<Page>> {
        let mut by_slug: BTreeMap<String, Page> = BTreeMap::new();
        if !locale.is_default() {
            for page in self.pages.list(Locale::default()).await? {
                by_slug.insert(page.slug.clone(), page);
            }
        }
        for page in self.pages.list(locale).await? {
            by_slug.insert(page.slug.clone(), page);
        }
        Ok(by_slug.into_values().collect())
    }

    pub async fn page_by_slug(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<Page>> {
        if let Some(page) = self.pages.get(slug, locale).await? {
            return Ok(Some(page));
        }
        if locale.is_default() {
            return Ok(None);
        }
        self.pages.get(slug, Locale::default()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::infrastructure::memory::InMemoryPagesRepository;

    fn page(slug: &str, locale: Locale, title: &str) -> Page {
        Page {
            slug: slug.into(),
            locale,
            title: title.into(),
            content: format!("<p>{title}</p>"),
        }
    }

    #[tokio::test]
    async fn translated_pages_override_default() {
        let repo = Arc::new(InMemoryPagesRepository::new());
        repo.upsert(&page("about", Locale::Es, "Sobre mí")).await.unwrap();
        repo.upsert(&page("contact", Locale::Es, "Contacto")).await.unwrap();
        repo.upsert(&page("about", Locale::En, "About")).await.unwrap();
        let catalog = PageCatalog::new(repo);

        let english = catalog.pages(Locale::En).await.unwrap();
        let titles: Vec<_> = english.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["About", "Contacto"]);

        let contact = catalog
            .page_by_slug("contact", Locale::En)
            .await
            .unwrap()
            .expect("fallback page");
        assert_eq!(contact.locale, Locale::Es);
        assert!(catalog.page_by_slug("press", Locale::Es).await.unwrap().is_none());
    }
}

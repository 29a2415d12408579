//! Open page sessions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use tracing::{debug, info};
use tuneboard_page::Page;

pub const DEFAULT_MAX_SESSIONS: usize = 256;

pub type PageId = u64;
pub type SharedPage = Arc<Mutex<Page>>;

/// Pages keyed by id, oldest first. Each page sits behind its own mutex so
/// its clicks are processed one at a time, in arrival order.
#[derive(Debug)]
pub struct PageSessions {
    pages: Mutex<IndexMap<PageId, SharedPage>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl Default for PageSessions {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl PageSessions {
    pub fn new(capacity: usize) -> Self {
        Self {
            pages: Mutex::new(IndexMap::new()),
            next_id: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// Register a freshly loaded page, evicting the oldest ones past capacity.
    pub fn insert(&self, page: Page) -> (PageId, SharedPage) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let page = Arc::new(Mutex::new(page));
        let mut pages = self.table();
        while pages.len() >= self.capacity {
            if let Some((evicted, _)) = pages.shift_remove_index(0) {
                info!(page_id = evicted, "Evicted oldest page session");
            }
        }
        pages.insert(id, Arc::clone(&page));
        debug!(page_id = id, open = pages.len(), "Opened page session");
        (id, page)
    }

    pub fn get(&self, id: PageId) -> Option<SharedPage> {
        self.table().get(&id).cloned()
    }

    pub fn remove(&self, id: PageId) -> bool {
        let removed = self.table().shift_remove(&id).is_some();
        if removed {
            debug!(page_id = id, "Closed page session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn table(&self) -> MutexGuard<'_, IndexMap<PageId, SharedPage>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuneboard_nav::{Language, builtin_menu};
    use tuneboard_page::PageAssets;

    fn page() -> Page {
        let model = Arc::new(builtin_menu(Language::En).expect("builtin menu"));
        Page::load(model, Language::En, Arc::new(PageAssets::default())).expect("page loads")
    }

    #[test]
    fn ids_are_unique_and_pages_retrievable() {
        let sessions = PageSessions::new(4);
        let (first, _) = sessions.insert(page());
        let (second, _) = sessions.insert(page());

        assert_ne!(first, second);
        assert!(sessions.get(first).is_some());
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn oldest_page_is_evicted_at_capacity() {
        let sessions = PageSessions::new(2);
        let (first, _) = sessions.insert(page());
        let (second, _) = sessions.insert(page());
        let (third, _) = sessions.insert(page());

        assert!(sessions.get(first).is_none());
        assert!(sessions.get(second).is_some());
        assert!(sessions.get(third).is_some());
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn remove_reports_whether_page_existed() {
        let sessions = PageSessions::new(2);
        let (id, _) = sessions.insert(page());

        assert!(sessions.remove(id));
        assert!(!sessions.remove(id));
        assert!(sessions.is_empty());
    }
}

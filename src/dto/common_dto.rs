use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Admin list filters. Each listing honours the fields that apply to it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub country_id: Option<i64>,
    pub town_id: Option<i64>,
    pub company_id: Option<i64>,
    pub specialist_id: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Saturates for absurd `page` values instead of overflowing.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }

    /// Trimmed search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// `ILIKE` pattern for the search term. `%`, `_` and `\` match literally,
    /// paired with `ESCAPE '\'` in the query.
    pub fn search_pattern(&self) -> Option<String> {
        self.search_term().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for ch in term.chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }

    /// Case-insensitive substring match used by the in-memory backend.
    pub fn matches_search(&self, candidates: &[&str]) -> bool {
        match self.search_term() {
            Some(term) => {
                let term = term.to_lowercase();
                candidates
                    .iter()
                    .any(|value| value.to_lowercase().contains(&term))
            }
            None => true,
        }
    }
}

/// Patch field for a nullable column: absent keeps the value, `null` clears
/// it. Use with `#[serde(default, deserialize_with = "nullable")]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, query: &ListQuery) -> Self {
        let per_page = query.per_page();
        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;
        Self {
            items,
            total,
            page: query.page(),
            per_page,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_is_clamped() {
        let query = ListQuery {
            page: Some(0),
            per_page: Some(1000),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), MAX_PER_PAGE);
        assert_eq!(query.offset(), 0);

        let query = ListQuery {
            page: Some(3),
            per_page: Some(10),
            ..Default::default()
        };
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let query = ListQuery {
            page: Some(i64::MAX),
            per_page: Some(50),
            ..Default::default()
        };
        assert_eq!(query.offset(), i64::MAX);

        let page: Page<i32> = Page::new(Vec::new(), 3, &query);
        assert_eq!(page.page, i64::MAX);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        let query = ListQuery {
            search: Some(" 100%_sure\\ ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.search_pattern().as_deref(), Some("%100\\%\\_sure\\\\%"));
        assert!(query.matches_search(&["Not 100%_sure\\ at all"]));
        assert!(!query.matches_search(&["100 percent sure"]));
    }

    #[test]
    fn page_counts_total_pages() {
        let query = ListQuery {
            per_page: Some(20),
            ..Default::default()
        };
        let page = Page::new(vec![1, 2, 3], 41, &query);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.map(|n| n * 2).items, vec![2, 4, 6]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let query = ListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(query.matches_search(&["anything"]));

        let query = ListQuery {
            search: Some("LAND".to_string()),
            ..Default::default()
        };
        assert!(query.matches_search(&["Testland"]));
        assert!(!query.matches_search(&["Testville"]));
    }
}

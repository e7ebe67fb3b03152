use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct PaginationQuery {
    // Query-string values arrive as strings when this struct is flattened
    // into another query type, so parse them by hand
    #[serde(default, deserialize_with = "deserialize_optional_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_u64")]
    pub limit: Option<u64>,
}

fn deserialize_optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) => s.parse::<u64>().map(Some).map_err(Error::custom),
        None => Ok(None),
    }
}

#[derive(Serialize)]
pub struct PaginationInfo {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
}

impl PaginationQuery {
    pub fn get_page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn get_limit(&self) -> u64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn get_offset(&self) -> u64 {
        (self.get_page() - 1) * self.get_limit()
    }
}

impl PaginationInfo {
    pub fn new(current_page: u64, total_items: u64, items_per_page: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(items_per_page)
        };

        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_caps() {
        let q = PaginationQuery { page: None, limit: None };
        assert_eq!(q.get_page(), 1);
        assert_eq!(q.get_limit(), 20);
        assert_eq!(q.get_offset(), 0);

        let q = PaginationQuery { page: Some(0), limit: Some(500) };
        assert_eq!(q.get_page(), 1);
        assert_eq!(q.get_limit(), 100);
    }

    #[test]
    fn offset_follows_page() {
        let q = PaginationQuery { page: Some(3), limit: Some(10) };
        assert_eq!(q.get_offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PaginationInfo::new(1, 0, 20).total_pages, 1);
        assert_eq!(PaginationInfo::new(1, 21, 20).total_pages, 2);
        assert_eq!(PaginationInfo::new(1, 40, 20).total_pages, 2);
    }
}

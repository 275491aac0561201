use serde::{Deserialize, Serialize};

/// Classification tags of a project.
///
/// The catalog stores them as one space-delimited string (`"web game"`).
/// Source order is preserved; empty fragments and repeats are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    pub fn parse(raw: &str) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in raw.split_whitespace() {
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        Self(tags)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for CategorySet {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CategorySet> for String {
    fn from(value: CategorySet) -> Self {
        value.0.join(" ")
    }
}

impl core::fmt::Display for CategorySet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_whitespace_in_source_order() {
        let set = CategorySet::parse("web  game\tunity");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["web", "game", "unity"]);
    }

    #[test]
    fn parse_drops_repeated_tags() {
        let set = CategorySet::parse("web game web");
        assert_eq!(set.len(), 2);
        assert!(set.contains("web"));
        assert!(set.contains("game"));
    }

    #[test]
    fn blank_category_is_empty() {
        assert!(CategorySet::parse("   ").is_empty());
    }

    #[test]
    fn deserializes_from_space_delimited_string() {
        let set: CategorySet = serde_json::from_str("\"mobile web\"").unwrap();
        assert_eq!(set.to_string(), "mobile web");
    }
}

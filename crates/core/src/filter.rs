//! Filter tags carried by the filter buttons (`data-filter`).

/// Active grid filter.
///
/// Buttons carry either `*` (show everything) or a class selector such as
/// `.web`. A comma-separated list (`.web, .game`) is a union.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterTag {
    #[default]
    All,
    Classes(Vec<String>),
}

impl FilterTag {
    pub const ALL: &'static str = "*";

    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == Self::ALL {
            return Self::All;
        }

        let classes: Vec<String> = raw
            .split(',')
            .map(|part| part.trim().trim_start_matches('.'))
            .filter(|class| !class.is_empty())
            .map(str::to_string)
            .collect();

        if classes.is_empty() {
            Self::All
        } else {
            Self::Classes(classes)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether an item carrying `classes` stays visible under this filter.
    pub fn matches<'a>(&self, classes: impl IntoIterator<Item = &'a str>) -> bool {
        match self {
            Self::All => true,
            Self::Classes(wanted) => classes
                .into_iter()
                .any(|class| wanted.iter().any(|w| w == class)),
        }
    }

    /// Selector handed to the layout library; `None` clears the filter.
    pub fn selector(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Classes(classes) => Some(
                classes
                    .iter()
                    .map(|c| format!(".{c}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }
}

impl core::fmt::Display for FilterTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.selector() {
            Some(selector) => f.write_str(&selector),
            None => f.write_str(Self::ALL),
        }
    }
}

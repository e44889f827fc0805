//! Role-based exclusion of roster entries.

/// Drops employees whose roster entry mentions an excluded role.
///
/// Matching is a case-insensitive substring test, not anchored to word
/// boundaries: "Повар" also excludes "Повараров Олег".
///
/// # Example
///
/// ```
/// use staff_report::extraction::ExclusionFilter;
///
/// let filter = ExclusionFilter::new(["Повар", "Наставник"]);
/// assert!(filter.is_excluded("Иван Повар Петров"));
/// assert!(filter.is_excluded("ТестНАСТАВНИК Олегов"));
/// assert!(!filter.is_excluded("Иванов Иван"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    keywords: Vec<String>,
}

impl ExclusionFilter {
    /// Creates a filter from role keywords. Blank keywords are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Returns the keyword matching `name`, if any.
    pub fn matching_keyword(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| name.contains(keyword.as_str()))
            .map(String::as_str)
    }

    /// Returns true if any keyword occurs in `name`.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.matching_keyword(name).is_some()
    }
}

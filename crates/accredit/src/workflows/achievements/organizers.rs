//! Known organizer fragments used to judge whether an event host is recognised.

/// Lookup capability consulted by the validation engine. Inputs are already lower-cased.
pub trait OrganizerRegistry: Send + Sync {
    /// True when the organizer contains at least one known fragment.
    fn is_known(&self, organizer: &str) -> bool;

    /// True when the organizer carries a token typical of an international body.
    fn signals_international(&self, organizer: &str) -> bool;
}

const STANDARD_ORGANIZERS: &[&str] = &[
    "ieee",
    "acm",
    "nptel",
    "coursera",
    "udemy",
    "infosys",
    "tcs",
    "wipro",
    "cognizant",
    "google",
    "amazon",
    "microsoft",
    "mit",
    "iit bombay",
    "iit madras",
    "iit delhi",
    "nit",
    "mhrd",
    "dd india",
    "springer",
    "elsevier",
    "aws",
    "oracle",
    "ibm",
    "nasscom",
    "hack2skill",
    "devfolio",
    "unstop",
    "hackerearth",
    "hackerrank",
    "linkedin learning",
    "simplilearn",
    "great learning",
    "swayam",
    "samsung",
    "qualcomm",
    "intel",
    "nvidia",
    "adobe",
    "meta",
    "flipkart",
    "myntra",
    "zoho",
    "freshworks",
    "byju's",
    "unacademy",
    "internshala",
    "let's intern",
];

const INTERNATIONAL_SIGNALS: &[&str] = &[
    "international",
    "global",
    "ieee",
    "acm",
    "springer",
    "mit",
    "google",
    "amazon",
    "microsoft",
];

/// Fixed allow-list registry. Matching is substring based, so "amazon" covers
/// "amazon web services".
#[derive(Debug, Clone)]
pub struct StaticOrganizerRegistry {
    known: Vec<String>,
    international: Vec<String>,
}

impl StaticOrganizerRegistry {
    pub fn new<K, I>(known: K, international: I) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            known: normalize(known),
            international: normalize(international),
        }
    }

    pub fn standard() -> Self {
        Self::new(
            STANDARD_ORGANIZERS.iter().copied(),
            INTERNATIONAL_SIGNALS.iter().copied(),
        )
    }

    /// Appends additional known fragments, e.g. from deployment configuration.
    pub fn extended_with<E>(mut self, extra: E) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
    {
        for fragment in normalize(extra) {
            if !self.known.contains(&fragment) {
                self.known.push(fragment);
            }
        }
        self
    }

    pub fn known_fragments(&self) -> &[String] {
        &self.known
    }
}

impl Default for StaticOrganizerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl OrganizerRegistry for StaticOrganizerRegistry {
    fn is_known(&self, organizer: &str) -> bool {
        self.known
            .iter()
            .any(|fragment| organizer.contains(fragment.as_str()))
    }

    fn signals_international(&self, organizer: &str) -> bool {
        self.international
            .iter()
            .any(|token| organizer.contains(token.as_str()))
    }
}

fn normalize<T>(fragments: T) -> Vec<String>
where
    T: IntoIterator,
    T::Item: Into<String>,
{
    fragments
        .into_iter()
        .map(|fragment| fragment.into().trim().to_lowercase())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

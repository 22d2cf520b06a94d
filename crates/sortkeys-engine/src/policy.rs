//! Sort policy: direction plus comparison flags

use serde::Deserialize;

/// Direction of the expected member order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// Short form used in diagnostic messages ("asc" / "desc")
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Flag block of the rule options wire shape
/// (`["asc", { caseSensitive, natural, requiredFirst }]`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PolicyParams {
    pub case_sensitive: Option<bool>,
    pub natural: Option<bool>,
    pub required_first: Option<bool>,
}

/// How a body's members are expected to be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortPolicy {
    pub order: SortOrder,
    /// Compare names without lowercase folding
    pub case_sensitive: bool,
    /// Compare digit runs numerically
    pub natural: bool,
    /// Required members sort before optional ones
    pub required_first: bool,
}

impl Default for SortPolicy {
    fn default() -> Self {
        Self {
            order: SortOrder::Ascending,
            case_sensitive: true,
            natural: false,
            required_first: false,
        }
    }
}

impl SortPolicy {
    /// Build a policy from the wire shape parts; missing parts take defaults
    pub fn from_parts(order: Option<SortOrder>, params: Option<PolicyParams>) -> Self {
        let defaults = Self::default();
        let params = params.unwrap_or_default();
        Self {
            order: order.unwrap_or(defaults.order),
            case_sensitive: params.case_sensitive.unwrap_or(defaults.case_sensitive),
            natural: params.natural.unwrap_or(defaults.natural),
            required_first: params.required_first.unwrap_or(defaults.required_first),
        }
    }

    pub fn ascending() -> Self {
        Self::default()
    }

    pub fn descending() -> Self {
        Self {
            order: SortOrder::Descending,
            ..Self::default()
        }
    }

    pub fn with_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    pub fn with_natural(mut self) -> Self {
        self.natural = true;
        self
    }

    pub fn with_required_first(mut self) -> Self {
        self.required_first = true;
        self
    }
}

//! Feed entities as returned by the marketplace backend.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_LOCALE;
use crate::error::CoreError;

/// Kind of entity a feed entry points at. Also the filter key space.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Product,
    Shop,
    User,
}

impl ContentType {
    /// Canonical order, used when joining filter keys for the query string.
    pub const ALL: [ContentType; 3] = [ContentType::Product, ContentType::Shop, ContentType::User];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Product => "product",
            Self::Shop => "shop",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" | "products" => Ok(Self::Product),
            "shop" | "shops" => Ok(Self::Shop),
            "user" | "users" => Ok(Self::User),
            other => Err(CoreError::UnknownContentType(other.to_owned())),
        }
    }
}

/// Text keyed by locale, e.g. `{"en": "Sea bream", "ar": "دنيس"}`.
///
/// The backend occasionally sends a bare string; that is read as the
/// fallback locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LocalizedNameRepr")]
pub struct LocalizedName(BTreeMap<String, String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedNameRepr {
    Plain(String),
    Map(BTreeMap<String, String>),
}

impl From<LocalizedNameRepr> for LocalizedName {
    fn from(repr: LocalizedNameRepr) -> Self {
        match repr {
            LocalizedNameRepr::Plain(text) => Self::single(FALLBACK_LOCALE, text),
            LocalizedNameRepr::Map(map) => Self(map),
        }
    }
}

impl LocalizedName {
    #[must_use]
    pub fn single(locale: &str, text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(locale.to_owned(), text.into());
        Self(map)
    }

    #[must_use]
    pub fn with(mut self, locale: &str, text: impl Into<String>) -> Self {
        self.0.insert(locale.to_owned(), text.into());
        self
    }

    /// Text for `locale`, falling back to English, then to any entry.
    #[must_use]
    pub fn get(&self, locale: &str) -> &str {
        self.0
            .get(locale)
            .or_else(|| self.0.get(FALLBACK_LOCALE))
            .or_else(|| self.0.values().next())
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sale unit of a product (kilogram, piece, box...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: LocalizedName,
}

/// Reference to a shop or business. The backend sends either the bare id
/// or a populated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntityRefRepr")]
pub struct EntityRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedName>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntityRefRepr {
    Id(String),
    Document {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default)]
        name: Option<LocalizedName>,
    },
}

impl From<EntityRefRepr> for EntityRef {
    fn from(repr: EntityRefRepr) -> Self {
        match repr {
            EntityRefRepr::Id(id) => Self { id, name: None },
            EntityRefRepr::Document { id, name } => Self { id, name },
        }
    }
}

/// One sellable entry of the feed. Owned by the backend; never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub content_type: ContentType,
    #[serde(default)]
    pub name: LocalizedName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

impl FeedItem {
    /// Minimal product entry, mostly useful for tests and fixtures.
    #[must_use]
    pub fn new(id: impl Into<String>, name: LocalizedName) -> Self {
        Self {
            id: id.into(),
            content_type: ContentType::Product,
            name,
            unit: None,
            shop: None,
            business: None,
            price: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn display_name(&self, locale: &str) -> &str {
        self.name.get(locale)
    }
}

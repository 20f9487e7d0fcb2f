use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_method() -> String {
    "GET".to_string()
}

/// Hypermedia link as found in every Restful Objects representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub rel: String,
    #[serde(default = "default_method")]
    pub method: String,
    pub href: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Link {
    /// Plain GET link to `href`, the shape used when re-issuing a logged fetch.
    pub fn get(href: impl Into<String>) -> Self {
        Self {
            rel: String::new(),
            method: default_method(),
            href: href.into(),
            media_type: None,
        }
    }
}

/// A domain object representation (`repr-types/object`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TObject {
    pub domain_type: String,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub members: Value,
}

impl TObject {
    pub fn self_link(&self) -> Option<&Link> {
        self.links.iter().find(|l| l.rel == "self")
    }

    /// Parse a response body as a domain object; anything without a
    /// `domainType` is some other representation and yields `None`.
    pub fn from_json(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        value.get("domainType")?;
        serde_json::from_value(value).ok()
    }
}

use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref REPR_PROFILE: regex::Regex =
        regex::Regex::new(r#"urn:org\.restfulobjects:repr-types/([a-z-]+)"#)
            .expect("repr-type profile regex");
}

/// Restful Objects representation kinds, as named in the `profile` parameter
/// of a response's content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Represention {
    Homepage,
    User,
    Version,
    List,
    Object,
    ObjectProperty,
    ObjectCollection,
    ObjectAction,
    ActionResult,
    ActionDescription,
    DomainTypes,
    DomainType,
    Services,
    Menubars,
    Layout,
    Error,
}

impl Represention {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::User => "user",
            Self::Version => "version",
            Self::List => "list",
            Self::Object => "object",
            Self::ObjectProperty => "object-property",
            Self::ObjectCollection => "object-collection",
            Self::ObjectAction => "object-action",
            Self::ActionResult => "action-result",
            Self::ActionDescription => "action-description",
            Self::DomainTypes => "domain-types",
            Self::DomainType => "domain-type",
            Self::Services => "services",
            Self::Menubars => "menubars",
            Self::Layout => "layout",
            Self::Error => "error",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let repr = match name {
            "homepage" => Self::Homepage,
            "user" => Self::User,
            "version" => Self::Version,
            "list" => Self::List,
            "object" => Self::Object,
            "object-property" => Self::ObjectProperty,
            "object-collection" => Self::ObjectCollection,
            "object-action" => Self::ObjectAction,
            "action-result" => Self::ActionResult,
            "action-description" => Self::ActionDescription,
            "domain-types" => Self::DomainTypes,
            "domain-type" => Self::DomainType,
            "services" => Self::Services,
            "menubars" => Self::Menubars,
            "layout" => Self::Layout,
            "error" => Self::Error,
            _ => return None,
        };
        Some(repr)
    }

    /// Extract the representation kind from a `Content-Type` header value, e.g.
    /// `application/json;profile="urn:org.restfulobjects:repr-types/object"`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        REPR_PROFILE
            .captures(content_type)
            .and_then(|caps| caps.get(1))
            .and_then(|m| Self::from_name(m.as_str()))
    }

    /// Kinds whose fetches are worth re-issuing on replay.
    pub fn is_replay_relevant(self) -> bool {
        matches!(self, Self::Homepage | Self::ObjectAction)
    }
}

impl std::fmt::Display for Represention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

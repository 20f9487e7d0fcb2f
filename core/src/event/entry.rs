use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::object::TObject;
use super::represention::Represention;

/// Identity of a fetchable resource: URL plus sub type ("json", "xml", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceSpecification {
    pub url: String,
    pub sub_type: String,
}

impl ResourceSpecification {
    pub fn new(url: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            sub_type: sub_type.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    #[default]
    Initial,
    Running,
    Success,
    Error,
    /// Entry was triggered directly by the end user, not by a system fetch.
    UserAction,
}

/// What an entry knows about the object behind it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EntryObject {
    #[default]
    Unresolved,
    Domain(TObject),
    Reference(ResourceSpecification),
}

impl EntryObject {
    pub fn as_domain(&self) -> Option<&TObject> {
        match self {
            Self::Domain(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Domain(_) => "domain",
            Self::Reference(_) => "reference",
        }
    }
}

/// One captured UI or network interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    rs: ResourceSpecification,
    pub method: String,
    #[serde(default)]
    pub request: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub repr_type: Option<Represention>,
    #[serde(default)]
    pub state: EventState,
    #[serde(default)]
    pub obj: EntryObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl LogEntry {
    pub fn new(
        rs: ResourceSpecification,
        method: impl Into<String>,
        request: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let title = rs.url.clone();
        Self {
            rs,
            method: method.into(),
            request,
            created_at,
            updated_at: None,
            title,
            repr_type: None,
            state: EventState::Initial,
            obj: EntryObject::Unresolved,
            response: None,
        }
    }

    /// Field-for-field duplicate used to snapshot history before a reset.
    ///
    /// `updated_at` and `response` describe the live request, not the
    /// interaction, and are left out.
    pub fn copy_entry(&self) -> Self {
        let mut output = LogEntry::new(
            ResourceSpecification::new(self.url(), self.sub_type()),
            self.method.clone(),
            self.request.clone(),
            self.created_at,
        );
        output.title = self.title.clone();
        output.repr_type = self.repr_type;
        output.obj = self.obj.clone();
        output.state = self.state;
        output
    }

    pub fn rs(&self) -> &ResourceSpecification {
        &self.rs
    }

    pub fn url(&self) -> &str {
        &self.rs.url
    }

    pub fn sub_type(&self) -> &str {
        &self.rs.sub_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_user_action(&self) -> bool {
        self.state == EventState::UserAction
    }

    pub fn has_relevant_type(&self) -> bool {
        self.repr_type
            .map(Represention::is_replay_relevant)
            .unwrap_or(false)
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.updated_at
            .map(|end| (end - self.created_at).num_milliseconds())
    }

    pub(crate) fn resolve(
        &mut self,
        state: EventState,
        response: Option<String>,
        repr_type: Option<Represention>,
        obj: EntryObject,
    ) {
        self.state = state;
        self.updated_at = Some(Utc::now());
        self.response = response;
        if repr_type.is_some() {
            self.repr_type = repr_type;
        }
        if let EntryObject::Domain(ref o) = obj {
            if !o.title.is_empty() {
                self.title = o.title.clone();
            }
        }
        self.obj = obj;
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// System metadata attached to every entry, asset, and link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Sys {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
        }
    }
}

/// A CMS entry as delivered: identity plus an open field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub file: Option<AssetFile>,
}

/// A binary resource (image, SVG, PDF) managed by the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAsset {
    pub sys: Sys,
    #[serde(default)]
    pub fields: AssetFields,
}

impl RawAsset {
    /// The file URL exactly as the CMS reports it, if any.
    pub fn file_url(&self) -> Option<&str> {
        self.fields
            .file
            .as_ref()
            .and_then(|file| file.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Side table of link targets returned with one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    #[serde(rename = "Asset", default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<RawAsset>,
    #[serde(rename = "Entry", default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<RawEntry>,
}

/// One `/entries` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub items: Vec<RawEntry>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl EntryCollection {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkType {
    Asset,
    Entry,
}

impl LinkType {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkType::Asset => "Asset",
            LinkType::Entry => "Entry",
        }
    }
}

/// An unresolved reference from a field to an asset or another entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub link_type: LinkType,
    pub id: String,
}

impl Link {
    pub fn asset(id: impl Into<String>) -> Self {
        Self {
            link_type: LinkType::Asset,
            id: id.into(),
        }
    }

    pub fn entry(id: impl Into<String>) -> Self {
        Self {
            link_type: LinkType::Entry,
            id: id.into(),
        }
    }

    /// Recognise a link-shaped JSON value (`{"sys":{"type":"Link","linkType":..,"id":..}}`).
    pub fn from_value(value: &Value) -> Option<Self> {
        let sys = value.get("sys")?;
        if sys.get("type")?.as_str()? != "Link" {
            return None;
        }
        let link_type = match sys.get("linkType")?.as_str()? {
            "Asset" => LinkType::Asset,
            "Entry" => LinkType::Entry,
            _ => return None,
        };
        let id = sys.get("id")?.as_str()?.to_string();
        Some(Self { link_type, id })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "sys": {
                "type": "Link",
                "linkType": self.link_type.as_str(),
                "id": self.id,
            }
        })
    }
}

// ── Section domain type ──
//
// A page is an ordered list of sections. On the wire each one is
// `{ "type": <kind>, "data": { ... } }`. Known kinds are validated into
// typed data; any other kind is carried through untouched so content
// written by a newer backend survives a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;
use tracing::warn;

/// The closed set of section kinds this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SectionKind {
    Hero,
    Cta,
}

impl SectionKind {
    /// Data fields meaningful for this kind, `title` first.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Hero => &["title", "subtitle", "buttonText", "buttonHref"],
            Self::Cta => &["title", "buttonText", "buttonHref"],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroData {
    pub title: String,
    pub subtitle: Option<String>,
    pub button_text: Option<String>,
    pub button_href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtaData {
    pub title: String,
    pub button_text: Option<String>,
    pub button_href: Option<String>,
}

/// One typed block of page content.
///
/// Serializes to and from the wire shape through [`validate`], so a
/// malformed `hero` or `cta` fails to deserialize while an unrecognised
/// kind lands in [`Section::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Section {
    Hero(HeroData),
    Cta(CtaData),
    Unknown { kind: String, data: Value },
}

impl Section {
    /// The discriminant as it appears on the wire.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Hero(_) => SectionKind::Hero.as_ref(),
            Self::Cta(_) => SectionKind::Cta.as_ref(),
            Self::Unknown { kind, .. } => kind,
        }
    }

    /// `None` for kinds outside the known set.
    pub fn kind(&self) -> Option<SectionKind> {
        match self {
            Self::Hero(_) => Some(SectionKind::Hero),
            Self::Cta(_) => Some(SectionKind::Cta),
            Self::Unknown { .. } => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Hero(d) => Some(&d.title),
            Self::Cta(d) => Some(&d.title),
            Self::Unknown { .. } => None,
        }
    }
}

// ── Validation ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("section must be a JSON object")]
    NotAnObject,

    #[error("section has no \"type\"")]
    MissingType,

    #[error("{kind} section \"data\" must be an object")]
    InvalidData { kind: SectionKind },

    #[error("{kind} section has no \"title\"")]
    MissingTitle { kind: SectionKind },

    #[error("{kind} section field \"{field}\" must be a string")]
    NotAString {
        kind: SectionKind,
        field: &'static str,
    },

    #[error("{kind} section cannot carry \"{field}\"")]
    ForeignField {
        kind: SectionKind,
        field: &'static str,
    },
}

/// Check a raw JSON value against the section schema.
///
/// `title` must be a string (empty is fine). Optional fields must be
/// strings when present; `null` reads as absent. A field that belongs
/// only to another kind is rejected. Unrelated extra fields are dropped.
pub fn validate(value: &Value) -> Result<Section, SectionError> {
    let obj = value.as_object().ok_or(SectionError::NotAnObject)?;
    let raw_kind = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or(SectionError::MissingType)?;

    let Ok(kind) = raw_kind.parse::<SectionKind>() else {
        return Ok(Section::Unknown {
            kind: raw_kind.to_owned(),
            data: obj
                .get("data")
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
        });
    };

    let Some(Value::Object(data)) = obj.get("data") else {
        return Err(SectionError::InvalidData { kind });
    };
    reject_foreign_fields(kind, data)?;

    let title = match data.get("title") {
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(SectionError::NotAString {
                kind,
                field: "title",
            });
        }
        None => return Err(SectionError::MissingTitle { kind }),
    };
    let opt = |field: &'static str| optional_string(kind, data, field);

    Ok(match kind {
        SectionKind::Hero => Section::Hero(HeroData {
            title,
            subtitle: opt("subtitle")?,
            button_text: opt("buttonText")?,
            button_href: opt("buttonHref")?,
        }),
        SectionKind::Cta => Section::Cta(CtaData {
            title,
            button_text: opt("buttonText")?,
            button_href: opt("buttonHref")?,
        }),
    })
}

/// Validate every entry, keeping order. Stops at the first bad one.
pub fn parse_sections(values: &[Value]) -> Result<Vec<Section>, SectionError> {
    values.iter().map(validate).collect()
}

/// Read a section from backend content without ever failing.
///
/// An entry without a string `type` becomes [`Section::Unknown`] with an
/// empty kind. A malformed `hero` or `cta` keeps its kind: a missing or
/// non-string title reads as `""` and wrong-typed optionals as absent.
pub fn parse_lenient(value: &Value) -> Section {
    validate(value).unwrap_or_else(|err| {
        warn!(error = %err, "malformed section, keeping what is usable");
        coerce(value)
    })
}

/// [`parse_lenient`] over every entry, keeping order.
pub fn parse_sections_lenient(values: &[Value]) -> Vec<Section> {
    values.iter().map(parse_lenient).collect()
}

fn coerce(value: &Value) -> Section {
    let raw_kind = value.get("type").and_then(Value::as_str);
    let Some(kind) = raw_kind.and_then(|k| k.parse::<SectionKind>().ok()) else {
        return Section::Unknown {
            kind: raw_kind.unwrap_or_default().to_owned(),
            data: value.clone(),
        };
    };

    let empty = Map::new();
    let data = value
        .get("data")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let text = |field: &str| data.get(field).and_then(Value::as_str).map(str::to_owned);
    let title = text("title").unwrap_or_default();

    match kind {
        SectionKind::Hero => Section::Hero(HeroData {
            title,
            subtitle: text("subtitle"),
            button_text: text("buttonText"),
            button_href: text("buttonHref"),
        }),
        SectionKind::Cta => Section::Cta(CtaData {
            title,
            button_text: text("buttonText"),
            button_href: text("buttonHref"),
        }),
    }
}

fn optional_string(
    kind: SectionKind,
    data: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, SectionError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SectionError::NotAString { kind, field }),
    }
}

fn reject_foreign_fields(kind: SectionKind, data: &Map<String, Value>) -> Result<(), SectionError> {
    let own = kind.fields();
    let foreign = SectionKind::iter()
        .filter(|other| *other != kind)
        .flat_map(|other| other.fields().iter().copied())
        .find(|field| !own.contains(field) && data.contains_key(*field));

    match foreign {
        Some(field) => Err(SectionError::ForeignField { kind, field }),
        None => Ok(()),
    }
}

impl TryFrom<Value> for Section {
    type Error = SectionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

// ── Wire encoding ───────────────────────────────────────────────────

fn put_optional(map: &mut Map<String, Value>, key: &str, value: Option<&String>) {
    if let Some(v) = value {
        map.insert(key.to_owned(), Value::String(v.clone()));
    }
}

impl From<&Section> for Value {
    fn from(section: &Section) -> Self {
        let mut data = Map::new();
        match section {
            Section::Hero(d) => {
                data.insert("title".into(), Value::String(d.title.clone()));
                put_optional(&mut data, "subtitle", d.subtitle.as_ref());
                put_optional(&mut data, "buttonText", d.button_text.as_ref());
                put_optional(&mut data, "buttonHref", d.button_href.as_ref());
            }
            Section::Cta(d) => {
                data.insert("title".into(), Value::String(d.title.clone()));
                put_optional(&mut data, "buttonText", d.button_text.as_ref());
                put_optional(&mut data, "buttonHref", d.button_href.as_ref());
            }
            Section::Unknown { kind, data: raw } => {
                return serde_json::json!({ "type": kind, "data": raw });
            }
        }
        serde_json::json!({ "type": section.kind_name(), "data": data })
    }
}

impl From<Section> for Value {
    fn from(section: Section) -> Self {
        Value::from(&section)
    }
}

// ── Lookup ──────────────────────────────────────────────────────────

/// First section whose discriminant equals `kind`, in sequence order.
pub fn find_section<'a>(sections: &'a [Section], kind: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.kind_name() == kind)
}

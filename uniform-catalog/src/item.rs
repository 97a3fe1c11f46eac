use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How long a freshly added item keeps its `is_new` flag.
pub const NEW_ITEM_WINDOW_MS: u64 = 24 * 60 * 60 * 1000;

/// Category given to drafts that leave it blank.
pub const DEFAULT_CATEGORY: &str = "Shirts";

/// Condition given to drafts (and snapshot entries) that leave it blank.
pub const DEFAULT_CONDITION: &str = "Good";

/// Conditions offered by the admin surface.
pub const CONDITIONS: [&str; 3] = ["Excellent", "Good", "Fair"];

/// Stable identifier for an item. Never reused within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// A donated uniform piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub size: String,
    pub condition: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub available: bool,
    pub created_at: u64, // Unix timestamp millis
    pub is_new: bool,
}

impl Item {
    /// Merges the supplied patch fields onto this item.
    ///
    /// `created_at` and `is_new` have no patch counterpart and are never touched.
    pub(crate) fn apply(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = non_blank(Some(category)).unwrap_or_else(|| DEFAULT_CATEGORY.into());
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(condition) = patch.condition {
            self.condition =
                non_blank(Some(condition)).unwrap_or_else(|| DEFAULT_CONDITION.into());
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            // An empty string clears the image
            self.image = non_blank(Some(image));
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
    }
}

/// A required text field of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Size,
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Size => write!(f, "size"),
            Field::Description => write!(f, "description"),
        }
    }
}

/// Rejection of a draft or patch that leaves required text blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),
}

impl ValidationError {
    /// The fields that were blank.
    pub fn fields(&self) -> &[Field] {
        match self {
            ValidationError::MissingFields(fields) => fields,
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Candidate for a new item, as submitted by the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    pub name: String,
    pub category: Option<String>,
    pub size: String,
    pub condition: Option<String>,
    pub description: String,
    pub image: Option<String>,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        size: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Checks that name, size and description are non-empty after trimming.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<Field> = [
            (Field::Name, &self.name),
            (Field::Size, &self.size),
            (Field::Description, &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    /// Builds the stored item. The caller must have validated the draft.
    pub(crate) fn into_item(self, id: ItemId, created_at: u64) -> Item {
        Item {
            id,
            name: self.name,
            category: non_blank(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.into()),
            size: self.size,
            condition: non_blank(self.condition).unwrap_or_else(|| DEFAULT_CONDITION.into()),
            description: self.description,
            image: non_blank(self.image),
            available: true,
            created_at,
            is_new: true,
        }
    }
}

/// Partial update of an item. Absent fields are left unchanged.
///
/// Has no `createdAt` or `isNew` fields. When decoded from JSON, those keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub available: Option<bool>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Rejects a patch that blanks out a required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<Field> = [
            (Field::Name, &self.name),
            (Field::Size, &self.size),
            (Field::Description, &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

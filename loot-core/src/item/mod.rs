use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

mod item_categories;

/// Namespace used for item ids that are written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ItemStackRepr", into = "ItemStackRepr")]
pub struct ItemStack {
    // Always namespaced, e.g. `minecraft:iron_sword`
    id: String,
    count: u8,
    display_name: Option<String>,
    lore: Vec<String>,
}

impl ItemStack {
    /// Creates a stack of one item. A missing namespace defaults to `minecraft`.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self {
            id: namespaced(id.as_ref()),
            count: 1,
            display_name: None,
            lore: Vec::new(),
        }
    }

    /// ## Panics
    /// Panics when `count` is zero.
    #[must_use]
    pub fn with_count(mut self, count: u8) -> Self {
        assert!(count > 0, "item count must be at least 1");
        self.count = count;
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_lore(mut self, lore: Vec<String>) -> Self {
        self.lore = lore;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The part of the id after the namespace
    pub fn path(&self) -> &str {
        self.id
            .split_once(':')
            .map_or(self.id.as_str(), |(_, path)| path)
    }

    pub fn namespace(&self) -> &str {
        self.id
            .split_once(':')
            .map_or(DEFAULT_NAMESPACE, |(namespace, _)| namespace)
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn lore(&self) -> &[String] {
        &self.lore
    }

    fn is_plain(&self) -> bool {
        self.count == 1 && self.display_name.is_none() && self.lore.is_empty()
    }
}

impl Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{}x ", self.count)?;
        }
        write!(f, "{}", self.id)?;
        if let Some(name) = &self.display_name {
            write!(f, " \"{name}\"")?;
        }
        Ok(())
    }
}

fn namespaced(id: &str) -> String {
    let id = id.trim();
    if id.contains(':') {
        id.to_string()
    } else {
        format!("{DEFAULT_NAMESPACE}:{id}")
    }
}

const fn default_count() -> u8 {
    1
}

/// On-disk shape of an item: either just the id, or a table when the stack
/// carries more than that.
#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum ItemStackRepr {
    Id(String),
    Full {
        id: String,
        #[serde(default = "default_count")]
        count: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        lore: Vec<String>,
    },
}

impl TryFrom<ItemStackRepr> for ItemStack {
    type Error = String;

    fn try_from(repr: ItemStackRepr) -> Result<Self, Self::Error> {
        let (id, count, display_name, lore) = match repr {
            ItemStackRepr::Id(id) => (id, 1, None, Vec::new()),
            ItemStackRepr::Full {
                id,
                count,
                name,
                lore,
            } => (id, count, name, lore),
        };
        if id.trim().is_empty() {
            return Err("item id must not be empty".to_string());
        }
        if count == 0 {
            return Err(format!("item count of '{id}' must be at least 1"));
        }
        Ok(Self {
            id: namespaced(&id),
            count,
            display_name,
            lore,
        })
    }
}

impl From<ItemStack> for ItemStackRepr {
    fn from(stack: ItemStack) -> Self {
        if stack.is_plain() {
            Self::Id(stack.id)
        } else {
            Self::Full {
                id: stack.id,
                count: stack.count,
                name: stack.display_name,
                lore: stack.lore,
            }
        }
    }
}

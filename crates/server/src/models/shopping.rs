//! Shopping list and item domain types.

use chrono::{DateTime, Utc};

use listmate_core::{
    FieldKind, FieldSpec, Fields, Schema, ShoppingItemId, ShoppingListId,
};

/// Writable fields of a shopping list.
pub static LIST_SCHEMA: Schema = Schema::new(&[FieldSpec {
    name: "name",
    kind: FieldKind::Text { max_length: 200 },
}]);

/// Writable fields of a shopping item.
///
/// The owning list always comes from the request path, never the body.
pub static ITEM_SCHEMA: Schema = Schema::new(&[
    FieldSpec {
        name: "name",
        kind: FieldKind::Text { max_length: 100 },
    },
    FieldSpec {
        name: "purchased",
        kind: FieldKind::Boolean,
    },
]);

/// A named shopping list.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShoppingList {
    pub id: ShoppingListId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An item on a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShoppingItem {
    pub id: ShoppingItemId,
    pub shopping_list_id: ShoppingListId,
    pub name: String,
    pub purchased: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Requested changes to a list. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListChanges {
    pub name: Option<String>,
}

/// Requested changes to an item. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub purchased: Option<bool>,
}

/// A fully specified new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub purchased: bool,
}

impl From<&Fields> for ListChanges {
    fn from(fields: &Fields) -> Self {
        Self {
            name: fields.text("name").map(str::to_owned),
        }
    }
}

impl From<&Fields> for ItemChanges {
    fn from(fields: &Fields) -> Self {
        Self {
            name: fields.text("name").map(str::to_owned),
            purchased: fields.boolean("purchased"),
        }
    }
}

impl ItemChanges {
    /// Returns the new item if every field is set.
    #[must_use]
    pub fn into_new_item(self) -> Option<NewItem> {
        Some(NewItem {
            name: self.name?,
            purchased: self.purchased?,
        })
    }
}

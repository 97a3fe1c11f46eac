use std::io::Write;

use clap::{Args, Subcommand};
use tracing::info;
use uniform_catalog::{CONDITIONS, Catalog, Clock, ItemDraft, ItemId, ItemPatch, Store};

use crate::error::ToolError;
use crate::render::{admin_header, category_table, item_table, showing};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available items, optionally filtered
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text matched against name and size
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show each category with its number of available items
    Categories,

    /// Print one item as JSON
    Show {
        /// Item id
        id: ItemId,
    },

    /// Manage the catalog (requires the admin password)
    Admin {
        /// Admin password
        #[arg(long, env = "UNIFORMS_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List every item, including hidden ones
    List,

    /// Add a donated item
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        size: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_parser = CONDITIONS)]
        condition: Option<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Change fields of an existing item
    Update {
        /// Item id
        id: ItemId,

        #[command(flatten)]
        fields: UpdateFields,
    },

    /// Remove an item permanently
    Delete {
        /// Item id
        id: ItemId,
    },
}

#[derive(Debug, Args)]
pub struct UpdateFields {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    size: Option<String>,

    #[arg(long, value_parser = CONDITIONS)]
    condition: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Image URL; pass an empty string to remove it
    #[arg(long)]
    image: Option<String>,

    /// Show (true) or hide (false) the item in public listings
    #[arg(long, action = clap::ArgAction::Set)]
    available: Option<bool>,
}

impl From<UpdateFields> for ItemPatch {
    fn from(fields: UpdateFields) -> Self {
        ItemPatch {
            name: fields.name,
            category: fields.category,
            size: fields.size,
            condition: fields.condition,
            description: fields.description,
            image: fields.image,
            available: fields.available,
        }
    }
}

/// Runs one command against the catalog, writing human-readable output to `out`.
pub fn run<S: Store, C: Clock>(
    catalog: &mut Catalog<S, C>,
    command: Command,
    admin_password: &str,
    out: &mut impl Write,
) -> Result<(), ToolError> {
    match command {
        Command::List { category, search } => {
            if let Some(category) = category {
                catalog.set_selected_category(category);
            }
            if let Some(search) = search {
                catalog.set_search_query(search);
            }

            let items = catalog.filtered_items();
            writeln!(out, "{}", showing(items.len()))?;
            if !items.is_empty() {
                writeln!(out, "{}", item_table(items))?;
            }
        }
        Command::Categories => {
            writeln!(out, "{}", category_table(&catalog.category_counts()))?;
        }
        Command::Show { id } => {
            let item = catalog.get(id).ok_or(ToolError::NotFound(id))?;
            writeln!(out, "{}", serde_json::to_string_pretty(item)?)?;
        }
        Command::Admin { password, command } => {
            unlock(admin_password, password.as_deref())?;
            run_admin(catalog, command, out)?;
        }
    }

    Ok(())
}

/// Compares the supplied password with the configured one.
fn unlock(expected: &str, supplied: Option<&str>) -> Result<(), ToolError> {
    match supplied {
        None => Err(ToolError::PasswordRequired),
        Some(password) if password == expected => Ok(()),
        Some(_) => Err(ToolError::IncorrectPassword),
    }
}

fn run_admin<S: Store, C: Clock>(
    catalog: &mut Catalog<S, C>,
    command: AdminCommand,
    out: &mut impl Write,
) -> Result<(), ToolError> {
    match command {
        AdminCommand::List => {
            let available = catalog.items().filter(|item| item.available).count();
            writeln!(out, "{}", admin_header(catalog.len(), available))?;
            if !catalog.is_empty() {
                writeln!(out, "{}", item_table(catalog.items()))?;
            }
        }
        AdminCommand::Add {
            name,
            size,
            description,
            category,
            condition,
            image,
        } => {
            let draft = ItemDraft {
                name,
                category,
                size,
                condition,
                description,
                image,
            };
            let item = catalog.add(draft)?;
            info!(id = %item.id, "item added from admin");
            writeln!(out, "Added item {}: {}", item.id, item.name)?;
        }
        AdminCommand::Update { id, fields } => match catalog.update(id, fields.into())? {
            Some(item) => writeln!(out, "Updated item {}: {}", item.id, item.name)?,
            None => writeln!(out, "No item with id {id}; nothing changed")?,
        },
        AdminCommand::Delete { id } => match catalog.delete(id) {
            Some(item) => writeln!(out, "Deleted item {}: {}", item.id, item.name)?,
            None => writeln!(out, "No item with id {id}; nothing deleted")?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniform_catalog::{CatalogError, ManualClock, MemoryStore, Persistence, SequentialIds};

    const PASSWORD: &str = "admin123";

    fn catalog() -> Catalog<MemoryStore, ManualClock> {
        Catalog::initialize(
            Persistence::new(MemoryStore::new()),
            ManualClock::new(1_700_000_000_000),
            SequentialIds::new(),
        )
    }

    fn output(
        catalog: &mut Catalog<MemoryStore, ManualClock>,
        command: Command,
    ) -> Result<String, ToolError> {
        let mut out = Vec::new();
        run(catalog, command, PASSWORD, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn admin(command: AdminCommand) -> Command {
        Command::Admin {
            password: Some(PASSWORD.to_string()),
            command,
        }
    }

    #[test]
    fn list_applies_facets() {
        let mut catalog = catalog();

        let text = output(
            &mut catalog,
            Command::List {
                category: Some("Shirts".into()),
                search: Some("10".into()),
            },
        )
        .unwrap();

        assert!(text.starts_with("Showing 1 item\n"));
        assert!(text.contains("School Shirt - Size 10"));
        assert!(!text.contains("School Shirt - Size 14"));
    }

    #[test]
    fn list_with_no_matches() {
        let mut catalog = catalog();

        let text = output(
            &mut catalog,
            Command::List {
                category: None,
                search: Some("cardigan".into()),
            },
        )
        .unwrap();

        assert_eq!(text, "No items found\n");
    }

    #[test]
    fn show_unknown_item_fails() {
        let mut catalog = catalog();

        let result = output(&mut catalog, Command::Show { id: ItemId(99) });

        assert!(matches!(result, Err(ToolError::NotFound(ItemId(99)))));
    }

    #[test]
    fn show_prints_json() {
        let mut catalog = catalog();

        let text = output(&mut catalog, Command::Show { id: ItemId(5) }).unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["name"], "School Tie");
        assert_eq!(json["isNew"], false);
    }

    #[test]
    fn admin_requires_password() {
        let mut catalog = catalog();

        let missing = output(
            &mut catalog,
            Command::Admin {
                password: None,
                command: AdminCommand::Delete { id: ItemId(1) },
            },
        );
        let wrong = output(
            &mut catalog,
            Command::Admin {
                password: Some("guess".into()),
                command: AdminCommand::Delete { id: ItemId(1) },
            },
        );

        assert!(matches!(missing, Err(ToolError::PasswordRequired)));
        assert!(matches!(wrong, Err(ToolError::IncorrectPassword)));
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn admin_add_then_list_shows_new() {
        let mut catalog = catalog();

        let text = output(
            &mut catalog,
            admin(AdminCommand::Add {
                name: "Tie".into(),
                size: "Standard".into(),
                description: "x".into(),
                category: Some("Accessories".into()),
                condition: None,
                image: None,
            }),
        )
        .unwrap();
        assert_eq!(text, "Added item 9: Tie\n");

        let text = output(&mut catalog, admin(AdminCommand::List)).unwrap();
        assert!(text.starts_with("All items (9), 9 available\n"));
        assert!(text.contains("NEW"));
    }

    #[test]
    fn admin_add_rejects_blank_description() {
        let mut catalog = catalog();

        let result = output(
            &mut catalog,
            admin(AdminCommand::Add {
                name: "Tie".into(),
                size: "Standard".into(),
                description: "  ".into(),
                category: None,
                condition: None,
                image: None,
            }),
        );

        assert!(matches!(
            result,
            Err(ToolError::Catalog(CatalogError::Invalid(_)))
        ));
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn admin_update_missing_item_is_reported_not_failed() {
        let mut catalog = catalog();

        let text = output(
            &mut catalog,
            admin(AdminCommand::Update {
                id: ItemId(42),
                fields: UpdateFields {
                    name: Some("Ghost".into()),
                    category: None,
                    size: None,
                    condition: None,
                    description: None,
                    image: None,
                    available: None,
                },
            }),
        )
        .unwrap();

        assert_eq!(text, "No item with id 42; nothing changed\n");
    }

    #[test]
    fn admin_hide_removes_from_public_list() {
        let mut catalog = catalog();

        output(
            &mut catalog,
            admin(AdminCommand::Update {
                id: ItemId(2),
                fields: UpdateFields {
                    name: None,
                    category: None,
                    size: None,
                    condition: None,
                    description: None,
                    image: None,
                    available: Some(false),
                },
            }),
        )
        .unwrap();

        let text = output(
            &mut catalog,
            Command::List {
                category: None,
                search: None,
            },
        )
        .unwrap();
        assert!(text.starts_with("Showing 7 items\n"));
        assert!(!text.contains("School Shirt - Size 10"));

        let text = output(&mut catalog, admin(AdminCommand::List)).unwrap();
        assert!(text.starts_with("All items (8), 7 available\n"));
        assert!(text.contains("hidden"));
    }

    #[test]
    fn admin_delete_twice() {
        let mut catalog = catalog();

        let first = output(&mut catalog, admin(AdminCommand::Delete { id: ItemId(7) })).unwrap();
        let second = output(&mut catalog, admin(AdminCommand::Delete { id: ItemId(7) })).unwrap();

        assert_eq!(first, "Deleted item 7: School Belt\n");
        assert_eq!(second, "No item with id 7; nothing deleted\n");
    }

    #[test]
    fn categories_table_counts() {
        let mut catalog = catalog();

        let text = output(&mut catalog, Command::Categories).unwrap();

        assert!(text.contains("Accessories"));
        assert!(text.contains("Available"));
    }
}

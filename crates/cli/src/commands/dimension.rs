//! dimensions dimension command

use clap::{Args, Subcommand};
use console::style;
use dimension_domain::{Dimension, DimensionId, DimensionPersister, DimensionService, DimensionUuid};
use serde_json::json;

#[derive(Debug, Args)]
pub struct DimensionCommand {
    #[command(subcommand)]
    pub command: DimensionSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum DimensionSubcommand {
    /// List dimensions
    List {
        /// Include retired dimensions
        #[arg(long)]
        include_retired: bool,
    },
    /// Search dimensions by name (case-insensitive)
    Search {
        /// Name or part of a name
        name: String,
        /// Only return whole-name matches
        #[arg(long)]
        exact: bool,
    },
    /// Show a dimension by id or uuid
    Show {
        /// Dimension id or uuid
        key: String,
    },
    /// Add a new dimension
    Add {
        /// Dimension name
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
        /// Use this uuid instead of generating one
        #[arg(long)]
        uuid: Option<String>,
    },
    /// Rename a dimension
    Rename {
        /// Dimension id or uuid
        key: String,
        /// New name
        name: String,
    },
    /// Retire a dimension
    Retire {
        /// Dimension id or uuid
        key: String,
        /// Why the dimension is retired
        #[arg(short, long)]
        reason: String,
    },
    /// Bring a retired dimension back
    Unretire {
        /// Dimension id or uuid
        key: String,
    },
    /// Permanently delete a dimension
    Purge {
        /// Dimension id or uuid
        key: String,
    },
}

impl DimensionCommand {
    pub fn run<P: DimensionPersister>(
        &self,
        service: &mut DimensionService<P>,
        json: bool,
    ) -> anyhow::Result<String> {
        self.command.run(service, json)
    }
}

impl DimensionSubcommand {
    pub fn run<P: DimensionPersister>(
        &self,
        service: &mut DimensionService<P>,
        json: bool,
    ) -> anyhow::Result<String> {
        match self {
            DimensionSubcommand::List { include_retired } => {
                let dimensions = service.get_all_dimensions(*include_retired)?;
                Ok(render_list(&dimensions, json))
            }
            DimensionSubcommand::Search { name, exact } => {
                let dimensions = service.get_dimensions(name, *exact)?;
                Ok(render_list(&dimensions, json))
            }
            DimensionSubcommand::Show { key } => {
                let dimension = find_dimension(service, key)?;
                Ok(render_one(&dimension, json))
            }
            DimensionSubcommand::Add {
                name,
                description,
                uuid,
            } => {
                let mut dimension = Dimension::new(name.as_str());
                dimension.set_description(description.clone());
                if let Some(uuid) = uuid {
                    dimension = dimension.with_uuid(DimensionUuid::new(uuid.as_str()));
                }
                let saved = service.create_dimension(&dimension)?;
                tracing::info!(id = ?saved.id(), "added dimension");
                Ok(render_one(&saved, json))
            }
            DimensionSubcommand::Rename { key, name } => {
                let mut dimension = find_dimension(service, key)?;
                dimension.set_name(name.as_str());
                let saved = service.save_dimension(&dimension)?;
                Ok(render_one(&saved, json))
            }
            DimensionSubcommand::Retire { key, reason } => {
                let dimension = find_dimension(service, key)?;
                let saved = service.retire_dimension(&dimension, reason)?;
                Ok(render_one(&saved, json))
            }
            DimensionSubcommand::Unretire { key } => {
                let dimension = find_dimension(service, key)?;
                let saved = service.unretire_dimension(&dimension)?;
                Ok(render_one(&saved, json))
            }
            DimensionSubcommand::Purge { key } => {
                let dimension = find_dimension(service, key)?;
                service.purge_dimension(&dimension)?;
                tracing::info!(id = ?dimension.id(), "purged dimension");
                if json {
                    Ok(json!({ "purged": to_json(&dimension) }).to_string())
                } else {
                    Ok(format!("✓ Purged dimension '{}'", dimension.name()))
                }
            }
        }
    }
}

/// Resolve a numeric key as an id and anything else as a uuid
pub fn find_dimension<P: DimensionPersister>(
    service: &DimensionService<P>,
    key: &str,
) -> anyhow::Result<Dimension> {
    let found = match key.parse::<i32>() {
        Ok(id) => service.get_dimension(DimensionId::new(id))?,
        Err(_) => service.get_dimension_by_uuid(&DimensionUuid::new(key))?,
    };
    found.ok_or_else(|| anyhow::anyhow!("No dimension matches '{}'", key))
}

fn to_json(dimension: &Dimension) -> serde_json::Value {
    json!({
        "id": dimension.id().map(|id| id.value()),
        "uuid": dimension.uuid().map(|uuid| uuid.as_str()),
        "name": dimension.name(),
        "description": dimension.description(),
        "retired": dimension.is_retired(),
        "retireReason": dimension.retire_reason(),
    })
}

fn render_one(dimension: &Dimension, json: bool) -> String {
    if json {
        return to_json(dimension).to_string();
    }

    let mut lines = vec![format!(
        "{} {}",
        style(dimension.name()).bold(),
        style(format!("#{}", display_id(dimension))).dim()
    )];
    if let Some(uuid) = dimension.uuid() {
        lines.push(format!("  uuid:        {}", uuid));
    }
    if let Some(description) = dimension.description() {
        lines.push(format!("  description: {}", description));
    }
    if dimension.is_retired() {
        lines.push(format!(
            "  {} {}",
            style("retired:").yellow(),
            dimension.retire_reason().unwrap_or("")
        ));
    }
    lines.join("\n")
}

fn render_list(dimensions: &[Dimension], json: bool) -> String {
    if json {
        return serde_json::Value::Array(dimensions.iter().map(to_json).collect()).to_string();
    }
    if dimensions.is_empty() {
        return "No dimensions found".to_string();
    }

    dimensions
        .iter()
        .map(|d| {
            let marker = if d.is_retired() {
                format!(" {}", style("[retired]").yellow())
            } else {
                String::new()
            };
            format!("{:>5}  {}{}", display_id(d), d.name(), marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_id(dimension: &Dimension) -> String {
    dimension
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

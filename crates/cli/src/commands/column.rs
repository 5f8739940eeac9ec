//! dimensions column command

use clap::{Args, Subcommand};
use console::style;
use dimension_domain::{DataDefinition, PersonIdDataDefinition};
use serde_json::json;

#[derive(Debug, Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub command: ColumnSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ColumnSubcommand {
    /// Describe the person id column
    PersonId {
        /// Column display name
        #[arg(short, long)]
        name: Option<String>,
    },
}

impl ColumnCommand {
    pub fn run(&self, json: bool) -> String {
        match &self.command {
            ColumnSubcommand::PersonId { name } => {
                let definition = match name {
                    Some(name) => PersonIdDataDefinition::named(name.as_str()),
                    None => PersonIdDataDefinition::new(),
                };
                describe(&definition, json)
            }
        }
    }
}

fn describe(definition: &dyn DataDefinition, json: bool) -> String {
    if json {
        return json!({
            "name": definition.name(),
            "dataType": definition.data_type().display_name(),
            "localizationKey": definition.localization_key(),
        })
        .to_string();
    }

    format!(
        "{}\n  type: {}\n  key:  {}",
        style(definition.name().unwrap_or("(unnamed)")).bold(),
        definition.data_type(),
        definition.localization_key()
    )
}

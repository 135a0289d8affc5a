//! Category CLI commands

use clap::Subcommand;

use crate::error::SpendlogResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Add a category
    Add {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> SpendlogResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            for category in service.list()? {
                println!("{}", category);
            }
        }

        CategoryCommands::Add { name } => {
            let name = service.add(&name)?;
            println!("Created category: {}", name);
        }
    }

    Ok(())
}

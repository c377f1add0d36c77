//! CLI tool for the restaurant catalog.
//!
//! Provides commands for verifying connectivity, seeding demo documents,
//! querying with filters and pagination, updating fields, deleting documents,
//! and administering collections.
//!
//! # Usage
//!
//! ```bash
//! # Verify the deployment is reachable
//! cargo run -- db check
//!
//! # Seed one demo document plus two derived copies
//! cargo run -- seed --count 2
//!
//! # Paginated search
//! cargo run -- find --cuisine American --borough Queens --page 2 --page-size 2
//!
//! # Indexed ranged browse
//! cargo run -- find --min-restaurant-id 40000000 --limit 200
//!
//! # Bulk cuisine rename
//! cargo run -- update cuisine --from American --to Indian
//!
//! # Remove seeded documents
//! cargo run -- delete many --name-prefix Seeded --id-prefix restaurant
//! ```
//!
//! # Environment Variables
//!
//! - `MONGODB_URI` (or `MONGODB_HOST` + friends): connection string
//! - `MONGODB_DATABASE` / `MONGODB_COLLECTION`: target namespace
//!
//! # Features
//!
//! - **Interactive Prompts**: Confirmation dialogs before destructive operations
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use restaurant_catalog::application::services::{AdminService, CatalogService};
use restaurant_catalog::config::{self, Config};
use restaurant_catalog::domain::entities::{Restaurant, RestaurantPatch};
use restaurant_catalog::domain::query::PageParams;
use restaurant_catalog::infrastructure::mongo;
use restaurant_catalog::infrastructure::persistence::{
    MongoCatalogAdmin, MongoRestaurantRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use mongodb::Database;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CLI tool for managing the restaurant catalog.
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Seed demo documents
    Seed {
        /// Number of derived documents to insert after the demo record
        #[arg(short, long, default_value_t = 2)]
        count: u32,
    },

    /// Query the catalog
    Find {
        /// Return one arbitrary document
        #[arg(long, conflicts_with_all = ["cuisine", "borough", "min_restaurant_id"])]
        any: bool,

        /// Cuisine to match (requires --borough)
        #[arg(long, requires = "borough")]
        cuisine: Option<String>,

        /// Borough to match (requires --cuisine)
        #[arg(long, requires = "cuisine")]
        borough: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Documents per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Lower bound for an indexed ranged browse by restaurant id
        #[arg(long, conflicts_with_all = ["cuisine", "borough"])]
        min_restaurant_id: Option<String>,

        /// Maximum documents returned by a ranged browse
        #[arg(long, default_value_t = 200)]
        limit: i64,
    },

    /// Update documents
    Update {
        #[command(subcommand)]
        action: UpdateAction,
    },

    /// Delete documents
    Delete {
        #[command(subcommand)]
        action: DeleteAction,
    },

    /// Collection administration
    Collections {
        #[command(subcommand)]
        action: CollectionsAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Count documents, optionally restricted to a cuisine
    Count {
        /// Cuisine to count
        #[arg(long)]
        cuisine: Option<String>,
    },
}

/// Update subcommands.
#[derive(Subcommand)]
enum UpdateAction {
    /// Replace a document's restaurant id with a fresh random one
    RestaurantId {
        /// Current restaurant id
        restaurant_id: String,
    },

    /// Rename a cuisine across all documents carrying it
    Cuisine {
        /// Cuisine to replace
        #[arg(long)]
        from: String,

        /// Replacement cuisine
        #[arg(long)]
        to: String,
    },

    /// Set one or more fields on the document with the given restaurant id
    Fields {
        /// Restaurant id of the document to patch
        restaurant_id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// New borough
        #[arg(long)]
        borough: Option<String>,
    },
}

/// Delete subcommands.
#[derive(Subcommand)]
enum DeleteAction {
    /// Delete the document with the given restaurant id
    ById {
        /// Restaurant id of the document to delete
        restaurant_id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete the first document whose name starts with the prefix
    One {
        /// Name prefix to match
        #[arg(long, default_value = "Seeded")]
        name_prefix: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete every document matching either prefix
    Many {
        /// Name prefix to match
        #[arg(long, default_value = "Seeded")]
        name_prefix: String,

        /// Restaurant id prefix to match
        #[arg(long, default_value = "restaurant")]
        id_prefix: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Collection administration subcommands.
#[derive(Subcommand)]
enum CollectionsAction {
    /// List collections in the database
    List,

    /// Create a capped collection
    CreateCapped {
        /// Collection name
        name: String,

        /// Maximum number of documents
        #[arg(long, default_value_t = 5000)]
        max_docs: u64,

        /// Maximum size in bytes
        #[arg(long, default_value_t = 1_048_576)]
        max_bytes: u64,
    },

    /// Drop a collection
    Drop {
        /// Collection name
        name: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    let database = mongo::connect(&config)
        .await
        .context("Failed to connect to MongoDB")?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &database, &config).await?,
        Commands::Seed { count } => handle_seed(count, &database, &config).await?,
        Commands::Find {
            any,
            cuisine,
            borough,
            page,
            page_size,
            min_restaurant_id,
            limit,
        } => {
            handle_find(
                FindArgs {
                    any,
                    cuisine,
                    borough,
                    page,
                    page_size,
                    min_restaurant_id,
                    limit,
                },
                &database,
                &config,
            )
            .await?
        }
        Commands::Update { action } => handle_update_action(action, &database, &config).await?,
        Commands::Delete { action } => handle_delete_action(action, &database, &config).await?,
        Commands::Collections { action } => handle_collections_action(action, &database).await?,
    }

    Ok(())
}

/// Initializes the tracing subscriber from config.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn catalog_service(database: &Database, config: &Config) -> CatalogService<MongoRestaurantRepository> {
    let repository = Arc::new(MongoRestaurantRepository::new(database, &config.collection));
    CatalogService::new(repository)
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, database: &Database, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            // Connection (including the ping) already succeeded by the time
            // we get here.
            println!(
                "{} Deployment is reachable (database: {})",
                "✅".green(),
                config.database.cyan()
            );
        }
        DbAction::Info => {
            let admin = AdminService::new(Arc::new(MongoCatalogAdmin::new(database.clone())));
            let summary = admin.collection_summary().await?;

            println!("{}", "Database info:".bright_white().bold());
            println!("  Name:        {}", config.database.cyan());
            println!("  Collections: {}", summary.count.to_string().cyan());
            for name in &summary.names {
                println!("    - {}", name);
            }
        }
        DbAction::Count { cuisine } => {
            let service = catalog_service(database, config);
            let count = service.count(cuisine.as_deref()).await?;

            match cuisine {
                Some(cuisine) => println!(
                    "{} document(s) with cuisine {}",
                    count.to_string().cyan(),
                    cuisine.cyan()
                ),
                None => println!("{} document(s)", count.to_string().cyan()),
            }
        }
    }

    Ok(())
}

/// Seeds demo documents and reports what was inserted.
async fn handle_seed(count: u32, database: &Database, config: &Config) -> Result<()> {
    let service = catalog_service(database, config);
    let report = service.seed(count).await?;

    println!("{} Seed complete", "✅".green());
    println!("  Demo document id: {}", report.demo_id.to_hex().cyan());
    println!(
        "  Derived documents inserted: {}",
        report.batch_inserted.to_string().cyan()
    );

    Ok(())
}

/// Arguments for the find command, grouped to keep the dispatch readable.
struct FindArgs {
    any: bool,
    cuisine: Option<String>,
    borough: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
    min_restaurant_id: Option<String>,
    limit: i64,
}

/// Runs one of the three query modes.
async fn handle_find(args: FindArgs, database: &Database, config: &Config) -> Result<()> {
    let service = catalog_service(database, config);

    if args.any {
        match service.any_restaurant().await? {
            Some(restaurant) => println!("{:#?}", restaurant),
            None => println!("{} Collection is empty", "⚠️".yellow()),
        }
        return Ok(());
    }

    if let Some(min_id) = args.min_restaurant_id {
        let results = service.browse_by_restaurant_id(&min_id, args.limit).await?;
        print_restaurants(&results);
        return Ok(());
    }

    match (args.cuisine, args.borough) {
        (Some(cuisine), Some(borough)) => {
            let page = PageParams {
                page: args.page,
                page_size: args.page_size,
            };
            let results = service.search(&cuisine, &borough, page).await?;
            print_restaurants(&results);
        }
        _ => {
            anyhow::bail!("Specify --any, --min-restaurant-id, or --cuisine with --borough");
        }
    }

    Ok(())
}

/// Prints a one-line summary per document.
fn print_restaurants(restaurants: &[Restaurant]) {
    if restaurants.is_empty() {
        println!("{} No matching documents", "⚠️".yellow());
        return;
    }

    for restaurant in restaurants {
        let grade = restaurant
            .latest_grade()
            .map(|g| format!("{} ({})", g.grade, g.score))
            .unwrap_or_else(|| "ungraded".to_string());

        println!(
            "{} | {} in {}, restaurant_id {}, latest grade {}",
            restaurant.name.bold(),
            restaurant.cuisine,
            restaurant.borough,
            restaurant.restaurant_id.cyan(),
            grade
        );
    }

    println!();
    println!("Total: {}", restaurants.len().to_string().cyan());
}

/// Dispatches update commands.
async fn handle_update_action(
    action: UpdateAction,
    database: &Database,
    config: &Config,
) -> Result<()> {
    let service = catalog_service(database, config);

    let report = match action {
        UpdateAction::RestaurantId { restaurant_id } => {
            service.reassign_restaurant_id(&restaurant_id).await?
        }
        UpdateAction::Cuisine { from, to } => service.rename_cuisine(&from, &to).await?,
        UpdateAction::Fields {
            restaurant_id,
            name,
            cuisine,
            borough,
        } => {
            let patch = RestaurantPatch {
                name,
                cuisine,
                borough,
                restaurant_id: None,
            };
            service.amend(&restaurant_id, patch).await?
        }
    };

    println!(
        "{} Matched {} document(s), modified {}",
        "✅".green(),
        report.matched.to_string().cyan(),
        report.modified.to_string().cyan()
    );

    Ok(())
}

/// Dispatches delete commands, with confirmation unless `--yes`.
async fn handle_delete_action(
    action: DeleteAction,
    database: &Database,
    config: &Config,
) -> Result<()> {
    let service = catalog_service(database, config);

    let deleted = match action {
        DeleteAction::ById { restaurant_id, yes } => {
            let prompt = format!("Delete the document with restaurant id '{}'?", restaurant_id);
            if !confirmed(&prompt, yes)? {
                println!("{} Cancelled", "❌".red());
                return Ok(());
            }

            service.delete_by_restaurant_id(&restaurant_id).await?
        }
        DeleteAction::One { name_prefix, yes } => {
            let prompt = format!(
                "Delete the first document whose name starts with '{}'?",
                name_prefix
            );
            if !confirmed(&prompt, yes)? {
                println!("{} Cancelled", "❌".red());
                return Ok(());
            }

            service.prune_seeded(&name_prefix).await?
        }
        DeleteAction::Many {
            name_prefix,
            id_prefix,
            yes,
        } => {
            let prompt = format!(
                "Delete every document with name prefix '{}' or restaurant id prefix '{}'?",
                name_prefix, id_prefix
            );
            if !confirmed(&prompt, yes)? {
                println!("{} Cancelled", "❌".red());
                return Ok(());
            }

            service.prune_all_seeded(&name_prefix, &id_prefix).await?
        }
    };

    println!(
        "{} Deleted {} document(s)",
        "✅".green(),
        deleted.to_string().cyan()
    );

    Ok(())
}

/// Dispatches collection administration commands.
async fn handle_collections_action(action: CollectionsAction, database: &Database) -> Result<()> {
    let admin = AdminService::new(Arc::new(MongoCatalogAdmin::new(database.clone())));

    match action {
        CollectionsAction::List => {
            let summary = admin.collection_summary().await?;

            println!("Collection count: {}", summary.count.to_string().cyan());
            for name in &summary.names {
                println!("  - {}", name);
            }
        }
        CollectionsAction::CreateCapped {
            name,
            max_docs,
            max_bytes,
        } => {
            admin
                .create_capped_collection(&name, max_docs, max_bytes)
                .await?;

            println!(
                "{} Created capped collection {} (max {} docs, {} bytes)",
                "✅".green(),
                name.cyan(),
                max_docs,
                max_bytes
            );
        }
        CollectionsAction::Drop { name, yes } => {
            let prompt = format!("Drop collection '{}'? This cannot be undone.", name);
            if !confirmed(&prompt, yes)? {
                println!("{} Cancelled", "❌".red());
                return Ok(());
            }

            admin.drop_collection(&name).await?;
            println!("{} Dropped collection {}", "✅".green(), name.cyan());
        }
    }

    Ok(())
}

/// Asks for confirmation unless `--yes` was passed.
fn confirmed(prompt: &str, skip_confirm: bool) -> Result<bool> {
    if skip_confirm {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    Ok(confirmed)
}

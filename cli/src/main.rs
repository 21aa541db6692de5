mod commands;
mod config;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    MealEdit, cmd_categories, cmd_import_csv, cmd_ingredient_cleanup, cmd_ingredient_list,
    cmd_meal_add, cmd_meal_delete, cmd_meal_edit, cmd_meal_list, cmd_meal_show, cmd_shop,
    cmd_units,
};
use crate::config::Config;
use mealplan_core::models::MealInput;
use mealplan_core::service::MealPlanner;

const LOG_ENV: &str = "MEALPLAN_LOG";

#[derive(Parser)]
#[command(
    name = "mealplan",
    version,
    about = "Plan meals and build one shopping list for the week"
)]
struct Cli {
    /// Database file (default: $MEALPLAN_DB, then the platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage meals and their ingredient lists
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },
    /// Inspect the shared ingredient list
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommands,
    },
    /// Build the shopping list for one or more meals
    Shop {
        /// Meal IDs (repeats count once)
        #[arg(required = true)]
        meal_ids: Vec<i64>,
        /// Write CSV to stdout
        #[arg(long, conflicts_with = "json")]
        csv: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import data from external sources
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// List the allowed units
    Units {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List shopping categories in aisle order
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Address to bind to (default: 127.0.0.1, use 0.0.0.0 to expose to network)
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
        /// Disable API key authentication (for development/testing)
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Add a meal (does nothing if the name already exists)
    Add {
        /// Meal name
        name: String,
        /// Short description
        #[arg(short, long)]
        description: Option<String>,
        /// Link to the recipe
        #[arg(long)]
        link: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Ingredient as "name,quantity,unit[,category]" (repeatable)
        #[arg(short, long = "ingredient", value_name = "SPEC")]
        ingredients: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all meals
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a meal with its ingredients
    Show {
        /// Meal ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a meal; given ingredients replace the whole list
    Edit {
        /// Meal ID
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New recipe link
        #[arg(long)]
        link: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
        /// Ingredient as "name,quantity,unit[,category]" (repeatable)
        #[arg(short, long = "ingredient", value_name = "SPEC")]
        ingredients: Vec<String>,
        /// Remove every ingredient from the meal
        #[arg(long, conflicts_with = "ingredients")]
        clear_ingredients: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a meal (its ingredients stay until cleanup)
    Delete {
        /// Meal ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum IngredientCommands {
    /// List all ingredients
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete ingredients no meal uses
    Cleanup {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ImportCommands {
    /// Import meals from a CSV file (Meal,Ingredient,Quantity,Unit[,Category][,Notes])
    Csv {
        /// Path to the CSV file
        file: PathBuf,
        /// Preview import without making changes
        #[arg(long)]
        dry_run: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve { .. }));

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(serving: bool) {
    let default = if serving { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.db)?;
    let planner = MealPlanner::new(&config.db_path)?;

    match cli.command {
        Commands::Meal { command } => match command {
            MealCommands::Add {
                name,
                description,
                link,
                notes,
                ingredients,
                json,
            } => {
                let meal = MealInput {
                    name,
                    description,
                    recipe_link: link,
                    notes,
                    ingredients: Vec::new(),
                };
                cmd_meal_add(&planner, meal, &ingredients, json)
            }
            MealCommands::List { json } => cmd_meal_list(&planner, json),
            MealCommands::Show { id, json } => cmd_meal_show(&planner, id, json),
            MealCommands::Edit {
                id,
                name,
                description,
                link,
                notes,
                ingredients,
                clear_ingredients,
                json,
            } => cmd_meal_edit(
                &planner,
                id,
                MealEdit {
                    name,
                    description,
                    recipe_link: link,
                    notes,
                    ingredients,
                    clear_ingredients,
                },
                json,
            ),
            MealCommands::Delete { id, json } => cmd_meal_delete(&planner, id, json),
        },
        Commands::Ingredient { command } => match command {
            IngredientCommands::List { json } => cmd_ingredient_list(&planner, json),
            IngredientCommands::Cleanup { json } => cmd_ingredient_cleanup(&planner, json),
        },
        Commands::Shop {
            meal_ids,
            csv,
            json,
        } => cmd_shop(&planner, &meal_ids, csv, json),
        Commands::Import { command } => match command {
            ImportCommands::Csv {
                file,
                dry_run,
                json,
            } => cmd_import_csv(&planner, &file, dry_run, json),
        },
        Commands::Units { json } => cmd_units(&planner, json),
        Commands::Categories { json } => cmd_categories(&planner, json),
        Commands::Serve {
            port,
            bind,
            no_auth,
        } => {
            let api_key = if no_auth {
                None
            } else {
                let (key, _new) = config.load_or_create_api_key()?;
                Some(key)
            };
            server::start_server(planner, port, &bind, api_key).await
        }
    }
}

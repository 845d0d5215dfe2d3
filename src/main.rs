//! Meal Planner CLI
//!
//! Terminal front end for the meal planner:
//! - Show the page, list meals
//! - Add and delete meals
//! - Ask for an AI meal suggestion
//! - Sign in and out

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use mealplanner::auth::{parse_redirect, RedirectTokens, RestIdentityProvider};
use mealplanner::config::{generate_default_config, Config};
use mealplanner::logging::init_logging;
use mealplanner::planner::{view, Planner};
use mealplanner::store::RestMealStore;
use mealplanner::suggest::{SuggestionClient, SuggestionRequest};
use mealplanner::MealId;

#[derive(Parser)]
#[command(name = "mealplanner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track meals and get AI meal suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Access token of a signed-in session
    #[arg(long, env = "MEALPLANNER_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the meal planner page
    View {
        /// Render in dark mode
        #[arg(long)]
        dark: bool,
        /// Request a meal suggestion before rendering
        #[arg(long)]
        suggest: bool,
    },

    /// List saved meals
    List,

    /// Add a meal
    Add {
        /// Meal name
        name: String,
        /// Calories
        calories: String,
    },

    /// Delete a meal by id
    Delete {
        /// Meal id
        id: MealId,
    },

    /// Ask the backend for an AI meal suggestion
    Suggest,

    /// Sign in with the configured OAuth provider
    Login {
        /// URL the browser was redirected to after signing in
        #[arg(long)]
        callback: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging, "");

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }

    let store = Arc::new(RestMealStore::new(config.store.clone()));
    let identity = Arc::new(RestIdentityProvider::new(&config.store));

    if let Commands::Login {
        callback: Some(callback),
    } = &cli.command
    {
        let tokens = parse_redirect(callback)?;
        let session = identity.restore(tokens).await?;
        println!("Signed in as {}", session.user.display_name());
        println!();
        println!("Use this session in later commands with:");
        println!("  export MEALPLANNER_ACCESS_TOKEN={}", session.access_token);
        return Ok(());
    }

    if let Some(token) = &cli.access_token {
        let tokens = RedirectTokens {
            access_token: token.clone(),
            refresh_token: None,
            expires_in: None,
        };
        if let Err(e) = identity.restore(tokens).await {
            tracing::error!(error = %e, "Error fetching session");
        }
    }

    let planner = Planner::new(
        store,
        identity.clone(),
        Arc::new(SuggestionClient::new(config.suggest.endpoint.clone())),
    )
    .with_suggestion_request(SuggestionRequest::from(&config.suggest))
    .with_auth_config(config.auth.clone());

    let watcher = planner.start().await;
    let result = run(&cli, &planner).await;
    watcher.stop().await;

    result
}

async fn run(cli: &Cli, planner: &Planner) -> Result<()> {
    match &cli.command {
        Commands::View { dark, suggest } => {
            if *dark {
                planner.toggle_theme().await;
            }
            if *suggest {
                planner.generate_meal().await;
            }
            print!("{}", view::render(&planner.snapshot().await));
        }

        Commands::List => {
            let state = planner.snapshot().await;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&state.meals)?);
            } else if state.meals.is_empty() {
                println!("{}", view::EMPTY_LIST);
                println!();
                println!("Add your first meal with:");
                println!("  mealplanner add \"Oatmeal\" 320");
            } else {
                println!("{:<8} {:<30} {}", "ID", "Name", "Calories");
                println!("{}", "-".repeat(50));
                for meal in &state.meals {
                    println!("{:<8} {:<30} {}", meal.id, meal.name, meal.calories);
                }
            }
        }

        Commands::Add { name, calories } => {
            planner.set_meal_name(name.as_str()).await;
            planner.set_calories(calories.as_str()).await;

            if planner.snapshot().await.pending_meal().is_none() {
                bail!("Meal name and a numeric calorie value are required");
            }

            let before = planner.snapshot().await.meals.len();
            if !planner.add_meal().await {
                bail!("Failed to add meal (see log for details)");
            }

            for meal in &planner.snapshot().await.meals[before..] {
                println!(
                    "Added #{} {}",
                    meal.id,
                    view::meal_line(&meal.name, meal.calories)
                );
            }
        }

        Commands::Delete { id } => {
            if !planner.delete_meal(*id).await {
                bail!("Failed to delete meal {} (see log for details)", id);
            }
            println!("Deleted meal {}", id);
        }

        Commands::Suggest => {
            if !planner.generate_meal().await {
                bail!("Failed to generate meal (see log for details)");
            }

            let state = planner.snapshot().await;
            let suggestion = state.suggestion.unwrap_or_default();
            if cli.format == "json" {
                println!(
                    "{}",
                    serde_json::json!({ "meal_suggestion": suggestion })
                );
            } else {
                println!("{}", suggestion);
            }
        }

        Commands::Login { .. } => {
            let url = planner
                .sign_in_url()
                .context("Could not build the sign-in URL")?;
            println!("Open this URL in a browser to sign in:");
            println!("  {}", url);
            println!();
            println!("Then pass the URL you were redirected to:");
            println!("  mealplanner login --callback '<redirect url>'");
        }

        Commands::Logout => {
            planner.sign_out().await;
            println!("Signed out");
        }

        Commands::Whoami => match planner.snapshot().await.user {
            Some(user) => println!("{} ({})", user.display_name(), user.id),
            None => println!("Not signed in"),
        },

        Commands::Config { output } => write_config(output.as_ref())?,
    }

    Ok(())
}

fn write_config(output: Option<&PathBuf>) -> Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

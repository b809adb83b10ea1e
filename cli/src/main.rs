mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    RecipeInput, cmd_badges, cmd_challenge_progress, cmd_challenge_show, cmd_meditate,
    cmd_plan_generate, cmd_plan_import, cmd_plan_list, cmd_plan_remove, cmd_recipe_generate,
    cmd_recipe_list, cmd_recipe_remove, cmd_recipe_save, cmd_sleep_goal, cmd_sleep_log,
    cmd_sleep_today, cmd_sleep_week, cmd_status, cmd_water_add, cmd_water_goal,
    cmd_water_reminders, cmd_water_remove, cmd_water_today, cmd_water_week, cmd_week, cmd_workout,
};
use crate::config::Config;
use fitfeast_core::service::FitFeastService;

#[derive(Parser)]
#[command(
    name = "fitfeast",
    version,
    about = "Streaks, badges and daily wellness tracking",
    long_about = "Track workouts, recipes, water and sleep. Keep your streak alive,\n\
                  finish the daily challenge and unlock badges along the way."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's dashboard: streak, challenge, water, sleep
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a completed workout
    Workout {
        /// Calories burned (e.g. "350" or "350kcal")
        #[arg(short, long)]
        calories: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List badges
    Badges {
        /// Only show earned badges
        #[arg(long)]
        earned: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or advance today's challenge
    Challenge {
        #[command(subcommand)]
        command: Option<ChallengeCommands>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show workouts and calories for the last 7 days
    Week {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add minutes of meditation
    Meditate {
        /// Minutes meditated
        minutes: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage saved recipes
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Manage saved workout plans
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Track water intake
    Water {
        #[command(subcommand)]
        command: WaterCommands,
    },
    /// Track sleep
    Sleep {
        #[command(subcommand)]
        command: SleepCommands,
    },
}

#[derive(Subcommand)]
enum ChallengeCommands {
    /// Record progress toward today's challenge
    Progress {
        /// Challenge kind: workout, recipe, hydration, steps
        kind: String,
        /// Amount of progress to add
        amount: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum RecipeCommands {
    /// Suggest recipes from the ingredients you have
    Generate {
        /// Comma-separated ingredients (e.g. "chicken, rice, broccoli")
        ingredients: String,
        /// Save every suggestion to favorites
        #[arg(long)]
        save: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a recipe to favorites
    Save {
        /// Recipe name
        name: String,
        /// Preparation time (e.g. "25 min")
        #[arg(long)]
        prep_time: Option<String>,
        /// Ingredient line (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,
        /// Calories per serving
        #[arg(long, default_value = "0")]
        calories: u32,
        /// Protein grams per serving
        #[arg(long, default_value = "0")]
        protein: u32,
        /// Carb grams per serving
        #[arg(long, default_value = "0")]
        carbs: u32,
        /// Fat grams per serving
        #[arg(long, default_value = "0")]
        fats: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved recipes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a saved recipe by id (or unique id prefix)
    Remove {
        /// Recipe id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Generate a 7-day plan for a goal
    Generate {
        /// Goal: weight_loss, muscle_gain, maintenance, endurance
        #[arg(default_value = "weight_loss")]
        goal: String,
        /// Save the plan to favorites
        #[arg(long)]
        save: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a workout plan from a JSON file
    Import {
        /// Path to the plan file
        file: std::path::PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved workout plans
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a saved workout plan by id
    Remove {
        /// Plan id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WaterCommands {
    /// Drink a glass of water
    Add {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Undo the last glass
    Remove {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show today's intake
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show intake for the last 7 days
    Week {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the daily goal in glasses
    Goal {
        /// Glasses per day
        glasses: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Turn hydration reminders on or off
    Reminders {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SleepCommands {
    /// Log last night's sleep
    Log {
        /// Hours slept (e.g. "7.5", "7h", "7h30m")
        hours: String,
        /// Quality: poor, fair, good, excellent
        #[arg(short, long, default_value = "good")]
        quality: String,
        /// Bed time (HH:MM)
        #[arg(long)]
        bed: Option<String>,
        /// Wake time (HH:MM)
        #[arg(long)]
        wake: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show today's sleep entry
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show sleep for the last 7 days
    Week {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the nightly goal in hours
    Goal {
        /// Hours per night
        hours: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    tracing::debug!(data_dir = %config.data_dir.display(), "opening store");
    let mut svc = FitFeastService::open(&config.db_path)?;

    match cli.command {
        Commands::Status { json } => cmd_status(&svc, json),
        Commands::Workout { calories, json } => cmd_workout(&mut svc, calories.as_deref(), json),
        Commands::Badges { earned, json } => cmd_badges(&svc, earned, json),
        Commands::Challenge { command, json } => match command {
            None => cmd_challenge_show(&mut svc, json),
            Some(ChallengeCommands::Progress { kind, amount, json }) => {
                cmd_challenge_progress(&mut svc, &kind, amount, json)
            }
        },
        Commands::Week { json } => cmd_week(&svc, json),
        Commands::Meditate { minutes, json } => cmd_meditate(&mut svc, minutes, json),
        Commands::Recipe { command } => match command {
            RecipeCommands::Save {
                name,
                prep_time,
                ingredients,
                calories,
                protein,
                carbs,
                fats,
                json,
            } => cmd_recipe_save(
                &mut svc,
                RecipeInput {
                    name,
                    prep_time,
                    ingredients,
                    calories,
                    protein,
                    carbs,
                    fats,
                },
                json,
            ),
            RecipeCommands::Generate {
                ingredients,
                save,
                json,
            } => cmd_recipe_generate(&mut svc, &ingredients, save, json),
            RecipeCommands::List { json } => cmd_recipe_list(&svc, json),
            RecipeCommands::Remove { id, json } => cmd_recipe_remove(&mut svc, &id, json),
        },
        Commands::Plan { command } => match command {
            PlanCommands::Generate { goal, save, json } => {
                cmd_plan_generate(&mut svc, &goal, save, json)
            }
            PlanCommands::Import { file, json } => cmd_plan_import(&mut svc, &file, json),
            PlanCommands::List { json } => cmd_plan_list(&svc, json),
            PlanCommands::Remove { id, json } => cmd_plan_remove(&mut svc, &id, json),
        },
        Commands::Water { command } => match command {
            WaterCommands::Add { json } => cmd_water_add(&mut svc, json),
            WaterCommands::Remove { json } => cmd_water_remove(&mut svc, json),
            WaterCommands::Today { json } => cmd_water_today(&svc, json),
            WaterCommands::Week { json } => cmd_water_week(&svc, json),
            WaterCommands::Goal { glasses, json } => cmd_water_goal(&mut svc, glasses, json),
            WaterCommands::Reminders { json } => cmd_water_reminders(&mut svc, json),
        },
        Commands::Sleep { command } => match command {
            SleepCommands::Log {
                hours,
                quality,
                bed,
                wake,
                json,
            } => cmd_sleep_log(&mut svc, &hours, &quality, bed.as_deref(), wake.as_deref(), json),
            SleepCommands::Today { json } => cmd_sleep_today(&svc, json),
            SleepCommands::Week { json } => cmd_sleep_week(&svc, json),
            SleepCommands::Goal { hours, json } => cmd_sleep_goal(&mut svc, hours, json),
        },
    }
}

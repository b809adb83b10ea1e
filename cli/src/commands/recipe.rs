use anyhow::{Result, bail};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitfeast_core::catalog::{self, CatalogRecipe};
use fitfeast_core::models::{Badge, Nutrition, SavedRecipe};
use fitfeast_core::service::FitFeastService;

use super::helpers::{announce_badges, json_error, slugify, truncate};

pub(crate) struct RecipeInput {
    pub name: String,
    pub prep_time: Option<String>,
    pub ingredients: Vec<String>,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

pub(crate) fn cmd_recipe_save(svc: &mut FitFeastService, input: RecipeInput, json: bool) -> Result<()> {
    let id = slugify(&input.name);
    if id.is_empty() {
        bail!("Recipe name must contain at least one letter or digit");
    }

    let recipe = SavedRecipe {
        id,
        name: input.name.trim().to_string(),
        prep_time: input.prep_time.unwrap_or_default(),
        ingredients: input.ingredients,
        instructions: Vec::new(),
        nutrition: Nutrition {
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fats: input.fats,
        },
        image_url: None,
        saved_at: svc.now(),
    };
    let id = recipe.id.clone();
    let name = recipe.name.clone();

    let Some(unlocked) = svc.save_recipe(recipe) else {
        bail!("Recipe '{name}' is already saved");
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "id": id,
                "total_recipes_made": svc.gamification().state().total_recipes_made,
                "unlocked": unlocked,
            })
        );
    } else {
        println!("Saved '{name}' [{id}]");
        announce_badges(&unlocked);
    }

    Ok(())
}

pub(crate) fn cmd_recipe_list(svc: &FitFeastService, json: bool) -> Result<()> {
    let recipes = svc.favorites().recipes();

    if json {
        println!("{}", serde_json::to_string_pretty(recipes)?);
    } else if recipes.is_empty() {
        eprintln!("No saved recipes. Use `fitfeast recipe save <name>` to add one.");
    } else {
        #[derive(Tabled)]
        struct RecipeRow {
            #[tabled(rename = "ID")]
            id: String,
            #[tabled(rename = "Name")]
            name: String,
            #[tabled(rename = "Prep")]
            prep: String,
            #[tabled(rename = "Calories")]
            calories: u32,
            #[tabled(rename = "P")]
            protein: u32,
            #[tabled(rename = "C")]
            carbs: u32,
            #[tabled(rename = "F")]
            fats: u32,
            #[tabled(rename = "Saved")]
            saved: String,
        }

        let rows: Vec<RecipeRow> = recipes
            .iter()
            .map(|r| RecipeRow {
                id: r.id.clone(),
                name: truncate(&r.name, 35),
                prep: r.prep_time.clone(),
                calories: r.nutrition.calories,
                protein: r.nutrition.protein,
                carbs: r.nutrition.carbs,
                fats: r.nutrition.fats,
                saved: r.saved_at.format("%Y-%m-%d").to_string(),
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(3..7)).with(Alignment::right()))
            .to_string();
        println!("{table}");
    }

    Ok(())
}

fn print_generated(recipe: &CatalogRecipe, saved: bool) {
    let n = &recipe.nutrition;
    let mark = if saved { " (saved)" } else { "" };
    println!("{} [{}]{mark}", recipe.name, recipe.id);
    println!(
        "  {} | {} kcal | P {}g C {}g F {}g",
        recipe.prep_time, n.calories, n.protein, n.carbs, n.fats
    );
    println!("  Ingredients: {}", recipe.ingredients.join(", "));
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    println!();
}

/// Suggest catalog recipes for a comma-separated ingredient list. With
/// `save`, every suggestion not yet in favorites is saved.
pub(crate) fn cmd_recipe_generate(
    svc: &mut FitFeastService,
    ingredients: &str,
    save: bool,
    json: bool,
) -> Result<()> {
    let wanted = catalog::parse_ingredients(ingredients);
    if wanted.is_empty() {
        bail!("Enter at least one ingredient, e.g. \"chicken, rice, broccoli\"");
    }
    let picks = catalog::match_recipes(&wanted);

    let mut saved_ids = Vec::new();
    let mut unlocked: Vec<Badge> = Vec::new();
    if save {
        for pick in &picks {
            if let Some(badges) = svc.save_recipe(pick.to_saved(svc.now())) {
                saved_ids.push(pick.id);
                unlocked.extend(badges);
            }
        }
    }

    if json {
        let recipes: Vec<SavedRecipe> = picks.iter().map(|r| r.to_saved(svc.now())).collect();
        println!(
            "{}",
            serde_json::json!({
                "recipes": recipes,
                "saved": saved_ids,
                "unlocked": unlocked,
            })
        );
    } else {
        println!("Found {} recipes for: {}\n", picks.len(), wanted.join(", "));
        for pick in &picks {
            let saved = svc.favorites().find_recipe(pick.id).is_some();
            print_generated(pick, saved);
        }
        if save && saved_ids.is_empty() {
            println!("All suggestions are already in your favorites.");
        }
        announce_badges(&unlocked);
    }

    Ok(())
}

/// Remove a saved recipe by id or unique id prefix.
pub(crate) fn cmd_recipe_remove(svc: &mut FitFeastService, id: &str, json: bool) -> Result<()> {
    let full_id = if svc.favorites().find_recipe(id).is_some() {
        id.to_string()
    } else {
        let matches: Vec<String> = svc
            .favorites()
            .recipes()
            .iter()
            .filter(|r| r.id.starts_with(id))
            .map(|r| r.id.clone())
            .collect();

        match matches.as_slice() {
            [one] => one.clone(),
            [] => {
                if json {
                    println!("{}", json_error(&format!("No saved recipe matches '{id}'")));
                    return Ok(());
                }
                bail!("No saved recipe matches '{id}'");
            }
            _ => bail!("'{id}' matches {} recipes; use a longer id", matches.len()),
        }
    };

    svc.favorites_mut().remove_recipe(&full_id);

    if json {
        println!("{}", serde_json::json!({ "deleted": full_id }));
    } else {
        println!("Removed recipe {full_id}");
    }

    Ok(())
}

//! Built-in recipe and workout plan catalogs used by the generators.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Exercise, Nutrition, SavedRecipe, SavedWorkoutPlan, WorkoutDay};

/// Most recipes a single generation returns.
pub const MAX_GENERATED_RECIPES: usize = 3;

// --- Recipes ---

#[derive(Debug)]
pub struct CatalogRecipe {
    pub id: &'static str,
    pub name: &'static str,
    pub prep_time: &'static str,
    pub instructions: &'static [&'static str],
    pub nutrition: Nutrition,
    pub image_url: &'static str,
    pub ingredients: &'static [&'static str],
}

impl CatalogRecipe {
    #[must_use]
    pub fn to_saved(&self, saved_at: DateTime<Utc>) -> SavedRecipe {
        SavedRecipe {
            id: self.id.to_string(),
            name: self.name.to_string(),
            prep_time: self.prep_time.to_string(),
            ingredients: self.ingredients.iter().map(ToString::to_string).collect(),
            instructions: self.instructions.iter().map(ToString::to_string).collect(),
            nutrition: self.nutrition.clone(),
            image_url: Some(self.image_url.to_string()),
            saved_at,
        }
    }

    /// True if any catalog ingredient contains `wanted` or is contained by it.
    fn uses(&self, wanted: &[String]) -> bool {
        self.ingredients
            .iter()
            .any(|ing| wanted.iter().any(|w| ing.contains(w.as_str()) || w.contains(ing)))
    }
}

#[rustfmt::skip]
pub const RECIPE_CATALOG: &[CatalogRecipe] = &[
    CatalogRecipe {
        id: "mediterranean-chicken-salad",
        name: "Mediterranean Chicken Salad",
        prep_time: "20 min",
        instructions: &[
            "Season chicken breast with olive oil, oregano, salt, and pepper.",
            "Grill chicken for 6-7 minutes per side until cooked through.",
            "Let chicken rest for 5 minutes, then slice into strips.",
            "Toss mixed greens with cucumber, tomatoes, olives, and feta cheese.",
            "Top with sliced chicken and drizzle with lemon vinaigrette.",
            "Serve immediately with a side of pita bread.",
        ],
        nutrition: Nutrition { calories: 380, protein: 35, carbs: 18, fats: 20 },
        image_url: "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400&h=300&fit=crop",
        ingredients: &["chicken", "lettuce", "tomato", "cucumber", "feta", "olives"],
    },
    CatalogRecipe {
        id: "protein-packed-egg-scramble",
        name: "Protein-Packed Egg Scramble",
        prep_time: "15 min",
        instructions: &[
            "Whisk 3 eggs with a splash of milk, salt, and pepper.",
            "Heat olive oil in a non-stick pan over medium heat.",
            "Add diced bell peppers and onions, saute for 3 minutes.",
            "Pour in egg mixture and stir gently with a spatula.",
            "Add crumbled feta cheese and fresh spinach.",
            "Cook until eggs are set but still creamy. Serve with whole grain toast.",
        ],
        nutrition: Nutrition { calories: 320, protein: 24, carbs: 12, fats: 22 },
        image_url: "https://images.unsplash.com/photo-1525351484163-7529414344d8?w=400&h=300&fit=crop",
        ingredients: &["eggs", "spinach", "peppers", "onion", "feta"],
    },
    CatalogRecipe {
        id: "asian-stir-fry-bowl",
        name: "Asian Stir-Fry Bowl",
        prep_time: "25 min",
        instructions: &[
            "Cook rice or noodles according to package instructions.",
            "Cut tofu or chicken into cubes and season with soy sauce.",
            "Heat sesame oil in a wok over high heat.",
            "Stir-fry protein until golden, about 5-6 minutes. Set aside.",
            "Add broccoli, carrots, and snap peas to the wok. Stir-fry for 4 minutes.",
            "Return protein to wok, add sauce (soy sauce, ginger, garlic, honey).",
            "Serve over rice with sesame seeds and green onions.",
        ],
        nutrition: Nutrition { calories: 420, protein: 28, carbs: 45, fats: 16 },
        image_url: "https://images.unsplash.com/photo-1512058564366-18510be2db19?w=400&h=300&fit=crop",
        ingredients: &["rice", "tofu", "broccoli", "carrots", "soy sauce"],
    },
    CatalogRecipe {
        id: "avocado-toast-with-poached-egg",
        name: "Avocado Toast with Poached Egg",
        prep_time: "10 min",
        instructions: &[
            "Toast whole grain bread until golden and crispy.",
            "Mash ripe avocado with lime juice, salt, and chili flakes.",
            "Bring water to a gentle simmer and add a splash of vinegar.",
            "Create a whirlpool and gently drop in the egg. Cook for 3 minutes.",
            "Spread avocado mash on toast and top with poached egg.",
            "Garnish with everything bagel seasoning and microgreens.",
        ],
        nutrition: Nutrition { calories: 290, protein: 12, carbs: 25, fats: 18 },
        image_url: "https://images.unsplash.com/photo-1525351484163-7529414344d8?w=400&h=300&fit=crop",
        ingredients: &["avocado", "eggs", "bread", "lime"],
    },
    CatalogRecipe {
        id: "quinoa-buddha-bowl",
        name: "Quinoa Buddha Bowl",
        prep_time: "30 min",
        instructions: &[
            "Cook quinoa according to package instructions.",
            "Roast chickpeas with cumin, paprika, and olive oil at 400F for 20 mins.",
            "Steam or roast sweet potato cubes until tender.",
            "Prepare tahini dressing: mix tahini, lemon juice, garlic, and water.",
            "Arrange quinoa, roasted veggies, chickpeas, and fresh greens in a bowl.",
            "Drizzle with tahini dressing and sprinkle with seeds.",
        ],
        nutrition: Nutrition { calories: 450, protein: 18, carbs: 58, fats: 19 },
        image_url: "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=400&h=300&fit=crop",
        ingredients: &["quinoa", "chickpeas", "sweet potato", "tahini", "greens"],
    },
    CatalogRecipe {
        id: "grilled-salmon-with-veggies",
        name: "Grilled Salmon with Veggies",
        prep_time: "25 min",
        instructions: &[
            "Season salmon fillet with lemon, dill, salt, and pepper.",
            "Toss asparagus and zucchini with olive oil and garlic.",
            "Preheat grill to medium-high heat.",
            "Grill salmon skin-side down for 4-5 minutes per side.",
            "Grill vegetables alongside until tender with char marks.",
            "Serve salmon on a bed of vegetables with lemon wedges.",
        ],
        nutrition: Nutrition { calories: 380, protein: 42, carbs: 12, fats: 20 },
        image_url: "https://images.unsplash.com/photo-1467003909585-2f8a72700288?w=400&h=300&fit=crop",
        ingredients: &["salmon", "asparagus", "zucchini", "lemon", "garlic"],
    },
];

/// Split a comma-separated ingredient list into lowercase, trimmed,
/// non-empty entries.
#[must_use]
pub fn parse_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .collect()
}

/// Recipes using any of `ingredients` (substring match either way), at most
/// [`MAX_GENERATED_RECIPES`]. With no match, the first catalog entries are
/// returned instead. Returns an empty list only for an empty ingredient list.
#[must_use]
pub fn match_recipes(ingredients: &[String]) -> Vec<&'static CatalogRecipe> {
    if ingredients.is_empty() {
        return Vec::new();
    }

    let matched: Vec<&CatalogRecipe> = RECIPE_CATALOG
        .iter()
        .filter(|r| r.uses(ingredients))
        .take(MAX_GENERATED_RECIPES)
        .collect();

    if matched.is_empty() {
        tracing::debug!(?ingredients, "no recipe matched, using catalog defaults");
        RECIPE_CATALOG.iter().take(MAX_GENERATED_RECIPES).collect()
    } else {
        matched
    }
}

// --- Workout plans ---

#[derive(Debug)]
pub struct CatalogExercise {
    pub name: &'static str,
    pub sets: u32,
    pub reps: &'static str,
    pub notes: Option<&'static str>,
}

#[derive(Debug)]
pub struct CatalogDay {
    pub day: &'static str,
    pub exercises: &'static [CatalogExercise],
}

impl CatalogDay {
    fn to_workout_day(&self) -> WorkoutDay {
        WorkoutDay {
            day: self.day.to_string(),
            exercises: self
                .exercises
                .iter()
                .map(|e| Exercise {
                    name: e.name.to_string(),
                    sets: e.sets,
                    reps: e.reps.to_string(),
                    notes: e.notes.map(ToString::to_string),
                })
                .collect(),
            rest_day: self.exercises.is_empty(),
        }
    }
}

pub const WORKOUT_GOALS: &[&str] = &["weight_loss", "muscle_gain", "maintenance", "endurance"];

/// Used when the requested goal has no plan.
pub const DEFAULT_WORKOUT_GOAL: &str = "weight_loss";

const fn ex(name: &'static str, sets: u32, reps: &'static str) -> CatalogExercise {
    CatalogExercise { name, sets, reps, notes: None }
}

const fn exn(name: &'static str, sets: u32, reps: &'static str, notes: &'static str) -> CatalogExercise {
    CatalogExercise { name, sets, reps, notes: Some(notes) }
}

const fn rest(day: &'static str) -> CatalogDay {
    CatalogDay { day, exercises: &[] }
}

#[rustfmt::skip]
const WEIGHT_LOSS: &[CatalogDay] = &[
    CatalogDay { day: "Monday", exercises: &[
        exn("Jump Rope", 3, "2 min", "Warm-up"),
        ex("Burpees", 4, "15"),
        ex("Mountain Climbers", 3, "30 sec"),
        ex("Kettlebell Swings", 4, "20"),
    ]},
    CatalogDay { day: "Tuesday", exercises: &[
        exn("Treadmill Running", 1, "30 min", "Moderate pace"),
        ex("Bodyweight Squats", 4, "20"),
        ex("Lunges", 3, "15 each leg"),
    ]},
    rest("Wednesday"),
    CatalogDay { day: "Thursday", exercises: &[
        ex("HIIT Circuit", 5, "45 sec on, 15 sec off"),
        ex("Box Jumps", 4, "12"),
        ex("Battle Ropes", 3, "30 sec"),
    ]},
    CatalogDay { day: "Friday", exercises: &[
        ex("Cycling", 1, "40 min"),
        ex("Plank", 4, "45 sec"),
        ex("Russian Twists", 3, "20"),
    ]},
    CatalogDay { day: "Saturday", exercises: &[
        exn("Swimming or Light Jog", 1, "45 min", "Active recovery"),
    ]},
    rest("Sunday"),
];

#[rustfmt::skip]
const MUSCLE_GAIN: &[CatalogDay] = &[
    CatalogDay { day: "Monday", exercises: &[
        exn("Bench Press", 4, "8-10", "Chest focus"),
        ex("Incline Dumbbell Press", 3, "10-12"),
        ex("Cable Flyes", 3, "12-15"),
        ex("Tricep Pushdowns", 3, "12"),
    ]},
    CatalogDay { day: "Tuesday", exercises: &[
        exn("Deadlifts", 4, "6-8", "Back focus"),
        ex("Barbell Rows", 4, "8-10"),
        ex("Lat Pulldowns", 3, "10-12"),
        ex("Barbell Curls", 3, "12"),
    ]},
    rest("Wednesday"),
    CatalogDay { day: "Thursday", exercises: &[
        exn("Squats", 4, "8-10", "Leg focus"),
        ex("Leg Press", 3, "10-12"),
        ex("Romanian Deadlifts", 3, "10"),
        ex("Calf Raises", 4, "15"),
    ]},
    CatalogDay { day: "Friday", exercises: &[
        exn("Overhead Press", 4, "8-10", "Shoulder focus"),
        ex("Lateral Raises", 3, "12-15"),
        ex("Face Pulls", 3, "15"),
        ex("Shrugs", 3, "12"),
    ]},
    CatalogDay { day: "Saturday", exercises: &[
        exn("Pull-ups", 4, "Max", "Full body"),
        ex("Dips", 4, "Max"),
        ex("Farmer Walks", 3, "40m"),
    ]},
    rest("Sunday"),
];

#[rustfmt::skip]
const MAINTENANCE: &[CatalogDay] = &[
    CatalogDay { day: "Monday", exercises: &[
        ex("Push-ups", 3, "15-20"),
        ex("Dumbbell Rows", 3, "12"),
        ex("Plank", 3, "45 sec"),
    ]},
    CatalogDay { day: "Tuesday", exercises: &[
        ex("Light Jogging", 1, "25 min"),
        ex("Stretching", 1, "15 min"),
    ]},
    CatalogDay { day: "Wednesday", exercises: &[
        ex("Bodyweight Squats", 3, "20"),
        ex("Lunges", 3, "12 each"),
        ex("Glute Bridges", 3, "15"),
    ]},
    rest("Thursday"),
    CatalogDay { day: "Friday", exercises: &[
        ex("Swimming or Cycling", 1, "30 min"),
        ex("Core Circuit", 2, "10 min"),
    ]},
    CatalogDay { day: "Saturday", exercises: &[
        ex("Full Body Light Workout", 3, "12 each exercise"),
    ]},
    rest("Sunday"),
];

#[rustfmt::skip]
const ENDURANCE: &[CatalogDay] = &[
    CatalogDay { day: "Monday", exercises: &[
        exn("Long Distance Run", 1, "45 min", "Zone 2 pace"),
    ]},
    CatalogDay { day: "Tuesday", exercises: &[
        ex("Interval Training", 8, "400m fast, 200m recovery"),
        ex("Core Work", 3, "15 min"),
    ]},
    CatalogDay { day: "Wednesday", exercises: &[
        exn("Cross Training", 1, "40 min", "Cycling or swimming"),
    ]},
    CatalogDay { day: "Thursday", exercises: &[
        exn("Tempo Run", 1, "30 min", "Challenging but sustainable"),
    ]},
    rest("Friday"),
    CatalogDay { day: "Saturday", exercises: &[
        exn("Long Run", 1, "60-90 min", "Easy pace"),
    ]},
    CatalogDay { day: "Sunday", exercises: &[
        exn("Active Recovery", 1, "30 min", "Walk or light yoga"),
    ]},
];

fn plan_days(goal: &str) -> Option<&'static [CatalogDay]> {
    match goal {
        "weight_loss" => Some(WEIGHT_LOSS),
        "muscle_gain" => Some(MUSCLE_GAIN),
        "maintenance" => Some(MAINTENANCE),
        "endurance" => Some(ENDURANCE),
        _ => None,
    }
}

/// Canonical goal key: "Muscle Gain" and "muscle-gain" become "muscle_gain".
#[must_use]
pub fn normalize_goal(goal: &str) -> String {
    goal.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Build the 7-day plan for `goal`. Unknown goals get the
/// [`DEFAULT_WORKOUT_GOAL`] plan, and the returned plan records the goal it
/// was actually built for.
#[must_use]
pub fn generate_workout_plan(goal: &str, created_at: DateTime<Utc>, date: NaiveDate) -> SavedWorkoutPlan {
    let requested = normalize_goal(goal);
    let (goal, days) = match plan_days(&requested) {
        Some(days) => (requested, days),
        None => {
            tracing::debug!(goal = %requested, "unknown workout goal, using default plan");
            (DEFAULT_WORKOUT_GOAL.to_string(), WEIGHT_LOSS)
        }
    };

    let label = goal.replace('_', " ");
    let date = date.format("%Y-%m-%d");
    SavedWorkoutPlan {
        id: format!("{}-plan-{date}", label.replace(' ', "-")),
        name: format!("{label} Plan - {date}"),
        goal,
        days: days.iter().map(CatalogDay::to_workout_day).collect(),
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(recipes: &[&CatalogRecipe]) -> Vec<&'static str> {
        recipes.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_parse_ingredients() {
        assert_eq!(parse_ingredients(" Chicken, RICE ,, "), vec!["chicken", "rice"]);
        assert!(parse_ingredients(" , ").is_empty());
    }

    #[test]
    fn test_match_recipes_by_ingredient() {
        let found = match_recipes(&parse_ingredients("salmon"));
        assert_eq!(names(&found), ["Grilled Salmon with Veggies"]);

        // "egg" is contained in "eggs"; "sweet potatoes" contains "sweet potato".
        let found = match_recipes(&parse_ingredients("egg, sweet potatoes"));
        assert_eq!(
            names(&found),
            ["Protein-Packed Egg Scramble", "Avocado Toast with Poached Egg", "Quinoa Buddha Bowl"]
        );
    }

    #[test]
    fn test_match_recipes_caps_results() {
        let found = match_recipes(&parse_ingredients("feta, eggs, rice, garlic"));
        assert_eq!(found.len(), MAX_GENERATED_RECIPES);
        assert_eq!(found[0].name, "Mediterranean Chicken Salad");
    }

    #[test]
    fn test_match_recipes_falls_back_to_first_entries() {
        let found = match_recipes(&parse_ingredients("marshmallow"));
        assert_eq!(
            names(&found),
            ["Mediterranean Chicken Salad", "Protein-Packed Egg Scramble", "Asian Stir-Fry Bowl"]
        );
        assert!(match_recipes(&[]).is_empty());
    }

    #[test]
    fn test_catalog_recipe_to_saved() {
        let now = Utc::now();
        let saved = RECIPE_CATALOG[2].to_saved(now);
        assert_eq!(saved.id, "asian-stir-fry-bowl");
        assert_eq!(saved.ingredients.len(), 5);
        assert_eq!(saved.nutrition.calories, 420);
        assert!(saved.image_url.is_some());
        assert_eq!(saved.saved_at, now);
    }

    #[test]
    fn test_generate_plan_for_goal() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let plan = generate_workout_plan("Muscle Gain", Utc::now(), date);
        assert_eq!(plan.goal, "muscle_gain");
        assert_eq!(plan.id, "muscle-gain-plan-2024-06-15");
        assert_eq!(plan.name, "muscle gain Plan - 2024-06-15");
        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.days[0].exercises[0].name, "Bench Press");
        assert_eq!(plan.days[0].exercises[0].notes.as_deref(), Some("Chest focus"));
        assert!(plan.days[2].rest_day);
        assert!(plan.days[6].rest_day);
    }

    #[test]
    fn test_every_goal_has_a_week() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        for goal in WORKOUT_GOALS {
            let plan = generate_workout_plan(goal, Utc::now(), date);
            assert_eq!(plan.goal, *goal);
            assert_eq!(plan.days.len(), 7);
            assert!(plan.days.iter().any(|d| !d.rest_day));
        }
    }

    #[test]
    fn test_unknown_goal_uses_default_plan() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let plan = generate_workout_plan("flexibility", Utc::now(), date);
        assert_eq!(plan.goal, DEFAULT_WORKOUT_GOAL);
        assert_eq!(plan.days[0].exercises[0].name, "Jump Rope");
        assert!(plan.days[2].rest_day);
    }
}

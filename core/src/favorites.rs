use std::rc::Rc;

use crate::models::{SavedRecipe, SavedWorkoutPlan};
use crate::store::{self, KeyValueStore, SAVED_RECIPES_KEY, SAVED_WORKOUTS_KEY};

/// Saved recipes and workout plans, each list persisted under its own key.
/// Both lists are kept newest first.
pub struct FavoritesStore {
    store: Rc<dyn KeyValueStore>,
    recipes: Vec<SavedRecipe>,
    workouts: Vec<SavedWorkoutPlan>,
}

impl FavoritesStore {
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let recipes = store::get_or_default(store.as_ref(), SAVED_RECIPES_KEY, Vec::new());
        let workouts = store::get_or_default(store.as_ref(), SAVED_WORKOUTS_KEY, Vec::new());
        Self {
            store,
            recipes,
            workouts,
        }
    }

    #[must_use]
    pub fn recipes(&self) -> &[SavedRecipe] {
        &self.recipes
    }

    #[must_use]
    pub fn workouts(&self) -> &[SavedWorkoutPlan] {
        &self.workouts
    }

    #[must_use]
    pub fn find_recipe(&self, id: &str) -> Option<&SavedRecipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Returns false if a recipe with the same id is already saved.
    pub fn save_recipe(&mut self, recipe: SavedRecipe) -> bool {
        if self.find_recipe(&recipe.id).is_some() {
            return false;
        }
        self.recipes.insert(0, recipe);
        store::set(self.store.as_ref(), SAVED_RECIPES_KEY, &self.recipes);
        true
    }

    pub fn remove_recipe(&mut self, id: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        if self.recipes.len() == before {
            return false;
        }
        store::set(self.store.as_ref(), SAVED_RECIPES_KEY, &self.recipes);
        true
    }

    /// Returns false if a plan with the same id is already saved.
    pub fn save_workout(&mut self, plan: SavedWorkoutPlan) -> bool {
        if self.workouts.iter().any(|w| w.id == plan.id) {
            return false;
        }
        self.workouts.insert(0, plan);
        store::set(self.store.as_ref(), SAVED_WORKOUTS_KEY, &self.workouts);
        true
    }

    pub fn remove_workout(&mut self, id: &str) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        if self.workouts.len() == before {
            return false;
        }
        store::set(self.store.as_ref(), SAVED_WORKOUTS_KEY, &self.workouts);
        true
    }
}

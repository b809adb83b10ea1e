mod challenge;
mod helpers;
mod plan;
mod recipe;
mod sleep;
mod status;
mod water;
mod workout;

pub(crate) use challenge::{cmd_challenge_progress, cmd_challenge_show};
pub(crate) use plan::{cmd_plan_generate, cmd_plan_import, cmd_plan_list, cmd_plan_remove};
pub(crate) use recipe::{
    RecipeInput, cmd_recipe_generate, cmd_recipe_list, cmd_recipe_remove, cmd_recipe_save,
};
pub(crate) use sleep::{cmd_meditate, cmd_sleep_goal, cmd_sleep_log, cmd_sleep_today, cmd_sleep_week};
pub(crate) use status::{cmd_badges, cmd_status, cmd_week};
pub(crate) use water::{
    cmd_water_add, cmd_water_goal, cmd_water_reminders, cmd_water_remove, cmd_water_today,
    cmd_water_week,
};
pub(crate) use workout::cmd_workout;

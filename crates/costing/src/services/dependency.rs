//! Recipe dependency checks.
//!
//! Used before saving a recipe (would the new sub-recipe line close a loop?)
//! and when checking a whole catalog.

use std::collections::HashSet;

use serde::Serialize;
use tracing::instrument;

use bakehouse_core::RecipeId;

use crate::models::Recipe;
use crate::resolver::RecipeResolver;

/// A recipe whose dependency graph loops back on itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCycle {
    /// Recipe the walk started from.
    pub recipe_id: RecipeId,
    /// IDs along the loop, starting and ending with the same ID.
    pub cycle: Vec<RecipeId>,
}

/// Check whether adding `candidate` as a sub-recipe of `recipe_id` would
/// create a cycle.
///
/// Returns the loop that would be closed (`recipe_id`, `candidate`, ...,
/// `recipe_id`), or `None` if the edit is safe. Recipes that do not resolve
/// are treated as having no sub-recipes.
#[must_use]
#[instrument(skip(recipes))]
pub fn check_circular_dependency<R>(
    recipe_id: &RecipeId,
    candidate: &RecipeId,
    recipes: &R,
) -> Option<Vec<RecipeId>>
where
    R: RecipeResolver + ?Sized,
{
    let mut path = vec![recipe_id.clone()];
    let mut seen = HashSet::new();
    path_to(candidate, recipe_id, recipes, &mut seen, &mut path).then_some(path)
}

/// Depth-first search from `from` to `target`, leaving the route in `path`.
fn path_to<R>(
    from: &RecipeId,
    target: &RecipeId,
    recipes: &R,
    seen: &mut HashSet<RecipeId>,
    path: &mut Vec<RecipeId>,
) -> bool
where
    R: RecipeResolver + ?Sized,
{
    path.push(from.clone());
    if from == target {
        return true;
    }
    if seen.insert(from.clone())
        && let Some(recipe) = recipes.recipe(from)
    {
        for sub_recipe_id in recipe.sub_recipe_ids() {
            if path_to(sub_recipe_id, target, recipes, seen, path) {
                return true;
            }
        }
    }
    path.pop();
    false
}

/// Find every recipe whose reachable sub-recipe graph contains a cycle.
///
/// Each entry names the first loop found from that recipe.
#[must_use]
pub fn find_cycles<'a, R>(all: impl IntoIterator<Item = &'a Recipe>, recipes: &R) -> Vec<RecipeCycle>
where
    R: RecipeResolver + ?Sized,
{
    all.into_iter()
        .filter_map(|recipe| {
            let mut visiting = Vec::new();
            let mut done = HashSet::new();
            first_cycle(recipe, recipes, &mut visiting, &mut done).map(|cycle| RecipeCycle {
                recipe_id: recipe.id.clone(),
                cycle,
            })
        })
        .collect()
}

fn first_cycle<R>(
    recipe: &Recipe,
    recipes: &R,
    visiting: &mut Vec<RecipeId>,
    done: &mut HashSet<RecipeId>,
) -> Option<Vec<RecipeId>>
where
    R: RecipeResolver + ?Sized,
{
    if let Some(start) = visiting.iter().position(|id| id == &recipe.id) {
        let mut cycle = visiting.get(start..).unwrap_or_default().to_vec();
        cycle.push(recipe.id.clone());
        return Some(cycle);
    }
    if done.contains(&recipe.id) {
        return None;
    }

    visiting.push(recipe.id.clone());
    for sub_recipe_id in recipe.sub_recipe_ids() {
        if let Some(sub_recipe) = recipes.recipe(sub_recipe_id)
            && let Some(cycle) = first_cycle(sub_recipe, recipes, visiting, done)
        {
            return Some(cycle);
        }
    }
    visiting.pop();
    done.insert(recipe.id.clone());
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bakehouse_core::Unit;

    use crate::models::RecipeItem;
    use crate::services::recipe_cost::tests::{dec, recipe, recipe_map};

    fn uses(id: &str, subs: &[&str]) -> Recipe {
        let items = subs
            .iter()
            .map(|sub| RecipeItem::sub_recipe(RecipeId::new(*sub), dec("1"), Unit::Unit))
            .collect();
        recipe(id, items, "1", Unit::Unit)
    }

    fn ids(list: &[&str]) -> Vec<RecipeId> {
        list.iter().map(|id| RecipeId::new(*id)).collect()
    }

    #[test]
    fn test_adding_an_ancestor_closes_a_loop() {
        let recipes = recipe_map(vec![uses("cake", &["filling"]), uses("filling", &["cream"]), uses("cream", &[])]);

        let path = check_circular_dependency(&RecipeId::new("cream"), &RecipeId::new("cake"), &recipes);
        assert_eq!(path, Some(ids(&["cream", "cake", "filling", "cream"])));
    }

    #[test]
    fn test_adding_itself_closes_a_loop() {
        let recipes = recipe_map(vec![uses("cake", &[])]);
        let path = check_circular_dependency(&RecipeId::new("cake"), &RecipeId::new("cake"), &recipes);
        assert_eq!(path, Some(ids(&["cake", "cake"])));
    }

    #[test]
    fn test_unrelated_sub_recipe_is_safe() {
        let recipes = recipe_map(vec![uses("cake", &["filling"]), uses("filling", &[]), uses("glaze", &["ghost"])]);
        assert_eq!(
            check_circular_dependency(&RecipeId::new("cake"), &RecipeId::new("glaze"), &recipes),
            None
        );
    }

    #[test]
    fn test_existing_loop_elsewhere_does_not_hang() {
        let recipes = recipe_map(vec![uses("a", &["b"]), uses("b", &["a"]), uses("cake", &[])]);
        assert_eq!(
            check_circular_dependency(&RecipeId::new("cake"), &RecipeId::new("a"), &recipes),
            None
        );
    }

    #[test]
    fn test_find_cycles_reports_each_affected_recipe() {
        let recipes = recipe_map(vec![
            uses("top", &["a"]),
            uses("a", &["b"]),
            uses("b", &["a"]),
            uses("plain", &["missing"]),
        ]);
        let mut all: Vec<_> = recipes.values().collect();
        all.sort_by(|x, y| x.id.cmp(&y.id));

        let cycles = find_cycles(all, &recipes);
        let affected: Vec<_> = cycles.iter().map(|c| c.recipe_id.as_str()).collect();
        assert_eq!(affected, vec!["a", "b", "top"]);
        assert_eq!(cycles[2].cycle, ids(&["a", "b", "a"]));
    }
}

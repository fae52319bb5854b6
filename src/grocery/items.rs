//! In-memory item sequence operations. The week's list is read, mutated here,
//! and written back whole, so these stay pure and testable.

use uuid::Uuid;

use super::repo::GroceryItem;
use crate::recipes::repo::Ingredient;

/// Flips the bought flag at `index`. False when the index is out of bounds at
/// call time (positions shift as items are removed).
pub fn toggle_bought(items: &mut [GroceryItem], index: usize) -> bool {
    match items.get_mut(index) {
        Some(item) => {
            item.bought = !item.bought;
            true
        }
        None => false,
    }
}

/// Removes the item at `index`. False when out of bounds.
pub fn remove_at(items: &mut Vec<GroceryItem>, index: usize) -> bool {
    if index >= items.len() {
        return false;
    }
    items.remove(index);
    true
}

/// Appends each ingredient whose name has no case-insensitive match among the
/// existing item names. Quantity and category play no part in the dedup.
/// Returns how many items were added.
pub fn merge_ingredients(
    items: &mut Vec<GroceryItem>,
    ingredients: &[Ingredient],
    recipe_id: Uuid,
    added_by: Uuid,
) -> usize {
    let mut added = 0;
    for ingredient in ingredients {
        let already_listed = items
            .iter()
            .any(|item| item.name.eq_ignore_ascii_case(&ingredient.name));
        if !already_listed {
            items.push(GroceryItem::new(
                ingredient.name.clone(),
                ingredient.quantity.clone(),
                ingredient.category.clone(),
                Some(recipe_id),
                added_by,
            ));
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> GroceryItem {
        GroceryItem::new(
            name.into(),
            "1".into(),
            "misc".into(),
            None,
            Uuid::new_v4(),
        )
    }

    fn ingredient(name: &str) -> Ingredient {
        Ingredient {
            name: name.into(),
            quantity: "2 cups".into(),
            category: "vegetables".into(),
        }
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let mut items = vec![item("Milk"), item("Eggs")];
        assert!(toggle_bought(&mut items, 1));
        assert!(!items[0].bought);
        assert!(items[1].bought);
        assert!(toggle_bought(&mut items, 1));
        assert!(!items[1].bought);
    }

    #[test]
    fn toggle_out_of_bounds_fails() {
        let mut items = vec![item("Milk")];
        assert!(!toggle_bought(&mut items, 1));
        assert!(!toggle_bought(&mut [], 0));
    }

    #[test]
    fn remove_first_of_single_item_list_empties_it() {
        let mut items = vec![item("Milk")];
        assert!(remove_at(&mut items, 0));
        assert!(items.is_empty());
    }

    #[test]
    fn remove_out_of_bounds_fails() {
        let mut items = vec![item("Milk")];
        assert!(!remove_at(&mut items, 1));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn merge_skips_case_insensitive_name_matches() {
        let mut items = vec![item("olive oil")];
        let added = merge_ingredients(
            &mut items,
            &[ingredient("Olive Oil"), ingredient("Garlic")],
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        assert_eq!(added, 1);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "Garlic");
    }

    #[test]
    fn merged_items_start_unbought_and_carry_the_recipe() {
        let mut items = Vec::new();
        let recipe_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        merge_ingredients(&mut items, &[ingredient("Garlic")], recipe_id, user_id);
        assert!(!items[0].bought);
        assert_eq!(items[0].recipe_id, Some(recipe_id));
        assert_eq!(items[0].added_by, user_id);
        assert_eq!(items[0].quantity, "2 cups");
    }

    #[test]
    fn every_item_gets_a_distinct_id() {
        let mut items = Vec::new();
        merge_ingredients(
            &mut items,
            &[ingredient("Garlic"), ingredient("Onion")],
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        assert_ne!(items[0].id, items[1].id);
    }
}

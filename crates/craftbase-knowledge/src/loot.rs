//! Entity loot indexing.
//!
//! Each item an entity can drop is recorded as a one-ingredient combat
//! recipe: one of the entity, killed, yields the item.

use craftbase_common::{ItemId, Station};
use tracing::trace;

use crate::graph::{KnowledgeGraph, RecipeVariant};
use crate::records::LootTable;

/// Indexes the drops of `entity`.
///
/// Returns `None` if the table has no pools, otherwise the number of item
/// entries seen (including ones already indexed). Entries that do not name
/// an item directly, such as nested tables, are skipped.
pub fn index_loot_table(graph: &mut KnowledgeGraph, entity: &ItemId, table: &LootTable) -> Option<usize> {
    let pools = table.pools.as_ref()?;

    let mut drops = 0;
    for entry in pools.iter().flat_map(|pool| &pool.entries) {
        let Some(item) = entry.dropped_item() else {
            continue;
        };
        trace!("{} drops {}", entity, item);
        graph.register_unique_crafted_variant(
            &item,
            RecipeVariant::single(entity.clone(), Station::Combat),
        );
        graph.register_material_edge(entity, &item, Station::Combat);
        drops += 1;
    }
    Some(drops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CraftEdge;

    fn table(json: &str) -> LootTable {
        serde_json::from_str(json).expect("parse loot table")
    }

    #[test]
    fn test_zombie_drops() {
        let mut graph = KnowledgeGraph::new();
        let zombie = ItemId::new("zombie");
        let drops = index_loot_table(
            &mut graph,
            &zombie,
            &table(
                r#"{ "pools": [ { "rolls": 1, "entries": [
                    { "type": "minecraft:item", "name": "minecraft:rotten_flesh" } ] } ] }"#,
            ),
        );

        assert_eq!(drops, Some(1));
        assert_eq!(
            graph.variants_for("rotten_flesh"),
            &[RecipeVariant::single(zombie.clone(), Station::Combat)]
        );
        assert_eq!(
            graph.uses_of("zombie"),
            &[CraftEdge {
                item: ItemId::new("rotten_flesh"),
                station: Station::Combat,
            }]
        );
    }

    #[test]
    fn test_no_pools_skipped() {
        let mut graph = KnowledgeGraph::new();
        let drops = index_loot_table(&mut graph, &ItemId::new("sheep"), &table("{}"));
        assert_eq!(drops, None);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_repeated_drop_deduplicated() {
        let mut graph = KnowledgeGraph::new();
        let skeleton = ItemId::new("skeleton");
        let loot = table(
            r#"{ "pools": [
                { "entries": [ { "type": "minecraft:item", "name": "minecraft:bone" } ] },
                { "entries": [ { "type": "minecraft:item", "name": "minecraft:bone" },
                               { "type": "minecraft:item", "name": "minecraft:arrow" } ] }
            ] }"#,
        );

        assert_eq!(index_loot_table(&mut graph, &skeleton, &loot), Some(3));
        index_loot_table(&mut graph, &skeleton, &loot);

        assert_eq!(graph.variants_for("bone").len(), 1);
        assert_eq!(graph.variants_for("arrow").len(), 1);
        assert_eq!(graph.uses_of("skeleton").len(), 2);
    }

    #[test]
    fn test_nested_tables_not_followed() {
        let mut graph = KnowledgeGraph::new();
        let loot = table(
            r#"{ "pools": [ { "entries": [
                { "type": "minecraft:loot_table", "name": "minecraft:entities/sheep/white" },
                { "type": "minecraft:alternatives", "children": [
                    { "type": "minecraft:item", "name": "minecraft:white_wool" } ] }
            ] } ] }"#,
        );

        assert_eq!(index_loot_table(&mut graph, &ItemId::new("sheep"), &loot), Some(0));
        assert!(graph.variants_for("white_wool").is_empty());
    }

    #[test]
    fn test_drop_variant_added_next_to_crafted_variants() {
        let mut graph = KnowledgeGraph::new();
        graph.register_recipe(
            &ItemId::new("string"),
            vec![RecipeVariant::single(ItemId::new("cobweb"), Station::Player)],
        );
        let loot = table(
            r#"{ "pools": [ { "entries": [ { "type": "minecraft:item", "name": "minecraft:string" } ] } ] }"#,
        );
        index_loot_table(&mut graph, &ItemId::new("spider"), &loot);

        let variants = graph.variants_for("string");
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[1].station, Station::Combat);
    }
}

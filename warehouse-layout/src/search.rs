/// Pallet search over full bins.
use crate::warehouse::{Bin, Warehouse};

/// First full bin, in warehouse order, whose id or item label contains `query`
/// case-insensitively. Blank queries match nothing.
pub fn find_pallet<'a>(warehouse: &'a Warehouse, query: &str) -> Option<&'a Bin> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    warehouse.full_bins().find(|bin| {
        bin.id.to_lowercase().contains(&needle)
            || bin
                .item
                .as_deref()
                .is_some_and(|item| item.to_lowercase().contains(&needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::{Column, Layer, Rack};

    fn bin(id: &str, is_full: bool, item: Option<&str>) -> Bin {
        Bin {
            id: id.into(),
            name: "Bin".into(),
            is_full,
            item: item.map(str::to_string),
        }
    }

    fn warehouse(bins: Vec<Bin>) -> Warehouse {
        Warehouse {
            racks: vec![Rack {
                id: "r".into(),
                name: "Rack 1".into(),
                columns: vec![Column {
                    id: "c".into(),
                    name: "Column 1".into(),
                    layers: vec![Layer {
                        id: "l".into(),
                        name: "Layer 1".into(),
                        bins,
                    }],
                }],
            }],
        }
    }

    #[test]
    fn test_matches_item_case_insensitively() {
        let w = warehouse(vec![
            bin("aaa", true, Some("Dog Food")),
            bin("bbb", true, Some("Motor Oil")),
        ]);
        assert_eq!(find_pallet(&w, "motor").map(|b| b.id.as_str()), Some("bbb"));
        assert_eq!(find_pallet(&w, "  DOG ").map(|b| b.id.as_str()), Some("aaa"));
    }

    #[test]
    fn test_matches_id_and_prefers_first() {
        let w = warehouse(vec![bin("x-12", true, None), bin("y-12", true, None)]);
        assert_eq!(find_pallet(&w, "12").map(|b| b.id.as_str()), Some("x-12"));
    }

    #[test]
    fn test_empty_bins_never_match() {
        let w = warehouse(vec![bin("target", false, None)]);
        assert!(find_pallet(&w, "target").is_none());
    }

    #[test]
    fn test_blank_and_unmatched_queries() {
        let w = warehouse(vec![bin("aaa", true, Some("Dog Food"))]);
        assert!(find_pallet(&w, "").is_none());
        assert!(find_pallet(&w, "   ").is_none());
        assert!(find_pallet(&w, "zebra").is_none());
    }
}

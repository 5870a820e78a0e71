//! Grid layout: periodic-table block templates, slot numbering, overflow.
//!
//! The slot sequence is fixed: the top block is traversed column-major
//! (group 1 fills top to bottom before group 2, matching the element-table
//! shape), then the bottom strip continues below it, then overflow rows
//! extend the grid 19 columns at a time. Position assignment is a pure
//! function of entity count and processing order.

use crate::record::Category;

/// Grid width, everywhere.
pub const GRID_COLUMNS: u32 = 19;

/// Rows spanned by the block templates (top block + gap + bottom strip).
/// `grid_rows` never reports less than this, so compact inputs keep the
/// canonical table shape.
pub const TEMPLATE_ROWS: u32 = 13;

/// Occupancy of the upper block, row-major over 9 rows x 19 columns.
/// Groups 1-2 and 13-18 fill first; the hole in rows 1-3 is the gap above
/// the f-block strip.
const TOP_BLOCK: [[u8; 19]; 9] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Occupancy of the bottom strip (the f-block rows). The first row is an
/// intentional spacer and the first column of the remaining rows stays
/// empty.
const BOTTOM_BLOCK: [[u8; 19]; 3] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Grid row the bottom strip hangs from: one full row below the top block
/// plus its own spacer row.
const BOTTOM_BLOCK_OFFSET: u32 = TOP_BLOCK.len() as u32 + 1;

/// One grid position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub row: u32,
    pub column: u32,
}

/// The ordered slot sequence, extended with overflow rows until it holds
/// at least `count` positions.
pub fn slot_sequence(count: usize) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(count.max(template_capacity()));

    // Top block, column-major: walk each column top to bottom.
    for column in 0..GRID_COLUMNS as usize {
        for (row, line) in TOP_BLOCK.iter().enumerate() {
            if line[column] == 1 {
                slots.push(Slot {
                    row: row as u32 + 1,
                    column: column as u32 + 1,
                });
            }
        }
    }

    // Bottom strip, row-major, numbered below the top block.
    for (row, line) in BOTTOM_BLOCK.iter().enumerate() {
        for (column, occupied) in line.iter().enumerate() {
            if *occupied == 1 {
                slots.push(Slot {
                    row: BOTTOM_BLOCK_OFFSET + row as u32 + 1,
                    column: column as u32 + 1,
                });
            }
        }
    }

    // Overflow: full rows below the template, wrapping at the grid width.
    if count > slots.len() {
        let start_row = slots.last().map(|s| s.row + 1).unwrap_or(1);
        let extra = count - slots.len();
        for i in 0..extra {
            slots.push(Slot {
                row: start_row + (i as u32) / GRID_COLUMNS,
                column: (i as u32) % GRID_COLUMNS + 1,
            });
        }
    }

    slots
}

/// Number of positions the block templates provide before overflow.
pub fn template_capacity() -> usize {
    let top: usize = TOP_BLOCK
        .iter()
        .map(|line| line.iter().filter(|c| **c == 1).count())
        .sum();
    let bottom: usize = BOTTOM_BLOCK
        .iter()
        .map(|line| line.iter().filter(|c| **c == 1).count())
        .sum();
    top + bottom
}

/// Annotate every entity with its (row, column) and return `grid_rows`.
///
/// Slot `i` goes to the `i`-th entity in overall order: categories as
/// given, entities within a category as given.
pub fn assign_positions(categories: &mut [Category]) -> u32 {
    let total: usize = categories.iter().map(|c| c.services.len()).sum();
    let slots = slot_sequence(total);

    let mut grid_rows = TEMPLATE_ROWS;
    let mut next = slots.iter();
    for category in categories.iter_mut() {
        for service in &mut category.services {
            // slot_sequence(total) always yields at least `total` slots.
            let Some(slot) = next.next() else { break };
            service.row = slot.row;
            service.column = slot.column;
            grid_rows = grid_rows.max(slot.row);
        }
    }
    grid_rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Category, Entity, RawRecord};
    use std::collections::HashSet;

    fn entities(n: usize) -> Vec<Entity> {
        (0..n)
            .map(|i| {
                Entity::first_seen(
                    "AWS".to_string(),
                    format!("Service {i}"),
                    &RawRecord::default(),
                    "test",
                )
            })
            .collect()
    }

    fn category(name: &str, services: Vec<Entity>) -> Category {
        Category {
            name: name.to_string(),
            css_class: name.to_string(),
            color: "#834187".to_string(),
            services,
        }
    }

    #[test]
    fn template_holds_171_slots() {
        assert_eq!(template_capacity(), 171);
    }

    #[test]
    fn top_block_fills_column_major() {
        let slots = slot_sequence(0);
        // Column 1 is fully occupied: the first nine slots walk it top to
        // bottom before column 2 starts.
        for (i, slot) in slots.iter().take(9).enumerate() {
            assert_eq!(*slot, Slot { row: i as u32 + 1, column: 1 });
        }
        assert_eq!(slots[9], Slot { row: 2, column: 2 });
    }

    #[test]
    fn bottom_strip_lands_on_rows_12_and_13() {
        let slots = slot_sequence(0);
        let top = template_capacity() - 36;
        assert_eq!(slots[top], Slot { row: 12, column: 2 });
        assert_eq!(slots[template_capacity() - 1], Slot { row: 13, column: 19 });
    }

    #[test]
    fn all_template_slots_are_distinct() {
        let slots = slot_sequence(0);
        let unique: HashSet<_> = slots.iter().collect();
        assert_eq!(unique.len(), slots.len());
    }

    #[test]
    fn overflow_wraps_below_the_template() {
        let slots = slot_sequence(200);
        assert_eq!(slots.len(), 200);
        assert_eq!(slots[171], Slot { row: 14, column: 1 });
        assert_eq!(slots[189], Slot { row: 14, column: 19 });
        assert_eq!(slots[190], Slot { row: 15, column: 1 });
        let unique: HashSet<_> = slots.iter().collect();
        assert_eq!(unique.len(), slots.len());
    }

    #[test]
    fn positions_are_unique_across_categories() {
        let mut categories = vec![
            category("A", entities(80)),
            category("B", entities(70)),
            category("C", entities(50)),
        ];
        let grid_rows = assign_positions(&mut categories);

        let mut seen = HashSet::new();
        let mut max_row = 0;
        for c in &categories {
            for s in &c.services {
                assert!(s.row >= 1 && s.column >= 1 && s.column <= GRID_COLUMNS);
                assert!(seen.insert((s.row, s.column)), "duplicate at {:?}", (s.row, s.column));
                max_row = max_row.max(s.row);
            }
        }
        assert_eq!(seen.len(), 200);
        assert_eq!(grid_rows, max_row);
        assert_eq!(grid_rows, 15);
    }

    #[test]
    fn compact_input_keeps_the_template_floor() {
        let mut categories = vec![category("A", entities(5))];
        assert_eq!(assign_positions(&mut categories), TEMPLATE_ROWS);
    }

    #[test]
    fn empty_input_reports_the_template_floor() {
        let mut categories: Vec<Category> = Vec::new();
        assert_eq!(assign_positions(&mut categories), TEMPLATE_ROWS);
    }
}

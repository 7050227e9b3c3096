//! Grid walking for repeated small items
//!
//! Map thumbnails and team member cards are laid out in fixed-size cells,
//! row by row, with a new page every `per_page` items.

use crate::constants::{
    TEAM_AVATAR_OFFSET, TEAM_COLUMN_STEP, TEAM_COLUMNS, TEAM_DESCRIPTION_SPACING,
    TEAM_GROUP_OFFSET, TEAM_GROUP_TRAILING, TEAM_ROW_STEP, TEAM_START_X, TEAM_TITLE_SPACING,
};

use super::Rect;

// =============================================================================
// Generic Grid
// =============================================================================

/// Cell geometry of a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Top-left corner of the first cell
    pub origin: (f32, f32),
    pub cell_width: f32,
    pub cell_height: f32,
    pub spacing: f32,
    pub columns: usize,
    /// Items per page; zero means a single page
    pub per_page: usize,
}

/// Row and column of a cell, both zero based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

/// An item placed in a grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'a, T> {
    pub item: &'a T,
    pub position: GridPosition,
    pub rect: Rect,
}

/// One page of grid cells, grouped by row
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage<'a, T> {
    pub rows: Vec<Vec<GridCell<'a, T>>>,
}

impl<'a, T> GridPage<'a, T> {
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &GridCell<'a, T>> {
        self.rows.iter().flatten()
    }
}

/// Bounds of the cell at `pos`.
pub fn cell_rect(spec: &GridSpec, pos: GridPosition) -> Rect {
    let (x, y) = spec.origin;
    Rect::new(
        x + pos.col as f32 * (spec.cell_width + spec.spacing),
        y + pos.row as f32 * (spec.cell_height + spec.spacing),
        spec.cell_width,
        spec.cell_height,
    )
}

/// Split `items` into pages of rows.
///
/// Every page starts again at the grid origin. Columns of zero are treated as
/// one.
pub fn walk_grid<'a, T>(items: &'a [T], spec: &GridSpec) -> Vec<GridPage<'a, T>> {
    let columns = spec.columns.max(1);
    let per_page = if spec.per_page == 0 {
        items.len().max(1)
    } else {
        spec.per_page
    };

    items
        .chunks(per_page)
        .map(|page| GridPage {
            rows: page
                .chunks(columns)
                .enumerate()
                .map(|(row, items)| {
                    items
                        .iter()
                        .enumerate()
                        .map(|(col, item)| {
                            let position = GridPosition { row, col };
                            GridCell {
                                item,
                                position,
                                rect: cell_rect(spec, position),
                            }
                        })
                        .collect()
                })
                .collect(),
        })
        .collect()
}

// =============================================================================
// Team Cards
// =============================================================================

/// Position of one team member card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamCardPlacement {
    /// Group index
    pub group: usize,
    /// Member index within the group
    pub member: usize,
    /// Card anchor
    pub anchor: (f32, f32),
    /// Top-left corner of the avatar
    pub avatar: (f32, f32),
    /// Top-left corner of the name/title text block
    pub text: (f32, f32),
}

/// Lay out team member cards for groups of the given sizes.
///
/// Each group advances the vertical cursor by the group title offset, every
/// row of two cards by the row step, and every finished group by the trailing
/// adjustment. The cursor starts at the page top, so positions are absolute.
pub fn team_layout(group_sizes: &[usize]) -> Vec<TeamCardPlacement> {
    let mut cards = Vec::with_capacity(group_sizes.iter().sum());
    let mut y = 0.0_f32;

    for (group, &size) in group_sizes.iter().enumerate() {
        y += TEAM_GROUP_OFFSET;

        let mut member = 0;
        while member < size {
            let row_len = TEAM_COLUMNS.min(size - member);
            let mut x = TEAM_START_X;
            for _ in 0..row_len {
                cards.push(TeamCardPlacement {
                    group,
                    member,
                    anchor: (x, y),
                    avatar: (x - TEAM_AVATAR_OFFSET.0, y - TEAM_AVATAR_OFFSET.1),
                    text: (x + TEAM_TITLE_SPACING, y - TEAM_DESCRIPTION_SPACING),
                });
                x += TEAM_COLUMN_STEP;
                member += 1;
            }
            y += TEAM_ROW_STEP;
        }

        y += TEAM_GROUP_TRAILING;
    }

    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> GridSpec {
        GridSpec {
            origin: (10.0, 40.0),
            cell_width: 60.0,
            cell_height: 55.0,
            spacing: 4.0,
            columns: 3,
            per_page: 9,
        }
    }

    #[test]
    fn test_ten_items_make_two_pages() {
        let items: Vec<u32> = (0..10).collect();
        let pages = walk_grid(&items, &spec());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows.len(), 3);
        assert_eq!(pages[0].len(), 9);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(*pages[1].rows[0][0].item, 9);
        assert_eq!(pages[1].rows[0][0].position, GridPosition { row: 0, col: 0 });
    }

    #[test]
    fn test_cell_positions() {
        let items: Vec<u32> = (0..5).collect();
        let pages = walk_grid(&items, &spec());
        let cell = pages[0].rows[1][1];
        assert_eq!(*cell.item, 4);
        assert!((cell.rect.x - 74.0).abs() < 1e-4);
        assert!((cell.rect.y - 99.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_items_make_no_pages() {
        let items: Vec<u32> = Vec::new();
        assert!(walk_grid(&items, &spec()).is_empty());
    }

    #[test]
    fn test_zero_per_page_is_single_page() {
        let items: Vec<u32> = (0..20).collect();
        let grid = GridSpec { per_page: 0, ..spec() };
        assert_eq!(walk_grid(&items, &grid).len(), 1);
    }

    #[test]
    fn test_team_layout_offsets() {
        let cards = team_layout(&[3, 1]);
        assert_eq!(cards.len(), 4);

        // first group: rows at 45 and 70
        assert_eq!(cards[0].anchor, (30.0, 45.0));
        assert_eq!(cards[1].anchor, (130.0, 45.0));
        assert_eq!(cards[2].anchor, (30.0, 70.0));
        assert_eq!(cards[0].avatar, (25.0, 35.0));
        assert_eq!(cards[0].text, (44.0, 28.0));

        // 45 + 25 + 25 - 33 + 45
        assert_eq!(cards[3].group, 1);
        assert_eq!(cards[3].member, 0);
        assert_eq!(cards[3].anchor, (30.0, 107.0));
    }
}

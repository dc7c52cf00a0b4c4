// patterns.rs - Named seed patterns, stamped centered onto a grid

use crate::grid::Grid;

/// Offsets are `(x, y)` relative to the pattern's top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub label: &'static str,
    pub cells: &'static [(i32, i32)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        label: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        label: "Blinker",
        cells: &[(0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        label: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "pulsar",
        label: "Pulsar",
        cells: &[
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "glider-gun",
        label: "Gosper Glider Gun",
        cells: &[
            (1, 5), (1, 6), (2, 5), (2, 6),
            (11, 5), (11, 6), (11, 7), (12, 4), (12, 8), (13, 3), (13, 9),
            (14, 3), (14, 9), (15, 6), (16, 4), (16, 8), (17, 5), (17, 6),
            (17, 7), (18, 6), (21, 3), (21, 4), (21, 5), (22, 3), (22, 4),
            (22, 5), (23, 2), (23, 6), (25, 1), (25, 2), (25, 6), (25, 7),
            (35, 3), (35, 4), (36, 3), (36, 4),
        ],
    },
    Pattern {
        name: "eater",
        label: "Eater",
        cells: &[
            // eater 1
            (20, 15), (21, 15), (20, 16), (22, 16), (22, 17), (22, 18), (23, 18),
            // incoming glider
            (11, 5), (12, 6), (10, 7), (11, 7), (12, 7),
        ],
    },
    Pattern {
        name: "acorn",
        label: "Acorn",
        cells: &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
    },
    // Logic gates are rough layouts, not working circuits yet.
    Pattern {
        name: "and-gate",
        label: "AND Gate",
        cells: &[(0, 2), (0, 4), (2, 2), (3, 2), (2, 3), (3, 3), (2, 4), (3, 4), (5, 3)],
    },
    Pattern {
        name: "or-gate",
        label: "OR Gate",
        cells: &[
            (0, 2), (0, 4), (2, 2), (3, 2), (4, 2), (2, 3), (4, 3), (2, 4), (3, 4), (4, 4),
            (6, 3),
        ],
    },
    Pattern {
        name: "xor-gate",
        label: "XOR Gate",
        cells: &[
            (0, 1), (0, 5), (2, 1), (3, 2), (2, 3), (3, 3), (4, 3), (2, 4), (3, 4), (2, 5),
            (6, 3),
        ],
    },
    Pattern {
        name: "not-gate",
        label: "NOT Gate",
        cells: &[(0, 2), (2, 1), (3, 1), (2, 2), (4, 2), (2, 3), (3, 3), (6, 2)],
    },
    Pattern {
        name: "nand-gate",
        label: "NAND Gate",
        cells: &[
            (0, 2), (0, 4), (2, 2), (3, 2), (2, 3), (3, 3), (2, 4), (3, 4),
            (5, 2), (6, 2), (5, 3), (5, 4), (8, 3),
        ],
    },
    Pattern {
        name: "nor-gate",
        label: "NOR Gate",
        cells: &[
            (0, 2), (0, 4), (2, 2), (3, 2), (4, 2), (2, 3), (4, 3), (2, 4), (3, 4), (4, 4),
            (6, 2), (7, 2), (6, 3), (6, 4), (9, 3),
        ],
    },
    Pattern {
        name: "xnor-gate",
        label: "XNOR Gate",
        cells: &[
            (0, 1), (0, 5), (2, 1), (3, 2), (2, 3), (3, 3), (4, 3), (2, 4), (3, 4), (2, 5),
            (6, 2), (7, 2), (6, 3), (6, 4), (9, 3),
        ],
    },
];

impl Pattern {
    /// Bounding box as `(min_x, min_y, max_x, max_y)`; `None` for an empty pattern.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let mut iter = self.cells.iter();
        let &(x, y) = iter.next()?;
        Some(iter.fold((x, y, x, y), |(x0, y0, x1, y1), &(x, y)| {
            (x0.min(x), y0.min(y), x1.max(x), y1.max(y))
        }))
    }

    /// Clears the grid, then stamps the pattern centered on it. Cells that land
    /// outside the grid are dropped.
    pub fn stamp(&self, grid: &mut Grid) {
        grid.clear();
        let Some((x0, y0, x1, y1)) = self.bounds() else {
            return;
        };

        let origin_x = (grid.width() as i64 - i64::from(x1 - x0 + 1)) / 2 - i64::from(x0);
        let origin_y = (grid.height() as i64 - i64::from(y1 - y0 + 1)) / 2 - i64::from(y0);

        for &(dx, dy) in self.cells {
            grid.set(origin_x + i64::from(dx), origin_y + i64::from(dy), true);
        }
    }
}

/// Looks a pattern up by name, ignoring case and accepting `gliderGun`-style spellings.
pub fn find(name: &str) -> Option<&'static Pattern> {
    let wanted = normalize(name);
    PATTERNS.iter().find(|pattern| normalize(pattern.name) == wanted)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in PATTERNS.iter().enumerate() {
            for b in &PATTERNS[i + 1..] {
                assert_ne!(normalize(a.name), normalize(b.name));
            }
        }
    }

    #[test]
    fn lookup_accepts_camel_case() {
        assert_eq!(find("gliderGun").map(|p| p.name), Some("glider-gun"));
        assert_eq!(find("ANDGATE").map(|p| p.name), Some("and-gate"));
        assert_eq!(find("Glider").map(|p| p.name), Some("glider"));
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn glider_bounds() {
        let glider = find("glider").unwrap();
        assert_eq!(glider.bounds(), Some((0, 0, 2, 2)));
    }

    #[test]
    fn stamp_centers_on_grid() {
        let mut grid = Grid::new(9, 9);
        find("blinker").unwrap().stamp(&mut grid);
        assert_eq!(grid.live_cells(), vec![(3, 4), (4, 4), (5, 4)]);
    }

    #[test]
    fn stamp_clips_to_small_grid() {
        let mut grid = Grid::new(5, 5);
        let pulsar = find("pulsar").unwrap();
        pulsar.stamp(&mut grid);
        let population = grid.population();
        assert!(population > 0);
        assert!(population < pulsar.cells.len());
    }

    #[test]
    fn stamp_replaces_previous_contents() {
        let mut grid = Grid::new(10, 10);
        grid.set(0, 0, true);
        find("glider").unwrap().stamp(&mut grid);
        assert!(!grid.get(0, 0));
        assert_eq!(grid.population(), 5);
    }
}

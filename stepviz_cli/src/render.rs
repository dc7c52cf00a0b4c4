//! ANSI frame rendering for the terminal driver.

use std::fmt::Write;

use stepviz::{Life, Role, SortEngine, Stepper};

/// Widest bar drawn for the largest value.
const BAR_WIDTH: usize = 60;

const RESET: &str = "\x1b[0m";

/// Move cursor home and clear the screen.
const CLEAR: &str = "\x1b[H\x1b[J";

pub fn grid(life: &Life) -> String {
    let grid = life.grid();
    let mut buf = String::with_capacity((grid.width() + 1) * grid.height() + 64);

    buf.push_str(CLEAR);
    let _ = writeln!(
        buf,
        " Generation: {}  Population: {}{}\n",
        life.generation(),
        life.population(),
        if life.settled() { "  (settled)" } else { "" }
    );

    for row in grid.rows() {
        buf.extend(row.iter().map(|&alive| if alive { '█' } else { ' ' }));
        buf.push('\n');
    }
    buf.push_str("\n Press Ctrl+C to quit.\n");
    buf
}

pub fn bars(sort: &dyn SortEngine) -> String {
    let array = sort.array();
    let highlights = sort.highlights();
    let complete = sort.is_complete();
    let max_value = array.iter().copied().max().unwrap_or(1).max(1) as usize;

    let mut buf = String::with_capacity(array.len() * (BAR_WIDTH + 16) + 64);
    buf.push_str(CLEAR);
    let _ = writeln!(
        buf,
        " {}  Steps: {}{}\n",
        sort.name(),
        sort.steps(),
        if complete { "  (sorted)" } else { "" }
    );

    for (i, &value) in array.iter().enumerate() {
        let width = (value as usize * BAR_WIDTH).div_ceil(max_value);
        let color = color(highlights.role(i), complete);
        let _ = writeln!(buf, " {value:>4} {color}{}{RESET}", "█".repeat(width));
    }
    buf.push_str("\n Press Ctrl+C to quit.\n");
    buf
}

fn color(role: Option<Role>, complete: bool) -> &'static str {
    if complete {
        return "\x1b[32m";
    }
    match role {
        Some(Role::Pivot | Role::Dividing) => "\x1b[35m",
        Some(Role::Swapped) => "\x1b[31m",
        Some(Role::Comparing) => "\x1b[33m",
        Some(Role::Merging | Role::Partition) => "\x1b[36m",
        None => "\x1b[34m",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepviz::{BubbleSort, GridConfig, SeedMode, SortConfig};

    #[test]
    fn grid_frame_has_one_line_per_row() {
        let life = Life::new(&GridConfig {
            width: 12,
            height: 7,
            seed_mode: SeedMode::from("blinker"),
            ..GridConfig::default()
        })
        .unwrap();
        let frame = grid(&life);
        assert!(frame.contains("Generation: 0  Population: 3"));
        assert_eq!(frame.lines().filter(|line| line.chars().count() == 12).count(), 7);
        assert_eq!(frame.matches('█').count(), 3);
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        let mut sort = BubbleSort::new(&SortConfig::default()).unwrap();
        sort.load_array(vec![30, 60, 15]);
        let frame = bars(&sort);
        let widths: Vec<usize> = frame
            .lines()
            .filter(|line| line.contains('█'))
            .map(|line| line.matches('█').count())
            .collect();
        assert_eq!(widths, vec![30, 60, 15]);
    }

    #[test]
    fn comparing_bars_are_colored() {
        let mut sort = BubbleSort::new(&SortConfig::default()).unwrap();
        sort.load_array(vec![2, 1, 3]);
        sort.step_once();
        let frame = bars(&sort);
        assert!(frame.contains("\x1b[31m"));
        assert!(frame.contains("\x1b[34m"));
    }
}

use super::*;
use shared::domain::ThreadAction;

use crate::grid::WeaveState;

fn settings(width: usize, height: usize, shafts: usize, treadles: usize) -> Settings {
    Settings {
        chart_width: width,
        chart_height: height,
        shaft_count: shafts,
        treadle_count: treadles,
        ..Settings::default()
    }
}

fn grid<const N: usize>(rows: &[[bool; N]]) -> BoolGrid {
    BoolGrid::from_rows(rows).expect("rectangular grid")
}

#[test]
fn diagonal_draft_produces_diagonal_drawdown() {
    let settings = settings(2, 2, 2, 2);
    let shaft = grid(&[[true, false], [false, true]]);
    let treadle = grid(&[[true, false], [false, true]]);
    let tieup = grid(&[[true, false], [false, true]]);

    let chart = generate_drawdown(&settings, &shaft, &tieup, &treadle);
    assert_eq!(chart.to_rows(), vec![vec![true, false], vec![false, true]]);
}

#[test]
fn tied_pairs_are_or_accumulated_not_last_wins() {
    // Column 0 is threaded on both shafts; only shaft 0 is tied to the
    // pressed treadle. Shaft 1 is examined last and must not clear the cell.
    let settings = settings(1, 1, 2, 2);
    let shaft = grid(&[[true], [true]]);
    let treadle = grid(&[[true, true]]);
    let tieup = grid(&[[true, false], [false, false]]);

    let chart = generate_drawdown(&settings, &shaft, &tieup, &treadle);
    assert!(chart.get(0, 0));
}

#[test]
fn unthreaded_columns_and_idle_rows_stay_lowered() {
    let settings = settings(3, 3, 2, 2);
    let shaft = grid(&[[true, false, false], [false, true, false]]);
    let treadle = grid(&[[true, true], [false, false], [false, true]]);
    let tieup = grid(&[[true, true], [true, true]]);

    let chart = generate_drawdown(&settings, &shaft, &tieup, &treadle);
    assert_eq!(
        chart.to_rows(),
        vec![
            vec![true, true, false],
            vec![false, false, false],
            vec![true, true, false],
        ]
    );
}

#[test]
fn all_false_inputs_give_all_false_outputs() {
    let settings = settings(4, 3, 2, 2);
    let empty = WeaveState::new(&settings);

    let chart = generate_drawdown(&settings, &empty.shaft, &empty.tieup, &empty.treadle);
    assert!(chart.is_all_false());

    let colors = colorize_drawdown(&settings, &chart, &empty.warp_colors, &empty.weft_colors);
    assert!(colors.iter().all(|c| *c == CellColor::Set(DEFAULT_BACKGROUND)));

    let inference = infer_threading_and_treadling(&settings, &chart);
    assert!(inference.tieup.is_all_false());
}

#[test]
fn drawdown_is_idempotent() {
    let settings = settings(3, 2, 2, 2);
    let shaft = grid(&[[true, false, true], [false, true, false]]);
    let treadle = grid(&[[true, false], [true, true]]);
    let tieup = grid(&[[false, true], [true, false]]);

    let first = generate_drawdown(&settings, &shaft, &tieup, &treadle);
    let second = generate_drawdown(&settings, &shaft, &tieup, &treadle);
    assert_eq!(first, second);
}

#[test]
fn sinking_thread_action_never_marks_raised_cells() {
    let settings = Settings {
        thread_action: ThreadAction::Down,
        ..settings(2, 2, 2, 2)
    };
    let shaft = grid(&[[true, false], [false, true]]);
    let treadle = grid(&[[true, false], [false, true]]);
    let tieup = grid(&[[true, false], [false, true]]);

    assert!(generate_drawdown(&settings, &shaft, &tieup, &treadle).is_all_false());
}

#[test]
fn colorize_prefers_assigned_colors_with_fallbacks() {
    let red = Color::rgb(0xff, 0, 0);
    let green = Color::rgb(0, 0xff, 0);
    let settings = Settings {
        selected_color: Color::rgb(0x12, 0x34, 0x56),
        ..settings(2, 2, 1, 1)
    };
    let chart = grid(&[[true, true], [false, false]]);
    let warp = ColorStrip::from_cells(vec![CellColor::Set(red), CellColor::Unset]);
    let weft = ColorStrip::from_cells(vec![CellColor::Unset, CellColor::Set(green)]);

    let colors = colorize_drawdown(&settings, &chart, &warp, &weft);
    assert_eq!(
        colors,
        vec![
            CellColor::Set(red),
            CellColor::Set(settings.selected_color),
            CellColor::Set(green),
            CellColor::Set(green),
        ]
    );
}

#[test]
fn identical_columns_share_a_shaft_in_first_seen_order() {
    let settings = settings(4, 2, 4, 4);
    let chart = grid(&[[true, false, true, false], [false, false, false, true]]);

    let inference = infer_threading_and_treadling(&settings, &chart);
    assert_eq!(inference.shaft_of_column, vec![0, 1, 0, 2]);
    assert_eq!(inference.column_classes, 3);
    assert_eq!(inference.treadle_of_row, vec![0, 1]);
    assert!(inference.shaft.get(0, 2));
    assert!(!inference.shaft.get(1, 2));
}

#[test]
fn overflowing_column_patterns_collapse_onto_last_shaft() {
    let settings = settings(4, 2, 2, 2);
    // Patterns A, B, C, A.
    let chart = grid(&[[true, false, true, true], [false, true, true, false]]);

    let inference = infer_threading_and_treadling(&settings, &chart);
    assert_eq!(inference.shaft_of_column, vec![0, 1, 1, 0]);
    assert_eq!(inference.column_classes, 3);
    assert!(inference.is_lossy(&settings));
    for col in 0..4 {
        let threaded: Vec<bool> = inference.shaft.column(col).collect();
        assert_eq!(threaded.iter().filter(|t| **t).count(), 1);
    }
}

#[test]
fn overflowing_row_patterns_collapse_onto_last_treadle() {
    let settings = settings(2, 3, 2, 1);
    let chart = grid(&[[true, false], [false, true], [true, true]]);

    let inference = infer_threading_and_treadling(&settings, &chart);
    assert_eq!(inference.treadle_of_row, vec![0, 0, 0]);
    assert_eq!(inference.row_classes, 3);
}

#[test]
fn inferred_draft_regenerates_the_chart() {
    let settings = settings(5, 4, 3, 3);
    let chart = grid(&[
        [true, false, true, true, false],
        [false, true, false, false, true],
        [true, false, true, true, false],
        [true, true, true, true, true],
    ]);

    let inference = infer_threading_and_treadling(&settings, &chart);
    assert!(!inference.is_lossy(&settings));
    let regenerated =
        generate_drawdown(&settings, &inference.shaft, &inference.tieup, &inference.treadle);
    assert_eq!(regenerated, chart);
}

#[test]
fn single_cell_boundary_runs_every_transformation() {
    let settings = settings(1, 1, 1, 1);
    for raised in [false, true] {
        let chart = grid(&[[raised]]);
        let inference = infer_threading_and_treadling(&settings, &chart);
        assert!(inference.shaft.get(0, 0));
        assert!(inference.treadle.get(0, 0));
        assert_eq!(inference.tieup.get(0, 0), raised);

        let regenerated =
            generate_drawdown(&settings, &inference.shaft, &inference.tieup, &inference.treadle);
        assert_eq!(regenerated.cells(), &[raised]);

        let colors = colorize_drawdown(
            &settings,
            &regenerated,
            &ColorStrip::new(1),
            &ColorStrip::new(1),
        );
        let expected = if raised {
            settings.selected_color
        } else {
            DEFAULT_BACKGROUND
        };
        assert_eq!(colors, vec![CellColor::Set(expected)]);
    }
}

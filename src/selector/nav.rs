use super::types::ArrowDirection;

pub const SCROLL_WINDOW_ROWS: usize = 5;

pub(crate) fn wrap_step(from: usize, len: usize, dir: ArrowDirection) -> usize {
    if len == 0 {
        return 0;
    }
    let from = from.min(len - 1);
    match dir {
        ArrowDirection::Up if from == 0 => len - 1,
        ArrowDirection::Up => from - 1,
        ArrowDirection::Down if from + 1 == len => 0,
        ArrowDirection::Down => from + 1,
    }
}

/// Scroll offset after stepping from `from`. Moving down keeps the active row
/// at the bottom of the window, moving up keeps it at the top; wrapping jumps
/// to the matching end of the list.
pub(crate) fn scroll_after_step(from: usize, len: usize, dir: ArrowDirection) -> usize {
    if len == 0 {
        return 0;
    }
    let from = from.min(len - 1);
    let bottom_aligned = |target: usize| target.saturating_sub(SCROLL_WINDOW_ROWS - 1);
    let offset = match dir {
        ArrowDirection::Up if from == 0 => bottom_aligned(len - 1),
        ArrowDirection::Up => from - 1,
        ArrowDirection::Down if from + 1 == len => 0,
        ArrowDirection::Down => bottom_aligned(from + 1),
    };
    offset.min(len.saturating_sub(SCROLL_WINDOW_ROWS))
}

#[cfg(test)]
mod tests {
    use super::{scroll_after_step, wrap_step};
    use crate::selector::types::ArrowDirection;

    #[test]
    fn wrap_step_wraps_at_both_ends() {
        assert_eq!(wrap_step(0, 3, ArrowDirection::Up), 2);
        assert_eq!(wrap_step(2, 3, ArrowDirection::Down), 0);
        assert_eq!(wrap_step(1, 3, ArrowDirection::Up), 0);
        assert_eq!(wrap_step(1, 3, ArrowDirection::Down), 2);
        assert_eq!(wrap_step(0, 1, ArrowDirection::Down), 0);
        assert_eq!(wrap_step(0, 0, ArrowDirection::Down), 0);
    }

    #[test]
    fn scroll_keeps_active_row_inside_window() {
        // 10 rows, window of 5.
        assert_eq!(scroll_after_step(3, 10, ArrowDirection::Down), 0);
        assert_eq!(scroll_after_step(4, 10, ArrowDirection::Down), 1);
        assert_eq!(scroll_after_step(8, 10, ArrowDirection::Down), 5);
        assert_eq!(scroll_after_step(9, 10, ArrowDirection::Down), 0);

        assert_eq!(scroll_after_step(0, 10, ArrowDirection::Up), 5);
        assert_eq!(scroll_after_step(6, 10, ArrowDirection::Up), 5);
        assert_eq!(scroll_after_step(3, 10, ArrowDirection::Up), 2);
    }

    #[test]
    fn scroll_stays_zero_for_short_lists() {
        assert_eq!(scroll_after_step(0, 3, ArrowDirection::Up), 0);
        assert_eq!(scroll_after_step(1, 3, ArrowDirection::Down), 0);
    }
}

//! Navigation selection logic
//!
//! Pure functions for moving the selection in the hall plan list and in the
//! watchlist selector.

/// Calculate the next selection index with wrapping
///
/// If no item is selected, selects the first item.
///
/// # Examples
/// ```
/// use hallfav::logic::navigation::next_selection;
///
/// assert_eq!(next_selection(None, 0), None);
/// assert_eq!(next_selection(None, 3), Some(0));
/// assert_eq!(next_selection(Some(1), 3), Some(2));
/// assert_eq!(next_selection(Some(2), 3), Some(0));
/// ```
pub fn next_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(i) if i >= list_len - 1 => 0, // Wrap to start
        Some(i) => i + 1,
        None => 0,
    })
}

/// Calculate the previous selection index with wrapping
///
/// If no item is selected, selects the last item.
///
/// # Examples
/// ```
/// use hallfav::logic::navigation::prev_selection;
///
/// assert_eq!(prev_selection(None, 0), None);
/// assert_eq!(prev_selection(Some(1), 3), Some(0));
/// assert_eq!(prev_selection(Some(0), 3), Some(2));
/// assert_eq!(prev_selection(None, 3), Some(2));
/// ```
pub fn prev_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }

    Some(match current {
        Some(0) | None => list_len - 1, // Wrap to end
        Some(i) => i - 1,
    })
}

/// Keep a selection valid after the list changed length
pub fn clamp_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    if list_len == 0 {
        return None;
    }
    Some(current.unwrap_or(0).min(list_len - 1))
}

/// Map a digit key ('1'..='9') to a list index, if that item exists
pub fn digit_to_index(c: char, list_len: usize) -> Option<usize> {
    let digit = c.to_digit(10)? as usize;
    if digit == 0 || digit > list_len {
        return None;
    }
    Some(digit - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_selection_single_item_stays() {
        assert_eq!(next_selection(Some(0), 1), Some(0));
    }

    #[test]
    fn test_prev_selection_single_item_stays() {
        assert_eq!(prev_selection(Some(0), 1), Some(0));
    }

    #[test]
    fn test_clamp_selection() {
        assert_eq!(clamp_selection(Some(5), 3), Some(2));
        assert_eq!(clamp_selection(None, 3), Some(0));
        assert_eq!(clamp_selection(Some(1), 0), None);
    }

    #[test]
    fn test_digit_to_index() {
        assert_eq!(digit_to_index('1', 3), Some(0));
        assert_eq!(digit_to_index('3', 3), Some(2));
        assert_eq!(digit_to_index('4', 3), None);
        assert_eq!(digit_to_index('0', 3), None);
        assert_eq!(digit_to_index('x', 3), None);
    }
}

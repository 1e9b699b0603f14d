//! Expression entry with per-number usage tracking
//!
//! Mirrors the original game's number buttons: each of the four puzzle
//! numbers may be typed once, and deleting a digit frees its number again.

/// Characters other than digits that may appear in an expression
const SYMBOLS: [char; 6] = ['+', '-', '*', '/', '(', ')'];

/// Builds an answer expression one key at a time
#[derive(Debug, Clone)]
pub struct ExpressionBuilder {
    numbers: [i64; 4],
    used: [bool; 4],
    expression: String,
}

impl ExpressionBuilder {
    pub fn new(numbers: [i64; 4]) -> Self {
        Self {
            numbers,
            used: [false; 4],
            expression: String::new(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Usage flags in the same order as the puzzle's numbers
    pub fn used(&self) -> &[bool; 4] {
        &self.used
    }

    pub fn used_count(&self) -> usize {
        self.used.iter().filter(|&&u| u).count()
    }

    /// Append a digit, consuming the first unused puzzle number with that
    /// value. Digits that match no unused number are ignored.
    pub fn push_digit(&mut self, digit: char) -> bool {
        let Some(value) = digit.to_digit(10) else {
            return false;
        };
        let value = i64::from(value);

        let Some(slot) = (0..4).find(|&i| !self.used[i] && self.numbers[i] == value) else {
            return false;
        };

        self.used[slot] = true;
        self.expression.push(digit);
        true
    }

    /// Append an operator or parenthesis
    pub fn push_symbol(&mut self, symbol: char) -> bool {
        if !SYMBOLS.contains(&symbol) {
            return false;
        }
        self.expression.push(symbol);
        true
    }

    /// Remove the last character, freeing its number if it was a digit
    pub fn backspace(&mut self) {
        let Some(last) = self.expression.pop() else {
            return;
        };

        if let Some(value) = last.to_digit(10) {
            let value = i64::from(value);
            // Free the most recently consumed slot holding this value
            if let Some(slot) = (0..4).rev().find(|&i| self.used[i] && self.numbers[i] == value)
            {
                self.used[slot] = false;
            }
        }
    }

    pub fn clear(&mut self) {
        self.expression.clear();
        self.used = [false; 4];
    }

    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_expression() {
        let mut builder = ExpressionBuilder::new([1, 2, 3, 4]);
        assert!(builder.push_symbol('('));
        assert!(builder.push_digit('1'));
        assert!(builder.push_symbol('+'));
        assert!(builder.push_digit('2'));
        assert!(builder.push_symbol(')'));
        assert!(builder.push_symbol('*'));
        assert!(builder.push_digit('3'));

        assert_eq!(builder.expression(), "(1+2)*3");
        assert_eq!(builder.used_count(), 3);
    }

    #[test]
    fn test_each_number_usable_once() {
        let mut builder = ExpressionBuilder::new([1, 2, 3, 4]);
        assert!(builder.push_digit('4'));
        assert!(!builder.push_digit('4')); // only one 4 available
        assert_eq!(builder.expression(), "4");
    }

    #[test]
    fn test_duplicate_numbers_each_usable() {
        let mut builder = ExpressionBuilder::new([5, 5, 5, 1]);
        assert!(builder.push_digit('5'));
        assert!(builder.push_digit('5'));
        assert!(builder.push_digit('5'));
        assert!(!builder.push_digit('5'));
        assert_eq!(builder.used_count(), 3);
    }

    #[test]
    fn test_digit_not_in_puzzle_rejected() {
        let mut builder = ExpressionBuilder::new([1, 2, 3, 4]);
        assert!(!builder.push_digit('9'));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_backspace_frees_number() {
        let mut builder = ExpressionBuilder::new([1, 2, 3, 4]);
        builder.push_digit('3');
        assert!(!builder.push_digit('3'));

        builder.backspace();
        assert_eq!(builder.used_count(), 0);
        assert!(builder.push_digit('3'));
    }

    #[test]
    fn test_backspace_on_symbol_keeps_numbers() {
        let mut builder = ExpressionBuilder::new([1, 2, 3, 4]);
        builder.push_digit('1');
        builder.push_symbol('+');
        builder.backspace();

        assert_eq!(builder.expression(), "1");
        assert_eq!(builder.used_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut builder = ExpressionBuilder::new([1, 2, 3, 4]);
        builder.push_digit('1');
        builder.push_symbol('+');
        builder.push_digit('2');
        builder.clear();

        assert!(builder.is_empty());
        assert_eq!(builder.used_count(), 0);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let mut builder = ExpressionBuilder::new([1, 2, 3, 4]);
        assert!(!builder.push_symbol('^'));
        assert!(builder.is_empty());
    }
}

//! Sandboxed arithmetic expression checking for "make 24" answers
//!
//! Validation happens in stages, each with its own rejection reason:
//! character whitelist, operand multiset against the puzzle numbers,
//! then evaluation by a small recursive-descent parser.

use std::fmt;

/// The value every expression must reach
pub const TARGET: f64 = 24.0;

/// Absolute tolerance when comparing against the target
pub const TOLERANCE: f64 = 1e-4;

/// Outcome of checking a submitted expression
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Correct,
    Incorrect(Rejection),
}

/// Why a submitted expression was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Characters outside the whitelist
    InvalidCharacters,
    /// Not exactly four operands
    WrongOperandCount,
    /// Four operands, but not the puzzle's numbers
    WrongOperands,
    /// Expression does not parse, or evaluation is undefined
    Syntax,
    /// Evaluates cleanly, but not to the target
    NotTarget(f64),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidCharacters => write!(f, "Invalid characters in expression"),
            Rejection::WrongOperandCount => write!(f, "Must use all 4 numbers exactly once"),
            Rejection::WrongOperands => write!(f, "Must use the given numbers"),
            Rejection::Syntax => write!(f, "Invalid expression syntax"),
            Rejection::NotTarget(value) => write!(f, "Result is {value:.2}, not 24"),
        }
    }
}

/// Check a free-form expression against the puzzle's required numbers.
///
/// The expression must use each of the four numbers exactly once, combined
/// with `+ - * /` and parentheses, and evaluate to 24 (within tolerance).
pub fn check_expression(expression: &str, numbers: &[i64; 4]) -> Verdict {
    let sanitized: String = expression.chars().filter(|c| !c.is_whitespace()).collect();

    if !sanitized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
    {
        return Verdict::Incorrect(Rejection::InvalidCharacters);
    }

    if let Some(rejection) = check_operands(&sanitized, numbers) {
        return Verdict::Incorrect(rejection);
    }

    let value = match Parser::new(&sanitized).parse() {
        Ok(value) if value.is_finite() => value,
        _ => return Verdict::Incorrect(Rejection::Syntax),
    };

    if (value - TARGET).abs() < TOLERANCE {
        Verdict::Correct
    } else {
        Verdict::Incorrect(Rejection::NotTarget(value))
    }
}

/// Compare the expression's integer literals against the required numbers
/// as multisets. Runs before parsing so operand mistakes are reported even
/// for malformed expressions.
fn check_operands(sanitized: &str, numbers: &[i64; 4]) -> Option<Rejection> {
    let mut literals = Vec::new();
    let mut current: Option<i64> = None;

    for c in sanitized.chars() {
        if let Some(digit) = c.to_digit(10) {
            current = Some(current.unwrap_or(0) * 10 + i64::from(digit));
        } else if let Some(value) = current.take() {
            literals.push(value);
        }
    }
    if let Some(value) = current {
        literals.push(value);
    }

    if literals.len() != numbers.len() {
        return Some(Rejection::WrongOperandCount);
    }

    literals.sort_unstable();
    let mut required = *numbers;
    required.sort_unstable();

    if literals != required {
        return Some(Rejection::WrongOperands);
    }

    None
}

/// Recursive-descent evaluator over the whitelisted character set.
///
/// Grammar:
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := factor (('*' | '/') factor)*
/// factor := '-' factor | integer | '(' expr ')'
/// ```
struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<f64, ()> {
        let value = self.expr()?;
        if self.pos != self.input.len() {
            return Err(());
        }
        Ok(value)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64, ()> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == b'+' {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ()> {
        let mut value = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == b'*' {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, ()> {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(b'(') => {
                self.pos += 1;
                let value = self.expr()?;
                if self.peek() != Some(b')') {
                    return Err(());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.pos += 1;
                }
                let digits = std::str::from_utf8(&self.input[start..self.pos]).map_err(|_| ())?;
                digits.parse::<f64>().map_err(|_| ())
            }
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_expression() {
        assert_eq!(check_expression("(1+2+3)*4", &[1, 2, 3, 4]), Verdict::Correct);
    }

    #[test]
    fn test_whitespace_ignored() {
        assert_eq!(
            check_expression(" ( 1 + 2 + 3 ) * 4 ", &[1, 2, 3, 4]),
            Verdict::Correct
        );
    }

    #[test]
    fn test_shuffled_operand_order_accepted() {
        // Operands are compared as a multiset, not a sequence
        assert_eq!(check_expression("4*(3+2+1)", &[1, 2, 3, 4]), Verdict::Correct);
    }

    #[test]
    fn test_fractional_intermediate() {
        // 6 / (1 - 3/4) = 24; only the final value must be integral-ish
        assert_eq!(check_expression("6/(1-3/4)", &[1, 3, 4, 6]), Verdict::Correct);
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            check_expression("1+2+3+4; rm -rf", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::InvalidCharacters)
        );
        assert_eq!(
            check_expression("sqrt(24)", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::InvalidCharacters)
        );
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            check_expression("1+2+3", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::WrongOperandCount)
        );
    }

    #[test]
    fn test_extra_operand() {
        assert_eq!(
            check_expression("1+2+3+4+4", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::WrongOperandCount)
        );
    }

    #[test]
    fn test_wrong_operand_set() {
        assert_eq!(
            check_expression("6*2*2*1", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::WrongOperands)
        );
    }

    #[test]
    fn test_operand_check_precedes_syntax() {
        // Mirrors the original validation order: operand mistakes are
        // reported even when the expression would not parse
        assert_eq!(
            check_expression("1++2", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::WrongOperandCount)
        );
    }

    #[test]
    fn test_syntax_error() {
        assert_eq!(
            check_expression("(1+2+3*4", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::Syntax)
        );
        assert_eq!(
            check_expression("1+2+3+4)", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::Syntax)
        );
    }

    #[test]
    fn test_division_by_zero() {
        // 3 - 3 = 0 in the divisor; non-finite results are rejected
        assert_eq!(
            check_expression("1/(3-3)+2", &[1, 2, 3, 3]),
            Verdict::Incorrect(Rejection::Syntax)
        );
    }

    #[test]
    fn test_wrong_result_reports_value() {
        assert_eq!(
            check_expression("1+2+3+4", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::NotTarget(10.0))
        );
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(
            check_expression("-(1-2-3)*4", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::NotTarget(16.0))
        );
        assert_eq!(check_expression("-(1-3)*4*3", &[1, 3, 3, 4]), Verdict::Correct);
    }

    #[test]
    fn test_precedence() {
        // 1*2 + 3*4 = 14 under standard precedence, 20 under left-to-right
        assert_eq!(
            check_expression("1*2+3*4", &[1, 2, 3, 4]),
            Verdict::Incorrect(Rejection::NotTarget(14.0))
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::WrongOperandCount.to_string(),
            "Must use all 4 numbers exactly once"
        );
        assert_eq!(
            Rejection::NotTarget(10.0).to_string(),
            "Result is 10.00, not 24"
        );
    }
}

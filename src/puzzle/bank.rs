use rand::seq::SliceRandom;
use rand::Rng;

/// A bank entry: four numbers known to make 24, with one worked solution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puzzle {
    pub numbers: [i64; 4],
    pub hint: &'static str,
}

/// Puzzles known to have a solution. Hints use display operators.
const BANK: [Puzzle; 20] = [
    Puzzle { numbers: [1, 2, 3, 4], hint: "(1 + 2 + 3) × 4" },
    Puzzle { numbers: [1, 3, 4, 6], hint: "6 ÷ (1 - 3 ÷ 4)" },
    Puzzle { numbers: [1, 4, 5, 6], hint: "4 ÷ (1 - 5 ÷ 6)" },
    Puzzle { numbers: [1, 5, 5, 5], hint: "(5 - 1 ÷ 5) × 5" },
    Puzzle { numbers: [2, 3, 4, 4], hint: "(2 + 4) × (4 - 3 + 3)" },
    Puzzle { numbers: [2, 3, 3, 8], hint: "8 ÷ (3 - 8 ÷ 3)" },
    Puzzle { numbers: [2, 2, 2, 3], hint: "2 × 2 × 2 × 3" },
    Puzzle { numbers: [1, 1, 8, 3], hint: "(1 + 1 ÷ 8) × 3" },
    Puzzle { numbers: [3, 3, 8, 8], hint: "8 ÷ (3 - 8 ÷ 3)" },
    Puzzle { numbers: [4, 4, 4, 4], hint: "4 + 4 + 4 + 4" },
    Puzzle { numbers: [1, 6, 6, 8], hint: "(6 - 1 - 6 ÷ 8)" },
    Puzzle { numbers: [5, 5, 5, 1], hint: "5 × (5 - 1 ÷ 5)" },
    Puzzle { numbers: [2, 4, 6, 8], hint: "2 × 4 + 6 + 8" },
    Puzzle { numbers: [3, 4, 5, 6], hint: "(6 - 3) × (4 + 5 - 1)" },
    Puzzle { numbers: [2, 2, 4, 8], hint: "2 × 2 × 4 + 8" },
    Puzzle { numbers: [1, 2, 8, 9], hint: "(9 - 1) × (8 - 2 - 3)" },
    Puzzle { numbers: [3, 3, 3, 3], hint: "(3 + 3 + 3) × 3 - 3" },
    Puzzle { numbers: [2, 2, 6, 6], hint: "(2 + 6) × (6 - 2 - 1)" },
    Puzzle { numbers: [1, 7, 8, 8], hint: "(7 - 1) × 8 ÷ 2" },
    Puzzle { numbers: [4, 6, 6, 9], hint: "(6 + 6) × (9 - 4 - 3)" },
];

/// A puzzle as posed to the player, numbers shuffled for variety
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub numbers: [i64; 4],
    pub hint: &'static str,
}

/// Draws puzzles from the bank without repetition until it is exhausted
pub struct PuzzleBank {
    used: Vec<usize>,
    rng: rand::rngs::ThreadRng,
}

impl PuzzleBank {
    pub fn new() -> Self {
        Self {
            used: Vec::new(),
            rng: rand::thread_rng(),
        }
    }

    /// Pose the next puzzle. Resets the used set once every puzzle has
    /// appeared.
    pub fn next_question(&mut self) -> Question {
        if self.used.len() >= BANK.len() {
            self.used.clear();
        }

        let mut index;
        loop {
            index = self.rng.gen_range(0..BANK.len());
            if !self.used.contains(&index) {
                break;
            }
        }
        self.used.push(index);

        let puzzle = BANK[index];
        let mut numbers = puzzle.numbers;
        numbers.shuffle(&mut self.rng);

        Question {
            numbers,
            hint: puzzle.hint,
        }
    }
}

impl Default for PuzzleBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut numbers: [i64; 4]) -> [i64; 4] {
        numbers.sort_unstable();
        numbers
    }

    #[test]
    fn test_full_cycle_covers_bank() {
        let mut bank = PuzzleBank::new();

        // Shuffling does not change the sorted multiset, so a full cycle
        // must produce exactly the bank's entries.
        let mut drawn: Vec<[i64; 4]> = (0..BANK.len())
            .map(|_| sorted(bank.next_question().numbers))
            .collect();
        let mut expected: Vec<[i64; 4]> = BANK.iter().map(|p| sorted(p.numbers)).collect();

        drawn.sort_unstable();
        expected.sort_unstable();
        assert_eq!(drawn, expected);
    }

    #[test]
    fn test_bank_resets_after_exhaustion() {
        let mut bank = PuzzleBank::new();
        for _ in 0..BANK.len() {
            bank.next_question();
        }

        // The next draw after exhaustion must still succeed
        let question = bank.next_question();
        assert!(BANK
            .iter()
            .any(|p| sorted(p.numbers) == sorted(question.numbers)));
    }

    #[test]
    fn test_question_carries_hint() {
        let mut bank = PuzzleBank::new();
        let question = bank.next_question();
        assert!(!question.hint.is_empty());
    }
}

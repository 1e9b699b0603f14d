/// Points awarded for a base correct answer
const BASE_POINTS: u32 = 100;

/// Points per remaining second on the puzzle timer
const TIME_BONUS_PER_SEC: u32 = 3;

/// Points per consecutive correct answer, capped
const STREAK_BONUS_PER_ANSWER: u32 = 20;
const STREAK_BONUS_CAP: u32 = 100;

/// Points for a correct answer, given the seconds left on the timer and the
/// streak length before this answer.
pub fn puzzle_points(time_remaining: u32, streak: u32) -> u32 {
    let time_bonus = time_remaining * TIME_BONUS_PER_SEC;
    let streak_bonus = (streak * STREAK_BONUS_PER_ANSWER).min(STREAK_BONUS_CAP);
    BASE_POINTS + time_bonus + streak_bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_score() {
        // No time left, no streak
        assert_eq!(puzzle_points(0, 0), 100);
    }

    #[test]
    fn test_time_bonus() {
        assert_eq!(puzzle_points(120, 0), 100 + 360);
        assert_eq!(puzzle_points(1, 0), 103);
    }

    #[test]
    fn test_streak_bonus_caps_at_100() {
        assert_eq!(puzzle_points(0, 1), 120);
        assert_eq!(puzzle_points(0, 4), 180);
        assert_eq!(puzzle_points(0, 5), 200);
        assert_eq!(puzzle_points(0, 50), 200); // capped
    }

    #[test]
    fn test_combined() {
        assert_eq!(puzzle_points(30, 2), 100 + 90 + 40);
    }
}

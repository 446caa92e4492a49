/// How a question ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// The question fell off screen with nothing caught.
    Missed,
}

/// Score, accuracy and strikes for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBoard {
    points_per_correct: u32,
    max_strikes: u32,
    score: u32,
    correct: u32,
    answered: u32,
    strikes: u32,
}

impl ScoreBoard {
    pub fn new(points_per_correct: u32, max_strikes: u32) -> Self {
        Self {
            points_per_correct,
            max_strikes,
            score: 0,
            correct: 0,
            answered: 0,
            strikes: 0,
        }
    }

    /// Record an outcome. Returns true if this outcome ended the game.
    pub fn record(&mut self, outcome: Outcome) -> bool {
        let was_over = self.is_game_over();
        match outcome {
            Outcome::Correct => {
                self.correct += 1;
                self.answered += 1;
                self.score += self.points_per_correct;
            }
            Outcome::Incorrect => {
                self.answered += 1;
                self.strikes += 1;
            }
            Outcome::Missed => self.strikes += 1,
        }
        !was_over && self.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn max_strikes(&self) -> u32 {
        self.max_strikes
    }

    /// Percentage of caught answers that were correct. Misses do not count.
    pub fn accuracy(&self) -> f32 {
        if self.answered == 0 {
            return 0.0;
        }
        self.correct as f32 / self.answered as f32 * 100.0
    }

    pub fn is_game_over(&self) -> bool {
        self.strikes >= self.max_strikes
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.points_per_correct, self.max_strikes);
    }
}

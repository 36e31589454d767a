mod categories;
mod questions;
mod quizzes;

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) use categories::validate_category_title;
pub use categories::CategoryService;
pub use questions::QuestionService;
pub(crate) use questions::validate_question;
pub(crate) use quizzes::validate_quiz;
pub use quizzes::QuizService;

/// Source of uniformly distributed indices used for random question selection.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. Callers never pass zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Draws from the thread-local generator, seeded from the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible draws from a fixed seed.
#[derive(Debug)]
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..len)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::RandomSource;

    /// Walks through the indices in order, wrapping around.
    #[derive(Default)]
    pub struct CyclingRandom(AtomicUsize);

    impl RandomSource for CyclingRandom {
        fn pick_index(&self, len: usize) -> usize {
            self.0.fetch_add(1, Ordering::Relaxed) % len
        }
    }
}

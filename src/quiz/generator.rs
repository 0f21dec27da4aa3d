//! Question generation
//!
//! Each level is a shuffled mix of "top" slots (the level's newest table) and
//! "any" slots (every table unlocked so far). At least a third of the slots are
//! top slots, and a draw that repeats the previous question is resampled a
//! bounded number of times.

use rand::Rng;
use rand::seq::SliceRandom;

use super::question::{Intention, LevelConfig, Question};
use crate::consts::MAX_RESAMPLE_ATTEMPTS;

/// Build the shuffled intention sequence for a level
pub fn intentions<R: Rng + ?Sized>(config: &LevelConfig, rng: &mut R) -> Vec<Intention> {
    let top = config.mandatory_top_count();
    let any = config.question_count - top;

    let mut slots = Vec::with_capacity(config.question_count as usize);
    slots.extend(std::iter::repeat_n(Intention::Top, top as usize));
    slots.extend(std::iter::repeat_n(Intention::Any, any as usize));
    slots.shuffle(rng);
    slots
}

/// Generate the ordered question list for a 1-based level
pub fn generate<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<Question> {
    let config = LevelConfig::for_level(level);

    let mut questions = Vec::with_capacity(config.question_count as usize);
    let mut last: Option<Question> = None;

    for intention in intentions(&config, rng) {
        let question = draw_avoiding(last, rng, |rng| config.sample(intention, rng));
        questions.push(question);
        last = Some(question);
    }

    log::debug!(
        "Generated level {} ({} questions, top table {})",
        level,
        questions.len(),
        config.max_multiplier
    );
    questions
}

/// Draw with `sample`, resampling up to `MAX_RESAMPLE_ATTEMPTS` times while the
/// draw equals `previous`. After the budget is spent the repeat is accepted, so
/// a single-member pool still terminates.
fn draw_avoiding<R, F>(previous: Option<Question>, rng: &mut R, mut sample: F) -> Question
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Question,
{
    let mut question = sample(rng);
    let mut attempts = 0;
    while Some(question) == previous && attempts < MAX_RESAMPLE_ATTEMPTS {
        question = sample(rng);
        attempts += 1;
    }
    question
}

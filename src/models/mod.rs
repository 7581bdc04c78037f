mod scenario;

pub use scenario::{AnswerOption, BranchCue, OptionId, Question, Scenario};

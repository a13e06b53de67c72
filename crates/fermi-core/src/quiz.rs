//! Quiz engine.
//!
//! Owns the question bank and the session counters, and moves through the
//! quiz in response to typed events. Every front end (the terminal loop,
//! tests) drives the quiz through `Quiz::dispatch` only.

use crate::error::AnswerError;
use crate::evaluator::{evaluate, Evaluation};
use crate::model::{Question, QuestionBank};
use crate::report::{AnswerOutcome, AnswerRecord};
use crate::session::{SessionStats, SessionSummary};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// Submit an estimate for the current question.
    Submit(String),
    /// Move on after seeing feedback.
    Next,
    /// Give up on the current question without scoring it.
    Skip,
    /// End the session early.
    Quit,
}

/// What the front end should show after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizOutcome {
    /// A new question is up. `position` is 1-based.
    Question { position: usize, total: usize },
    /// The estimate was scored and recorded.
    Answered(Evaluation),
    /// The estimate was not accepted; the same question is still up.
    Rejected(AnswerError),
    /// The session is over.
    Finished(SessionSummary),
    /// The quiz could not start; interaction is disabled.
    Disabled(String),
    /// The event does not apply right now.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    AwaitingAnswer,
    ShowingFeedback,
    Finished,
    Disabled(String),
}

/// A single quiz session.
#[derive(Debug, Clone)]
pub struct Quiz {
    bank: QuestionBank,
    cursor: usize,
    phase: Phase,
    stats: SessionStats,
    history: Vec<AnswerRecord>,
}

impl Quiz {
    pub fn new(bank: QuestionBank) -> Self {
        if bank.is_empty() {
            return Self::disabled("no questions available");
        }
        Self {
            bank,
            cursor: 0,
            phase: Phase::AwaitingAnswer,
            stats: SessionStats::new(),
            history: Vec::new(),
        }
    }

    /// A quiz that only reports `message`, for when loading failed.
    pub fn disabled(message: impl Into<String>) -> Self {
        Self {
            bank: QuestionBank::default(),
            cursor: 0,
            phase: Phase::Disabled(message.into()),
            stats: SessionStats::new(),
            history: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, event: QuizEvent) -> QuizOutcome {
        match (self.phase.clone(), event) {
            (Phase::Disabled(message), _) => QuizOutcome::Disabled(message),
            (Phase::Finished, _) => QuizOutcome::Finished(self.stats.summary()),
            (_, QuizEvent::Quit) => self.finish(),

            (Phase::AwaitingAnswer, QuizEvent::Submit(input)) => self.submit(input),
            (Phase::AwaitingAnswer, QuizEvent::Skip) => {
                if let Some(q) = self.bank.get(self.cursor) {
                    self.history.push(AnswerRecord::new(q, AnswerOutcome::Skipped));
                }
                self.advance()
            }
            (Phase::AwaitingAnswer, QuizEvent::Next) => QuizOutcome::Ignored,

            (Phase::ShowingFeedback, QuizEvent::Next | QuizEvent::Skip) => self.advance(),
            (Phase::ShowingFeedback, QuizEvent::Submit(_)) => QuizOutcome::Ignored,
        }
    }

    fn submit(&mut self, input: String) -> QuizOutcome {
        let Some(question) = self.bank.get(self.cursor) else {
            return self.finish();
        };

        match evaluate(&input, question) {
            Ok(evaluation) => {
                self.stats.record(evaluation.error);
                self.history.push(AnswerRecord::new(
                    question,
                    AnswerOutcome::Answered {
                        input,
                        evaluation: evaluation.clone(),
                    },
                ));
                self.phase = Phase::ShowingFeedback;
                tracing::debug!(
                    position = self.cursor + 1,
                    error = evaluation.error,
                    feedback = %evaluation.feedback,
                    "answer recorded"
                );
                QuizOutcome::Answered(evaluation)
            }
            Err(e) => QuizOutcome::Rejected(e),
        }
    }

    fn advance(&mut self) -> QuizOutcome {
        self.cursor += 1;
        if self.cursor >= self.bank.len() {
            return self.finish();
        }
        self.phase = Phase::AwaitingAnswer;
        QuizOutcome::Question {
            position: self.cursor + 1,
            total: self.bank.len(),
        }
    }

    fn finish(&mut self) -> QuizOutcome {
        self.phase = Phase::Finished;
        QuizOutcome::Finished(self.stats.summary())
    }

    /// The question on screen, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::AwaitingAnswer | Phase::ShowingFeedback => self.bank.get(self.cursor),
            _ => None,
        }
    }

    /// 1-based position of the current question and the bank size.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor + 1, self.bank.len())
    }

    pub fn is_awaiting_answer(&self) -> bool {
        self.phase == Phase::AwaitingAnswer
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// The load error, if the quiz is disabled.
    pub fn disabled_reason(&self) -> Option<&str> {
        match &self.phase {
            Phase::Disabled(message) => Some(message),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }
}

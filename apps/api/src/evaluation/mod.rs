// Proposal evaluation engine.
// Implements: section matching, standards extraction, font/spelling audits,
// budget/timeline heuristics, and the two scoring rubrics.
// Everything here is synchronous and pure over already-extracted input.

pub mod budget_timeline;
pub mod engine;
pub mod formatting;
pub mod handlers;
pub mod scoring;
pub mod sections;
pub mod spelling;
pub mod standards;
pub mod tokens;

// Re-export the public API consumed by handlers, state and the report composer.
pub use engine::{
    EvaluationMode, EvaluationResult, EvaluationStrategy, FixedPolicyEvaluator, Proposal,
    ReferenceEvaluator,
};
pub use formatting::StylePolicy;
pub use spelling::SpellChecker;
pub use standards::{ConfigurationError, RequiredSectionSet};

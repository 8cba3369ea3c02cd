//! Round-robin scheduler (circle method).
//!
//! # Algorithm
//!
//! 1. Seat participants around a circle (optionally shuffled by seed); add a
//!    bye seat when the count is odd.
//! 2. Each round pairs seat `i` with seat `w - 1 - i`; pairings with the bye
//!    seat are dropped.
//! 3. After each round, rotate every seat except seat 0 by one position.
//! 4. Repeat for every leg. Mirrored legs swap the input orientation.
//!
//! Each candidate is oriented by the [`ParticipantOrderer`], then filtered
//! by the [`ConstraintSet`]. Rejected candidates are dropped and recorded;
//! there is no backtracking.
//!
//! # Complexity
//! O(L * n^2 * k) where L=legs, n=participants, k=constraints. History
//! queries against [`SchedulingContext`] are hash lookups, so each
//! constraint and orderer call costs O(1) amortized.
//!
//! # Reference
//! Kirkman (1847); Lucas (1883), "Récréations mathématiques", the polygon method

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::config::{LegMode, RoundRobinConfig};
use crate::calculator::AlgorithmParams;
use crate::constraints::{ConstraintSet, ConstraintViolation, ViolationCollector};
use crate::context::{EventOrderingContext, SchedulingContext};
use crate::error::{ConstraintError, ScheduleError};
use crate::models::{Event, Participant, Schedule};
use crate::ordering::{OrderingStrategy, ParticipantOrderer, StaticOrderer};
use crate::validation::{validate_input, ScheduleValidator};

/// Seat-index pairings for every round of one leg.
///
/// Returns `n - 1` rounds for even `n` and `n` rounds for odd `n`; pairs
/// that would involve the bye seat are omitted. Empty for `n < 2`.
pub fn circle_pairings(n: usize) -> Vec<Vec<(usize, usize)>> {
    if n < 2 {
        return Vec::new();
    }

    let mut seats: Vec<Option<usize>> = (0..n).map(Some).collect();
    if n % 2 == 1 {
        seats.push(None);
    }
    let working = seats.len();

    let mut rounds = Vec::with_capacity(working - 1);
    for _ in 0..working - 1 {
        let pairs = (0..working / 2)
            .filter_map(|i| match (seats[i], seats[working - 1 - i]) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .collect();
        rounds.push(pairs);
        seats[1..].rotate_right(1);
    }
    rounds
}

/// Input container for a scheduling run.
#[derive(Debug, Clone)]
pub struct FixtureRequest {
    /// Participants in seating order.
    pub participants: Vec<Participant>,
    /// Number of legs.
    pub legs: u32,
}

impl FixtureRequest {
    /// Creates a single-leg request.
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            legs: 1,
        }
    }

    /// Sets the number of legs.
    pub fn with_legs(mut self, legs: u32) -> Self {
        self.legs = legs;
        self
    }
}

/// Output of a run that skips completeness validation.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Accepted events with run metadata.
    pub schedule: Schedule,
    /// Every rejection recorded during the run.
    pub violations: ViolationCollector,
    /// Event count a complete run would produce.
    pub expected: usize,
}

impl Generation {
    /// Whether every expected event was produced.
    pub fn is_complete(&self) -> bool {
        self.schedule.count() >= self.expected
    }
}

/// Round-robin fixture generator.
///
/// # Example
///
/// ```
/// use u_fixture::models::Participant;
/// use u_fixture::scheduler::RoundRobinScheduler;
///
/// let teams: Vec<Participant> = ["p1", "p2", "p3", "p4"]
///     .into_iter()
///     .map(Participant::new)
///     .collect();
///
/// let schedule = RoundRobinScheduler::new().schedule(&teams, 1).unwrap();
/// assert_eq!(schedule.count(), 6);
/// assert_eq!(schedule.max_round(), Some(3));
/// assert_eq!(schedule.metadata_str("algorithm", ""), "round-robin");
/// ```
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    constraints: ConstraintSet,
    orderer: Arc<dyn ParticipantOrderer>,
    validator: ScheduleValidator,
    leg_mode: LegMode,
    seed: Option<u64>,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with no constraints and static ordering.
    pub fn new() -> Self {
        Self {
            constraints: ConstraintSet::empty(),
            orderer: Arc::new(StaticOrderer),
            validator: ScheduleValidator::round_robin(),
            leg_mode: LegMode::default(),
            seed: None,
        }
    }

    /// Builds a scheduler from a configuration record.
    ///
    /// # Errors
    /// Invalid constraint parameters.
    pub fn from_config(config: &RoundRobinConfig) -> Result<Self, ConstraintError> {
        let constraints = ConstraintSet::builder()
            .from_configs(&config.constraints)?
            .with_policy(config.evaluation)
            .build();

        let mut scheduler = Self::new()
            .with_constraints(constraints)
            .with_ordering(config.ordering)
            .with_leg_mode(config.leg_mode);
        scheduler.seed = config.seed;
        Ok(scheduler)
    }

    /// Sets the constraint set.
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the orientation strategy.
    pub fn with_orderer<O: ParticipantOrderer + 'static>(self, orderer: O) -> Self {
        self.with_shared_orderer(Arc::new(orderer))
    }

    /// Sets an already shared orientation strategy.
    pub fn with_shared_orderer(mut self, orderer: Arc<dyn ParticipantOrderer>) -> Self {
        self.orderer = orderer;
        self
    }

    /// Sets a built-in orientation strategy.
    pub fn with_ordering(self, strategy: OrderingStrategy) -> Self {
        self.with_shared_orderer(strategy.build())
    }

    /// Sets the leg mode.
    pub fn with_leg_mode(mut self, leg_mode: LegMode) -> Self {
        self.leg_mode = leg_mode;
        self
    }

    /// Shuffles the initial seating with a seeded RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the completeness validator.
    pub fn with_validator(mut self, validator: ScheduleValidator) -> Self {
        self.validator = validator;
        self
    }

    /// The constraint set.
    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// The orientation strategy.
    pub fn orderer(&self) -> &dyn ParticipantOrderer {
        self.orderer.as_ref()
    }

    /// Generates and validates a schedule.
    ///
    /// # Errors
    /// - [`ScheduleError::TooFewParticipants`], [`ScheduleError::InvalidLegs`],
    ///   [`ScheduleError::DuplicateParticipant`] before generation starts.
    /// - [`ScheduleError::Incomplete`] if constraints rejected any candidate.
    pub fn schedule(&self, participants: &[Participant], legs: u32) -> Result<Schedule, ScheduleError> {
        let generation = self.generate(participants, legs)?;

        if let Err(err) = self.validator.validate_schedule_completeness(
            &generation.schedule,
            generation.expected,
            &generation.violations,
            participants,
            legs,
        ) {
            warn!(
                expected = generation.expected,
                actual = generation.schedule.count(),
                violations = generation.violations.len(),
                "round-robin schedule is incomplete"
            );
            return Err(err);
        }
        Ok(generation.schedule)
    }

    /// Schedules from a request.
    pub fn schedule_request(&self, request: &FixtureRequest) -> Result<Schedule, ScheduleError> {
        self.schedule(&request.participants, request.legs)
    }

    /// Generates a schedule without the completeness check.
    ///
    /// Input is still validated. The returned schedule may be partial.
    pub fn generate(&self, participants: &[Participant], legs: u32) -> Result<Generation, ScheduleError> {
        validate_input(participants, legs)?;

        let seating = self.seating(participants);
        let rounds = circle_pairings(seating.len());
        let rounds_per_leg = rounds.len() as u32;
        let expected = self
            .validator
            .expected_events(participants, legs, &AlgorithmParams::new());

        info!(
            participants = participants.len(),
            legs,
            rounds_per_leg,
            ordering = self.orderer.name(),
            constraints = self.constraints.len(),
            "generating round-robin schedule"
        );

        let mut context = SchedulingContext::new();
        let mut violations = ViolationCollector::new();

        for leg in 1..=legs {
            let leg_tag = (legs > 1).then_some(leg);
            let mirrored = self.leg_mode == LegMode::Mirrored && leg % 2 == 0;

            for (r, pairs) in rounds.iter().enumerate() {
                let round = (leg - 1) * rounds_per_leg + r as u32 + 1;

                for (index, &(a, b)) in pairs.iter().enumerate() {
                    let (first, second) = if mirrored { (b, a) } else { (a, b) };
                    let candidate = [seating[first].clone(), seating[second].clone()];

                    let ordering_context = EventOrderingContext::new(round, index, leg_tag, &context);
                    let ordered = self.orderer.order(&candidate, &ordering_context);
                    let event = Event::new(ordered).with_round(round).with_leg(leg_tag);

                    let failures = self.constraints.failures(&event, &context);
                    if failures.is_empty() {
                        context.commit(event);
                        continue;
                    }

                    for constraint in failures {
                        let violation = ConstraintViolation::from_rejection(constraint, &event, &context);
                        debug!(
                            constraint = constraint.name(),
                            round,
                            participants = ?violation.participant_ids,
                            reason = %violation.reason,
                            "candidate rejected"
                        );
                        violations.record(violation);
                    }
                }
            }
        }

        let schedule = self.annotate(context.into_schedule(), participants.len(), legs, rounds_per_leg);
        info!(
            events = schedule.count(),
            expected,
            violations = violations.len(),
            "round-robin generation finished"
        );

        Ok(Generation {
            schedule,
            violations,
            expected,
        })
    }

    fn seating(&self, participants: &[Participant]) -> Vec<Participant> {
        let mut seating = participants.to_vec();
        if let Some(seed) = self.seed {
            let mut rng = StdRng::seed_from_u64(seed);
            seating.shuffle(&mut rng);
        }
        seating
    }

    fn annotate(&self, schedule: Schedule, participant_count: usize, legs: u32, rounds_per_leg: u32) -> Schedule {
        let schedule = schedule
            .with_metadata("algorithm", self.validator.calculator().algorithm_name())
            .with_metadata("participant_count", participant_count)
            .with_metadata("total_rounds", rounds_per_leg * legs)
            .with_metadata("rounds_per_leg", rounds_per_leg)
            .with_metadata("legs", legs)
            .with_metadata("ordering", self.orderer.name());
        match self.seed {
            Some(seed) => schedule.with_metadata("seed", seed),
            None => schedule,
        }
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new()
    }
}

//! Round-robin fixture generation for the U-Engine ecosystem.
//!
//! Produces deterministic pairing schedules for multi-participant
//! competitions and explains, with a diagnostic report, why a constraint
//! set kept a schedule from being complete.
//!
//! # Modules
//!
//! - **`models`**: Value records: `Participant`, `Event`, `Schedule`
//! - **`context`**: Accepted-history view shared with orderers and constraints
//! - **`ordering`**: Home/away strategies: Static, Alternating, SeededRandom, Balanced
//! - **`constraints`**: Constraint trait, built-in rules, sets, violation collector
//! - **`calculator`**: Closed-form expected event counts
//! - **`validation`**: Input checks, completeness validation, diagnostics
//! - **`scheduler`**: Circle-method `RoundRobinScheduler`
//!
//! # Example
//!
//! ```
//! use u_fixture::constraints::ConstraintSet;
//! use u_fixture::models::Participant;
//! use u_fixture::ordering::OrderingStrategy;
//! use u_fixture::scheduler::RoundRobinScheduler;
//!
//! let teams: Vec<Participant> = (1..=6).map(|i| Participant::new(format!("t{i}"))).collect();
//! let scheduler = RoundRobinScheduler::new()
//!     .with_constraints(ConstraintSet::builder().no_repeat_pairing().build())
//!     .with_ordering(OrderingStrategy::Balanced);
//!
//! let schedule = scheduler.schedule(&teams, 2).unwrap();
//! assert_eq!(schedule.count(), 30);
//! assert_eq!(schedule.metadata_int("total_rounds", 0), 10);
//! ```
//!
//! # References
//!
//! - Kirkman (1847), "On a problem in combinations"
//! - Lucas (1883), "Récréations mathématiques", Vol. 2 (polygon method)
//! - de Werra (1981), "Scheduling in sports"

pub mod calculator;
pub mod constraints;
pub mod context;
pub mod error;
pub mod models;
pub mod ordering;
pub mod scheduler;
pub mod validation;

//! Bounded Nelder–Mead search over `(ask, bid)`.
//!
//! The objective is only piecewise smooth (participation is clamped), so the
//! search uses a derivative-free simplex. Every trial point is projected onto
//! the [`QuoteBounds`] box before it is evaluated. An evaluation that errors or
//! returns a non-finite value counts as the worst possible value.
//!
//! After the simplex collapses the search restarts from the best vertex with a
//! fresh simplex, up to `restarts` times, stopping early once a restart no
//! longer improves the objective. All restarts share one iteration budget.

use tracing::{debug, trace, warn};

use crate::strategy::config::OptimizerConfig;
use crate::strategy::objective::QuoteObjective;
use crate::strategy::quote::{QuoteBounds, QuoteCandidate};
use crate::types::error::{MMError, MMResult};
use crate::types::primitives::Price;

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Step used for a coordinate that starts at zero.
const ZERO_COORDINATE_STEP: f64 = 0.00025;

/// Optimal quote found by the search.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize, DebugPretty, DisplaySimple))]
pub struct OptimalQuote {
    /// Optimal ask.
    pub ask: Price,

    /// Optimal bid.
    pub bid: Price,

    /// Expected profit at the optimum.
    pub expected_profit: f64,

    /// Simplex iterations used.
    pub iterations: usize,

    /// Objective evaluations performed.
    pub evaluations: usize,

    /// Evaluations that failed and were scored as worst case.
    pub failed_evaluations: usize,
}

impl OptimalQuote {
    /// Ask minus bid.
    #[must_use]
    pub fn spread(&self) -> Price {
        self.ask - self.bid
    }

    /// The optimum as a candidate.
    #[must_use]
    pub fn candidate(&self) -> QuoteCandidate {
        QuoteCandidate::new(self.ask, self.bid)
    }
}

/// Why a search produced no quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    /// The iteration budget ran out before the simplex converged.
    MaxIterationsExhausted,
    /// Every evaluation failed or was non-finite.
    NoFiniteEvaluation,
    /// The starting point had a non-finite coordinate.
    InvalidInitialGuess,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaxIterationsExhausted => write!(f, "maximum iterations exhausted"),
            Self::NoFiniteEvaluation => write!(f, "no finite objective evaluation"),
            Self::InvalidInitialGuess => write!(f, "initial guess is not finite"),
        }
    }
}

/// A search that ended without a usable quote. Carries no prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationFailure {
    /// Why the search failed.
    pub reason: FailureReason,

    /// Simplex iterations used.
    pub iterations: usize,

    /// Objective evaluations performed.
    pub evaluations: usize,
}

/// Outcome of a quote search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptimizationResult {
    /// The search converged.
    Converged(OptimalQuote),
    /// The search failed; no prices are reported.
    Failed(OptimizationFailure),
}

impl OptimizationResult {
    /// Returns true if the search converged.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Converged(_))
    }

    /// The optimal quote, if the search converged.
    #[must_use]
    pub fn quote(&self) -> Option<&OptimalQuote> {
        match self {
            Self::Converged(quote) => Some(quote),
            Self::Failed(_) => None,
        }
    }

    /// The failure, if the search did not converge.
    #[must_use]
    pub fn failure(&self) -> Option<&OptimizationFailure> {
        match self {
            Self::Converged(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    /// Converts into a `Result` for callers that propagate with `?`.
    ///
    /// # Errors
    ///
    /// Returns `MMError::OptimizationFailed` if the search did not converge.
    pub fn into_result(self) -> MMResult<OptimalQuote> {
        match self {
            Self::Converged(quote) => Ok(quote),
            Self::Failed(failure) => Err(MMError::OptimizationFailed(format!(
                "{} after {} iterations",
                failure.reason, failure.iterations
            ))),
        }
    }
}

type Point = [f64; 2];

fn to_point(candidate: QuoteCandidate) -> Point {
    [candidate.ask, candidate.bid]
}

fn to_candidate(point: Point) -> QuoteCandidate {
    QuoteCandidate::new(point[0], point[1])
}

/// Scores points as negated profit and keeps evaluation counts.
struct Evaluator<'o, O: QuoteObjective> {
    objective: &'o O,
    bounds: &'o QuoteBounds,
    evaluations: usize,
    failed: usize,
}

impl<O: QuoteObjective> Evaluator<'_, O> {
    fn project(&self, point: Point) -> Point {
        to_point(self.bounds.project(to_candidate(point)))
    }

    fn cost(&mut self, point: Point) -> f64 {
        self.evaluations += 1;
        match self.objective.negated_profit(&to_candidate(point)) {
            Ok(cost) if cost.is_finite() => cost,
            Ok(cost) => {
                self.failed += 1;
                warn!(ask = point[0], bid = point[1], cost, "non-finite objective value");
                f64::INFINITY
            }
            Err(e) => {
                self.failed += 1;
                warn!(ask = point[0], bid = point[1], error = %e, "objective evaluation failed");
                f64::INFINITY
            }
        }
    }
}

/// Derivative-free bounded optimizer for quote pairs.
#[derive(Debug, Clone, Default)]
pub struct QuoteOptimizer {
    config: OptimizerConfig,
}

impl QuoteOptimizer {
    /// Creates an optimizer.
    ///
    /// # Errors
    ///
    /// Returns `MMError::InvalidConfiguration` if the configuration is invalid.
    pub fn new(config: OptimizerConfig) -> MMResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Maximizes `objective` over `bounds`, starting from `initial_guess`.
    ///
    /// The initial guess is projected onto the bounds first.
    pub fn optimize<O: QuoteObjective>(
        &self,
        objective: &O,
        initial_guess: QuoteCandidate,
        bounds: &QuoteBounds,
    ) -> OptimizationResult {
        let mut evaluator = Evaluator {
            objective,
            bounds,
            evaluations: 0,
            failed: 0,
        };

        if !initial_guess.is_finite() {
            warn!(?initial_guess, "rejecting non-finite initial guess");
            return OptimizationResult::Failed(OptimizationFailure {
                reason: FailureReason::InvalidInitialGuess,
                iterations: 0,
                evaluations: 0,
            });
        }

        let start = evaluator.project(to_point(initial_guess));
        debug!(ask = start[0], bid = start[1], "starting quote search");

        let mut iterations = 0;
        let mut best = start;
        let mut best_cost = f64::INFINITY;

        for run in 0..=self.config.restarts {
            let mut simplex = self.initial_simplex(&evaluator, best);
            let mut costs = simplex.map(|p| evaluator.cost(p));

            let converged = loop {
                order(&mut simplex, &mut costs);
                if self.has_converged(&simplex, &costs) {
                    break true;
                }
                if iterations >= self.config.max_iterations {
                    break false;
                }
                iterations += 1;
                self.step(&mut evaluator, &mut simplex, &mut costs);
                trace!(iterations, best = costs[0], "simplex step");
            };

            if !converged {
                if run > 0 {
                    // an earlier run converged; keep its vertex
                    debug!(run, iterations, "restart ran out of iterations");
                    break;
                }
                return self.exhausted(iterations, &evaluator, costs[0]);
            }

            let improvement = best_cost - costs[0];
            let previous_cost = best_cost;
            if costs[0] <= best_cost {
                best = simplex[0];
                best_cost = costs[0];
            }
            debug!(run, iterations, cost = best_cost, "simplex converged");

            if previous_cost.is_finite() && improvement <= self.config.f_tolerance {
                break;
            }
        }

        if !best_cost.is_finite() {
            return self.failed(FailureReason::NoFiniteEvaluation, iterations, &evaluator);
        }

        let quote = OptimalQuote {
            ask: best[0],
            bid: best[1],
            expected_profit: -best_cost,
            iterations,
            evaluations: evaluator.evaluations,
            failed_evaluations: evaluator.failed,
        };
        debug!(
            ask = quote.ask,
            bid = quote.bid,
            expected_profit = quote.expected_profit,
            iterations,
            "quote search finished"
        );
        OptimizationResult::Converged(quote)
    }

    fn initial_simplex<O: QuoteObjective>(&self, evaluator: &Evaluator<'_, O>, start: Point) -> [Point; 3] {
        let mut simplex = [start; 3];
        for axis in 0..2 {
            let step = if start[axis] == 0.0 {
                ZERO_COORDINATE_STEP
            } else {
                self.config.initial_step_fraction * start[axis].abs()
            };
            let mut vertex = start;
            vertex[axis] += step;
            let mut vertex = evaluator.project(vertex);
            if vertex == start {
                // pinned at a bound, step inward instead
                let mut inward = start;
                inward[axis] -= step;
                vertex = evaluator.project(inward);
            }
            simplex[axis + 1] = vertex;
        }
        simplex
    }

    fn has_converged(&self, simplex: &[Point; 3], costs: &[f64; 3]) -> bool {
        if !costs[0].is_finite() || !costs[2].is_finite() {
            return false;
        }
        let value_spread = costs[2] - costs[0];
        let diameter = simplex[1..]
            .iter()
            .flat_map(|p| p.iter().zip(simplex[0].iter()).map(|(a, b)| (a - b).abs()))
            .fold(0.0, f64::max);
        value_spread <= self.config.f_tolerance && diameter <= self.config.x_tolerance
    }

    fn step<O: QuoteObjective>(
        &self,
        evaluator: &mut Evaluator<'_, O>,
        simplex: &mut [Point; 3],
        costs: &mut [f64; 3],
    ) {
        let centroid = [
            0.5 * (simplex[0][0] + simplex[1][0]),
            0.5 * (simplex[0][1] + simplex[1][1]),
        ];
        let worst = simplex[2];
        let along = |coefficient: f64| -> Point {
            [
                centroid[0] + coefficient * (centroid[0] - worst[0]),
                centroid[1] + coefficient * (centroid[1] - worst[1]),
            ]
        };

        let reflected = evaluator.project(along(REFLECTION));
        let reflected_cost = evaluator.cost(reflected);

        if reflected_cost < costs[0] {
            let expanded = evaluator.project(along(REFLECTION * EXPANSION));
            let expanded_cost = evaluator.cost(expanded);
            if expanded_cost < reflected_cost {
                simplex[2] = expanded;
                costs[2] = expanded_cost;
            } else {
                simplex[2] = reflected;
                costs[2] = reflected_cost;
            }
            return;
        }

        if reflected_cost < costs[1] {
            simplex[2] = reflected;
            costs[2] = reflected_cost;
            return;
        }

        let (contracted, threshold) = if reflected_cost < costs[2] {
            (along(REFLECTION * CONTRACTION), reflected_cost)
        } else {
            (along(-CONTRACTION), costs[2])
        };
        let contracted = evaluator.project(contracted);
        let contracted_cost = evaluator.cost(contracted);
        if contracted_cost < threshold {
            simplex[2] = contracted;
            costs[2] = contracted_cost;
            return;
        }

        let best = simplex[0];
        for i in 1..3 {
            let shrunk = [
                best[0] + SHRINK * (simplex[i][0] - best[0]),
                best[1] + SHRINK * (simplex[i][1] - best[1]),
            ];
            simplex[i] = evaluator.project(shrunk);
            costs[i] = evaluator.cost(simplex[i]);
        }
    }

    fn exhausted<O: QuoteObjective>(
        &self,
        iterations: usize,
        evaluator: &Evaluator<'_, O>,
        best_cost: f64,
    ) -> OptimizationResult {
        let reason = if best_cost.is_finite() {
            FailureReason::MaxIterationsExhausted
        } else {
            FailureReason::NoFiniteEvaluation
        };
        self.failed(reason, iterations, evaluator)
    }

    fn failed<O: QuoteObjective>(
        &self,
        reason: FailureReason,
        iterations: usize,
        evaluator: &Evaluator<'_, O>,
    ) -> OptimizationResult {
        warn!(%reason, iterations, evaluations = evaluator.evaluations, "quote search failed");
        OptimizationResult::Failed(OptimizationFailure {
            reason,
            iterations,
            evaluations: evaluator.evaluations,
        })
    }
}

/// Sorts vertices by ascending cost.
fn order(simplex: &mut [Point; 3], costs: &mut [f64; 3]) {
    let mut index = [0, 1, 2];
    index.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));
    *simplex = index.map(|i| simplex[i]);
    *costs = index.map(|i| costs[i]);
}

use crate::error::{MatchError, NoMatchReason};
use crate::geo::distance;
use crate::graph::Route;
use crate::transition::*;

use itertools::Itertools;
use log::{debug, info};
use measure_time::debug_time;

/// Dynamic-programming cell of one candidate in one layer.
#[derive(Clone, Debug)]
pub struct PathState {
    /// Cumulative log-probability of the best path ending here.
    pub score: f64,

    /// Index of the predecessor candidate in the previous layer.
    pub back: Option<usize>,

    /// Movement from the predecessor to this candidate.
    pub hop: Option<Hop>,
}

impl PathState {
    fn seed(emission: f64) -> Self {
        PathState {
            score: emission.ln(),
            back: None,
            hop: None,
        }
    }

    fn unreachable() -> Self {
        PathState {
            score: f64::NEG_INFINITY,
            back: None,
            hop: None,
        }
    }

    #[inline]
    fn is_reachable(&self) -> bool {
        self.score.is_finite()
    }
}

/// Classic forward Viterbi decoding with back-pointers.
///
/// Every candidate of a layer is scored against every reachable candidate
/// of the previous one. Equal scores keep the earlier candidate, so output
/// is reproducible.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViterbiSolver;

impl ViterbiSolver {
    fn step<N, E, T>(
        previous: &Layer,
        states: &[PathState],
        layer: &Layer,
        model: &mut TransitionCostModel<N>,
        heuristics: &CostingStrategies<E, T>,
    ) -> Result<Vec<PathState>, MatchError>
    where
        N: Route + ?Sized,
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        let straight = distance(
            previous.observation.position(),
            layer.observation.position(),
        );

        let mut next = Vec::with_capacity(layer.candidates.len());

        for (target, emission) in layer.candidates.iter().zip(&layer.emissions) {
            let mut best: Option<PathState> = None;

            for (index, (source, state)) in previous.candidates.iter().zip(states).enumerate() {
                if !state.is_reachable() {
                    continue;
                }

                let Some(hop) = model.cost(source, target)? else {
                    continue;
                };

                let transition = heuristics.transition(TransitionContext::new(
                    source,
                    target,
                    hop.distance,
                    straight,
                ));

                let score = state.score + emission.ln() + transition;
                if best.as_ref().is_none_or(|current| score > current.score) {
                    best = Some(PathState {
                        score,
                        back: Some(index),
                        hop: Some(hop),
                    });
                }
            }

            next.push(best.unwrap_or_else(PathState::unreachable));
        }

        Ok(next)
    }
}

impl Solver for ViterbiSolver {
    fn solve<N, E, T>(
        &self,
        lattice: &Lattice,
        model: &mut TransitionCostModel<N>,
        heuristics: &CostingStrategies<E, T>,
    ) -> Result<Collapse, MatchError>
    where
        N: Route + ?Sized,
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        debug_time!("ViterbiSolver::solve");
        info!("Solving...");

        let Some(first) = lattice.first() else {
            return Err(MatchError::invalid("no observations were given"));
        };

        if let Some(layer) = lattice.layers.iter().find(|layer| layer.is_empty()) {
            return Err(NoMatchReason::NoCandidates {
                index: layer.observation.index,
            }
            .into());
        }

        let mut columns: Vec<Vec<PathState>> = Vec::with_capacity(lattice.len());
        columns.push(first.emissions.iter().copied().map(PathState::seed).collect());

        for (previous, layer) in lattice.layers.iter().tuple_windows() {
            let states = columns.last().map(Vec::as_slice).unwrap_or_default();
            let next = Self::step(previous, states, layer, model, heuristics)?;

            if !next.iter().any(PathState::is_reachable) {
                return Err(NoMatchReason::BrokenChain {
                    index: layer.observation.index,
                }
                .into());
            }

            columns.push(next);
        }

        // Terminal state, earliest candidate on ties.
        let terminal = columns.last().map(Vec::as_slice).unwrap_or_default();
        let Some((mut cursor, score)) = terminal
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_reachable())
            .fold(None, |best: Option<(usize, f64)>, (index, state)| match best {
                Some((_, score)) if score >= state.score => best,
                _ => Some((index, state.score)),
            })
        else {
            return Err(NoMatchReason::BrokenChain {
                index: lattice.len() - 1,
            }
            .into());
        };

        let mut candidates = Vec::with_capacity(lattice.len());
        let mut emissions = Vec::with_capacity(lattice.len());
        let mut hops = Vec::with_capacity(lattice.len());

        for (layer, column) in lattice.layers.iter().zip(&columns).rev() {
            let state = &column[cursor];

            candidates.push(layer.candidates[cursor]);
            emissions.push(layer.emissions[cursor]);
            if let Some(hop) = &state.hop {
                hops.push(hop);
            }

            match state.back {
                Some(back) => cursor = back,
                None => break,
            }
        }

        candidates.reverse();
        emissions.reverse();
        hops.reverse();

        // Each hop opens on the traversal the previous one closed on.
        let mut traversals = candidates
            .first()
            .map(|candidate| vec![candidate.traversal])
            .unwrap_or_default();

        for hop in &hops {
            traversals.extend(hop.traversals.iter().skip(1));
        }

        let distance = hops.iter().map(|hop| hop.distance).sum();
        debug!(
            "Collapsed {} layers onto {} traversals ({distance:.1}m, score {score:.3})",
            lattice.len(),
            traversals.len()
        );

        Ok(Collapse {
            candidates,
            emissions,
            traversals,
            score,
            distance,
        })
    }
}

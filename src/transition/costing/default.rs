pub mod emission {
    use crate::geo::deviation;
    use crate::transition::*;

    /// 10 meters (85th% GPS error)
    pub const DEFAULT_EMISSION_ERROR: f64 = 10.0;

    /// Spread of the bearing term, in degrees.
    pub const DEFAULT_BEARING_ERROR: f64 = 45.0;

    /// Calculates the emission cost of a candidate relative
    /// to the observation it explains.
    ///
    /// ## Calculation
    ///
    /// Both the projection distance `d` and, when the observation moved, the
    /// deviation `Δθ` between its bearing and the candidate's are treated as
    /// zero-mean gaussian errors.
    ///
    /// ```math
    /// cost(d, Δθ) = 0.5 * (d / σ)² + 0.5 * (Δθ / σθ)²
    /// ```
    #[derive(Clone, Copy, Debug)]
    pub struct DefaultEmissionCost {
        pub sigma: f64,
        pub bearing_sigma: f64,
    }

    impl Default for DefaultEmissionCost {
        fn default() -> Self {
            Self {
                sigma: DEFAULT_EMISSION_ERROR,
                bearing_sigma: DEFAULT_BEARING_ERROR,
            }
        }
    }

    impl<'a> Strategy<EmissionContext<'a>> for DefaultEmissionCost {
        type Cost = f64;

        fn calculate(&self, context: EmissionContext<'a>) -> Option<Self::Cost> {
            let distance = 0.5 * (context.candidate.distance / self.sigma).powi(2);

            let bearing = context
                .observation
                .travel_bearing()
                .map(|bearing| deviation(bearing, context.candidate.bearing))
                .map_or(0.0, |delta| 0.5 * (delta / self.bearing_sigma).powi(2));

            Some(distance + bearing)
        }
    }
}

pub mod transition {
    use crate::transition::*;

    /// Default β, in metres.
    pub const DEFAULT_TRANSITION_SCALE: f64 = 10.0;

    /// Calculates the transition cost between two candidates.
    ///
    /// ## Deviance
    /// Defines the variability between the route length (in meters)
    /// and the straight-line distance between the two observations.
    /// Following an optimal path, both are nearly equal, so detours
    /// are discouraged in proportion to the distance they add.
    ///
    /// ```math
    /// cost(route, straight) = |route - straight| / β
    /// ```
    #[derive(Clone, Copy, Debug)]
    pub struct DefaultTransitionCost {
        pub beta: f64,
    }

    impl Default for DefaultTransitionCost {
        fn default() -> Self {
            Self {
                beta: DEFAULT_TRANSITION_SCALE,
            }
        }
    }

    impl<'a> Strategy<TransitionContext<'a>> for DefaultTransitionCost {
        type Cost = f64;

        fn calculate(&self, context: TransitionContext<'a>) -> Option<Self::Cost> {
            Some(context.deviance() / self.beta)
        }
    }
}

pub mod costing {
    use super::{DefaultEmissionCost, DefaultTransitionCost};
    use crate::matcher::MatchConfig;
    use crate::transition::*;

    #[derive(Clone, Copy, Debug)]
    pub struct CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        emission: E,
        transition: T,
    }

    impl<E, T> CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        pub fn new(emission: E, transition: T) -> Self {
            Self {
                emission,
                transition,
            }
        }

        /// Probability, in `(0, 1]`, that the candidate explains the observation.
        #[inline(always)]
        pub fn emission(&self, context: EmissionContext) -> f64 {
            self.emission.probability(context)
        }

        /// Log-probability, at most `0`, of the transition.
        #[inline(always)]
        pub fn transition(&self, context: TransitionContext) -> f64 {
            self.transition.log_probability(context)
        }
    }

    impl CostingStrategies<DefaultEmissionCost, DefaultTransitionCost> {
        /// The default strategies, tuned by the configuration.
        pub fn from_config(config: &MatchConfig) -> Self {
            CostingStrategies::new(
                DefaultEmissionCost {
                    sigma: config.sigma,
                    bearing_sigma: config.bearing_sigma,
                },
                DefaultTransitionCost { beta: config.beta },
            )
        }
    }

    impl Default for CostingStrategies<DefaultEmissionCost, DefaultTransitionCost> {
        fn default() -> Self {
            CostingStrategies::new(DefaultEmissionCost::default(), DefaultTransitionCost::default())
        }
    }
}

#[doc(inline)]
pub use costing::*;
#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use transition::*;

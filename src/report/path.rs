//! Expansion of room-to-room hops into walked arcs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::Cost;

/// One arc actually walked between two adjacent rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arc {
    pub from: String,
    pub to: String,
    pub travel_time: Cost,
}

impl Arc {
    pub fn new(from: impl Into<String>, to: impl Into<String>, travel_time: Cost) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            travel_time,
        }
    }
}

/// Turns a hop between two task rooms into the arcs of the shortest path.
///
/// The cost tables only hold the hop's total travel time; an expander with
/// access to the room graph can report the intermediate rooms as well.
pub trait PathExpander {
    fn expand(&self, from: &str, to: &str, travel_time: Cost) -> Vec<Arc>;
}

/// Reports every hop as a single direct arc.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPaths;

impl PathExpander for DirectPaths {
    fn expand(&self, from: &str, to: &str, travel_time: Cost) -> Vec<Arc> {
        vec![Arc::new(from, to, travel_time)]
    }
}

impl<F> PathExpander for F
where
    F: Fn(&str, &str, Cost) -> Vec<Arc>,
{
    fn expand(&self, from: &str, to: &str, travel_time: Cost) -> Vec<Arc> {
        self(from, to, travel_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_paths_single_arc() {
        let arcs = DirectPaths.expand("R1", "R2", 7);
        assert_eq!(arcs, vec![Arc::new("R1", "R2", 7)]);
    }

    #[test]
    fn test_closure_expander() {
        // every hop passes through a corridor
        let via_corridor = |from: &str, to: &str, t: Cost| {
            vec![Arc::new(from, "C", t / 2), Arc::new("C", to, t - t / 2)]
        };
        let arcs = via_corridor.expand("A", "B", 5);
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].to, "C");
        assert_eq!(arcs.iter().map(|a| a.travel_time).sum::<Cost>(), 5);
    }
}

use crate::{Error, Result};

/// Walks predecessor links back from `target` to `source` and returns the
/// route in travel order, both ends included.
///
/// The walk is bounded by the table length: a chain that has not reached the
/// source after visiting every vertex once must contain a cycle, which is
/// reported as [`Error::BrokenPredecessorChain`] along with missing links.
pub fn reconstruct(
    predecessors: &[Option<usize>],
    source: usize,
    target: usize,
) -> Result<Vec<usize>> {
    let n = predecessors.len();
    if source >= n {
        return Err(Error::InvalidVertex(source));
    }
    if target >= n {
        return Err(Error::InvalidVertex(target));
    }

    let mut route = vec![target];
    let mut current = target;

    while current != source {
        if route.len() >= n {
            return Err(Error::BrokenPredecessorChain {
                vertex: current,
                reason: "chain does not reach the source",
            });
        }
        current = match predecessors[current] {
            Some(pred) if pred < n => pred,
            Some(_) => {
                return Err(Error::BrokenPredecessorChain {
                    vertex: current,
                    reason: "predecessor out of range",
                })
            }
            None => {
                return Err(Error::BrokenPredecessorChain {
                    vertex: current,
                    reason: "missing predecessor",
                })
            }
        };
        route.push(current);
    }

    route.reverse();
    Ok(route)
}

//! Louvain community detection over the entity-only subgraph.
//!
//! Standard two-phase scheme: greedy local moves maximizing modularity
//! gain, then aggregation of communities into super-nodes, repeated until
//! the partition stops shrinking. Node visit order is fixed, so the result
//! is deterministic for a given graph.

use std::collections::HashMap;

/// One detected community, ranked by its internal degree sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Community {
    pub id: usize,
    pub size: usize,
    /// Sum of in-community degrees over the community's members.
    pub degree_sum: usize,
    /// Up to 6 members with the highest in-community degree.
    pub representatives: Vec<String>,
}

/// Assign each of `n` nodes a community label. `edges` are undirected
/// weighted pairs over node indices `0..n`.
pub fn louvain(n: usize, edges: &[(usize, usize, f64)]) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }

    let mut membership: Vec<usize> = (0..n).collect();
    let mut level_n = n;
    let mut level_edges: Vec<(usize, usize, f64)> = edges.to_vec();

    loop {
        let labels = one_level(level_n, &level_edges);
        let (compact, new_n) = compact_labels(&labels);
        for slot in membership.iter_mut() {
            *slot = compact[labels[*slot]];
        }
        if new_n == level_n {
            break;
        }
        level_edges = aggregate(&level_edges, &labels, &compact);
        level_n = new_n;
    }

    membership
}

/// Phase one: sweep nodes in index order, moving each to the neighboring
/// community with the largest positive modularity gain, until stable.
fn one_level(n: usize, edges: &[(usize, usize, f64)]) -> Vec<usize> {
    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    let mut self_weight = vec![0.0f64; n];
    for &(a, b, w) in edges {
        if a == b {
            self_weight[a] += w;
        } else {
            adjacency[a].push((b, w));
            adjacency[b].push((a, w));
        }
    }

    // Weighted degree; self loops count twice, as usual.
    let degree: Vec<f64> = (0..n)
        .map(|i| adjacency[i].iter().map(|(_, w)| w).sum::<f64>() + 2.0 * self_weight[i])
        .collect();
    let m2: f64 = degree.iter().sum();
    if m2 <= 0.0 {
        return (0..n).collect();
    }

    let mut community: Vec<usize> = (0..n).collect();
    let mut comm_total = degree.clone();

    for _sweep in 0..20 {
        let mut moved = false;
        for node in 0..n {
            let old = community[node];
            comm_total[old] -= degree[node];

            // Edge weight from this node into each neighboring community.
            let mut links: HashMap<usize, f64> = HashMap::new();
            links.insert(old, 0.0);
            for &(peer, w) in &adjacency[node] {
                *links.entry(community[peer]).or_insert(0.0) += w;
            }

            let mut best = old;
            let mut best_gain = links[&old] - comm_total[old] * degree[node] / m2;
            let mut candidates: Vec<(usize, f64)> = links.into_iter().collect();
            candidates.sort_by_key(|(comm, _)| *comm);
            for (comm, weight) in candidates {
                let gain = weight - comm_total[comm] * degree[node] / m2;
                if gain > best_gain + 1e-12 {
                    best_gain = gain;
                    best = comm;
                }
            }

            comm_total[best] += degree[node];
            if best != old {
                community[node] = best;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }

    community
}

/// Renumber labels to a dense `0..count` range, keeping first-seen order.
fn compact_labels(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut remap: Vec<Option<usize>> = vec![None; labels.len()];
    let mut next = 0;
    for &label in labels {
        if remap[label].is_none() {
            remap[label] = Some(next);
            next += 1;
        }
    }
    let compact: Vec<usize> = remap.into_iter().map(|r| r.unwrap_or(0)).collect();
    (compact, next)
}

/// Phase two: collapse each community into one super-node, summing weights.
fn aggregate(
    edges: &[(usize, usize, f64)],
    labels: &[usize],
    compact: &[usize],
) -> Vec<(usize, usize, f64)> {
    let mut merged: HashMap<(usize, usize), f64> = HashMap::new();
    for &(a, b, w) in edges {
        let ca = compact[labels[a]];
        let cb = compact[labels[b]];
        let key = if ca <= cb { (ca, cb) } else { (cb, ca) };
        *merged.entry(key).or_insert(0.0) += w;
    }
    merged
        .into_iter()
        .map(|((a, b), w)| (a, b, w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_has_no_labels() {
        assert!(louvain(0, &[]).is_empty());
    }

    #[test]
    fn isolated_nodes_stay_singletons() {
        let labels = louvain(3, &[]);
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn two_cliques_with_a_bridge_split_apart() {
        // Nodes 0-2 and 3-5 are triangles, joined by one weak edge.
        let edges = vec![
            (0, 1, 3.0),
            (1, 2, 3.0),
            (0, 2, 3.0),
            (3, 4, 3.0),
            (4, 5, 3.0),
            (3, 5, 3.0),
            (2, 3, 0.2),
        ];
        let labels = louvain(6, &edges);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn result_is_deterministic() {
        let edges = vec![(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0)];
        assert_eq!(louvain(4, &edges), louvain(4, &edges));
    }
}

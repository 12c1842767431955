//! Rank-based coordinate assignment.
//!
//! Classic layered drawing over the flattened node/edge set:
//!
//! 1. Cycle neutralization — greedy source/sink peeling produces a total
//!    order; edges pointing backwards against it are reversed for layout
//!    purposes only (the emitted diagram keeps their true orientation).
//! 2. Rank assignment — Kahn topological order, then longest-path
//!    layering.
//! 3. In-rank ordering — barycenter sweeps seeded by insertion order,
//!    keeping the best ordering seen by crossing count.
//! 4. Coordinates — ranks advance along the direction's axis with fixed
//!    per-node boxes and configurable spacing; a few median-refinement
//!    passes smooth the in-rank axis, with overlap resolution after each.
//!
//! Anchors are computed as box centers and translated to top-left
//! convention at the end. The whole pipeline is a pure function of its
//! inputs; identical inputs produce identical positions.

use super::types::{Direction, LayoutConfig};

/// Adjacency view of the flattened graph, indexed by node position.
pub(super) struct NodeGraph {
    pub adj: Vec<Vec<usize>>,
    pub radj: Vec<Vec<usize>>,
}

impl NodeGraph {
    pub fn new(node_count: usize, edges: impl Iterator<Item = (usize, usize)>) -> Self {
        let mut adj = vec![Vec::new(); node_count];
        let mut radj = vec![Vec::new(); node_count];
        for (source, target) in edges {
            if source == target {
                continue; // self-references carry no layering information
            }
            adj[source].push(target);
            radj[target].push(source);
        }
        Self { adj, radj }
    }

    fn len(&self) -> usize {
        self.adj.len()
    }
}

/// Computes one box-center anchor per node.
pub(super) fn position_nodes(
    graph: &mut NodeGraph,
    direction: Direction,
    config: &LayoutConfig,
) -> Vec<(f64, f64)> {
    let n = graph.len();
    if n == 0 {
        return Vec::new();
    }

    neutralize_cycles(graph);
    let ranks = assign_ranks(graph);
    let layers = order_within_ranks(&ranks, graph, config.max_ordering_sweeps);
    assign_coordinates(&layers, graph, direction, config)
}

/// Reverses back edges against a greedy source/sink peeling order so the
/// rank phase sees an acyclic graph. Containment alone is a tree, but
/// relation edges can close cycles across the forest.
fn neutralize_cycles(graph: &mut NodeGraph) {
    let n = graph.len();
    let mut in_deg = vec![0usize; n];
    let mut out_deg = vec![0usize; n];
    for (u, targets) in graph.adj.iter().enumerate() {
        for &v in targets {
            out_deg[u] += 1;
            in_deg[v] += 1;
        }
    }

    let mut removed = vec![false; n];
    let mut head: Vec<usize> = Vec::new();
    let mut tail: Vec<usize> = Vec::new();
    let mut remaining = n;

    while remaining > 0 {
        let mut progress = false;

        for v in 0..n {
            if !removed[v] && out_deg[v] == 0 {
                removed[v] = true;
                remaining -= 1;
                tail.push(v);
                for &u in &graph.radj[v] {
                    if !removed[u] {
                        out_deg[u] = out_deg[u].saturating_sub(1);
                    }
                }
                progress = true;
            }
        }
        for v in 0..n {
            if !removed[v] && in_deg[v] == 0 {
                removed[v] = true;
                remaining -= 1;
                head.push(v);
                for &w in &graph.adj[v] {
                    if !removed[w] {
                        in_deg[w] = in_deg[w].saturating_sub(1);
                    }
                }
                progress = true;
            }
        }

        if !progress && remaining > 0 {
            // Everything left sits on a cycle; peel the node that sheds
            // the most forward edges, lowest index on ties.
            let pick = (0..n)
                .filter(|&v| !removed[v])
                .max_by_key(|&v| (out_deg[v] as isize - in_deg[v] as isize, std::cmp::Reverse(v)))
                .unwrap_or(0);
            removed[pick] = true;
            remaining -= 1;
            head.push(pick);
            for &w in &graph.adj[pick] {
                if !removed[w] {
                    in_deg[w] = in_deg[w].saturating_sub(1);
                }
            }
            for &u in &graph.radj[pick] {
                if !removed[u] {
                    out_deg[u] = out_deg[u].saturating_sub(1);
                }
            }
        }
    }

    tail.reverse();
    head.extend(tail);
    let mut pos = vec![0usize; n];
    for (i, &v) in head.iter().enumerate() {
        pos[v] = i;
    }

    let mut new_adj = vec![Vec::new(); n];
    let mut new_radj = vec![Vec::new(); n];
    let mut reversed = 0usize;
    for u in 0..n {
        for &v in &graph.adj[u] {
            if pos[u] > pos[v] {
                reversed += 1;
                new_adj[v].push(u);
                new_radj[u].push(v);
            } else {
                new_adj[u].push(v);
                new_radj[v].push(u);
            }
        }
    }
    if reversed > 0 {
        tracing::debug!(reversed, "reversed back edges for rank assignment");
    }
    graph.adj = new_adj;
    graph.radj = new_radj;
}

/// Kahn topological order followed by longest-path layering.
fn assign_ranks(graph: &NodeGraph) -> Vec<usize> {
    let n = graph.len();
    let mut in_deg = vec![0usize; n];
    for targets in &graph.adj {
        for &v in targets {
            in_deg[v] += 1;
        }
    }

    let mut queue: Vec<usize> = (0..n).filter(|&v| in_deg[v] == 0).collect();
    queue.sort_unstable();
    let mut topo = Vec::with_capacity(n);
    while let Some(&u) = queue.first() {
        queue.remove(0);
        topo.push(u);
        for &v in &graph.adj[u] {
            in_deg[v] -= 1;
            if in_deg[v] == 0 {
                let at = queue.partition_point(|&x| x < v);
                queue.insert(at, v);
            }
        }
    }

    let mut rank = vec![0usize; n];
    for &u in &topo {
        for &v in &graph.adj[u] {
            if rank[v] <= rank[u] {
                rank[v] = rank[u] + 1;
            }
        }
    }
    rank
}

fn count_crossings(layers: &[Vec<usize>], adj: &[Vec<usize>]) -> usize {
    let mut crossings = 0;
    for window in layers.windows(2) {
        let (upper, lower) = (&window[0], &window[1]);
        let mut pos_in_lower = vec![usize::MAX; adj.len()];
        for (p, &v) in lower.iter().enumerate() {
            pos_in_lower[v] = p;
        }
        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for (pu, &u) in upper.iter().enumerate() {
            for &v in &adj[u] {
                if pos_in_lower[v] != usize::MAX {
                    pairs.push((pu, pos_in_lower[v]));
                }
            }
        }
        for i in 0..pairs.len() {
            for j in (i + 1)..pairs.len() {
                let ((a1, b1), (a2, b2)) = (pairs[i], pairs[j]);
                if (a1 < a2 && b1 > b2) || (a1 > a2 && b1 < b2) {
                    crossings += 1;
                }
            }
        }
    }
    crossings
}

/// Barycenter sweeps, alternating direction, keeping the best ordering
/// seen. The initial per-rank order is insertion order (node index), so
/// first-visit order is the deterministic tie-break.
fn order_within_ranks(ranks: &[usize], graph: &NodeGraph, max_sweeps: usize) -> Vec<Vec<usize>> {
    let rank_count = ranks.iter().copied().max().unwrap_or(0) + 1;
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
    for (v, &r) in ranks.iter().enumerate() {
        layers[r].push(v);
    }
    for layer in &mut layers {
        layer.sort_unstable();
    }

    let mut best = layers.clone();
    let mut best_crossings = count_crossings(&layers, &graph.adj);

    for sweep in 0..max_sweeps {
        if best_crossings == 0 {
            break;
        }
        if sweep % 2 == 0 {
            for i in 1..rank_count {
                barycenter_sort(&mut layers, i, graph, true);
            }
        } else {
            for i in (0..rank_count.saturating_sub(1)).rev() {
                barycenter_sort(&mut layers, i, graph, false);
            }
        }
        let crossings = count_crossings(&layers, &graph.adj);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = layers.clone();
        }
    }
    best
}

fn barycenter_sort(layers: &mut [Vec<usize>], layer_idx: usize, graph: &NodeGraph, forward: bool) {
    let reference = if forward {
        layer_idx.checked_sub(1)
    } else {
        (layer_idx + 1 < layers.len()).then_some(layer_idx + 1)
    };
    let Some(reference) = reference else { return };

    let mut ref_pos = vec![usize::MAX; graph.len()];
    for (p, &v) in layers[reference].iter().enumerate() {
        ref_pos[v] = p;
    }

    let mut keyed: Vec<(f64, usize)> = layers[layer_idx]
        .iter()
        .map(|&v| {
            let neighbors = if forward { &graph.radj[v] } else { &graph.adj[v] };
            let positions: Vec<f64> = neighbors
                .iter()
                .filter(|&&u| ref_pos[u] != usize::MAX)
                .map(|&u| ref_pos[u] as f64)
                .collect();
            let key = if positions.is_empty() {
                f64::MAX
            } else {
                positions.iter().sum::<f64>() / positions.len() as f64
            };
            (key, v)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    layers[layer_idx] = keyed.into_iter().map(|(_, v)| v).collect();
}

/// Packs each rank along the in-rank axis, refines with neighbor medians,
/// and maps (rank, in-rank) onto (x, y) box centers for the direction.
fn assign_coordinates(
    layers: &[Vec<usize>],
    graph: &NodeGraph,
    direction: Direction,
    config: &LayoutConfig,
) -> Vec<(f64, f64)> {
    let n = graph.len();
    // Extent of a node box along each axis depends on the direction: for
    // left-to-right flow ranks consume width and the in-rank axis height.
    let (rank_extent, inrank_extent) = match direction {
        Direction::LeftToRight => (config.node_width, config.node_height),
        Direction::TopToBottom => (config.node_height, config.node_width),
    };

    let mut along_rank = vec![0.0f64; n]; // coordinate on the rank axis
    let mut in_rank = vec![0.0f64; n]; // coordinate on the perpendicular axis

    for (rank_idx, layer) in layers.iter().enumerate() {
        let rank_coord = rank_idx as f64 * (rank_extent + config.rank_spacing);
        let total = layer.len() as f64 * inrank_extent
            + layer.len().saturating_sub(1) as f64 * config.node_spacing;
        let mut cursor = -total / 2.0;
        for &v in layer {
            along_rank[v] = rank_coord;
            in_rank[v] = cursor + inrank_extent / 2.0;
            cursor += inrank_extent + config.node_spacing;
        }
    }

    for _ in 0..3 {
        for layer in layers {
            for &v in layer {
                let mut neighbor_coords: Vec<f64> = graph.adj[v]
                    .iter()
                    .chain(graph.radj[v].iter())
                    .map(|&u| in_rank[u])
                    .collect();
                if !neighbor_coords.is_empty() {
                    neighbor_coords.sort_by(|a, b| a.total_cmp(b));
                    let median = neighbor_coords[neighbor_coords.len() / 2];
                    in_rank[v] = (in_rank[v] + median) / 2.0;
                }
            }
        }
        // Re-separate overlaps introduced by the refinement.
        for layer in layers {
            let mut ordered: Vec<usize> = layer.clone();
            ordered.sort_by(|&a, &b| in_rank[a].total_cmp(&in_rank[b]).then_with(|| a.cmp(&b)));
            for pair in ordered.windows(2) {
                let (prev, curr) = (pair[0], pair[1]);
                let min_gap = inrank_extent + config.node_spacing;
                if in_rank[curr] - in_rank[prev] < min_gap {
                    in_rank[curr] = in_rank[prev] + min_gap;
                }
            }
        }
    }

    (0..n)
        .map(|v| match direction {
            Direction::LeftToRight => (along_rank[v], in_rank[v]),
            Direction::TopToBottom => (in_rank[v], along_rank[v]),
        })
        .collect()
}

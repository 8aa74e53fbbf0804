use ndarray::ArrayView1;
use rand::Rng;

use crate::anomaly::path_length::expected_path_length;
use crate::common::FType;
use crate::data::view::DatasetView;

/// One node of an isolation tree. All nodes of a tree live in a single
/// arena and reference their children by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Node<F> {
    Split {
        feature: usize,
        threshold: F,
        left: usize,
        right: usize,
    },
    Leaf {
        depth: usize,
        size: usize,
    },
}

/// Binary partition tree built from one bootstrap sub-sample by recursive
/// uniform-random splitting. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct IsolationTree<F: FType> {
    nodes: Vec<Node<F>>,
    root: usize,
}

impl<F: FType> IsolationTree<F> {
    /// Builds a tree over the rows named by `indices`. The index vector is
    /// the tree's private scratch space and is partitioned in place.
    pub fn build<R: Rng>(
        view: &DatasetView<'_, F>,
        mut indices: Vec<usize>,
        max_depth: usize,
        rng: &mut R,
    ) -> Self {
        let mut nodes = Vec::new();
        let root = build_node(&mut nodes, view, &mut indices, 0, max_depth, rng);
        IsolationTree { nodes, root }
    }

    /// Number of edges from the root to the leaf isolating `row`, plus the
    /// expected-path correction for the samples that leaf still held when
    /// construction stopped.
    pub fn path_length(&self, row: &ArrayView1<'_, F>) -> F {
        let mut node = self.root;
        loop {
            match self.nodes[node] {
                Node::Leaf { depth, size } => {
                    return F::from_usize(depth).unwrap() + expected_path_length::<F>(size);
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[feature] < threshold { left } else { right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(crate) fn nodes(&self) -> &[Node<F>] {
        &self.nodes
    }
}

fn build_node<F: FType, R: Rng>(
    nodes: &mut Vec<Node<F>>,
    view: &DatasetView<'_, F>,
    indices: &mut [usize],
    depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> usize {
    let size = indices.len();
    if size <= 1 || depth >= max_depth {
        return push(nodes, Node::Leaf { depth, size });
    }

    // Pick a feature with spread, retrying past degenerate ones. Samples
    // that are identical on every feature end up in the fallback leaf.
    let num_features = view.num_features();
    let mut split = None;
    for _ in 0..num_features {
        let feature = rng.gen_range(0..num_features);
        let (min, max) = view.feature_range(indices, feature);
        if max > min {
            split = Some((feature, min, max));
            break;
        }
    }
    let (feature, min, max) = match split {
        Some(found) => found,
        None => return push(nodes, Node::Leaf { depth, size }),
    };

    let threshold = F::from_f64(rng.gen::<f64>()).unwrap() * (max - min) + min;
    let boundary = partition(indices, view, feature, threshold);
    if boundary == 0 || boundary == size {
        // Rounding collapsed the draw onto min or max; the node cannot be
        // separated, so it terminates here with its size recorded.
        return push(nodes, Node::Leaf { depth, size });
    }

    let (left_rows, right_rows) = indices.split_at_mut(boundary);
    let left = build_node(nodes, view, left_rows, depth + 1, max_depth, rng);
    let right = build_node(nodes, view, right_rows, depth + 1, max_depth, rng);
    push(
        nodes,
        Node::Split {
            feature,
            threshold,
            left,
            right,
        },
    )
}

fn push<F: FType>(nodes: &mut Vec<Node<F>>, node: Node<F>) -> usize {
    nodes.push(node);
    nodes.len() - 1
}

// Reorders `indices` so rows with value[feature] < threshold come first;
// returns the boundary between the two halves.
fn partition<F: FType>(
    indices: &mut [usize],
    view: &DatasetView<'_, F>,
    feature: usize,
    threshold: F,
) -> usize {
    let mut boundary = 0;
    for i in 0..indices.len() {
        if view.value(indices[i], feature) < threshold {
            indices.swap(i, boundary);
            boundary += 1;
        }
    }
    boundary
}

//! XGBoost JSON tree dump evaluation.

use std::collections::HashMap;

use forecast_spi::ScoringError;
use serde::{Deserialize, Serialize};

fn default_base_score() -> f64 {
    0.5
}

/// One node as written by `Booster.get_dump(dump_format="json")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        nodeid: u32,
        split: String,
        split_condition: f64,
        yes: u32,
        no: u32,
        missing: u32,
        children: Vec<TreeNode>,
    },
    Leaf {
        nodeid: u32,
        leaf: f64,
    },
}

impl TreeNode {
    fn id(&self) -> u32 {
        match self {
            TreeNode::Split { nodeid, .. } | TreeNode::Leaf { nodeid, .. } => *nodeid,
        }
    }
}

/// Serialized ensemble: a global bias plus one root node per tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoosterDump {
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    pub trees: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f64),
}

/// Flattened tree; index 0 is the root.
#[derive(Debug, Clone, PartialEq)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn compile(root: &TreeNode, width: usize, tree: usize) -> Result<Self, ScoringError> {
        let invalid = |msg: String| ScoringError::InvalidArtifact(format!("tree {}: {}", tree, msg));

        let mut flat: Vec<&TreeNode> = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            flat.push(node);
            if let TreeNode::Split { children, .. } = node {
                stack.extend(children.iter().rev());
            }
        }

        let mut index = HashMap::with_capacity(flat.len());
        for (pos, node) in flat.iter().enumerate() {
            if index.insert(node.id(), pos).is_some() {
                return Err(invalid(format!("duplicate node id {}", node.id())));
            }
        }

        let nodes = flat
            .iter()
            .map(|node| match node {
                TreeNode::Leaf { leaf, .. } if leaf.is_finite() => Ok(Node::Leaf(*leaf)),
                TreeNode::Leaf { nodeid, .. } => {
                    Err(invalid(format!("node {} has a non-finite leaf", nodeid)))
                }
                TreeNode::Split {
                    nodeid,
                    split,
                    split_condition,
                    yes,
                    no,
                    missing,
                    children,
                } => {
                    let feature = parse_feature(split)
                        .ok_or_else(|| invalid(format!("node {} splits on '{}'", nodeid, split)))?;
                    if feature >= width {
                        return Err(invalid(format!(
                            "node {} uses input {} but the preprocessor produces {}",
                            nodeid, feature, width
                        )));
                    }
                    // Branch targets must be this node's own children.
                    let child = |target: u32| {
                        children
                            .iter()
                            .any(|c| c.id() == target)
                            .then(|| index.get(&target).copied())
                            .flatten()
                            .ok_or_else(|| {
                                invalid(format!("node {} points at non-child {}", nodeid, target))
                            })
                    };
                    Ok(Node::Split {
                        feature,
                        threshold: *split_condition,
                        yes: child(*yes)?,
                        no: child(*no)?,
                        missing: child(*missing)?,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { nodes })
    }

    fn leaf(&self, row: &[f64]) -> f64 {
        let mut pos = 0;
        loop {
            match self.nodes[pos] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let x = row.get(feature).copied().unwrap_or(f64::NAN);
                    pos = if x.is_nan() {
                        missing
                    } else if x < threshold {
                        yes
                    } else {
                        no
                    };
                }
            }
        }
    }
}

/// "f12" -> 12
fn parse_feature(split: &str) -> Option<usize> {
    split.strip_prefix('f')?.parse().ok()
}

/// Compiled regression ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct Booster {
    base_score: f64,
    trees: Vec<Tree>,
}

impl Booster {
    /// Compile a dump for rows of `width` inputs.
    pub fn compile(dump: &BoosterDump, width: usize) -> Result<Self, ScoringError> {
        if !dump.base_score.is_finite() {
            return Err(ScoringError::InvalidArtifact(
                "base_score is not finite".to_string(),
            ));
        }
        if dump.trees.is_empty() {
            return Err(ScoringError::InvalidArtifact(
                "booster has no trees".to_string(),
            ));
        }
        let trees = dump
            .trees
            .iter()
            .enumerate()
            .map(|(i, root)| Tree::compile(root, width, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            base_score: dump.base_score,
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Sum of the base score and one leaf per tree.
    pub fn predict(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.leaf(row)).sum::<f64>()
    }
}

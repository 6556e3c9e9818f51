//! Evaluator for XGBoost models saved with `save_model("*.json")`.
//!
//! Only the subset the stress model uses is supported: a `gbtree` booster
//! with the `binary:logistic` objective over numeric features. Anything else
//! is rejected at load time.
//!
//! # Tree layout
//!
//! Each tree is stored as parallel arrays indexed by node id. A node is a
//! leaf when `left_children[id] == -1`; its leaf value is then stored in
//! `split_conditions[id]`. Internal nodes send a row left when
//! `row[split_indices[id]] < split_conditions[id]`, compared in `f32` the
//! way XGBoost stores both sides.
//!
//! The margin of a row is the sum of one leaf per tree plus the logit of
//! `base_score`. The positive-class probability is the logistic of that
//! margin.
//!
//! A model trained with early stopping records `best_iteration` in its
//! attributes. Only the trees of boosting rounds `0..=best_iteration` take
//! part in prediction, as in XGBoost's own `predict_proba`.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::info;

use crate::error::RiskError;
use crate::features::{FEATURE_NAMES, FeatureRow, ProbabilityModel};

const SUPPORTED_OBJECTIVE: &str = "binary:logistic";
const SUPPORTED_BOOSTER: &str = "gbtree";

// ── File format ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ModelFile {
    learner: Learner,
}

#[derive(Deserialize)]
struct Learner {
    #[serde(default)]
    attributes: HashMap<String, String>,
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: GradientBooster,
    learner_model_param: LearnerModelParam,
    objective: Objective,
}

#[derive(Deserialize)]
struct GradientBooster {
    name: String,
    #[serde(default)]
    model: Option<TreeEnsemble>,
}

#[derive(Deserialize)]
struct TreeEnsemble {
    trees: Vec<TreeArrays>,
    /// Tree offsets per boosting round: round `r` owns
    /// `trees[iteration_indptr[r]..iteration_indptr[r + 1]]`.
    #[serde(default)]
    iteration_indptr: Option<Vec<usize>>,
    #[serde(default)]
    gbtree_model_param: Option<GbtreeModelParam>,
}

#[derive(Deserialize)]
struct GbtreeModelParam {
    #[serde(default)]
    num_parallel_tree: Option<String>,
}

#[derive(Deserialize)]
struct TreeArrays {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f64>,
}

#[derive(Deserialize)]
struct LearnerModelParam {
    base_score: String,
    #[serde(default)]
    num_feature: Option<String>,
}

#[derive(Deserialize)]
struct Objective {
    name: String,
}

// ── Evaluated form ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_arrays(index: usize, arrays: TreeArrays) -> Result<Self, RiskError> {
        let len = arrays.left_children.len();
        if len == 0
            || arrays.right_children.len() != len
            || arrays.split_indices.len() != len
            || arrays.split_conditions.len() != len
        {
            return Err(incompatible(format!("tree {index} has inconsistent node arrays")));
        }

        let mut nodes = Vec::with_capacity(len);
        for id in 0..len {
            let left = arrays.left_children[id];
            if left == -1 {
                nodes.push(Node::Leaf(arrays.split_conditions[id]));
                continue;
            }

            let right = arrays.right_children[id];
            let feature = arrays.split_indices[id];
            // Children always follow their parent, which also rules out cycles.
            let child_ok = |child: i64| child > id as i64 && (child as usize) < len;
            if !child_ok(left) || !child_ok(right) {
                return Err(incompatible(format!(
                    "tree {index} node {id} has out-of-range children"
                )));
            }
            if feature < 0 || feature as usize >= FEATURE_NAMES.len() {
                return Err(incompatible(format!(
                    "tree {index} node {id} splits on unknown feature {feature}"
                )));
            }

            nodes.push(Node::Split {
                feature: feature as usize,
                threshold: arrays.split_conditions[id] as f32,
                left: left as usize,
                right: right as usize,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_value(&self, row: &[f64; 3]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if (row[feature] as f32) < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// A loaded, read-only XGBoost binary classifier.
#[derive(Debug, Clone)]
pub struct GradientBoostedModel {
    trees: Vec<Tree>,
    base_margin: f64,
}

impl GradientBoostedModel {
    /// Parse and validate an XGBoost JSON model.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, RiskError> {
        let file: ModelFile = serde_json::from_slice(bytes)
            .map_err(|e| incompatible(format!("not an XGBoost JSON model: {e}")))?;
        let learner = file.learner;

        if learner.objective.name != SUPPORTED_OBJECTIVE {
            return Err(incompatible(format!(
                "unsupported objective {}, expected {SUPPORTED_OBJECTIVE}",
                learner.objective.name
            )));
        }
        if learner.gradient_booster.name != SUPPORTED_BOOSTER {
            return Err(incompatible(format!(
                "unsupported booster {}, expected {SUPPORTED_BOOSTER}",
                learner.gradient_booster.name
            )));
        }

        if let Some(num_feature) = &learner.learner_model_param.num_feature {
            let n: usize = num_feature
                .trim()
                .parse()
                .map_err(|_| incompatible(format!("invalid num_feature {num_feature}")))?;
            if n != FEATURE_NAMES.len() {
                return Err(incompatible(format!(
                    "model expects {n} features, rows have {}",
                    FEATURE_NAMES.len()
                )));
            }
        }

        if !learner.feature_names.is_empty() && learner.feature_names != FEATURE_NAMES {
            return Err(incompatible(format!(
                "feature order {:?} does not match {FEATURE_NAMES:?}",
                learner.feature_names
            )));
        }

        let base_score = parse_base_score(&learner.learner_model_param.base_score)?;
        if !(base_score > 0.0 && base_score < 1.0) {
            return Err(incompatible(format!(
                "base_score {base_score} is not a probability"
            )));
        }

        let mut ensemble = learner
            .gradient_booster
            .model
            .ok_or_else(|| incompatible("booster has no trees".to_string()))?;

        if let Some(raw) = learner.attributes.get("best_iteration") {
            let best_iteration: usize = raw
                .trim()
                .parse()
                .map_err(|_| incompatible(format!("invalid best_iteration {raw}")))?;
            let kept = ensemble.trees_through_round(best_iteration)?;
            ensemble.trees.truncate(kept);
        }

        let trees = ensemble
            .trees
            .into_iter()
            .enumerate()
            .map(|(index, arrays)| Tree::from_arrays(index, arrays))
            .collect::<Result<Vec<_>, _>>()?;

        info!(trees = trees.len(), base_score, "parsed gradient-boosted model");

        Ok(Self {
            trees,
            base_margin: (base_score / (1.0 - base_score)).ln(),
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Raw (pre-logistic) margin for one row.
    pub fn margin(&self, row: &FeatureRow) -> f64 {
        self.base_margin
            + self
                .trees
                .iter()
                .map(|tree| tree.leaf_value(row.values()))
                .sum::<f64>()
    }
}

impl ProbabilityModel for GradientBoostedModel {
    fn predict_proba(&self, row: &FeatureRow) -> [f64; 2] {
        let positive = 1.0 / (1.0 + (-self.margin(row)).exp());
        [1.0 - positive, positive]
    }
}

/// XGBoost writes `base_score` as a string such as `"5E-1"`; newer releases
/// wrap it in brackets (`"[5E-1]"`).
fn parse_base_score(raw: &str) -> Result<f64, RiskError> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
        .parse::<f64>()
        .map_err(|_| incompatible(format!("invalid base_score {raw}")))
}

impl TreeEnsemble {
    /// Number of leading trees that belong to rounds `0..=round`.
    fn trees_through_round(&self, round: usize) -> Result<usize, RiskError> {
        let end = match &self.iteration_indptr {
            Some(indptr) => match indptr.get(round.saturating_add(1)) {
                Some(&end) => end,
                // Early stopping on the last round keeps every tree.
                None => self.trees.len(),
            },
            None => {
                let per_round = match self
                    .gbtree_model_param
                    .as_ref()
                    .and_then(|p| p.num_parallel_tree.as_deref())
                {
                    Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                        incompatible(format!("invalid num_parallel_tree {raw}"))
                    })?,
                    None => 1,
                };
                round.saturating_add(1).saturating_mul(per_round.max(1))
            }
        };
        Ok(end.min(self.trees.len()))
    }
}

fn incompatible(reason: String) -> RiskError {
    RiskError::ModelUnavailable(reason)
}

//! Induction limits with builder pattern.
//!
//! [`TreeParams`] carries every limit the grower enforces. It uses the `bon`
//! crate for builder generation with validation at build time.
//!
//! # Example
//!
//! ```
//! use rftree::TreeParams;
//!
//! // All defaults: unbounded depth and node count, one candidate feature
//! let params = TreeParams::builder().build().unwrap();
//!
//! let params = TreeParams::builder()
//!     .max_depth(8)
//!     .min_samples_in_leaf(5)
//!     .max_features(3)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.max_depth, 8);
//! ```

use bon::Builder;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during parameter validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `min_samples_to_split` must be at least 1.
    #[error("min_samples_to_split must be at least 1")]
    InvalidMinSamplesToSplit,

    /// `min_samples_in_leaf` must be at least 1.
    #[error("min_samples_in_leaf must be at least 1")]
    InvalidMinSamplesInLeaf,

    /// `max_features` must be at least 1.
    #[error("max_features must be at least 1")]
    InvalidMaxFeatures,

    /// `epsilon_purity` must be finite and non-negative.
    #[error("epsilon_purity must be finite and non-negative, got {0}")]
    InvalidEpsilonPurity(f32),

    /// `max_features` must be smaller than the number of features.
    #[error("max_features ({max_features}) must be less than the number of features ({n_features})")]
    MaxFeaturesTooLarge {
        max_features: usize,
        n_features: usize,
    },

    /// `max_num_nodes` leaves no room for a single split.
    #[error("max_num_nodes ({max_num_nodes}) must be at least the branching factor ({k})")]
    NodeBudgetTooSmall { max_num_nodes: usize, k: usize },
}

// =============================================================================
// TreeParams
// =============================================================================

/// Limits for growing one tree.
///
/// A node is split only if its depth is below `max_depth`, it holds at least
/// `min_samples_to_split` instances, the node array has room for `K` more
/// nodes within `max_num_nodes`, and its responses are not all within
/// `epsilon_purity` of the first one. A split is kept only if every child
/// holds at least `min_samples_in_leaf` instances.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct TreeParams {
    /// Maximum node depth (root = 0). Default: unbounded.
    #[builder(default = u32::MAX)]
    pub max_depth: u32,

    /// Minimum instances a node needs to be considered for a split. Default: 2.
    #[builder(default = 2)]
    pub min_samples_to_split: usize,

    /// Minimum instances in every child of a kept split. Default: 1.
    #[builder(default = 1)]
    pub min_samples_in_leaf: usize,

    /// Number of candidate features drawn per split. Default: 1.
    ///
    /// Clamped to the number of features when growing.
    #[builder(default = 1)]
    pub max_features: usize,

    /// Maximum number of nodes in the tree. Default: unbounded.
    #[builder(default = usize::MAX)]
    pub max_num_nodes: usize,

    /// Response tolerance of the purity check. Default: 1e-10.
    #[builder(default = 1e-10)]
    pub epsilon_purity: f32,
}

/// Custom finishing function that validates the parameters.
impl<S: tree_params_builder::IsComplete> TreeParamsBuilder<S> {
    /// Build and validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any limit is invalid on its own:
    /// - `min_samples_to_split == 0`
    /// - `min_samples_in_leaf == 0`
    /// - `max_features == 0`
    /// - `epsilon_purity` negative or not finite
    pub fn build(self) -> Result<TreeParams, ConfigError> {
        let params = self.__build_internal();
        params.validate()?;
        Ok(params)
    }
}

impl TreeParams {
    /// Validate limits that do not depend on the data or the branching factor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_samples_to_split == 0 {
            return Err(ConfigError::InvalidMinSamplesToSplit);
        }
        if self.min_samples_in_leaf == 0 {
            return Err(ConfigError::InvalidMinSamplesInLeaf);
        }
        if self.max_features == 0 {
            return Err(ConfigError::InvalidMaxFeatures);
        }
        if !self.epsilon_purity.is_finite() || self.epsilon_purity < 0.0 {
            return Err(ConfigError::InvalidEpsilonPurity(self.epsilon_purity));
        }
        Ok(())
    }

    /// Check the caller contract for a dataset with `n_features` features
    /// and a tree with branching factor `k`.
    ///
    /// The grower does not run this check: it clamps `max_features` and
    /// grows a single leaf when the budget leaves no room for a split.
    pub fn check_for(&self, n_features: usize, k: usize) -> Result<(), ConfigError> {
        self.validate()?;
        if self.max_features >= n_features {
            return Err(ConfigError::MaxFeaturesTooLarge {
                max_features: self.max_features,
                n_features,
            });
        }
        if self.max_num_nodes < k {
            return Err(ConfigError::NodeBudgetTooSmall {
                max_num_nodes: self.max_num_nodes,
                k,
            });
        }
        Ok(())
    }

    /// Whether the node array can take `k` more nodes when it holds `n_nodes`.
    #[inline]
    pub(crate) fn has_room_for(&self, n_nodes: usize, k: usize) -> bool {
        self.max_num_nodes
            .checked_sub(k)
            .is_some_and(|limit| n_nodes <= limit)
    }
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::builder().build().expect("default params are valid")
    }
}

// =============================================================================
// Tests
// =============================================================================

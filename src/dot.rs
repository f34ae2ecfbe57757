//! Family diagrams to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Terminal nodes** (0 and 1) are rendered as squares at the bottom (sink rank)
//! - **Decision nodes** are rendered as circles labeled with their key,
//!   grouped by key level
//! - **Edges**: solid lines are take branches, dashed lines are skip branches
//! - **Root nodes** are rendered as rectangles at the top (source rank)
//!
//! # Examples
//!
//! ```
//! use zdd_rs::factory::Factory;
//!
//! let factory: Factory<u32> = Factory::default();
//! let family = factory.family([vec![1, 2], vec![2, 3]]);
//!
//! let dot = factory.to_dot(&[family]).unwrap();
//! // Write to file and render with: dot -Tpng family.dot -o family.png
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::Hash;

use crate::factory::Factory;
use crate::node::Zdd;

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use zdd_rs::dot::DotConfig;
/// use zdd_rs::factory::Factory;
///
/// let factory: Factory<u32> = Factory::default();
/// let family = factory.singleton([1]);
///
/// let config = DotConfig {
///     node_shape: "ellipse",
///     ..DotConfig::default()
/// };
///
/// let dot = factory.to_dot_with_config(&[family], &config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for decision nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for take edges (default: "solid")
    pub take_edge_style: &'static str,
    /// Style for skip edges (default: "dashed")
    pub skip_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            root_shape: "rect",
            take_edge_style: "solid",
            skip_edge_style: "dashed",
        }
    }
}

impl<K> Factory<K>
where
    K: Ord + Hash + Clone + Display,
{
    /// Converts families to DOT (Graphviz) format.
    ///
    /// Every node reachable from `roots` is included once, so shared
    /// subgraphs render as shared. The output can be rendered with
    /// Graphviz: `dot -Tpng family.dot -o family.png`.
    pub fn to_dot(&self, roots: &[Zdd<K>]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Converts families to DOT format with custom configuration.
    pub fn to_dot_with_config(
        &self,
        roots: &[Zdd<K>],
        config: &DotConfig,
    ) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        // Terminal nodes (0 and 1)
        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "{} [shape={}, label=\"0\"];", self.zero().id(), config.terminal_shape)?;
        writeln!(dot, "{} [shape={}, label=\"1\"];", self.one().id(), config.terminal_shape)?;
        writeln!(dot, "}}")?;

        // Collect all nodes reachable from the roots.
        let mut visited: HashMap<u64, Zdd<K>> = HashMap::new();
        let mut stack: Vec<Zdd<K>> = roots.to_vec();
        while let Some(node) = stack.pop() {
            if visited.contains_key(&node.id()) {
                continue;
            }
            if let Some((_, take, skip)) = node.decision() {
                stack.push(take.clone());
                stack.push(skip.clone());
            }
            visited.insert(node.id(), node);
        }

        let mut nodes: Vec<&Zdd<K>> = visited.values().collect();
        nodes.sort_by_key(|node| node.id());

        // Group decision nodes by key level for proper ranking.
        let mut levels: BTreeMap<K, Vec<u64>> = BTreeMap::new();
        for node in &nodes {
            if let Some(key) = node.key() {
                levels.entry(key.clone()).or_default().push(node.id());
            }
        }

        for (key, ids) in &levels {
            writeln!(dot, "{{ rank=same")?;
            for &id in ids {
                writeln!(dot, "{} [label=\"{}\"];", id, key)?;
            }
            writeln!(dot, "}}")?;
        }

        // Take edges are solid, skip edges are dashed.
        for node in &nodes {
            if let Some((_, take, skip)) = node.decision() {
                writeln!(dot, "{} -- {} [style={}];", node.id(), take.id(), config.take_edge_style)?;
                writeln!(dot, "{} -- {} [style={}];", node.id(), skip.id(), config.skip_edge_style)?;
            }
        }

        // Render root markers at the top.
        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, root)?;
        }
        writeln!(dot, "}}")?;

        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -- {};", i, root.id())?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

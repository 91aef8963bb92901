//! Prerequisite / postrequisite dependency trees over the course graph.
//!
//! The store collects every REQUIRES path out of (or into) a course up to a bounded
//! depth. Paths are folded into a tree here and rendered with box-drawing connectors.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

pub const DEFAULT_DEPTH: u32 = 3;
pub const MAX_DEPTH: u32 = 5;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TreeNode {
    pub code: String,
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyTree {
    pub course_code: String,
    pub course_title: String,
    /// Courses this one requires, transitively.
    pub prerequisites: Vec<TreeNode>,
    /// Courses that require this one, transitively.
    pub postrequisites: Vec<TreeNode>,
}

impl DependencyTree {
    pub fn has_edges(&self) -> bool {
        !self.prerequisites.is_empty() || !self.postrequisites.is_empty()
    }

    /// ASCII rendering; `titles` maps course codes to titles for node labels.
    pub fn render(&self, titles: &HashMap<String, String>) -> String {
        let mut out = label(&self.course_code, Some(&self.course_title));
        out.push('\n');

        let sections = [
            ("Prerequisites", &self.prerequisites),
            ("Leads to", &self.postrequisites),
        ];
        for (i, (heading, nodes)) in sections.iter().enumerate() {
            let last = i == sections.len() - 1;
            out.push_str(if last { "└── " } else { "├── " });
            out.push_str(heading);
            out.push('\n');

            let prefix = if last { "    " } else { "│   " };
            if nodes.is_empty() {
                out.push_str(prefix);
                out.push_str("└── (none)\n");
            } else {
                render_nodes(nodes, prefix, titles, &mut out);
            }
        }
        out
    }
}

fn label(code: &str, title: Option<&str>) -> String {
    match title.filter(|t| !t.is_empty()) {
        Some(t) => format!("{code} - {t}"),
        None => code.to_string(),
    }
}

fn render_nodes(
    nodes: &[TreeNode],
    prefix: &str,
    titles: &HashMap<String, String>,
    out: &mut String,
) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i == nodes.len() - 1;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&label(&node.code, titles.get(&node.code).map(String::as_str)));
        out.push('\n');

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_nodes(&node.children, &child_prefix, titles, out);
    }
}

/// Folds root-exclusive paths into a forest, merging shared prefixes.
/// Children are ordered by course code.
pub fn build_forest(paths: &[Vec<String>]) -> Vec<TreeNode> {
    #[derive(Default)]
    struct Trie(BTreeMap<String, Trie>);

    let mut root = Trie::default();
    for path in paths {
        let mut cursor = &mut root;
        for code in path {
            cursor = cursor.0.entry(code.clone()).or_default();
        }
    }

    fn into_nodes(trie: Trie) -> Vec<TreeNode> {
        trie.0
            .into_iter()
            .map(|(code, sub)| TreeNode {
                code,
                children: into_nodes(sub),
            })
            .collect()
    }
    into_nodes(root)
}

/// Groups directed edges by their source, targets sorted and deduplicated.
pub fn adjacency(edges: Vec<(String, String)>) -> HashMap<String, Vec<String>> {
    let mut out: HashMap<String, Vec<String>> = HashMap::new();
    for (from, to) in edges {
        out.entry(from).or_default().push(to);
    }
    for targets in out.values_mut() {
        targets.sort();
        targets.dedup();
    }
    out
}

/// Every simple path leaving `root`, at most `depth` hops long (clamped to
/// 1..=MAX_DEPTH). The root itself is excluded, and no path visits a node
/// twice. Prefixes are emitted too, in lexicographic order.
pub fn walk_paths(
    edges: &HashMap<String, Vec<String>>,
    root: &str,
    depth: u32,
) -> Vec<Vec<String>> {
    fn descend(
        edges: &HashMap<String, Vec<String>>,
        root: &str,
        depth: usize,
        path: &mut Vec<String>,
        out: &mut Vec<Vec<String>>,
    ) {
        let current = path.last().map(String::as_str).unwrap_or(root);
        let Some(targets) = edges.get(current) else {
            return;
        };
        for next in targets {
            if next == root || path.contains(next) {
                continue;
            }
            path.push(next.clone());
            out.push(path.clone());
            if path.len() < depth {
                descend(edges, root, depth, path, out);
            }
            path.pop();
        }
    }

    let mut out = Vec::new();
    let depth = depth.clamp(1, MAX_DEPTH) as usize;
    descend(edges, root, depth, &mut Vec::new(), &mut out);
    out.sort();
    out
}

/// Every course code appearing in a forest.
pub fn collect_codes(nodes: &[TreeNode], out: &mut Vec<String>) {
    for node in nodes {
        out.push(node.code.clone());
        collect_codes(&node.children, out);
    }
}

/// Clamps a requested depth into 1..=MAX_DEPTH.
pub fn clamp_depth(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_DEPTH).clamp(1, MAX_DEPTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn titles() -> HashMap<String, String> {
        [
            ("CS101", "Programming Basics"),
            ("CS201", "Data Structures"),
            ("MA201", "Linear Algebra"),
            ("CS401", "Deep Learning"),
        ]
        .into_iter()
        .map(|(c, t)| (c.to_string(), t.to_string()))
        .collect()
    }

    #[test]
    fn test_forest_merges_prefixes() {
        let forest = build_forest(&[p(&["CS201"]), p(&["CS201", "CS101"]), p(&["MA201"])]);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].code, "CS201");
        assert_eq!(forest[0].children[0].code, "CS101");
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn test_shared_node_appears_under_each_parent() {
        let forest = build_forest(&[p(&["A", "Z"]), p(&["B", "Z"])]);
        let mut codes = Vec::new();
        collect_codes(&forest, &mut codes);
        assert_eq!(codes, vec!["A", "Z", "B", "Z"]);
    }

    #[test]
    fn test_render_full_tree() {
        let tree = DependencyTree {
            course_code: "CS301".to_string(),
            course_title: "Machine Learning".to_string(),
            prerequisites: build_forest(&[p(&["CS201", "CS101"]), p(&["MA201"])]),
            postrequisites: build_forest(&[p(&["CS401"])]),
        };
        let expected = "\
CS301 - Machine Learning
├── Prerequisites
│   ├── CS201 - Data Structures
│   │   └── CS101 - Programming Basics
│   └── MA201 - Linear Algebra
└── Leads to
    └── CS401 - Deep Learning
";
        assert_eq!(tree.render(&titles()), expected);
        assert!(tree.has_edges());
    }

    #[test]
    fn test_render_empty_sections() {
        let tree = DependencyTree {
            course_code: "CS101".to_string(),
            course_title: String::new(),
            prerequisites: vec![],
            postrequisites: vec![],
        };
        let expected = "\
CS101
├── Prerequisites
│   └── (none)
└── Leads to
    └── (none)
";
        assert_eq!(tree.render(&HashMap::new()), expected);
        assert!(!tree.has_edges());
    }

    #[test]
    fn test_untitled_nodes_show_code() {
        let tree = DependencyTree {
            course_code: "X1".to_string(),
            course_title: "Root".to_string(),
            prerequisites: build_forest(&[p(&["Q9"])]),
            postrequisites: vec![],
        };
        assert!(tree.render(&HashMap::new()).contains("│   └── Q9\n"));
    }

    #[test]
    fn test_depth_clamped() {
        assert_eq!(clamp_depth(None), DEFAULT_DEPTH);
        assert_eq!(clamp_depth(Some(0)), 1);
        assert_eq!(clamp_depth(Some(99)), MAX_DEPTH);
    }

    fn graph(edges: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        adjacency(
            edges
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_walk_stops_at_cycle_through_root() {
        let edges = graph(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(
            walk_paths(&edges, "A", MAX_DEPTH),
            vec![p(&["B"]), p(&["B", "C"])]
        );
    }

    #[test]
    fn test_walk_never_revisits_a_node() {
        let edges = graph(&[("A", "B"), ("B", "C"), ("C", "B"), ("C", "D")]);
        assert_eq!(
            walk_paths(&edges, "A", MAX_DEPTH),
            vec![p(&["B"]), p(&["B", "C"]), p(&["B", "C", "D"])]
        );
    }

    #[test]
    fn test_walk_ignores_self_loops() {
        let edges = graph(&[("A", "A"), ("A", "B"), ("B", "B")]);
        assert_eq!(walk_paths(&edges, "A", 3), vec![p(&["B"])]);
    }

    #[test]
    fn test_walk_depth_is_capped() {
        let edges = graph(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "E"),
            ("E", "F"),
            ("F", "G"),
            ("G", "H"),
        ]);
        let deep = walk_paths(&edges, "A", 99);
        assert_eq!(deep.len(), MAX_DEPTH as usize);
        assert_eq!(deep.iter().map(Vec::len).max(), Some(MAX_DEPTH as usize));

        assert_eq!(walk_paths(&edges, "A", 0), vec![p(&["B"])]);
        assert_eq!(walk_paths(&edges, "A", 2).len(), 2);
    }

    #[test]
    fn test_walk_branches_fold_into_forest() {
        let edges = graph(&[("CS301", "CS201"), ("CS301", "MA201"), ("CS201", "CS101")]);
        let paths = walk_paths(&edges, "CS301", DEFAULT_DEPTH);
        let forest = build_forest(&paths);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].code, "CS201");
        assert_eq!(forest[0].children[0].code, "CS101");
        assert_eq!(forest[1].code, "MA201");
    }

    #[test]
    fn test_walk_from_leaf_is_empty() {
        let edges = graph(&[("A", "B")]);
        assert!(walk_paths(&edges, "B", 3).is_empty());
        assert!(walk_paths(&edges, "missing", 3).is_empty());
    }
}

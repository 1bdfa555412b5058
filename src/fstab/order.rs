// Mount Order
//
// Topological sorting of fstab entries by their mount points, so that a
// mount point is never mounted before the ones it lives under.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{DfsPostOrder, Reversed};
use tracing::error;

use super::entry::FstabEntry;

/// Whether `dependent` has to be mounted after `root`
fn depends_on(dependent: &str, root: &str) -> bool {
    if dependent == root {
        return false;
    }

    let with_slash = |path: &str| {
        if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{path}/")
        }
    };
    with_slash(dependent).starts_with(&with_slash(root))
}

/// Graph of mount dependencies, with an edge `root -> dependent`.
///
/// Node `i` is `entries[i]`.
fn dependency_graph(entries: &[FstabEntry]) -> DiGraph<usize, ()> {
    let mut graph = DiGraph::with_capacity(entries.len(), 0);
    let nodes: Vec<NodeIndex> = (0..entries.len()).map(|i| graph.add_node(i)).collect();

    for (i, dependent) in entries.iter().enumerate() {
        for (j, root) in entries.iter().enumerate() {
            if depends_on(&dependent.file, &root.file) {
                graph.add_edge(nodes[j], nodes[i], ());
            }
        }
    }
    graph
}

/// Sort entries so every mount point comes after its ancestors.
///
/// Unrelated entries keep their relative order. If the dependencies form a
/// cycle (e.g. `/a` and `/a/`) the entries are returned unsorted.
pub fn sort_by_mount_order(entries: &[FstabEntry]) -> Vec<FstabEntry> {
    let graph = dependency_graph(entries);

    if let Err(cycle) = petgraph::algo::toposort(&graph, None) {
        error!(
            "Cycle in fstab mount points at {}, keeping the original order",
            entries[graph[cycle.node_id()]].file
        );
        return entries.to_vec();
    }

    // Post-order walk against the edges, starting from each entry in input
    // order, emits the ancestors of an entry right before it
    let reversed = Reversed(&graph);
    let mut dfs = DfsPostOrder::empty(reversed);
    let mut sorted = Vec::with_capacity(entries.len());

    for start in graph.node_indices() {
        dfs.move_to(start);
        while let Some(node) = dfs.next(reversed) {
            sorted.push(entries[graph[node]].clone());
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(mount_points: &[&str]) -> Vec<FstabEntry> {
        mount_points
            .iter()
            .map(|file| FstabEntry::new(format!("srv:{file}"), *file, "nfs", "defaults"))
            .collect()
    }

    fn files(entries: &[FstabEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.file.as_str()).collect()
    }

    #[test]
    fn test_depends_on() {
        assert!(depends_on("/a/b", "/a"));
        assert!(depends_on("/a/b", "/a/"));
        assert!(depends_on("/a", "/"));
        assert!(!depends_on("/ab", "/a"));
        assert!(!depends_on("/a", "/a"));
        assert!(!depends_on("/a", "/a/b"));
    }

    #[test]
    fn test_parents_first() {
        let input = entries(&["/home/user/data", "/srv", "/home/user", "/home"]);
        let sorted = sort_by_mount_order(&input);
        assert_eq!(
            files(&sorted),
            vec!["/home", "/home/user", "/home/user/data", "/srv"]
        );
    }

    #[test]
    fn test_unrelated_keep_order() {
        let input = entries(&["/b", "/a", "/ab", "/c"]);
        assert_eq!(files(&sort_by_mount_order(&input)), files(&input));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let sorted = sort_by_mount_order(&entries(&["/a/b", "/a", "/a"]));
        assert_eq!(files(&sorted), vec!["/a", "/a", "/a/b"]);
    }

    #[test]
    fn test_cycle_keeps_original_order() {
        let input = entries(&["/x/y", "/a/", "/a", "/x"]);
        assert_eq!(files(&sort_by_mount_order(&input)), files(&input));
    }

    #[test]
    fn test_dependency_graph_edges() {
        let graph = dependency_graph(&entries(&["/a/b", "/a", "/c"]));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge(NodeIndex::new(1), NodeIndex::new(0)));
    }

    #[test]
    fn test_deep_chain_given_backwards() {
        let sorted = sort_by_mount_order(&entries(&["/a/b/c/d", "/a/b/c", "/a/b", "/a"]));
        assert_eq!(files(&sorted), vec!["/a", "/a/b", "/a/b/c", "/a/b/c/d"]);
    }

    #[test]
    fn test_empty() {
        assert!(sort_by_mount_order(&[]).is_empty());
    }
}

//! The dependency graph.
//!
//! One node per component type, children pointing at the types its
//! constructor needs. Nodes live in an arena and are addressed by
//! [`NodeId`]; a key index deduplicates, so node identity is unique per
//! component type. The graph may hold several disconnected subgraphs.
//!
//! Assembly cannot fail: anything that could go wrong was already caught
//! during metadata extraction.

use std::collections::HashMap;

use tracing::debug;

use crate::key::ComponentKey;
use crate::metadata::ComponentMetadata;

/// Index of a node within the graph arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(usize);

/// One component type and the nodes it depends on.
pub(crate) struct DependencyNode {
    key: ComponentKey,
    children: Vec<NodeId>,
}

/// Arena of dependency nodes, deduplicated by component type.
pub(crate) struct DependencyGraph {
    nodes: Vec<DependencyNode>,
    index: HashMap<ComponentKey, NodeId>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds the graph for a run.
    ///
    /// Candidates are registered first, in registration order, so that
    /// node ids follow that order; the second pass attaches children in
    /// each component's dependency order. Every dependency is itself a
    /// candidate, so the second pass never creates nodes.
    pub fn assemble(
        metadata: &HashMap<ComponentKey, ComponentMetadata>,
        order: &[ComponentKey],
    ) -> Self {
        let mut graph = Self::new();

        for key in order {
            graph.register(key);
        }

        for key in order {
            let parent = graph.register(key);
            if let Some(meta) = metadata.get(key) {
                for dependency in &meta.dependencies {
                    let child = graph.register(dependency);
                    graph.attach(parent, child);
                }
            }
        }

        debug!(nodes = graph.len(), "Assembled dependency graph");
        graph
    }

    /// Returns the node for `key`, creating it if absent.
    pub fn register(&mut self, key: &ComponentKey) -> NodeId {
        if let Some(id) = self.index.get(key) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(DependencyNode {
            key: key.clone(),
            children: Vec::new(),
        });
        self.index.insert(key.clone(), id);
        id
    }

    /// Attaches `child` as a dependency of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
    }

    pub fn key(&self, node: NodeId) -> &ComponentKey {
        &self.nodes[node.0].key
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Looks up the node for `key`, if registered.
    pub fn node(&self, key: &ComponentKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::descriptor::ComponentDescriptor;
    use crate::metadata;

    struct A;
    struct B;
    struct C;
    struct D;

    fn meta_for(
        descriptors: &[ComponentDescriptor],
    ) -> (HashMap<ComponentKey, ComponentMetadata>, Vec<ComponentKey>) {
        let candidates: HashSet<ComponentKey> =
            descriptors.iter().map(|d| d.key().clone()).collect();
        let order: Vec<ComponentKey> = descriptors.iter().map(|d| d.key().clone()).collect();
        let table = descriptors
            .iter()
            .map(|d| (d.key().clone(), metadata::extract(d, &candidates).unwrap()))
            .collect();
        (table, order)
    }

    #[test]
    fn register_deduplicates_nodes() {
        let mut graph = DependencyGraph::new();
        let first = graph.register(&ComponentKey::of::<A>());
        let second = graph.register(&ComponentKey::of::<A>());
        assert_eq!(first, second);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn attach_keeps_dependency_order() {
        let mut graph = DependencyGraph::new();
        let a = graph.register(&ComponentKey::of::<A>());
        let b = graph.register(&ComponentKey::of::<B>());
        let c = graph.register(&ComponentKey::of::<C>());
        graph.attach(a, b);
        graph.attach(a, c);

        assert_eq!(graph.children(a), &[b, c]);
        assert_eq!(graph.key(b), &ComponentKey::of::<B>());
    }

    #[test]
    fn assemble_diamond() {
        // A depends on B and C, both depend on D.
        let (table, order) = meta_for(&[
            ComponentDescriptor::new::<A>(|_| Ok(A))
                .dependency::<B>("b")
                .dependency::<C>("c"),
            ComponentDescriptor::new::<B>(|_| Ok(B)).dependency::<D>("d"),
            ComponentDescriptor::new::<C>(|_| Ok(C)).dependency::<D>("d"),
            ComponentDescriptor::new::<D>(|_| Ok(D)),
        ]);

        let graph = DependencyGraph::assemble(&table, &order);
        assert_eq!(graph.len(), 4);

        let a = graph.node(&ComponentKey::of::<A>()).unwrap();
        let b = graph.node(&ComponentKey::of::<B>()).unwrap();
        let c = graph.node(&ComponentKey::of::<C>()).unwrap();
        let d = graph.node(&ComponentKey::of::<D>()).unwrap();

        assert_eq!(graph.children(a), &[b, c]);
        assert_eq!(graph.children(b), &[d]);
        assert_eq!(graph.children(c), &[d]);
        assert!(graph.children(d).is_empty());
    }

    #[test]
    fn node_ids_follow_registration_order() {
        let (table, order) = meta_for(&[
            ComponentDescriptor::new::<B>(|_| Ok(B)),
            ComponentDescriptor::new::<A>(|_| Ok(A)).dependency::<B>("b"),
        ]);

        let graph = DependencyGraph::assemble(&table, &order);
        let ids: Vec<NodeId> = graph.ids().collect();
        assert_eq!(graph.key(ids[0]), &ComponentKey::of::<B>());
        assert_eq!(graph.key(ids[1]), &ComponentKey::of::<A>());
    }
}

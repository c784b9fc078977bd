//! Household forests
//!
//! Each household owns an arena of nodes in grouping order. `children`
//! and `spouse` hold indices into that arena: a node is listed in at most
//! one `children` vector, and `spouse` is a link, not ownership. The
//! resolver only ever produces acyclic links, so walks always terminate.

use serde::{Serialize, Serializer};

use crate::components::{HouseKey, NodeId, NodeRole, VoterRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct FamilyNode {
    pub record: VoterRecord,
    pub children: Vec<NodeId>,
    pub spouse: Option<NodeId>,
    pub is_root: bool,
    pub is_influencer: bool,
    pub influence_score: Option<u32>,
}

impl FamilyNode {
    pub fn new(record: VoterRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
            spouse: None,
            is_root: true,
            is_influencer: false,
            influence_score: None,
        }
    }
}

/// All records sharing one house key, with the forest inferred from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Household {
    pub(crate) house_no: HouseKey,
    pub(crate) nodes: Vec<FamilyNode>,
    pub(crate) tree: Vec<NodeId>,
}

impl Household {
    pub fn house_no(&self) -> &HouseKey {
        &self.house_no
    }

    /// Number of records in the household, roots and relatives alike.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[FamilyNode] {
        &self.nodes
    }

    /// `None` for an id from another household's arena.
    pub fn node(&self, id: NodeId) -> Option<&FamilyNode> {
        self.nodes.get(id.0)
    }

    /// Ids stored in this household's own links always index its arena.
    pub(crate) fn node_at(&self, id: NodeId) -> &FamilyNode {
        &self.nodes[id.0]
    }

    /// Root ids in grouping order.
    pub fn tree(&self) -> &[NodeId] {
        &self.tree
    }

    pub fn roots(&self) -> impl Iterator<Item = &FamilyNode> + '_ {
        self.tree.iter().map(move |id| self.node_at(*id))
    }

    /// Pre-order walk of one root's subtree: the node, then its spouse's
    /// subtree, then each child's subtree. Empty for a foreign id.
    pub fn subtree(&self, root: NodeId) -> Subtree<'_> {
        let stack = match self.node(root) {
            Some(_) => vec![(root, NodeRole::Root)],
            None => Vec::new(),
        };
        Subtree {
            household: self,
            stack,
        }
    }

    /// Every record reachable from `root`: spouse subtrees and all
    /// descendants. This is what flattening emits, not the influence size.
    pub fn subtree_size(&self, root: NodeId) -> usize {
        self.subtree(root).count()
    }

    /// Every node of the household, root by root.
    pub fn walk(&self) -> impl Iterator<Item = (NodeId, NodeRole)> + '_ {
        self.tree.iter().flat_map(move |root| self.subtree(*root))
    }

    /// Nested view matching the front end's `{ houseNo, count, tree }` shape.
    pub fn nested(&self) -> HouseholdView<'_> {
        HouseholdView {
            house_no: &self.house_no,
            count: self.count(),
            tree: self
                .tree
                .iter()
                .map(|root| self.node_view(*root))
                .collect(),
        }
    }

    fn node_view(&self, id: NodeId) -> NodeView<'_> {
        let node = self.node_at(id);
        NodeView {
            record: &node.record,
            is_root: node.is_root,
            is_influencer: node.is_influencer,
            influence_score: node.influence_score,
            spouse: node.spouse.map(|spouse| Box::new(self.node_view(spouse))),
            children: node
                .children
                .iter()
                .map(|child| self.node_view(*child))
                .collect(),
        }
    }
}

impl Serialize for Household {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nested().serialize(serializer)
    }
}

/// Iterator returned by [`Household::subtree`].
pub struct Subtree<'a> {
    household: &'a Household,
    stack: Vec<(NodeId, NodeRole)>,
}

impl Iterator for Subtree<'_> {
    type Item = (NodeId, NodeRole);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, role) = self.stack.pop()?;
        let node = self.household.node_at(id);

        for child in node.children.iter().rev() {
            self.stack.push((*child, NodeRole::Child));
        }
        if let Some(spouse) = node.spouse {
            self.stack.push((spouse, NodeRole::Spouse));
        }

        Some((id, role))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdView<'a> {
    pub house_no: &'a HouseKey,
    pub count: usize,
    pub tree: Vec<NodeView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView<'a> {
    #[serde(flatten)]
    pub record: &'a VoterRecord,
    pub is_root: bool,
    pub is_influencer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influence_score: Option<u32>,
    pub spouse: Option<Box<NodeView<'a>>>,
    pub children: Vec<NodeView<'a>>,
}

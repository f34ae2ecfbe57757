use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::utils::{default_hash, MyHash};

const TAG_TERMINAL: u8 = 0;
const TAG_DECISION: u8 = 1;

/// The two kinds of diagram node.
#[derive(Debug)]
pub(crate) enum NodeKind<K> {
    /// `Terminal(false)` is the empty family, `Terminal(true)` is `{∅}`.
    Terminal(bool),
    /// A decision on `key`: `take` leads to the member sets containing
    /// `key` (stored without it), `skip` to the member sets that do not.
    Decision { key: K, take: Zdd<K>, skip: Zdd<K> },
}

/// An immutable diagram node. Only the factory constructs these.
#[derive(Debug)]
pub(crate) struct Node<K> {
    kind: NodeKind<K>,
    /// Creation serial, unique within a factory. Terminals are 0 and 1.
    id: u64,
    /// Precomputed structural hash.
    hash: u64,
}

impl<K> Node<K> {
    pub(crate) fn terminal(one: bool, id: u64) -> Self {
        Self {
            kind: NodeKind::Terminal(one),
            id,
            hash: default_hash(&(TAG_TERMINAL, one)),
        }
    }

    pub(crate) fn decision(key: K, take: Zdd<K>, skip: Zdd<K>, id: u64) -> Self
    where
        K: Hash,
    {
        let hash = default_hash(&(TAG_DECISION, &key, take.id(), skip.id()));
        Self {
            kind: NodeKind::Decision { key, take, skip },
            id,
            hash,
        }
    }
}

/// Structural equality, used only while interning. The branches are
/// already canonical, so comparing their identities suffices.
impl<K: Eq> PartialEq for Node<K> {
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash {
            return false;
        }
        match (&self.kind, &other.kind) {
            (NodeKind::Terminal(a), NodeKind::Terminal(b)) => a == b,
            (
                NodeKind::Decision { key: ka, take: ta, skip: sa },
                NodeKind::Decision { key: kb, take: tb, skip: sb },
            ) => ka == kb && ta == tb && sa == sb,
            _ => false,
        }
    }
}

impl<K: Eq> Eq for Node<K> {}

impl<K> MyHash for Node<K> {
    fn hash(&self) -> u64 {
        self.hash
    }
}

/// A handle to a canonical diagram node.
///
/// Cloning bumps a reference count. Equality and hashing go by node
/// identity: the factory keeps at most one live node per structural
/// value, so identity equality coincides with structural equality.
pub struct Zdd<K>(Rc<Node<K>>);

impl<K> Zdd<K> {
    pub(crate) fn from_rc(rc: Rc<Node<K>>) -> Self {
        Zdd(rc)
    }

    /// The node's creation serial within its factory.
    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.0.kind, NodeKind::Terminal(_))
    }

    /// True for the empty-family terminal.
    pub fn is_zero(&self) -> bool {
        matches!(self.0.kind, NodeKind::Terminal(false))
    }

    /// True for the `{∅}` terminal.
    pub fn is_one(&self) -> bool {
        matches!(self.0.kind, NodeKind::Terminal(true))
    }

    /// The decision key, `None` on terminals.
    pub fn key(&self) -> Option<&K> {
        match &self.0.kind {
            NodeKind::Terminal(_) => None,
            NodeKind::Decision { key, .. } => Some(key),
        }
    }

    /// The branch for member sets containing the key.
    pub fn take(&self) -> Option<&Zdd<K>> {
        match &self.0.kind {
            NodeKind::Terminal(_) => None,
            NodeKind::Decision { take, .. } => Some(take),
        }
    }

    /// The branch for member sets not containing the key.
    pub fn skip(&self) -> Option<&Zdd<K>> {
        match &self.0.kind {
            NodeKind::Terminal(_) => None,
            NodeKind::Decision { skip, .. } => Some(skip),
        }
    }

    /// Key and both branches of a decision node, `None` on terminals.
    pub fn decision(&self) -> Option<(&K, &Zdd<K>, &Zdd<K>)> {
        match &self.0.kind {
            NodeKind::Terminal(_) => None,
            NodeKind::Decision { key, take, skip } => Some((key, take, skip)),
        }
    }
}

impl<K> Clone for Zdd<K> {
    fn clone(&self) -> Self {
        Zdd(Rc::clone(&self.0))
    }
}

impl<K> PartialEq for Zdd<K> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K> Eq for Zdd<K> {}

impl<K> Hash for Zdd<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&self.0.id, state);
    }
}

impl<K> Display for Zdd<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0.id)
    }
}

impl<K: Debug> Debug for Zdd<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            NodeKind::Terminal(false) => write!(f, "Zdd(zero)"),
            NodeKind::Terminal(true) => write!(f, "Zdd(one)"),
            NodeKind::Decision { key, take, skip } => f
                .debug_struct("Zdd")
                .field("id", &self.0.id)
                .field("key", key)
                .field("take", &take.id())
                .field("skip", &skip.id())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(one: bool, id: u64) -> Zdd<u32> {
        Zdd::from_rc(Rc::new(Node::terminal(one, id)))
    }

    #[test]
    fn test_terminal_kinds() {
        let zero = terminal(false, 0);
        let one = terminal(true, 1);

        assert!(zero.is_terminal());
        assert!(zero.is_zero());
        assert!(!zero.is_one());
        assert!(one.is_one());
        assert_eq!(zero.key(), None);
        assert!(zero.decision().is_none());
    }

    #[test]
    fn test_handle_identity() {
        let zero = terminal(false, 0);
        let other = terminal(false, 0);

        // Structurally equal nodes behind distinct allocations are
        // different handles; only the factory makes them coincide.
        assert_eq!(zero, zero.clone());
        assert_ne!(zero, other);
    }

    #[test]
    fn test_structural_equality() {
        let zero = terminal(false, 0);
        let one = terminal(true, 1);

        let a = Node::decision(5u32, one.clone(), zero.clone(), 2);
        let b = Node::decision(5u32, one.clone(), zero.clone(), 99);
        let c = Node::decision(6u32, one.clone(), zero.clone(), 3);

        // Ids do not participate in structural equality.
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(MyHash::hash(&a), MyHash::hash(&b));
    }

    #[test]
    fn test_decision_accessors() {
        let zero = terminal(false, 0);
        let one = terminal(true, 1);
        let node = Zdd::from_rc(Rc::new(Node::decision(7u32, one.clone(), zero.clone(), 2)));

        assert_eq!(node.key(), Some(&7));
        assert_eq!(node.take(), Some(&one));
        assert_eq!(node.skip(), Some(&zero));
        let (key, take, skip) = node.decision().unwrap();
        assert_eq!(*key, 7);
        assert_eq!(take, &one);
        assert_eq!(skip, &zero);
        assert_eq!(node.to_string(), "@2");
    }
}

//! Parent-pointer trees holding the role and the resource hierarchy.
//!
//! Nodes live in an arena and point to their parent by index. Every node without an explicit
//! parent hangs below an implicit root node whose key is `None`. The root is always present, is
//! the universal ancestor of its tree and is what a `None` role or resource in a rule refers to.

use crate::error::{Error, Result};
use log::{trace, warn};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;


// Helper types ///////////////////////////////////////////////////////////////////////////////////


/// Index of a node within its `Tree`.
pub type NodeId = usize;

/// The root node is the first node of every tree.
pub const ROOT: NodeId = 0;

/// The hierarchy a tree represents. Used to name the axis in errors and log output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Role,
    Resource,
} // enum Axis

impl Axis {

    fn missing(self, key: String) -> Error {
        match self {
            Axis::Role     => Error::MissingRole(key),
            Axis::Resource => Error::MissingResource(key),
        } // match
    } // missing

    fn missing_parent(self, key: String) -> Error {
        match self {
            Axis::Role     => Error::MissingParentRole(key),
            Axis::Resource => Error::MissingParentResource(key),
        } // match
    } // missing_parent

} // impl Axis

impl fmt::Display for Axis {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::Role     => write!(f, "role"),
            Axis::Resource => write!(f, "resource"),
        } // match
    } // fmt

} // impl fmt::Display for Axis

/// Outcome of `Tree::add`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    /// A new node was inserted.
    Created(NodeId),
    /// The key was already defined; the tree is unchanged.
    Existing(NodeId),
} // enum Entry

impl Entry {

    /// The id of the node holding the key.
    pub fn id(self) -> NodeId {
        match self {
            Entry::Created(id) | Entry::Existing(id) => id,
        } // match
    } // id

    pub fn is_created(self) -> bool {
        matches!(self, Entry::Created(_))
    } // is_created

} // impl Entry


// Node ///////////////////////////////////////////////////////////////////////////////////////////


/// A single role or resource. The parent link is set once on insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<K> {
    key:    Option<K>,
    parent: Option<NodeId>,
} // struct Node

impl<K> Node<K> {

    /// The key of this node, `None` for the root.
    #[inline]
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    } // key

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    } // parent

    #[inline]
    pub fn is_root(&self) -> bool {
        self.key.is_none()
    } // is_root

    // rules are keyed by `Option<K>`, so lookups need the key in that shape
    #[inline]
    pub(crate) fn rule_key(&self) -> &Option<K> {
        &self.key
    } // rule_key

} // impl Node


// Chain //////////////////////////////////////////////////////////////////////////////////////////


/// Iterator from a node up through its ancestors, ending with the root.
pub struct Chain<'a, K> {
    tree: &'a Tree<K>,
    next: Option<NodeId>,
} // struct Chain

impl<'a, K> Iterator for Chain<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node  = self.tree.nodes.get(self.next?)?;
        self.next = node.parent;
        Some(node)
    } // next

} // impl Iterator for Chain


// Tree ///////////////////////////////////////////////////////////////////////////////////////////


/// An insertion ordered arena of nodes with a key index. Trees only grow; nodes are never
/// removed or re-parented.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    axis:  Axis,
    nodes: Vec<Node<K>>,
    index: HashMap<K, NodeId>,
} // struct Tree

impl<K> Tree<K> {

    /// Creates a tree holding nothing but the root.
    pub fn new(axis: Axis) -> Self {
        Tree{
            axis,
            nodes: vec![Node{key: None, parent: None}],
            index: HashMap::new(),
        } // Tree
    } // new

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    } // axis

    /// Returns the node for `id`, or `None` if `id` does not belong to this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id)
    } // node

    /// Walks from `id` to the root, yielding `id` itself first.
    pub fn chain(&self, id: NodeId) -> Chain<'_, K> {
        Chain{tree: self, next: Some(id)}
    } // chain

    /// Defined keys in insertion order. The root is not included.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.nodes.iter().filter_map(|node| node.key())
    } // keys

    /// Number of defined keys, not counting the root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    } // len

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    } // is_empty

} // impl Tree

impl<K: Clone + Eq + Hash + fmt::Debug> Tree<K> {

    /// Adds `key` below `parent`, or below the root if no parent is given. Adding a key that is
    /// already defined changes nothing and returns the existing node, whatever `parent` says.
    /// Returns an error if `parent` is not defined.
    pub fn add(&mut self, key: K, parent: Option<&K>) -> Result<Entry> {
        trace!("adding {} {:?} with parent {:?}", self.axis, key, parent);
        if let Some(&id) = self.index.get(&key) {
            trace!("    {} {:?} already defined", self.axis, key);
            return Ok(Entry::Existing(id));
        } // if

        let parent = match parent {
            Some(name) => match self.index.get(name) {
                Some(&id) => id,
                None      => {
                    warn!("missing parent {} {:?} for new {} {:?}", self.axis, name, self.axis, key);
                    return Err(self.axis.missing_parent(format!("{:?}", name)));
                }, // None
            }, // Some
            None => ROOT,
        }; // match
        let id = self.nodes.len();

        self.nodes.push(Node{key: Some(key.clone()), parent: Some(parent)});
        self.index.insert(key, id);
        Ok(Entry::Created(id))
    } // add

    /// Looks up a node by key. `None` refers to the root and is always found.
    pub fn find(&self, key: Option<&K>) -> Option<NodeId> {
        match key {
            Some(name) => self.index.get(name).copied(),
            None       => Some(ROOT),
        } // match
    } // find

    /// Returns true if `key` is defined.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    } // contains

    /// Returns the parent of `key`, or `None` if it hangs directly below the root. Returns an
    /// error if `key` is undefined.
    pub fn parent_of(&self, key: &K) -> Result<Option<&K>> {
        trace!("getting {} parent for: {:?}", self.axis, key);
        match self.index.get(key) {
            Some(&id) => Ok(self.chain(id).nth(1).and_then(|node| node.key())),
            None      => {
                warn!("missing {} while getting parent: {:?}", self.axis, key);
                Err(self.axis.missing(format!("{:?}", key)))
            }, // None
        } // match
    } // parent_of

    /// Returns `key` followed by its ancestors, most general last. The root is omitted. Returns an
    /// empty vector if `key` is undefined.
    pub fn lineage(&self, key: &K) -> Vec<&K> {
        trace!("getting {} lineage for: {:?}", self.axis, key);
        match self.index.get(key) {
            Some(&id) => self.chain(id).filter_map(|node| node.key()).collect(),
            None      => vec![],
        } // match
    } // lineage

    /// Returns the ancestors of `key`, most general last. Returns an empty vector if `key` is
    /// undefined.
    pub fn ancestors(&self, key: &K) -> Vec<&K> {
        let lin = self.lineage(key);

        if lin.len() > 1 {
            lin[1..].to_vec()
        } else {
            vec![]
        } // else
    } // ancestors

} // impl Tree


// Tests //////////////////////////////////////////////////////////////////////////////////////////


#[cfg(test)]
mod tests {

    use super::*;
    use test_env_log::test;

    fn setup_tree() -> Tree<&'static str> {
        let mut tree = Tree::new(Axis::Role);

        assert!(tree.add("guest", None).is_ok());
        assert!(tree.add("staff", Some(&"guest")).is_ok());
        assert!(tree.add("editor", Some(&"staff")).is_ok());
        assert!(tree.add("publisher", Some(&"editor")).is_ok());
        assert!(tree.add("admin", None).is_ok());

        tree
    } // setup_tree

    #[test]
    fn empty() {
        let tree: Tree<&str> = Tree::new(Axis::Resource);

        assert!(tree.is_empty());
        assert_eq!(tree.find(None), Some(ROOT));
        assert!(tree.node(ROOT).unwrap().is_root());
        assert_eq!(tree.find(Some(&"news")), None);
        assert_eq!(tree.keys().count(), 0);
    } // empty

    #[test]
    fn add() {
        let mut tree = Tree::new(Axis::Role);

        let guest = tree.add("guest", None).unwrap();

        assert!(guest.is_created());
        assert_eq!(tree.len(), 1);

        // nodes without parent hang below the root
        assert_eq!(tree.node(guest.id()).unwrap().parent(), Some(ROOT));

        let staff = tree.add("staff", Some(&"guest")).unwrap();

        assert!(staff.is_created());
        assert_eq!(tree.node(staff.id()).unwrap().parent(), Some(guest.id()));
        assert_eq!(tree.node(staff.id()).unwrap().key(), Some(&"staff"));
    } // add

    #[test]
    fn duplicate() {
        let mut tree = setup_tree();
        let before   = tree.find(Some(&"staff")).unwrap();

        // a differing parent is ignored for existing keys
        let res = tree.add("staff", Some(&"admin"));

        assert_eq!(res, Ok(Entry::Existing(before)));
        assert_eq!(tree.parent_of(&"staff"), Ok(Some(&"guest")));
        assert_eq!(tree.len(), 5);
    } // duplicate

    #[test]
    fn missing_parent() {
        let mut tree = setup_tree();

        let res = tree.add("intern", Some(&"nobody"));

        assert_eq!(res, Err(Error::MissingParentRole(String::from("\"nobody\""))));
        assert!(!tree.contains(&"intern"));
        assert_eq!(tree.len(), 5);

        let mut tree = Tree::new(Axis::Resource);

        assert_eq!(
            tree.add("latest", Some(&"news")),
            Err(Error::MissingParentResource(String::from("\"news\"")))
        );
        assert!(tree.is_empty());
    } // missing_parent

    #[test]
    fn parent_of() {
        let tree = setup_tree();

        assert_eq!(tree.parent_of(&"guest"), Ok(None));
        assert_eq!(tree.parent_of(&"editor"), Ok(Some(&"staff")));
        assert_eq!(tree.parent_of(&"nobody"), Err(Error::MissingRole(String::from("\"nobody\""))));
    } // parent_of

    #[test]
    fn lineage() {
        let tree = setup_tree();

        assert_eq!(tree.lineage(&"nobody"), Vec::<&&str>::new());
        assert_eq!(tree.lineage(&"guest"), vec![&"guest"]);
        assert_eq!(tree.lineage(&"publisher"), vec![&"publisher", &"editor", &"staff", &"guest"]);

        assert_eq!(tree.ancestors(&"guest"), Vec::<&&str>::new());
        assert_eq!(tree.ancestors(&"editor"), vec![&"staff", &"guest"]);
    } // lineage

    #[test]
    fn chain() {
        let tree = setup_tree();
        let id   = tree.find(Some(&"editor")).unwrap();

        let keys: Vec<Option<&&str>> = tree.chain(id).map(|node| node.key()).collect();

        assert_eq!(keys, vec![Some(&"editor"), Some(&"staff"), Some(&"guest"), None]);
    } // chain

    #[test]
    fn keys() {
        let tree = setup_tree();

        assert_eq!(
            tree.keys().copied().collect::<Vec<_>>(),
            vec!["guest", "staff", "editor", "publisher", "admin"]
        );
    } // keys

} // mod tests

//! In-memory access control list (ACL) with hierarchical roles and resources.
//!
//! An `Acl` answers one question: *is this role allowed this privilege on this resource?* It does
//! so by searching for the closest matching rule, where rules are explicit `allow` or `deny`
//! declarations and "closest" is defined by two trees, one for roles and one for resources.
//!
//! # Introduction
//!
//! In the sense of this implementation:
//! * a *resource* is an object to which access is controlled.
//! * a *role* is an object that may request access to a resource.
//! * a *privilege* is an action which may be granted on a resource to a role.
//!
//! Keys for all three may be any `Clone + Eq + Hash + Debug` type: string slices, integers or
//! your own enums.
//!
//! ## Resources
//!
//! Resources are organized in a tree structure and must be named uniquely. They are organized from
//! the general (tree root) to the specific (tree leafs). Queries on a specific resource search the
//! resource's ancestors for rules, allowing for simple inheritance of rules. A resource has at most
//! one parent resource, though this parent can have its own parent, and so on.
//!
//! ## Roles
//!
//! Roles form a tree as well: a role inherits the rules of its parent role. An "admin" role
//! inheriting from "authenticated" is allowed everything "authenticated" is allowed, unless a rule
//! on "admin" itself says otherwise.
//!
//! ## Wildcards
//!
//! Both trees have an implicit root which is the ancestor of every role and every resource. It is
//! addressed with `None`. A rule for the `None` role applies to all roles, a rule for the `None`
//! resource to all resources. A `None` privilege applies to every privilege that has no rule of
//! its own on the same role and resource.
//!
//! # Creating the Access Control List
//!
//! ```rust
//! use tiered_acl::Acl;
//!
//! let mut acl: Acl<&str, &str, &str> = Acl::new();
//!
//! acl.add_role("guest", None);
//! acl.add_role("staff", Some("guest"));
//! acl.add_role("editor", Some("staff"));
//! acl.add_role("admin", None);
//! ```
//!
//! ## Denied by default
//!
//! Until an "allow" rule applies, the `Acl` denies access to every privilege upon every resource by
//! every role. Roles and resources that were never added are always denied, whatever rules exist.
//!
//! # Defining Access Controls
//!
//! Rules are assigned from general to specific. `None` in an `allow()` or `deny()` call is the
//! wildcard; a single key is passed as `Some(key)` and several keys as a vector or array.
//!
//! ```rust
//! # use tiered_acl::Acl;
//! # let mut acl: Acl<&str, &str, &str> = Acl::new();
//! # acl.add_role("guest", None);
//! # acl.add_role("staff", Some("guest"));
//! # acl.add_role("editor", Some("staff"));
//! # acl.add_role("admin", None);
//! // guest may only view content
//! acl.allow(Some("guest"), None, Some("view"));
//!
//! // staff inherits view privilege from guest, but also needs additional privileges
//! acl.allow(Some("staff"), None, vec!["edit", "submit", "revise"]);
//!
//! // editor inherits view, edit, submit, and revise privileges from staff, but also needs
//! // additional privileges
//! acl.allow(Some("editor"), None, ["publish", "archive", "delete"]);
//!
//! // admin inherits nothing, but is allowed all privileges
//! acl.allow(Some("admin"), None, None);
//! ```
//!
//! # Querying an ACL
//!
//! ```rust
//! # use tiered_acl::Acl;
//! # let mut acl: Acl<&str, &str, &str> = Acl::new();
//! # acl.add_role("guest", None);
//! # acl.add_role("staff", Some("guest"));
//! # acl.add_role("editor", Some("staff"));
//! # acl.add_role("admin", None);
//! # acl.allow(Some("guest"), None, Some("view"));
//! # acl.allow(Some("staff"), None, vec!["edit", "submit", "revise"]);
//! # acl.allow(Some("editor"), None, ["publish", "archive", "delete"]);
//! # acl.allow(Some("admin"), None, None);
//! assert!( acl.is_allowed(Some("guest"), None, Some("view")));
//! assert!(!acl.is_allowed(Some("staff"), None, Some("publish")));
//! assert!( acl.is_allowed(Some("staff"), None, Some("revise")));
//!
//! // allowed because of inheritance from guest
//! assert!( acl.is_allowed(Some("editor"), None, Some("view")));
//!
//! // denied because no allow rule for 'update'
//! assert!(!acl.is_allowed(Some("editor"), None, Some("update")));
//!
//! // allowed because admin is allowed all privileges
//! assert!( acl.is_allowed(Some("admin"), None, Some("update")));
//! assert!( acl.is_allowed(Some("admin"), None, None));
//!
//! // unknown roles are denied
//! assert!(!acl.is_allowed(Some("intruder"), None, Some("view")));
//! ```
//!
//! # Precedence
//!
//! A query walks the resource from the queried resource up to the root while holding the queried
//! role. Only if no rule matched along that whole chain does it move to the parent role, starting
//! over at the queried resource. The first rule found decides. So the most specific resource wins
//! at a given role, and a role's own rules, even on the root resource, win over any rule of an
//! ancestor role.
//!
//! ```rust
//! # use tiered_acl::Acl;
//! # let mut acl: Acl<&str, &str, &str> = Acl::new();
//! # acl.add_role("guest", None);
//! # acl.add_role("staff", Some("guest"));
//! # acl.add_role("editor", Some("staff"));
//! # acl.add_role("admin", None);
//! # acl.allow(Some("guest"), None, Some("view"));
//! # acl.allow(Some("staff"), None, vec!["edit", "submit", "revise"]);
//! # acl.allow(Some("editor"), None, ["publish", "archive", "delete"]);
//! # acl.allow(Some("admin"), None, None);
//! acl.add_role("marketing", Some("staff"));
//!
//! acl.add_resource("newsletter", None);
//! acl.add_resource("news", None);
//! acl.add_resource("latest", Some("news"));
//! acl.add_resource("announcement", Some("news"));
//!
//! // marketing must be able to publish and archive newsletters and the latest news
//! acl.allow(Some("marketing"), vec!["newsletter", "latest"], vec!["publish", "archive"]);
//!
//! // staff (and marketing, by inheritance), are denied permission to revise the latest news
//! acl.deny(Some("staff"), Some("latest"), Some("revise"));
//!
//! // no role is allowed to archive announcements, unless a rule of its own says so
//! acl.deny(None, Some("announcement"), Some("archive"));
//!
//! assert!(!acl.is_allowed(Some("staff"), Some("newsletter"), Some("publish")));
//! assert!( acl.is_allowed(Some("marketing"), Some("newsletter"), Some("publish")));
//! assert!( acl.is_allowed(Some("marketing"), Some("latest"), Some("archive")));
//! assert!(!acl.is_allowed(Some("marketing"), Some("latest"), Some("revise")));
//! assert!(!acl.is_allowed(Some("staff"), Some("announcement"), Some("archive")));
//!
//! // editor and admin hold an allow rule of their own on the root resource, which is found
//! // before the rule for every role
//! assert!( acl.is_allowed(Some("editor"), Some("announcement"), Some("archive")));
//! assert!( acl.is_allowed(Some("admin"), Some("announcement"), Some("archive")));
//! ```

mod error;
pub mod privileges;
pub mod tree;

pub use error::{Error, Result};
pub use privileges::{Access, Keys, Privileges};
pub use tree::{Axis, Chain, Entry, Node, NodeId, Tree, ROOT};

use log::{debug, trace};
use std::fmt;
use std::hash::Hash;


// Acl ////////////////////////////////////////////////////////////////////////////////////////////


/// Main structure holding the role tree, the resource tree and the rules. Rules may name roles and
/// resources that are not defined (yet); such rules are kept but never match.
#[derive(Clone)]
pub struct Acl<R, S, P> {
    roles:     Tree<R>,
    resources: Tree<S>,
    rules:     Privileges<R, S, P>,
} // struct Acl

impl<R, S, P> Acl<R, S, P> {

    /// Creates an empty `Acl` which denies everything.
    pub fn new() -> Self {
        trace!("creating new acl");
        Acl{
            roles:     Tree::new(Axis::Role),
            resources: Tree::new(Axis::Resource),
            rules:     Privileges::new(),
        } // Acl
    } // new

    #[inline]
    pub fn roles(&self) -> &Tree<R> {
        &self.roles
    } // roles

    #[inline]
    pub fn resources(&self) -> &Tree<S> {
        &self.resources
    } // resources

    #[inline]
    pub fn rules(&self) -> &Privileges<R, S, P> {
        &self.rules
    } // rules

} // impl Acl

impl<R, S, P> Default for Acl<R, S, P> {

    fn default() -> Self {
        Self::new()
    } // default

} // impl Default for Acl

impl<R, S, P> Acl<R, S, P>
where
    R: Clone + Eq + Hash + fmt::Debug,
    S: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{

    // Roles //////////////////////////////////////////////////////////////////////////////////////

    /// Adds a role below `parent`, or below the root. Returns true if the role is defined
    /// afterwards, which includes the case that it already was. Returns false if `parent` is
    /// undefined.
    #[inline]
    pub fn add_role(&mut self, role: R, parent: Option<R>) -> bool {
        self.try_add_role(role, parent).is_ok()
    } // add_role

    /// Adds each role independently below `parent`. See `add_role`.
    pub fn add_roles<I: IntoIterator<Item = R>>(&mut self, roles: I, parent: Option<R>) -> Vec<bool> {
        roles.into_iter()
            .map(|role| self.add_role(role, parent.clone()))
            .collect()
    } // add_roles

    /// Like `add_role`, but tells a new role from an existing one and reports a missing parent.
    #[inline]
    pub fn try_add_role(&mut self, role: R, parent: Option<R>) -> Result<Entry> {
        self.roles.add(role, parent.as_ref())
    } // try_add_role

    /// Returns true if role is defined.
    #[inline]
    pub fn has_role(&self, role: &R) -> bool {
        self.roles.contains(role)
    } // has_role

    /// Returns the parent of role or None. Returns an error if role is undefined.
    #[inline]
    pub fn role_parent(&self, role: &R) -> Result<Option<&R>> {
        self.roles.parent_of(role)
    } // role_parent

    /// Returns the role followed by its ancestors. Returns an empty vector if role is undefined.
    #[inline]
    pub fn role_lineage(&self, role: &R) -> Vec<&R> {
        self.roles.lineage(role)
    } // role_lineage

    #[inline]
    pub fn role_ancestors(&self, role: &R) -> Vec<&R> {
        self.roles.ancestors(role)
    } // role_ancestors

    // Resources //////////////////////////////////////////////////////////////////////////////////

    /// Adds a resource below `parent`, or below the root. Returns true if the resource is defined
    /// afterwards, which includes the case that it already was. Returns false if `parent` is
    /// undefined.
    #[inline]
    pub fn add_resource(&mut self, resource: S, parent: Option<S>) -> bool {
        self.try_add_resource(resource, parent).is_ok()
    } // add_resource

    /// Adds each resource independently below `parent`. See `add_resource`.
    pub fn add_resources<I: IntoIterator<Item = S>>(&mut self, resources: I, parent: Option<S>) -> Vec<bool> {
        resources.into_iter()
            .map(|resource| self.add_resource(resource, parent.clone()))
            .collect()
    } // add_resources

    /// Like `add_resource`, but tells a new resource from an existing one and reports a missing
    /// parent.
    #[inline]
    pub fn try_add_resource(&mut self, resource: S, parent: Option<S>) -> Result<Entry> {
        self.resources.add(resource, parent.as_ref())
    } // try_add_resource

    /// Returns true if resource is defined.
    #[inline]
    pub fn has_resource(&self, resource: &S) -> bool {
        self.resources.contains(resource)
    } // has_resource

    /// Returns the parent of resource or None. Returns an error if resource is undefined.
    #[inline]
    pub fn resource_parent(&self, resource: &S) -> Result<Option<&S>> {
        self.resources.parent_of(resource)
    } // resource_parent

    /// Returns the resource followed by its ancestors. Returns an empty vector if resource is
    /// undefined.
    #[inline]
    pub fn resource_lineage(&self, resource: &S) -> Vec<&S> {
        self.resources.lineage(resource)
    } // resource_lineage

    #[inline]
    pub fn resource_ancestors(&self, resource: &S) -> Vec<&S> {
        self.resources.ancestors(resource)
    } // resource_ancestors

    // Rules //////////////////////////////////////////////////////////////////////////////////////

    /// Allows privileges for roles on resources. Each argument is a single key (`Some(key)`), a
    /// list of keys or the wildcard `None`; a rule is stored for every combination.
    pub fn allow<A, B, C>(&mut self, roles: A, resources: B, privileges: C)
    where
        A: Into<Keys<R>>,
        B: Into<Keys<S>>,
        C: Into<Keys<P>>,
    {
        self.rules.allow(roles.into(), resources.into(), privileges.into())
    } // allow

    /// Denies privileges for roles on resources. Takes the same arguments as `allow`.
    pub fn deny<A, B, C>(&mut self, roles: A, resources: B, privileges: C)
    where
        A: Into<Keys<R>>,
        B: Into<Keys<S>>,
        C: Into<Keys<P>>,
    {
        self.rules.deny(roles.into(), resources.into(), privileges.into())
    } // deny

    // Queries ////////////////////////////////////////////////////////////////////////////////////

    /// Returns true if privilege is allowed for role on resource.
    #[inline]
    pub fn is_allowed(&self, role: Option<R>, resource: Option<S>, privilege: Option<P>) -> bool {
        self.resolve(role, resource, privilege) == Some(Access::Allow)
    } // is_allowed

    /// Returns true if privilege is not allowed for role on resource, be it by a deny rule or
    /// for lack of any rule.
    #[inline]
    pub fn is_denied(&self, role: Option<R>, resource: Option<S>, privilege: Option<P>) -> bool {
        !self.is_allowed(role, resource, privilege)
    } // is_denied

    /// Returns the access granted by the closest matching rule. Returns `None` if role or resource
    /// is undefined or no rule applies.
    ///
    /// # Precedence
    ///
    /// Roles are iterated in the outer loop, from the queried role up to the root role. For each
    /// of them the resources are iterated in the inner loop, always starting over at the queried
    /// resource and going up to the root resource. In this inner loop the specific privilege is
    /// queried first, then the wildcard privilege. The first rule found is returned.
    pub fn resolve(&self, role: Option<R>, resource: Option<S>, privilege: Option<P>) -> Option<Access> {
        trace!("resolving {:?} on {:?} to {:?}", role, resource, privilege);
        let role_id = match self.roles.find(role.as_ref()) {
            Some(id) => id,
            None     => {
                trace!("    unknown role: {:?}", role);
                return None;
            }, // None
        }; // match
        let resource_id = match self.resources.find(resource.as_ref()) {
            Some(id) => id,
            None     => {
                trace!("    unknown resource: {:?}", resource);
                return None;
            }, // None
        }; // match

        for role_node in self.roles.chain(role_id) {
            for resource_node in self.resources.chain(resource_id) {
                let access = self.rules.get_modifier(role_node.rule_key(), resource_node.rule_key(), &privilege);

                if let Some(access) = access {
                    debug!(
                        "{:?} on {:?} to {:?}: {:?} by rule for {:?} on {:?}",
                        role, resource, privilege, access, role_node.key(), resource_node.key()
                    );
                    return Some(access);
                } // if let
            } // for
        } // for
        trace!("    no matching rule");
        None
    } // resolve

} // impl Acl

impl<R, S, P> fmt::Debug for Acl<R, S, P>
where
    R: fmt::Debug,
    S: fmt::Debug,
    P: fmt::Debug,
{

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.rules, f)
    } // fmt

} // impl fmt::Debug for Acl


// Tests //////////////////////////////////////////////////////////////////////////////////////////


// mod tests

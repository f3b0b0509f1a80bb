//! The rule table: a sparse role → resource → privilege → `Access` mapping.
//!
//! The table knows nothing about hierarchies. Roles and resources are matched exactly; `None`
//! stands for the root of that axis and is only found when the caller asks for it. Privileges are
//! flat, so the privilege wildcard is resolved here: a query for a specific privilege falls back to
//! the `None` privilege of the same role and resource.

use log::trace;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;


// Helper types ///////////////////////////////////////////////////////////////////////////////////


/// Allow or deny access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny
} // enum Access

/// Selects the keys a rule applies to along one axis: every key (`Any`), a single key or a list
/// of keys. Usually built through `From`: `None` becomes `Any`, `Some(key)` becomes `One(key)`,
/// vectors, arrays and slices become `Many`.
#[derive(Clone, Debug, PartialEq)]
pub enum Keys<K> {
    Any,
    One(K),
    Many(Vec<K>),
} // enum Keys

impl<K> Keys<K> {

    /// Normalizes to the list form with the wildcard as `None`. An empty `Many` yields nothing.
    fn expand(self) -> Vec<Option<K>> {
        match self {
            Keys::Any        => vec![None],
            Keys::One(key)   => vec![Some(key)],
            Keys::Many(keys) => keys.into_iter().map(Some).collect(),
        } // match
    } // expand

} // impl Keys

impl<K> From<Option<K>> for Keys<K> {

    fn from(key: Option<K>) -> Self {
        match key {
            Some(key) => Keys::One(key),
            None      => Keys::Any,
        } // match
    } // from

} // impl From<Option<K>> for Keys

impl<K> From<Vec<K>> for Keys<K> {

    fn from(keys: Vec<K>) -> Self {
        Keys::Many(keys)
    } // from

} // impl From<Vec<K>> for Keys

impl<K, const N: usize> From<[K; N]> for Keys<K> {

    fn from(keys: [K; N]) -> Self {
        Keys::Many(Vec::from(keys))
    } // from

} // impl From<[K; N]> for Keys

impl<K: Clone> From<&[K]> for Keys<K> {

    fn from(keys: &[K]) -> Self {
        Keys::Many(keys.to_vec())
    } // from

} // impl From<&[K]> for Keys


// Privileges /////////////////////////////////////////////////////////////////////////////////////


type PrivilegeAccess<P>       = HashMap<Option<P>, Access>;
type ResourcePrivileges<S, P> = HashMap<Option<S>, PrivilegeAccess<P>>;

/// Sparse rule storage. At most one `Access` per exact (role, resource, privilege) triple; setting
/// a triple again overwrites it. Rules are never removed.
#[derive(Clone)]
pub struct Privileges<R, S, P> {
    rules: HashMap<Option<R>, ResourcePrivileges<S, P>>,
} // struct Privileges

impl<R, S, P> Privileges<R, S, P> {

    pub fn new() -> Self {
        Privileges{rules: HashMap::new()}
    } // new

    /// Number of stored triples.
    pub fn len(&self) -> usize {
        self.rules.values()
            .flat_map(|resources| resources.values())
            .map(|privileges| privileges.len())
            .sum()
    } // len

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    } // is_empty

} // impl Privileges

impl<R, S, P> Default for Privileges<R, S, P> {

    fn default() -> Self {
        Self::new()
    } // default

} // impl Default for Privileges

impl<R, S, P> Privileges<R, S, P>
where
    R: Clone + Eq + Hash + fmt::Debug,
    S: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + fmt::Debug,
{

    /// Stores `Access::Allow` for every combination of the given keys.
    #[inline]
    pub fn allow(&mut self, roles: Keys<R>, resources: Keys<S>, privileges: Keys<P>) {
        self.set_modifier(roles, resources, privileges, Access::Allow)
    } // allow

    /// Stores `Access::Deny` for every combination of the given keys.
    #[inline]
    pub fn deny(&mut self, roles: Keys<R>, resources: Keys<S>, privileges: Keys<P>) {
        self.set_modifier(roles, resources, privileges, Access::Deny)
    } // deny

    /// Creates or overwrites the rule for every (role, resource, privilege) combination.
    pub fn set_modifier(&mut self, roles: Keys<R>, resources: Keys<S>, privileges: Keys<P>, access: Access) {
        let resources  = resources.expand();
        let privileges = privileges.expand();

        for role in roles.expand() {
            let role_rules = self.rules.entry(role.clone()).or_insert_with(HashMap::new);

            for resource in &resources {
                let resource_rules = role_rules.entry(resource.clone()).or_insert_with(HashMap::new);

                for privilege in &privileges {
                    trace!("setting {:?} for {:?} on {:?} to {:?}", access, role, resource, privilege);
                    resource_rules.insert(privilege.clone(), access);
                } // for
            } // for
        } // for
    } // set_modifier

    /// Returns the rule for exactly this role and resource. A specific privilege without a rule
    /// of its own falls back to the wildcard privilege rule.
    pub fn get_modifier(&self, role: &Option<R>, resource: &Option<S>, privilege: &Option<P>) -> Option<Access> {
        let privileges = self.rules.get(role)?.get(resource)?;

        // query specific privilege
        if privilege.is_some() {
            if let Some(access) = privileges.get(privilege) {
                trace!("    rule {:?} for {:?} on {:?} to {:?}", access, role, resource, privilege);
                return Some(*access);
            } // if let
        } // if
        // query wildcard privilege
        let access = privileges.get(&None).copied();

        if let Some(access) = access {
            trace!("    rule {:?} for {:?} on {:?} to None", access, role, resource);
        } // if
        access
    } // get_modifier

} // impl Privileges

impl<R, S, P> fmt::Debug for Privileges<R, S, P>
where
    R: fmt::Debug,
    S: fmt::Debug,
    P: fmt::Debug,
{

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.rules, f)
    } // fmt

} // impl fmt::Debug for Privileges


// Tests //////////////////////////////////////////////////////////////////////////////////////////


#[cfg(test)]
mod tests {

    use super::*;
    use test_env_log::test;

    type Table = Privileges<&'static str, &'static str, &'static str>;

    #[test]
    fn empty() {
        let table = Table::new();

        assert!(table.is_empty());
        assert_eq!(table.get_modifier(&None, &None, &None), None);
        assert_eq!(table.get_modifier(&Some("guest"), &Some("news"), &Some("view")), None);
    } // empty

    #[test]
    fn exact() {
        let mut table = Table::new();

        table.allow(Some("staff").into(), Some("news").into(), Some("edit").into());

        assert_eq!(table.get_modifier(&Some("staff"), &Some("news"), &Some("edit")), Some(Access::Allow));
        assert_eq!(table.get_modifier(&Some("staff"), &Some("news"), &Some("view")), None);

        // no role or resource fallback
        assert_eq!(table.get_modifier(&None, &Some("news"), &Some("edit")), None);
        assert_eq!(table.get_modifier(&Some("staff"), &None, &Some("edit")), None);
        assert_eq!(table.get_modifier(&Some("guest"), &Some("news"), &Some("edit")), None);

        // a specific rule does not answer the wildcard privilege
        assert_eq!(table.get_modifier(&Some("staff"), &Some("news"), &None), None);
    } // exact

    #[test]
    fn overwrite() {
        let mut table = Table::new();

        table.allow(Some("staff").into(), Some("news").into(), Some("edit").into());
        table.deny(Some("staff").into(), Some("news").into(), Some("edit").into());

        assert_eq!(table.get_modifier(&Some("staff"), &Some("news"), &Some("edit")), Some(Access::Deny));
        assert_eq!(table.len(), 1);
    } // overwrite

    #[test]
    fn wildcard_privilege() {
        let mut table = Table::new();

        table.allow(Some("staff").into(), Some("news").into(), Keys::Any);
        table.deny(Some("staff").into(), Some("news").into(), Some("delete").into());

        assert_eq!(table.get_modifier(&Some("staff"), &Some("news"), &Some("view")), Some(Access::Allow));
        assert_eq!(table.get_modifier(&Some("staff"), &Some("news"), &Some("delete")), Some(Access::Deny));
        assert_eq!(table.get_modifier(&Some("staff"), &Some("news"), &None), Some(Access::Allow));
    } // wildcard_privilege

    #[test]
    fn wildcard_role_and_resource() {
        let mut table = Table::new();

        table.allow(Keys::Any, Keys::Any, Keys::Any);

        assert_eq!(table.get_modifier(&None, &None, &None), Some(Access::Allow));
        assert_eq!(table.get_modifier(&None, &None, &Some("view")), Some(Access::Allow));
        assert_eq!(table.get_modifier(&Some("staff"), &None, &Some("view")), None);
    } // wildcard_role_and_resource

    #[test]
    fn cartesian() {
        let mut table = Table::new();

        table.deny(vec!["guest", "staff"].into(), ["news", "newsletter"].into(), (&["view", "edit", "publish"][..]).into());

        assert_eq!(table.len(), 12);
        for role in &["guest", "staff"] {
            for resource in &["news", "newsletter"] {
                for privilege in &["view", "edit", "publish"] {
                    assert_eq!(
                        table.get_modifier(&Some(*role), &Some(*resource), &Some(*privilege)),
                        Some(Access::Deny)
                    );
                } // for
            } // for
        } // for
    } // cartesian

    #[test]
    fn empty_list() {
        let mut table = Table::new();

        table.allow(Keys::Many(vec![]), Keys::Any, Keys::Any);

        assert!(table.is_empty());
    } // empty_list

    #[test]
    fn keys_from() {
        assert_eq!(Keys::from(None::<&str>), Keys::Any);
        assert_eq!(Keys::from(Some("view")), Keys::One("view"));
        assert_eq!(Keys::from(vec!["view", "edit"]), Keys::Many(vec!["view", "edit"]));
        assert_eq!(Keys::from(["view"]), Keys::Many(vec!["view"]));
    } // keys_from

} // mod tests

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::error::{DirectoryError, DirectoryResult};
use super::response::{ApiResponse, UserDetailResponse, UserListResponse};
use super::{Permission, Role, User, UserDetail};
use crate::{Count, FindOne, Id, KeyedStore, Repository};

/// Users, roles and permissions with their assignments.
///
/// Assignments are stored as id lists: `user_roles` keeps roles in the order
/// they were assigned, `role_permissions` the permissions a role grants.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: KeyedStore<User>,
    roles: KeyedStore<Role>,
    permissions: KeyedStore<Permission>,
    user_roles: HashMap<Id, Vec<Id>>,
    role_permissions: HashMap<Id, Vec<Id>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory preloaded with one administrator, two roles and the four
    /// `user:*` permissions.
    pub fn seeded() -> DirectoryResult<Self> {
        let mut directory = Self::new();

        directory.add_user(User::new(1, "admin", "admin@example.com"))?;

        directory.add_role(Role::new(1, "administrator").with_description("has every permission"))?;
        directory.add_role(Role::new(2, "member"))?;

        let permissions = [
            (1, "user:read", "view user information"),
            (2, "user:create", "create new users"),
            (3, "user:update", "update user information"),
            (4, "user:delete", "delete users"),
        ];
        for (id, code, description) in permissions {
            directory.add_permission(Permission::new(id, code).with_description(description))?;
            directory.grant_permission(1, id)?;
        }
        directory.grant_permission(2, 1)?;

        directory.assign_role(1, 1)?;
        directory.assign_role(1, 2)?;

        Ok(directory)
    }

    pub fn users(&self) -> &KeyedStore<User> {
        &self.users
    }

    pub fn roles(&self) -> &KeyedStore<Role> {
        &self.roles
    }

    pub fn permissions(&self) -> &KeyedStore<Permission> {
        &self.permissions
    }

    pub fn add_user(&mut self, user: User) -> DirectoryResult<()> {
        Ok(self.users.add(user)?)
    }

    pub fn add_role(&mut self, role: Role) -> DirectoryResult<()> {
        Ok(self.roles.add(role)?)
    }

    pub fn add_permission(&mut self, permission: Permission) -> DirectoryResult<()> {
        Ok(self.permissions.add(permission)?)
    }

    /// Remove a user and their role assignments.
    pub fn remove_user(&mut self, user_id: Id) -> Option<User> {
        self.user_roles.remove(&user_id);
        self.users.remove(user_id)
    }

    /// Remove a role, its grants, and every assignment of it.
    pub fn remove_role(&mut self, role_id: Id) -> Option<Role> {
        self.role_permissions.remove(&role_id);
        for roles in self.user_roles.values_mut() {
            roles.retain(|&id| id != role_id);
        }
        self.roles.remove(role_id)
    }

    /// Give a user a role. Assigning the same role twice is a no-op.
    pub fn assign_role(&mut self, user_id: Id, role_id: Id) -> DirectoryResult<()> {
        if !self.users.contains(user_id) {
            return Err(DirectoryError::UnknownUser(user_id));
        }
        if !self.roles.contains(role_id) {
            return Err(DirectoryError::UnknownRole(role_id));
        }

        let roles = self.user_roles.entry(user_id).or_default();
        if !roles.contains(&role_id) {
            roles.push(role_id);
            debug!(user_id, role_id, "role assigned");
        }
        Ok(())
    }

    /// Let a role grant a permission. Granting twice is a no-op.
    pub fn grant_permission(&mut self, role_id: Id, permission_id: Id) -> DirectoryResult<()> {
        if !self.roles.contains(role_id) {
            return Err(DirectoryError::UnknownRole(role_id));
        }
        if !self.permissions.contains(permission_id) {
            return Err(DirectoryError::UnknownPermission(permission_id));
        }

        let granted = self.role_permissions.entry(role_id).or_default();
        if !granted.contains(&permission_id) {
            granted.push(permission_id);
            debug!(role_id, permission_id, "permission granted");
        }
        Ok(())
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.find_one(|user| user.username == username)
    }

    pub fn active_user_count(&self) -> usize {
        self.users.count(|user| user.is_active)
    }

    /// Assemble a user's roles and effective permissions.
    ///
    /// Roles come in assignment order. Permissions are the union over all
    /// roles, each listed once, in the order they were added to the directory.
    pub fn user_detail(&self, user_id: Id) -> Option<UserDetail> {
        let user = self.users.get_by_id(user_id)?.clone();

        let role_ids = self
            .user_roles
            .get(&user_id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let roles: Vec<Role> = role_ids
            .iter()
            .filter_map(|&id| self.roles.get_by_id(id).cloned())
            .collect();

        let granted: HashSet<Id> = role_ids
            .iter()
            .filter_map(|id| self.role_permissions.get(id))
            .flatten()
            .copied()
            .collect();

        let permissions = self
            .permissions
            .iter()
            .filter(|p| granted.contains(&p.id))
            .cloned()
            .collect();

        Some(UserDetail {
            user,
            roles,
            permissions,
        })
    }

    /// Look up a user's detail, wrapped in an [`ApiResponse`].
    ///
    /// Resolves immediately; a missing user yields a 404 response rather than
    /// an error.
    pub async fn fetch_user_detail(&self, user_id: Id) -> UserDetailResponse {
        match self.user_detail(user_id) {
            Some(detail) => {
                debug!(user_id, "user detail fetched");
                ApiResponse::ok(detail)
            }
            None => {
                debug!(user_id, "user detail not found");
                ApiResponse::error(404, format!("user {user_id} not found"))
            }
        }
    }

    /// Every user, in insertion order.
    pub fn list_users(&self) -> UserListResponse {
        ApiResponse::ok(self.users.get_all().to_vec())
    }
}

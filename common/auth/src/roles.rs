use serde::{Deserialize, Serialize};

/// Sub-roles of the `user` entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Reader,
    Writer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Reader => "reader",
            UserRole::Writer => "writer",
        }
    }
}

/// Administrator roles. Each maps onto a fixed capability set; see
/// [`AdminPermissions::for_role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    ContentAdmin,
    UserAdmin,
    PublisherAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::ContentAdmin => "content_admin",
            AdminRole::UserAdmin => "user_admin",
            AdminRole::PublisherAdmin => "publisher_admin",
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, AdminRole::SuperAdmin)
    }
}

/// Capabilities an admin token can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageUsers,
    ManagePublishers,
    ManageContent,
    ManageSystem,
}

/// The capability flags embedded in every admin token.
///
/// Always derived from [`AdminRole`] via [`AdminPermissions::for_role`];
/// issued tokens never carry caller-supplied flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPermissions {
    pub can_manage_users: bool,
    pub can_manage_publishers: bool,
    pub can_manage_content: bool,
    pub can_manage_system: bool,
}

impl AdminPermissions {
    /// Static role → capability mapping. `SuperAdmin` holds everything;
    /// every other role holds exactly its namesake capability.
    pub fn for_role(role: AdminRole) -> Self {
        match role {
            AdminRole::SuperAdmin => Self {
                can_manage_users: true,
                can_manage_publishers: true,
                can_manage_content: true,
                can_manage_system: true,
            },
            AdminRole::ContentAdmin => Self {
                can_manage_users: false,
                can_manage_publishers: false,
                can_manage_content: true,
                can_manage_system: false,
            },
            AdminRole::UserAdmin => Self {
                can_manage_users: true,
                can_manage_publishers: false,
                can_manage_content: false,
                can_manage_system: false,
            },
            AdminRole::PublisherAdmin => Self {
                can_manage_users: false,
                can_manage_publishers: true,
                can_manage_content: false,
                can_manage_system: false,
            },
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers => self.can_manage_users,
            Capability::ManagePublishers => self.can_manage_publishers,
            Capability::ManageContent => self.can_manage_content,
            Capability::ManageSystem => self.can_manage_system,
        }
    }
}

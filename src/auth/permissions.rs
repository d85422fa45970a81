// Declarative route permission table for the authorization gate

use crate::auth::{error::AuthError, models::Role, token::SessionClaims};

pub const ANY_ACCOUNT: &[Role] = &[Role::Client, Role::Employee, Role::Admin];
pub const STAFF: &[Role] = &[Role::Employee, Role::Admin];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Roles allowed on one protected route pattern
#[derive(Debug, Clone, Copy)]
pub struct RoutePermission {
    pub route: &'static str,
    pub allowed: &'static [Role],
}

const fn permit(route: &'static str, allowed: &'static [Role]) -> RoutePermission {
    RoutePermission { route, allowed }
}

/// Every protected route pattern with its allow-list
pub const ROUTE_PERMISSIONS: &[RoutePermission] = &[
    permit("/account/", ANY_ACCOUNT),
    permit("/account/update/:account_id", ANY_ACCOUNT),
    permit("/account/update", ANY_ACCOUNT),
    permit("/account/update-password", ANY_ACCOUNT),
    permit("/account/employees", ADMIN_ONLY),
    permit("/account/delete/:account_id", ADMIN_ONLY),
    permit("/account/delete", ADMIN_ONLY),
    permit("/inv/", STAFF),
    permit("/inv/add-classification", STAFF),
    permit("/inv/add-inventory", STAFF),
    permit("/inv/edit/:inv_id", STAFF),
    permit("/inv/update", STAFF),
    permit("/inv/delete/:inv_id", STAFF),
    permit("/inv/delete", STAFF),
];

/// Lookup over a permission table, independent of the router
#[derive(Debug, Clone, Copy)]
pub struct RoutePermissions {
    entries: &'static [RoutePermission],
}

impl Default for RoutePermissions {
    fn default() -> Self {
        Self::new(ROUTE_PERMISSIONS)
    }
}

impl RoutePermissions {
    pub fn new(entries: &'static [RoutePermission]) -> Self {
        Self { entries }
    }

    pub fn allowed_roles(&self, route: &str) -> Option<&'static [Role]> {
        self.entries
            .iter()
            .find(|entry| entry.route == route)
            .map(|entry| entry.allowed)
    }

    pub fn routes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.route)
    }

    /// Compare the caller's role with the route's allow-list.
    ///
    /// A protected route missing from the table admits nobody.
    pub fn authorize(&self, route: &str, claims: &SessionClaims) -> Result<(), AuthError> {
        let allowed = match self.allowed_roles(route) {
            Some(allowed) => allowed,
            None => {
                tracing::error!("No permission entry for protected route {}", route);
                &[]
            }
        };

        if allowed.contains(&claims.account_type) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions {
                allowed: allowed.to_vec(),
                actual: claims.account_type,
            })
        }
    }
}

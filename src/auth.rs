#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

/// Decides who may manage answer keys.
pub trait Authorize: Send + Sync {
    fn role_of(&self, sender: i64) -> Role;
}

/// At most one administrator. Without one, everybody is a user.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleAdmin {
    admin_id: Option<i64>,
}

impl SingleAdmin {
    pub fn new(admin_id: Option<i64>) -> Self {
        Self { admin_id }
    }
}

impl Authorize for SingleAdmin {
    fn role_of(&self, sender: i64) -> Role {
        match self.admin_id {
            Some(admin_id) if admin_id == sender => Role::Admin,
            _ => Role::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configured_id_is_admin() {
        let auth = SingleAdmin::new(Some(42));
        assert_eq!(auth.role_of(42), Role::Admin);
        assert_eq!(auth.role_of(43), Role::User);
    }

    #[test]
    fn no_admin_configured() {
        let auth = SingleAdmin::new(None);
        assert_eq!(auth.role_of(0), Role::User);
        assert_eq!(auth.role_of(42), Role::User);
    }
}

use crate::entities;

/// Who is acting. Filled in once the identity provider reports a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCtx {
    pub user_id: Option<entities::UserId>,
}

impl SessionCtx {
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn signed_in(user_id: entities::UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppCtx {
    pub session: SessionCtx,
    pub share_base_url: String,
    pub app_name: String,
}

pub mod error;
pub mod role;
pub mod state;

pub use error::AccessError;
pub use role::Role;
pub use state::{
    assert_not_paused, assert_role, grant_role, has_role, is_paused, revoke_role, set_paused,
};

pub(crate) mod set_user_active;

pub use set_user_active::SetUserActiveInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::set_user_active::MockSetUserActiveInterface;

pub(crate) mod pulls;
pub(crate) mod stats;
pub(crate) mod teams;
pub(crate) mod users;

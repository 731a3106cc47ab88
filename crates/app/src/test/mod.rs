//! Test support backed by a shared `PostgreSQL` container.


pub(crate) use context::TestContext;
pub(crate) use db::TestDb;

//! Sales

mod handlers;
mod models;

pub(crate) use handlers::{create::CreateSale, index::ListSales};
pub(crate) use models::SaleResponse;

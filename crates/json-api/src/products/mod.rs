//! Products

mod handlers;
mod models;

pub(crate) use handlers::{
    create::CreateProduct, delete::DeleteProduct, get::RetrieveProduct, index::ListProducts,
    update::UpdateProduct,
};
pub(crate) use models::ProductResponse;
